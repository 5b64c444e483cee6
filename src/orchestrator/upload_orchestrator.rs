//! 上传编排器 - 编排层
//!
//! ## 职责
//!
//! 1. **分类**：根据文件名与内容类型决定走单文档还是批量接口
//! 2. **调度**：调用传输层，同一时刻至多一个请求在途
//! 3. **状态机**：`Idle → Pending → Succeeded | Failed`，`reset` 回到 `Idle`
//! 4. **通知**：每次状态变化都推送给订阅者（展示层）
//!
//! 状态保存在 `tokio::sync::watch` 通道中，编排器是唯一写者。
//! 每次状态转换都是一次同步的"读-改-写"，只有网络请求本身会挂起。
//! 请求返回时只有当状态仍是同一次提交的 `Pending` 才会被采纳，
//! 否则（期间被 reset 或已开始新的提交）结果直接丢弃。
//! 调用方在请求返回前丢弃 `submit` 的 future 时，该提交的 `Pending` 回到 `Idle`。

use chrono::Local;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::clients::AnalysisTransport;
use crate::error::{OrchestratorError, TransportError};
use crate::models::{AnalysisResult, SubmissionKind, UploadFile};
use crate::orchestrator::state::{Phase, SubmissionId, SubmissionInfo, UploadState};

/// 一次提交的最终去向
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// 成功，结果已成为当前结果
    Succeeded(Arc<AnalysisResult>),
    /// 失败，错误已记录为当前状态
    Failed(TransportError),
    /// 请求返回时该提交已不是当前提交，结果被丢弃
    Discarded,
}

/// 上传编排器
pub struct UploadOrchestrator {
    transport: Arc<dyn AnalysisTransport>,
    state: watch::Sender<UploadState>,
    last_id: AtomicU64,
}

impl UploadOrchestrator {
    /// 创建新的编排器，初始状态为 `Idle`
    pub fn new(transport: Arc<dyn AnalysisTransport>) -> Self {
        let (state, _) = watch::channel(UploadState::Idle);
        Self {
            transport,
            state,
            last_id: AtomicU64::new(0),
        }
    }

    /// 订阅状态变化
    pub fn subscribe(&self) -> watch::Receiver<UploadState> {
        self.state.subscribe()
    }

    /// 当前状态的快照
    pub fn snapshot(&self) -> UploadState {
        self.state.borrow().clone()
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase()
    }

    /// 提交文件
    ///
    /// # 参数
    /// - `file`: 待上传文件
    ///
    /// # 返回
    /// - `Err(Busy)`: 已有提交在途，本次提交被拒绝，状态不变
    /// - `Ok(outcome)`: 本次提交的去向；传输失败也是 `Ok(SubmitOutcome::Failed)`
    pub async fn submit(&self, file: UploadFile) -> Result<SubmitOutcome, OrchestratorError> {
        let kind = file.kind();
        let submission = self.begin(&file, kind)?;
        let id = submission.id;
        let guard = PendingGuard {
            state: &self.state,
            id,
            armed: true,
        };

        info!(
            "[提交 {}] 📤 开始{}分析: {} ({} 字节, {})",
            id,
            kind,
            file.name,
            file.len(),
            file.content_type
        );

        let resolved = match kind {
            SubmissionKind::Single => self
                .transport
                .submit_single(&file)
                .await
                .map(AnalysisResult::from),
            SubmissionKind::Batch => self.transport.submit_batch(&file).await.map(|batch| {
                if !batch.is_count_consistent() {
                    warn!(
                        "[提交 {}] ⚠️ files_processed={} 与结果条目数 {} 不一致",
                        id,
                        batch.files_processed,
                        batch.files_attempted()
                    );
                }
                AnalysisResult::from(batch)
            }),
        };

        Ok(self.finish(guard, resolved.map(Arc::new)))
    }

    /// 回到 `Idle` 并清除当前结果
    ///
    /// 在途的提交不会被取消，但其结果返回时会被丢弃。
    ///
    /// # 返回
    /// 返回 reset 之前的阶段
    pub fn reset(&self) -> Phase {
        let mut previous = Phase::Idle;
        self.state.send_if_modified(|state| {
            previous = state.phase();
            if previous == Phase::Idle {
                return false;
            }
            *state = UploadState::Idle;
            true
        });

        match previous {
            Phase::Idle => debug!("已是空闲状态，无需重置"),
            Phase::Pending => warn!("⚠️ 在途提交被放弃，其结果将被丢弃"),
            Phase::Succeeded | Phase::Failed => info!("🔄 已重置，清除上一次的{}结果", previous),
        }

        previous
    }

    /// `* → Pending`，在途时拒绝
    fn begin(&self, file: &UploadFile, kind: SubmissionKind) -> Result<SubmissionInfo, OrchestratorError> {
        let mut begun = Err(OrchestratorError::Busy { pending: 0 });

        self.state.send_if_modified(|state| {
            if let UploadState::Pending(current) = state {
                begun = Err(OrchestratorError::Busy {
                    pending: current.id.0,
                });
                return false;
            }

            let submission = SubmissionInfo {
                id: SubmissionId(self.last_id.fetch_add(1, Ordering::SeqCst) + 1),
                kind,
                file_name: file.name.clone(),
                started_at: Local::now(),
            };
            *state = UploadState::Pending(submission.clone());
            begun = Ok(submission);
            true
        });

        if let Err(e) = &begun {
            warn!("⚠️ {} ({})", e, file.name);
        }
        begun
    }

    /// `Pending → Succeeded | Failed`，只对仍在途的同一提交生效
    fn finish(
        &self,
        mut guard: PendingGuard<'_>,
        resolved: Result<Arc<AnalysisResult>, TransportError>,
    ) -> SubmitOutcome {
        guard.armed = false;
        let id = guard.id;
        let finished_at = Local::now();

        let applied = self.state.send_if_modified(|state| match std::mem::take(state) {
            UploadState::Pending(submission) if submission.id == id => {
                *state = match &resolved {
                    Ok(result) => UploadState::Succeeded {
                        submission,
                        result: Arc::clone(result),
                        finished_at,
                    },
                    Err(error) => UploadState::Failed {
                        submission,
                        error: error.clone(),
                        finished_at,
                    },
                };
                true
            }
            other => {
                *state = other;
                false
            }
        });

        if !applied {
            info!("[提交 {}] 结果返回时已不是当前提交，丢弃", id);
            return SubmitOutcome::Discarded;
        }

        match resolved {
            Ok(result) => {
                info!("[提交 {}] ✅ 分析完成 (job_id: {})", id, result.job_id());
                SubmitOutcome::Succeeded(result)
            }
            Err(error) => {
                error!("[提交 {}] ❌ 分析失败: {}", id, error);
                SubmitOutcome::Failed(error)
            }
        }
    }
}

/// 在途提交的守卫
///
/// `submit` 的 future 在请求返回前被丢弃（超时、`select!` 等）时，
/// 若状态仍是该提交的 `Pending` 则回到 `Idle`，后续提交不会一直被判为在途。
struct PendingGuard<'a> {
    state: &'a watch::Sender<UploadState>,
    id: SubmissionId,
    armed: bool,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let id = self.id;
        let abandoned = self.state.send_if_modified(|state| {
            if !matches!(state, UploadState::Pending(submission) if submission.id == id) {
                return false;
            }
            *state = UploadState::Idle;
            true
        });

        if abandoned {
            warn!("[提交 {}] ⚠️ 调用方在请求返回前放弃，状态回到空闲", id);
        }
    }
}
