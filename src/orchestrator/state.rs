//! 上传流程状态
//!
//! 展示层通过订阅拿到的就是这里的 [`UploadState`]。

use chrono::{DateTime, Local};
use std::fmt;
use std::sync::Arc;

use crate::error::{ErrorKind, TransportError};
use crate::models::{AnalysisResult, SubmissionKind};

/// 提交编号，单调递增
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionId(pub u64);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 状态阶段（不携带数据）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// 一次提交的元信息
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionInfo {
    pub id: SubmissionId,
    pub kind: SubmissionKind,
    pub file_name: String,
    pub started_at: DateTime<Local>,
}

/// 上传流程状态
///
/// 任何时刻至多只有一个"当前结果"；结果与错误互斥。
#[derive(Debug, Clone, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Pending(SubmissionInfo),
    Succeeded {
        submission: SubmissionInfo,
        result: Arc<AnalysisResult>,
        finished_at: DateTime<Local>,
    },
    Failed {
        submission: SubmissionInfo,
        error: TransportError,
        finished_at: DateTime<Local>,
    },
}

impl UploadState {
    pub fn phase(&self) -> Phase {
        match self {
            UploadState::Idle => Phase::Idle,
            UploadState::Pending(_) => Phase::Pending,
            UploadState::Succeeded { .. } => Phase::Succeeded,
            UploadState::Failed { .. } => Phase::Failed,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, UploadState::Pending(_))
    }

    /// 当前（或最近一次终态）对应的提交
    pub fn submission(&self) -> Option<&SubmissionInfo> {
        match self {
            UploadState::Idle => None,
            UploadState::Pending(submission)
            | UploadState::Succeeded { submission, .. }
            | UploadState::Failed { submission, .. } => Some(submission),
        }
    }

    pub fn result(&self) -> Option<&Arc<AnalysisResult>> {
        match self {
            UploadState::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&TransportError> {
        match self {
            UploadState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error().map(TransportError::kind)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "空闲",
            Phase::Pending => "处理中",
            Phase::Succeeded => "成功",
            Phase::Failed => "失败",
        };
        write!(f, "{}", name)
    }
}
