use crate::clients::{AnalysisTransport, HttpAnalysisClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::load_upload_file;
use crate::orchestrator::{SubmitOutcome, UploadOrchestrator};
use crate::presenter;
use crate::utils::logging::{log_file_start, log_result_summary, log_startup, print_final_stats};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// 输出方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// 文本报告
    Report,
    /// 原始 JSON
    Json,
}

/// 应用主结构
pub struct App {
    config: Config,
    /// 规范化后的服务地址，用于拼接结果中的相对地址
    base_url: String,
    orchestrator: Arc<UploadOrchestrator>,
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        let client = HttpAnalysisClient::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(client)))
    }

    /// 使用自定义传输层初始化
    pub fn with_transport(config: Config, transport: Arc<dyn AnalysisTransport>) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            config,
            orchestrator: Arc::new(UploadOrchestrator::new(transport)),
        }
    }

    /// 展示结果时使用的服务地址
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn orchestrator(&self) -> &Arc<UploadOrchestrator> {
        &self.orchestrator
    }

    /// 运行应用主逻辑：逐个提交文件，每个文件之间重置状态
    pub async fn run(&self, files: &[PathBuf], mode: OutputMode) -> ProcessingStats {
        log_startup(&self.config, files.len());
        let watcher = self.spawn_state_watcher();

        let mut stats = ProcessingStats {
            total: files.len(),
            ..Default::default()
        };

        for (idx, path) in files.iter().enumerate() {
            match self.process_file(idx + 1, files.len(), path, mode).await {
                Ok(true) => stats.success += 1,
                Ok(false) => stats.failed += 1,
                Err(e) => {
                    error!("❌ {} 处理过程中发生错误: {}", path.display(), e);
                    stats.failed += 1;
                }
            }
            self.orchestrator.reset();
        }

        watcher.abort();
        print_final_stats(stats.success, stats.failed, stats.total);

        stats
    }

    /// 处理单个文件
    ///
    /// # 返回
    /// 返回是否分析成功
    async fn process_file(
        &self,
        index: usize,
        total: usize,
        path: &Path,
        mode: OutputMode,
    ) -> AppResult<bool> {
        let file = load_upload_file(path).await?;

        log_file_start(index, total, &file);

        match self.orchestrator.submit(file).await? {
            SubmitOutcome::Succeeded(result) => {
                log_result_summary(&result);
                let output = match mode {
                    OutputMode::Report => presenter::render_result(&result, &self.base_url),
                    OutputMode::Json => presenter::render_json(&result)?,
                };
                println!("{}", output);
                Ok(true)
            }
            SubmitOutcome::Failed(error) => {
                eprintln!("{}", presenter::failure_message(error.kind()));
                eprintln!("  {}", error);
                Ok(false)
            }
            SubmitOutcome::Discarded => {
                warn!("⚠️ {} 的结果已被丢弃", path.display());
                Ok(false)
            }
        }
    }

    /// 订阅状态变化并记录到日志
    fn spawn_state_watcher(&self) -> tokio::task::JoinHandle<()> {
        let mut receiver = self.orchestrator.subscribe();
        tokio::spawn(async move {
            while receiver.changed().await.is_ok() {
                let line = presenter::render_state(&receiver.borrow_and_update());
                debug!("状态变化: {}", line);
            }
        })
    }
}
