//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! app (CLI 输入 / 展示输出)
//!     ↓
//! orchestrator::UploadOrchestrator (分类 + 状态机)
//!     ↓
//! clients::AnalysisTransport (单次网络请求)
//!     ↓
//! models (响应解析)
//! ```

pub mod state;
pub mod upload_orchestrator;

// 重新导出主要类型
pub use state::{Phase, SubmissionId, SubmissionInfo, UploadState};
pub use upload_orchestrator::{SubmitOutcome, UploadOrchestrator};
