//! # Doc Inspect Client
//!
//! 把单个 PDF 或包含多个文档的 ZIP 提交给远端文档检测服务（二维码、印章等），
//! 并把两种结构不同的响应统一成一个结果模型供展示。
//!
//! ## 架构设计
//!
//! ### ① 模型层（Models）
//! - `models/` - 单文档 / 批量结果的类型定义与全有或全无的解析
//! - `UploadFile` / `SubmissionKind` - 待上传文件与提交分类规则
//!
//! ### ② 传输层（Clients）
//! - `clients/` - `AnalysisTransport` trait 与基于 reqwest 的实现
//! - 每次调用恰好一次请求，不重试
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/` - 上传状态机，同一时刻至多一个提交在途，过期结果丢弃
//!
//! ### ④ 展示层（Presentation）
//! - `presenter` - 渲染结果与状态，拼接相对地址
//! - `app` - 命令行入口的流程组织
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod presenter;
pub mod utils;

// 重新导出常用类型
pub use clients::{AnalysisTransport, HttpAnalysisClient};
pub use config::Config;
pub use error::{AppError, AppResult, ErrorKind, OrchestratorError, TransportError};
pub use models::{AnalysisResult, BatchAnalysisResult, SingleAnalysisResult, SubmissionKind, UploadFile};
pub use orchestrator::{Phase, SubmitOutcome, UploadOrchestrator, UploadState};
