/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use crate::config::Config;
use crate::models::{AnalysisResult, UploadFile};
use tracing::info;

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 当前配置
/// - `total_files`: 待提交文件数
pub fn log_startup(config: &Config, total_files: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 文档检测上传");
    info!("🌐 分析服务: {}", config.base_url());
    info!("⏱️ 请求超时: {} 秒", config.request_timeout_secs);
    info!("📄 待提交文件: {} 个", total_files);
    info!("{}", "=".repeat(60));
}

/// 记录单个文件开始处理
///
/// # 参数
/// - `index`: 文件序号（从 1 开始）
/// - `total`: 文件总数
/// - `file`: 待上传文件
pub fn log_file_start(index: usize, total: usize, file: &UploadFile) {
    info!("\n{}", "─".repeat(60));
    info!(
        "📦 [{}/{}] {} ({}, {})",
        index,
        total,
        file.name,
        file.kind(),
        format_size(file.len())
    );
    info!("{}", "─".repeat(60));
}

/// 记录分析结果概要
pub fn log_result_summary(result: &AnalysisResult) {
    match result {
        AnalysisResult::Single(single) => {
            info!(
                "✓ 任务 {}: {} 页, {} 个检测结果",
                single.job_id,
                single.pages.len(),
                single.total_detections()
            );
        }
        AnalysisResult::Batch(batch) => {
            info!(
                "✓ 任务 {}: {} 个文件 (成功 {}, 失败 {}), {} 个标注",
                batch.job_id,
                batch.files_attempted(),
                batch.succeeded().count(),
                batch.failed().count(),
                batch.total_annotations()
            );
        }
    }
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `total`: 总数
pub fn print_final_stats(success: usize, failed: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

/// 文件大小的可读形式
pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let size = bytes as f64;
    if size >= MB {
        format!("{:.1} MB", size / MB)
    } else if size >= KB {
        format!("{:.1} KB", size / KB)
    } else {
        format!("{} B", bytes)
    }
}
