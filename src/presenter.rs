//! 展示层适配
//!
//! 把编排器的状态与结果模型渲染成终端文本。相对地址（标注图片 / 标注 PDF）
//! 在这里才与服务地址拼接，模型中始终保存服务端返回的原值。

use crate::error::ErrorKind;
use crate::models::{AnalysisResult, BatchAnalysisResult, BatchFileOutcome, SingleAnalysisResult};
use crate::orchestrator::UploadState;

/// 将服务返回的相对地址解析为完整地址
///
/// 已是绝对地址（http/https）时原样返回。
pub fn resolve_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// 渲染结果报告
pub fn render_result(result: &AnalysisResult, base_url: &str) -> String {
    match result {
        AnalysisResult::Single(single) => render_single(single, base_url),
        AnalysisResult::Batch(batch) => render_batch(batch),
    }
}

/// 导出用 JSON
///
/// 单文档导出服务端的 `result` 结构，批量导出完整响应。
pub fn render_json(result: &AnalysisResult) -> serde_json::Result<String> {
    match result {
        AnalysisResult::Single(single) => single.result.to_pretty_string(),
        AnalysisResult::Batch(batch) => serde_json::to_string_pretty(batch),
    }
}

/// 面向用户的失败提示，只区分错误种类
pub fn failure_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::NetworkFailure => "上传失败：无法连接分析服务或请求超时",
        ErrorKind::ServiceFailure => "上传失败：分析服务返回错误",
        ErrorKind::MalformedResponse => "上传失败：分析服务返回了无法识别的结果",
    }
}

/// 一行状态描述
pub fn render_state(state: &UploadState) -> String {
    match state {
        UploadState::Idle => "空闲，等待上传".to_string(),
        UploadState::Pending(submission) => format!(
            "处理中: {} ({}分析, 开始于 {})",
            submission.file_name,
            submission.kind,
            submission.started_at.format("%H:%M:%S")
        ),
        UploadState::Succeeded {
            submission,
            result,
            finished_at,
        } => format!(
            "完成: {} (job_id: {}, 耗时 {:.1} 秒)",
            submission.file_name,
            result.job_id(),
            elapsed_secs(submission.started_at, *finished_at)
        ),
        UploadState::Failed {
            submission, error, ..
        } => format!(
            "失败: {} - {}",
            submission.file_name,
            failure_message(error.kind())
        ),
    }
}

fn elapsed_secs(started: chrono::DateTime<chrono::Local>, finished: chrono::DateTime<chrono::Local>) -> f64 {
    (finished - started).num_milliseconds() as f64 / 1000.0
}

fn render_single(result: &SingleAnalysisResult, base_url: &str) -> String {
    let mut lines = vec![
        format!("分析完成 (job_id: {})", result.job_id),
        format!("标注 PDF: {}", resolve_url(base_url, &result.annotated_pdf_url)),
        format!(
            "共 {} 页, {} 个检测结果",
            result.pages.len(),
            result.total_detections()
        ),
    ];

    for page in &result.pages {
        lines.push(String::new());
        lines.push(format!(
            "第 {} 页 ({} x {})",
            page.page_index, page.page_size.width, page.page_size.height
        ));
        lines.push(format!(
            "  标注图片: {}",
            resolve_url(base_url, &page.annotated_image_url)
        ));

        if page.detections.is_empty() {
            lines.push("  未检测到目标".to_string());
            continue;
        }

        let summary = page
            .category_counts()
            .iter()
            .map(|(category, count)| format!("{} x{}", category, count))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("  汇总: {}", summary));

        lines.extend(page.detections.iter().map(|detection| {
            let bbox = &detection.bbox;
            format!(
                "  - {} {:.1}% @ ({}, {}) {}x{}",
                detection.category,
                detection.confidence_percent(),
                bbox.x,
                bbox.y,
                bbox.width,
                bbox.height
            )
        }));
    }

    lines.join("\n")
}

fn render_batch(result: &BatchAnalysisResult) -> String {
    let mut lines = vec![
        format!("批量分析完成 (job_id: {})", result.job_id),
        format!(
            "已处理文件: {} (成功 {}, 失败 {})",
            result.files_processed,
            result.succeeded().count(),
            result.failed().count()
        ),
    ];

    for (file_name, outcome) in &result.result {
        lines.push(String::new());
        match outcome {
            BatchFileOutcome::Success(pages) => {
                let annotations: usize = pages.values().map(|page| page.annotation_count()).sum();
                lines.push(format!(
                    "✓ {}: {} 页, {} 个标注",
                    file_name,
                    pages.len(),
                    annotations
                ));
                for (page_key, page) in pages {
                    lines.push(format!(
                        "  {} ({} x {}): {} 个标注",
                        page_key,
                        page.page_size.width,
                        page.page_size.height,
                        page.annotation_count()
                    ));
                    lines.extend(page.annotations().map(|(key, annotation)| {
                        format!("    - {} {} 面积 {:.0}", key, annotation.category, annotation.area)
                    }));
                }
            }
            BatchFileOutcome::Failure { error } => {
                lines.push(format!("✗ {}: {}", file_name, error));
            }
        }
    }

    lines.join("\n")
}
