//! 单文档分析结果
//!
//! 对应 `POST /analyze` 的响应体，以及把单文档 / 批量两种结果统一起来的 [`AnalysisResult`]。

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::models::batch::BatchAnalysisResult;
use crate::models::geometry::{Detection, PageSize};
use crate::models::raw::RawJson;
use crate::models::upload::SubmissionKind;

/// 单页分析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    /// 页码，文档内唯一且递增
    pub page_index: u32,
    pub page_size: PageSize,
    pub detections: Vec<Detection>,
    /// 标注后页面图像的相对地址，展示层负责拼接服务地址
    pub annotated_image_url: String,
}

impl PageResult {
    /// 按类别统计检测数量，保持首次出现的顺序
    pub fn category_counts(&self) -> IndexMap<&str, usize> {
        let mut counts = IndexMap::new();
        for detection in &self.detections {
            *counts.entry(detection.category.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

/// 服务端附带的检测统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionStatistics {
    pub total_detections: u64,
    #[serde(default)]
    pub class_statistics: IndexMap<String, u64>,
}

/// 单文档分析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleAnalysisResult {
    /// 服务端分配的任务 ID（不透明）
    pub job_id: String,
    /// 按原文档页序排列
    pub pages: Vec<PageResult>,
    /// 标注后 PDF 的相对地址
    pub annotated_pdf_url: String,
    /// 服务端内部的"文件 → 页 → 标注"结构，按接收时的字节原样保存
    pub result: RawJson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<DetectionStatistics>,
}

impl SingleAnalysisResult {
    /// 从响应体解析
    ///
    /// 缺少必填字段、类型不符或 `result` 不是对象时返回错误，不会产生部分结果。
    pub fn from_json(body: &[u8]) -> Result<Self, ParseError> {
        let parsed: Self = serde_json::from_slice(body)?;
        if !parsed.result.is_object() {
            return Err(ParseError::NotAnObject { field: "result" });
        }
        Ok(parsed)
    }

    /// 全部页面的检测总数
    pub fn total_detections(&self) -> usize {
        self.pages.iter().map(|page| page.detections.len()).sum()
    }

    /// 全文档按类别统计检测数量
    pub fn category_counts(&self) -> IndexMap<&str, usize> {
        let mut counts = IndexMap::new();
        for detection in self.pages.iter().flat_map(|page| &page.detections) {
            *counts.entry(detection.category.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

/// 当前结果：单文档或批量，二者互斥
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    Single(SingleAnalysisResult),
    Batch(BatchAnalysisResult),
}

impl AnalysisResult {
    pub fn job_id(&self) -> &str {
        match self {
            AnalysisResult::Single(result) => &result.job_id,
            AnalysisResult::Batch(result) => &result.job_id,
        }
    }

    /// 产生该结果的提交类型
    pub fn kind(&self) -> SubmissionKind {
        match self {
            AnalysisResult::Single(_) => SubmissionKind::Single,
            AnalysisResult::Batch(_) => SubmissionKind::Batch,
        }
    }

    pub fn as_single(&self) -> Option<&SingleAnalysisResult> {
        match self {
            AnalysisResult::Single(result) => Some(result),
            AnalysisResult::Batch(_) => None,
        }
    }

    pub fn as_batch(&self) -> Option<&BatchAnalysisResult> {
        match self {
            AnalysisResult::Batch(result) => Some(result),
            AnalysisResult::Single(_) => None,
        }
    }
}

impl From<SingleAnalysisResult> for AnalysisResult {
    fn from(result: SingleAnalysisResult) -> Self {
        AnalysisResult::Single(result)
    }
}

impl From<BatchAnalysisResult> for AnalysisResult {
    fn from(result: BatchAnalysisResult) -> Self {
        AnalysisResult::Batch(result)
    }
}
