//! 批量分析结果
//!
//! 对应 `POST /batch-analyze` 的响应体。每个文件的结果相互独立：
//! 某个文件失败只体现在该文件的 [`BatchFileOutcome::Failure`] 中。

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::ParseError;
use crate::models::analysis::DetectionStatistics;
use crate::models::geometry::{BoundingBox, PageSize};

/// 批量结果中的单个标注（检测结果 + 面积）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchAnnotation {
    pub category: String,
    pub bbox: BoundingBox,
    /// 约等于 bbox 宽高之积，不保证精确
    pub area: f64,
}

/// 批量结果中的单页
///
/// `annotations` 保持服务端的线上结构：每个元素是只有一个键的映射
/// （`annotation_N` → 标注）。读取时请使用 [`BatchPageResult::annotations`]。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPageResult {
    #[serde(rename = "annotations")]
    pub raw_annotations: Vec<IndexMap<String, BatchAnnotation>>,
    pub page_size: PageSize,
}

impl BatchPageResult {
    /// 按顺序展开全部标注
    pub fn annotations(&self) -> impl Iterator<Item = (&str, &BatchAnnotation)> + '_ {
        self.raw_annotations
            .iter()
            .flat_map(|entry| entry.iter().map(|(key, annotation)| (key.as_str(), annotation)))
    }

    pub fn annotation_count(&self) -> usize {
        self.raw_annotations.iter().map(IndexMap::len).sum()
    }
}

/// 批量中单个文件的处理结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchFileOutcome {
    /// 页键（如 `page_1`）→ 单页结果
    Success(IndexMap<String, BatchPageResult>),
    /// 该文件处理失败
    Failure { error: String },
}

impl BatchFileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BatchFileOutcome::Success(_))
    }

    pub fn pages(&self) -> Option<&IndexMap<String, BatchPageResult>> {
        match self {
            BatchFileOutcome::Success(pages) => Some(pages),
            BatchFileOutcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            BatchFileOutcome::Failure { error } => Some(error),
            BatchFileOutcome::Success(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for BatchFileOutcome {
    /// `error` 键的值是字符串时视为失败，其余对象按"页键 → 单页结果"解析
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut entries = IndexMap::<String, JsonValue>::deserialize(deserializer)?;

        if matches!(entries.get("error"), Some(JsonValue::String(_))) {
            if let Some(JsonValue::String(error)) = entries.shift_remove("error") {
                return Ok(BatchFileOutcome::Failure { error });
            }
        }

        let mut pages = IndexMap::with_capacity(entries.len());
        for (page_key, page) in entries {
            let page: BatchPageResult = serde_json::from_value(page)
                .map_err(|e| de::Error::custom(format!("page `{}`: {}", page_key, e)))?;
            pages.insert(page_key, page);
        }
        Ok(BatchFileOutcome::Success(pages))
    }
}

/// 批量分析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchAnalysisResult {
    pub job_id: String,
    /// 服务端报告的已处理文件数
    pub files_processed: u64,
    /// 文件名 → 处理结果，保持服务端返回顺序
    pub result: IndexMap<String, BatchFileOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<DetectionStatistics>,
}

impl BatchAnalysisResult {
    /// 从响应体解析，失败时不产生部分结果
    pub fn from_json(body: &[u8]) -> Result<Self, ParseError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// 结果中出现的文件数（成功 + 失败）
    pub fn files_attempted(&self) -> usize {
        self.result.len()
    }

    /// `files_processed` 是否与结果条目数一致
    pub fn is_count_consistent(&self) -> bool {
        usize::try_from(self.files_processed).map_or(false, |count| count == self.files_attempted())
    }

    pub fn succeeded(&self) -> impl Iterator<Item = (&str, &IndexMap<String, BatchPageResult>)> + '_ {
        self.result
            .iter()
            .filter_map(|(name, outcome)| outcome.pages().map(|pages| (name.as_str(), pages)))
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.result
            .iter()
            .filter_map(|(name, outcome)| outcome.error().map(|error| (name.as_str(), error)))
    }

    /// 全部成功文件的标注总数
    pub fn total_annotations(&self) -> usize {
        self.succeeded()
            .flat_map(|(_, pages)| pages.values())
            .map(BatchPageResult::annotation_count)
            .sum()
    }
}
