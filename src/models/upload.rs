//! 待上传文件与提交分类

use std::fmt;

/// 被识别为压缩包的 MIME 类型
const ARCHIVE_CONTENT_TYPES: &[&str] = &[
    "application/zip",
    "application/x-zip-compressed",
    "application/x-zip",
    "multipart/x-zip",
];

/// 压缩包扩展名（大小写敏感）
const ARCHIVE_EXTENSION: &str = ".zip";

/// 一个待上传的文件：名称 + 声明的内容类型 + 字节
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// 该文件应走的提交类型
    pub fn kind(&self) -> SubmissionKind {
        SubmissionKind::classify(&self.name, &self.content_type)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// 提交类型：单文档分析或批量（压缩包）分析
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionKind {
    Single,
    Batch,
}

impl SubmissionKind {
    /// 分类规则
    ///
    /// 声明的内容类型是压缩包，或文件名以 `.zip` 结尾（大小写敏感），二者任一成立即为批量；
    /// 否则为单文档。
    pub fn classify(name: &str, content_type: &str) -> Self {
        if is_archive_content_type(content_type) || name.ends_with(ARCHIVE_EXTENSION) {
            SubmissionKind::Batch
        } else {
            SubmissionKind::Single
        }
    }

    /// 远端接口路径
    pub fn endpoint(self) -> &'static str {
        match self {
            SubmissionKind::Single => "/analyze",
            SubmissionKind::Batch => "/batch-analyze",
        }
    }

    /// multipart 表单字段名
    pub fn form_field(self) -> &'static str {
        match self {
            SubmissionKind::Single => "pdf_file",
            SubmissionKind::Batch => "zip_file",
        }
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionKind::Single => write!(f, "单文档"),
            SubmissionKind::Batch => write!(f, "批量"),
        }
    }
}

/// 忽略大小写与 MIME 参数（如 `; charset=...`）
fn is_archive_content_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    ARCHIVE_CONTENT_TYPES
        .iter()
        .any(|archive| archive.eq_ignore_ascii_case(essence))
}
