use crate::error::FileError;
use crate::models::upload::UploadFile;
use std::path::Path;
use tokio::fs;

/// 从本地路径读取文件并转换为 UploadFile 对象
///
/// 内容类型按扩展名推断，未知扩展名使用 `application/octet-stream`。
pub async fn load_upload_file(path: &Path) -> Result<UploadFile, FileError> {
    if !path.exists() {
        return Err(FileError::NotFound {
            path: path.display().to_string(),
        });
    }

    let bytes = fs::read(path).await.map_err(|source| FileError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let content_type = content_type_for(&name);
    tracing::debug!("已读取文件 {} ({} 字节, {})", name, bytes.len(), content_type);

    Ok(UploadFile::new(name, content_type, bytes))
}

/// 按文件名推断内容类型
pub fn content_type_for(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
