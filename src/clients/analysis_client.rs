/// 文档分析服务客户端
///
/// 封装与远端分析服务的两个接口交互：`/analyze`（单文档）与 `/batch-analyze`（压缩包）
use crate::config::Config;
use crate::error::{ConfigError, ParseError, TransportError};
use crate::models::{BatchAnalysisResult, SingleAnalysisResult, SubmissionKind, UploadFile};
use crate::utils::logging::truncate_text;
use futures::future::BoxFuture;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

/// 错误详情在日志与错误信息中保留的最大字符数
const MAX_DETAIL_CHARS: usize = 300;

/// 分析服务传输层
///
/// 每次调用恰好发出一次请求：不重试、不缓存、不去重。
/// 编排器只依赖该 trait，测试中可以替换为假实现。
pub trait AnalysisTransport: Send + Sync {
    /// 提交单个文档
    fn submit_single<'a>(
        &'a self,
        file: &'a UploadFile,
    ) -> BoxFuture<'a, Result<SingleAnalysisResult, TransportError>>;

    /// 提交压缩包（压缩包内容由服务端校验）
    fn submit_batch<'a>(
        &'a self,
        file: &'a UploadFile,
    ) -> BoxFuture<'a, Result<BatchAnalysisResult, TransportError>>;
}

/// 基于 reqwest 的分析服务客户端
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisClient {
    /// 创建新的分析服务客户端
    ///
    /// 服务地址必须是 http/https 绝对地址，规范化规则见 [`Config::base_url`]。
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let base_url = config.base_url().to_string();

        let parsed = reqwest::Url::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: config.api_base_url.clone(),
            message: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: config.api_base_url.clone(),
                message: format!("不支持的协议: {}", parsed.scheme()),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(ConfigError::ClientBuildFailed)?;

        Ok(Self { http, base_url })
    }

    /// 服务地址（已去掉末尾 `/`）
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 上传文件并解析响应
    ///
    /// # 参数
    /// - `kind`: 提交类型，决定接口路径与表单字段名
    /// - `file`: 待上传文件
    /// - `parse`: 响应体解析函数
    async fn post_file<T>(
        &self,
        kind: SubmissionKind,
        file: &UploadFile,
        parse: fn(&[u8]) -> Result<T, ParseError>,
    ) -> Result<T, TransportError> {
        let endpoint = kind.endpoint();
        let url = format!("{}{}", self.base_url, endpoint);

        debug!(
            "POST {} 字段 {} 文件 {} ({} 字节, {})",
            url,
            kind.form_field(),
            file.name,
            file.len(),
            file.content_type
        );

        let part = file_part(file).map_err(|e| TransportError::network(endpoint, &e))?;
        let form = Form::new().part(kind.form_field(), part);

        let started = Instant::now();
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("{} 请求失败: {}", endpoint, e);
                TransportError::network(endpoint, &e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = extract_detail(&body);
            warn!("{} 返回错误状态 {}: {:?}", endpoint, status, detail);
            return Err(TransportError::ServiceFailure {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                detail,
            });
        }

        let body = response.bytes().await.map_err(|e| {
            warn!("{} 读取响应体失败: {}", endpoint, e);
            TransportError::network(endpoint, &e)
        })?;

        info!(
            "✓ {} 响应 {} ({} 字节, 耗时 {} ms)",
            endpoint,
            status,
            body.len(),
            started.elapsed().as_millis()
        );

        parse(&body).map_err(|e| {
            warn!("{} 响应结构不合法: {}", endpoint, e);
            TransportError::malformed(endpoint, &e)
        })
    }
}

impl AnalysisTransport for HttpAnalysisClient {
    fn submit_single<'a>(
        &'a self,
        file: &'a UploadFile,
    ) -> BoxFuture<'a, Result<SingleAnalysisResult, TransportError>> {
        Box::pin(self.post_file(SubmissionKind::Single, file, SingleAnalysisResult::from_json))
    }

    fn submit_batch<'a>(
        &'a self,
        file: &'a UploadFile,
    ) -> BoxFuture<'a, Result<BatchAnalysisResult, TransportError>> {
        Box::pin(self.post_file(SubmissionKind::Batch, file, BatchAnalysisResult::from_json))
    }
}

/// 构建 multipart 文件段，声明的内容类型不合法时退回 `application/octet-stream`
fn file_part(file: &UploadFile) -> reqwest::Result<Part> {
    let part = || Part::bytes(file.bytes.clone()).file_name(file.name.clone());

    match part().mime_str(&file.content_type) {
        Ok(part) => Ok(part),
        Err(_) => {
            debug!(
                "内容类型 '{}' 不合法，改用 application/octet-stream",
                file.content_type
            );
            part().mime_str("application/octet-stream")
        }
    }
}

/// 从错误响应体中提取详情
///
/// 优先使用 `{"detail": ...}` 字段，否则使用截断后的原始文本
fn extract_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(json) = serde_json::from_str::<Value>(body) {
        match json.get("detail") {
            Some(Value::String(detail)) => return Some(truncate_text(detail, MAX_DETAIL_CHARS)),
            Some(detail) => return Some(truncate_text(&detail.to_string(), MAX_DETAIL_CHARS)),
            None => {}
        }
    }

    Some(truncate_text(body, MAX_DETAIL_CHARS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail() {
        assert_eq!(
            extract_detail(r#"{"detail": "Uploaded file is not a PDF"}"#),
            Some("Uploaded file is not a PDF".to_string())
        );
        assert_eq!(
            extract_detail(r#"{"detail": [{"loc": ["body", "pdf_file"], "msg": "field required"}]}"#),
            Some(r#"[{"loc":["body","pdf_file"],"msg":"field required"}]"#.to_string())
        );
        assert_eq!(
            extract_detail("Internal Server Error"),
            Some("Internal Server Error".to_string())
        );
        assert_eq!(extract_detail("  \n"), None);
    }

    #[test]
    fn test_long_detail_is_truncated() {
        let body = "x".repeat(MAX_DETAIL_CHARS + 50);
        let detail = extract_detail(&body).unwrap();
        assert_eq!(detail.chars().count(), MAX_DETAIL_CHARS + 3);
        assert!(detail.ends_with("..."));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let config = Config {
            api_base_url: "http://localhost:8000/".to_string(),
            ..Config::default()
        };
        let client = HttpAnalysisClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        for url in ["localhost:8000", "not a url", "ftp://files.example.com"] {
            let config = Config {
                api_base_url: url.to_string(),
                ..Config::default()
            };
            assert!(
                matches!(HttpAnalysisClient::new(&config), Err(ConfigError::InvalidBaseUrl { .. })),
                "{url} 应被拒绝"
            );
        }
    }
}
