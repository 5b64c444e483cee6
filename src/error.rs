use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 上传流程错误
    #[error("流程错误: {0}")]
    Orchestrator(#[from] OrchestratorError),
    /// 结果导出失败
    #[error("JSON导出失败: {0}")]
    Export(#[from] serde_json::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 服务地址不合法
    #[error("服务地址不合法 '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
    /// HTTP 客户端构建失败
    #[error("HTTP 客户端构建失败: {0}")]
    ClientBuildFailed(#[source] reqwest::Error),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 响应体结构校验失败
///
/// 解析是全有或全无的：出现该错误时不会产生任何模型实例。
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON 语法错误、缺少字段或字段类型不符
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// `result` 字段必须是 JSON 对象
    #[error("字段 `{field}` 必须是 JSON 对象")]
    NotAnObject { field: &'static str },
}

/// 传输层错误种类，供展示层分支使用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NetworkFailure,
    ServiceFailure,
    MalformedResponse,
}

/// 分析服务调用错误
///
/// 传输层从不重试，所有失败原样交给上传编排器。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// 请求未完成（超时、连接被重置、DNS 失败等）
    #[error("网络请求失败 ({endpoint}): {message}")]
    NetworkFailure { endpoint: String, message: String },
    /// 请求完成但服务返回错误状态
    #[error("服务返回错误状态 ({endpoint}): status={status}, detail={detail:?}")]
    ServiceFailure {
        endpoint: String,
        status: u16,
        detail: Option<String>,
    },
    /// 请求成功但响应体不符合约定结构
    #[error("响应解析失败 ({endpoint}): {message}")]
    MalformedResponse { endpoint: String, message: String },
}

impl TransportError {
    /// 错误种类
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransportError::NetworkFailure { .. } => ErrorKind::NetworkFailure,
            TransportError::ServiceFailure { .. } => ErrorKind::ServiceFailure,
            TransportError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
        }
    }

    /// 出错的端点
    pub fn endpoint(&self) -> &str {
        match self {
            TransportError::NetworkFailure { endpoint, .. }
            | TransportError::ServiceFailure { endpoint, .. }
            | TransportError::MalformedResponse { endpoint, .. } => endpoint,
        }
    }

    pub(crate) fn network(endpoint: impl Into<String>, source: &reqwest::Error) -> Self {
        TransportError::NetworkFailure {
            endpoint: endpoint.into(),
            message: describe_reqwest_error(source),
        }
    }

    pub(crate) fn malformed(endpoint: impl Into<String>, source: &ParseError) -> Self {
        TransportError::MalformedResponse {
            endpoint: endpoint.into(),
            message: source.to_string(),
        }
    }
}

/// 上传流程错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    /// 已有提交正在进行，新的提交被拒绝
    #[error("已有上传任务进行中 (提交 #{pending}), 本次提交被拒绝")]
    Busy { pending: u64 },
}

fn describe_reqwest_error(err: &reqwest::Error) -> String {
    let reason = if err.is_timeout() {
        "请求超时"
    } else if err.is_connect() {
        "连接失败"
    } else if err.is_body() || err.is_decode() {
        "读取响应体失败"
    } else {
        "请求失败"
    };
    format!("{}: {}", reason, err)
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
