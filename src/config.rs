use crate::error::{AppResult, ConfigError, FileError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 程序配置文件
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 分析服务地址
    pub api_base_url: String,
    /// 单次请求总超时（秒）
    pub request_timeout_secs: u64,
    /// 建立连接超时（秒）
    pub connect_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 300,
            connect_timeout_secs: 10,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载配置：配置文件（可选）→ 环境变量覆盖
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_env_overrides()?)
    }

    /// 从 TOML 文本解析配置，缺省字段使用默认值
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 从 TOML 文件加载配置
    pub fn from_file(path: &Path) -> Result<Self, FileError> {
        let content = std::fs::read_to_string(path).map_err(|source| FileError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| FileError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 用环境变量覆盖已有配置
    ///
    /// 支持 `ANALYSIS_API_BASE_URL` / `REQUEST_TIMEOUT_SECS` / `CONNECT_TIMEOUT_SECS` /
    /// `VERBOSE_LOGGING`，值不合法时直接报错而不是静默回退。
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(url) = std::env::var("ANALYSIS_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(secs) = parse_env_var("REQUEST_TIMEOUT_SECS", "u64")? {
            self.request_timeout_secs = secs;
        }
        if let Some(secs) = parse_env_var("CONNECT_TIMEOUT_SECS", "u64")? {
            self.connect_timeout_secs = secs;
        }
        if let Some(verbose) = parse_env_var("VERBOSE_LOGGING", "bool")? {
            self.verbose_logging = verbose;
        }
        Ok(self)
    }

    /// 规范化后的服务地址：去掉首尾空白与末尾的 `/`
    ///
    /// 传输层请求与展示层拼接相对地址都使用这个值。
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim().trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn parse_env_var<T: std::str::FromStr>(
    var_name: &str,
    expected_type: &str,
) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => {
            let parsed = value.trim().parse::<T>().ok();
            parsed
                .map(Some)
                .ok_or_else(|| ConfigError::EnvVarParseFailed {
                    var_name: var_name.to_string(),
                    value,
                    expected_type: expected_type.to_string(),
                })
        }
        Err(_) => Ok(None),
    }
}
