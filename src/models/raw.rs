//! 原样保留的 JSON 片段

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value as JsonValue;

/// 按接收时的字节原样保存的 JSON
///
/// 序列化时逐字节写回，比较时按原始文本比较。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawJson(Box<RawValue>);

impl RawJson {
    /// 原始 JSON 文本
    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    pub fn is_object(&self) -> bool {
        self.as_str().trim_start().starts_with('{')
    }

    /// 转换为可遍历的 JSON 值
    pub fn to_value(&self) -> serde_json::Result<JsonValue> {
        serde_json::from_str(self.as_str())
    }

    /// 格式化输出（用于导出查看）
    pub fn to_pretty_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_value()?)
    }
}

impl PartialEq for RawJson {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl TryFrom<String> for RawJson {
    type Error = serde_json::Error;

    fn try_from(json: String) -> Result<Self, Self::Error> {
        RawValue::from_string(json).map(RawJson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Serialize)]
    struct Wrapper {
        result: RawJson,
    }

    #[test]
    fn test_raw_json_keeps_original_text() {
        let body = r#"{"result":{"b.pdf":{"page_1":{"annotations":[],"page_size":{"width":100,"height":100.0}}},"a.pdf":{}}}"#;
        let wrapper: Wrapper = serde_json::from_str(body).unwrap();

        assert!(wrapper.result.is_object());
        assert_eq!(
            wrapper.result.as_str(),
            r#"{"b.pdf":{"page_1":{"annotations":[],"page_size":{"width":100,"height":100.0}}},"a.pdf":{}}"#
        );
        assert_eq!(serde_json::to_string(&wrapper).unwrap(), body);
    }

    #[test]
    fn test_raw_json_detects_non_object() {
        let raw = RawJson::try_from("[1, 2]".to_string()).unwrap();
        assert!(!raw.is_object());
        assert!(RawJson::try_from("{not json".to_string()).is_err());
    }
}
