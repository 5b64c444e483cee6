#![allow(dead_code)]

pub mod fake_service;
pub mod fake_transport;

use doc_inspect_client::{BatchAnalysisResult, SingleAnalysisResult, UploadFile};

/// 单文档响应：一页，无检测结果
pub const SINGLE_BODY: &str = r#"{"job_id":"j1","pages":[{"page_index":0,"page_size":{"width":600,"height":800},"detections":[],"annotated_image_url":"/img/0.png"}],"annotated_pdf_url":"/out/j1.pdf","result":{}}"#;

/// 批量响应：一个文件成功，一个文件失败
pub const BATCH_BODY: &str = r#"{"job_id":"j2","files_processed":2,"result":{"a.pdf":{"0":{"annotations":[],"page_size":{"width":100,"height":100}}},"b.pdf":{"error":"corrupt file"}}}"#;

pub fn single_result() -> SingleAnalysisResult {
    SingleAnalysisResult::from_json(SINGLE_BODY.as_bytes()).unwrap()
}

pub fn batch_result() -> BatchAnalysisResult {
    BatchAnalysisResult::from_json(BATCH_BODY.as_bytes()).unwrap()
}

pub fn pdf_file(name: &str) -> UploadFile {
    UploadFile::new(name, "application/pdf", b"%PDF-1.7\n%%EOF".to_vec())
}

pub fn zip_file(name: &str) -> UploadFile {
    UploadFile::new(name, "application/zip", b"PK\x03\x04".to_vec())
}
