//! 可控的传输层假实现
//!
//! 每次调用按顺序取出一个预设响应；用 `gate()` 预设的响应在测试主动放行前一直挂起。

use doc_inspect_client::{
    AnalysisTransport, BatchAnalysisResult, SingleAnalysisResult, SubmissionKind, TransportError,
    UploadFile,
};
use futures::future::BoxFuture;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub enum Reply {
    Single(Result<SingleAnalysisResult, TransportError>),
    Batch(Result<BatchAnalysisResult, TransportError>),
}

#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
    calls: Mutex<Vec<(SubmissionKind, String)>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 预设一个立即可用的响应
    pub fn reply_with(&self, reply: Reply) {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(reply);
        self.replies.lock().unwrap().push_back(rx);
    }

    /// 预设一个挂起的响应，返回放行用的发送端
    pub fn gate(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().push_back(rx);
        tx
    }

    /// 已发生的调用（类型 + 文件名）
    pub fn calls(&self) -> Vec<(SubmissionKind, String)> {
        self.calls.lock().unwrap().clone()
    }

    fn next_reply(&self, kind: SubmissionKind, file: &UploadFile) -> oneshot::Receiver<Reply> {
        self.calls.lock().unwrap().push((kind, file.name.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("没有预设的响应")
    }
}

impl AnalysisTransport for FakeTransport {
    fn submit_single<'a>(
        &'a self,
        file: &'a UploadFile,
    ) -> BoxFuture<'a, Result<SingleAnalysisResult, TransportError>> {
        let reply = self.next_reply(SubmissionKind::Single, file);
        Box::pin(async move {
            match reply.await.expect("响应通道被关闭") {
                Reply::Single(result) => result,
                Reply::Batch(_) => panic!("单文档请求收到了批量响应"),
            }
        })
    }

    fn submit_batch<'a>(
        &'a self,
        file: &'a UploadFile,
    ) -> BoxFuture<'a, Result<BatchAnalysisResult, TransportError>> {
        let reply = self.next_reply(SubmissionKind::Batch, file);
        Box::pin(async move {
            match reply.await.expect("响应通道被关闭") {
                Reply::Batch(result) => result,
                Reply::Single(_) => panic!("批量请求收到了单文档响应"),
            }
        })
    }
}

pub fn network_failure() -> TransportError {
    TransportError::NetworkFailure {
        endpoint: "/analyze".to_string(),
        message: "请求超时: operation timed out".to_string(),
    }
}
