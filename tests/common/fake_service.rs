//! 本地假分析服务（axum），用于测试 HTTP 客户端

use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// 服务收到的一个 multipart 字段
#[derive(Debug, Clone)]
pub struct ReceivedField {
    pub endpoint: &'static str,
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// 某个接口的响应方式
#[derive(Debug, Clone)]
pub struct Behavior {
    pub status: StatusCode,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Behavior {
    pub fn ok(body: &str) -> Self {
        Self::status(StatusCode::OK, body)
    }

    pub fn status(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Clone)]
struct ServiceState {
    analyze: Behavior,
    batch: Behavior,
    received: Arc<Mutex<Vec<ReceivedField>>>,
}

pub struct FakeService {
    pub base_url: String,
    received: Arc<Mutex<Vec<ReceivedField>>>,
}

impl FakeService {
    pub async fn start(analyze: Behavior, batch: Behavior) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = ServiceState {
            analyze,
            batch,
            received: received.clone(),
        };

        let app = Router::new()
            .route("/analyze", post(analyze_handler))
            .route("/batch-analyze", post(batch_handler))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            received,
        }
    }

    pub fn received(&self) -> Vec<ReceivedField> {
        self.received.lock().unwrap().clone()
    }
}

/// 一个已关闭端口的地址（连接会被拒绝）
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn analyze_handler(State(state): State<ServiceState>, multipart: Multipart) -> Response {
    let behavior = state.analyze.clone();
    respond(state, "/analyze", behavior, multipart).await
}

async fn batch_handler(State(state): State<ServiceState>, multipart: Multipart) -> Response {
    let behavior = state.batch.clone();
    respond(state, "/batch-analyze", behavior, multipart).await
}

async fn respond(
    state: ServiceState,
    endpoint: &'static str,
    behavior: Behavior,
    mut multipart: Multipart,
) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();

        state.received.lock().unwrap().push(ReceivedField {
            endpoint,
            name,
            file_name,
            content_type,
            bytes,
        });
    }

    if let Some(delay) = behavior.delay {
        tokio::time::sleep(delay).await;
    }

    (
        behavior.status,
        [(header::CONTENT_TYPE, "application/json")],
        behavior.body,
    )
        .into_response()
}
