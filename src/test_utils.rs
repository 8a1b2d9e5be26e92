//! Local stand-in for the upstream aircraft API

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use tokio::net::TcpListener;
use url::Url;

use crate::config::UpstreamConfig;

const MOCK_PATH: &str = "/lat/38.6892887/lon/-9.311829/";

/// Canned answer served by [`MockUpstream`]
#[derive(Clone)]
pub struct MockResponse {
    pub status: StatusCode,
    pub content_type: Option<&'static str>,
    pub body: &'static str,
    pub delay: Option<Duration>,
}

impl MockResponse {
    pub fn json(body: &'static str) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: Some("application/json"),
            body,
            delay: None,
        }
    }

    pub fn text(status: StatusCode, content_type: &'static str, body: &'static str) -> Self {
        Self {
            status,
            content_type: Some(content_type),
            body,
            delay: None,
        }
    }

    pub fn without_content_type(mut self) -> Self {
        self.content_type = None;
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// What the mock saw of one inbound request
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

/// Records every request it receives and answers with the same [`MockResponse`]
pub struct MockUpstream {
    pub url: Url,
    hits: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockUpstream {
    pub async fn start(canned: MockResponse) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let app = {
            let hits = hits.clone();
            let seen = seen.clone();
            Router::new().fallback(move |method: Method, uri: Uri, headers: HeaderMap| {
                let hits = hits.clone();
                let seen = seen.clone();
                let canned = canned.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    seen.lock().unwrap().push(RecordedRequest {
                        method,
                        uri,
                        headers,
                    });

                    if let Some(delay) = canned.delay {
                        tokio::time::sleep(delay).await;
                    }

                    let mut response = (canned.status, canned.body).into_response();
                    match canned.content_type {
                        Some(ct) => {
                            response
                                .headers_mut()
                                .insert(header::CONTENT_TYPE, HeaderValue::from_static(ct));
                        }
                        None => {
                            response.headers_mut().remove(header::CONTENT_TYPE);
                        }
                    }
                    response
                }
            })
        };

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: Url::parse(&format!("http://{}{}", addr, MOCK_PATH)).unwrap(),
            hits,
            seen,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.seen.lock().unwrap().last().cloned()
    }

    pub fn config(&self) -> UpstreamConfig {
        UpstreamConfig {
            url: self.url.clone(),
            timeout: None,
            proxy: None,
        }
    }
}

/// An address nothing is listening on
pub async fn unreachable_config() -> UpstreamConfig {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    UpstreamConfig {
        url: Url::parse(&format!("http://{}{}", addr, MOCK_PATH)).unwrap(),
        timeout: None,
        proxy: None,
    }
}
