use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;

use review_common::config::AppConfig;
use review_common::error::{PollError, ServerCause};
use review_common::types::{Cursor, RawResponse};

/// Anything that can answer "which homework statuses changed since `cursor`".
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Fetch the raw response body. `None` means "since now".
    async fn fetch(&self, cursor: Option<Cursor>) -> Result<RawResponse, PollError>;
}

/// HTTP fetcher for the homework status endpoint.
#[derive(Debug, Clone)]
pub struct ApiFetcher {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl ApiFetcher {
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            config.endpoint.clone(),
            config.practicum_token.clone(),
            config.request_timeout,
        )
    }

    fn server_error(&self, cause: ServerCause) -> PollError {
        PollError::Server {
            endpoint: self.endpoint.clone(),
            cause,
        }
    }
}

#[async_trait]
impl HomeworkSource for ApiFetcher {
    async fn fetch(&self, cursor: Option<Cursor>) -> Result<RawResponse, PollError> {
        let cursor = cursor.unwrap_or_else(Cursor::now);

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", cursor.as_i64())])
            .send()
            .await
            // The URL carries from_date, which would make every failure text unique
            .map_err(|e| self.server_error(ServerCause::Transport(e.without_url())))?;

        let status = response.status();
        tracing::info!(
            endpoint = %self.endpoint,
            from_date = cursor.as_i64(),
            status = status.as_u16(),
            "Request to homework API completed"
        );

        if status != StatusCode::OK {
            return Err(self.server_error(ServerCause::Status(status)));
        }

        // A timeout or reset while the body streams in is still a transport failure
        let body = response
            .bytes()
            .await
            .map_err(|e| self.server_error(ServerCause::Transport(e.without_url())))?;

        serde_json::from_slice::<RawResponse>(&body)
            .map_err(|e| PollError::Unknown(format!("Не удалось разобрать ответ API: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::extract::{Query, State};
    use axum::http::HeaderMap;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use serde_json::json;

    use super::*;

    /// (authorization header, query) of every request the stub saw.
    type Seen = Arc<Mutex<Vec<(Option<String>, HashMap<String, String>)>>>;

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/statuses/")
    }

    fn stub(seen: Seen, status: StatusCode, body: &'static str) -> Router {
        Router::new()
            .route(
                "/statuses/",
                get(
                    move |State(seen): State<Seen>,
                          headers: HeaderMap,
                          Query(query): Query<HashMap<String, String>>| async move {
                        let auth = headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        seen.lock().unwrap().push((auth, query));
                        (status, body).into_response()
                    },
                ),
            )
            .with_state(seen)
    }

    fn fetcher(endpoint: &str) -> ApiFetcher {
        ApiFetcher::new(endpoint, "secret", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_sends_token_and_cursor() {
        let seen = Seen::default();
        let endpoint = spawn(stub(
            seen.clone(),
            StatusCode::OK,
            r#"{"homeworks": [], "current_date": 1700000100}"#,
        ))
        .await;

        let body = fetcher(&endpoint)
            .fetch(Some(Cursor::new(1_700_000_000)))
            .await
            .unwrap();
        assert_eq!(body, json!({ "homeworks": [], "current_date": 1_700_000_100 }));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0.as_deref(), Some("OAuth secret"));
        assert_eq!(seen[0].1.get("from_date").map(String::as_str), Some("1700000000"));
    }

    #[tokio::test]
    async fn test_absent_cursor_defaults_to_now() {
        let seen = Seen::default();
        let endpoint = spawn(stub(seen.clone(), StatusCode::OK, "{}")).await;

        let before = Cursor::now().as_i64();
        fetcher(&endpoint).fetch(None).await.unwrap();
        let after = Cursor::now().as_i64();

        let from_date: i64 = seen.lock().unwrap()[0].1["from_date"].parse().unwrap();
        assert!(before <= from_date && from_date <= after);
    }

    #[tokio::test]
    async fn test_body_is_returned_verbatim() {
        let endpoint = spawn(stub(
            Seen::default(),
            StatusCode::OK,
            r#"{"unexpected": {"nested": [1, 2]}}"#,
        ))
        .await;

        let body = fetcher(&endpoint).fetch(Some(Cursor::new(0))).await.unwrap();
        assert_eq!(body, json!({ "unexpected": { "nested": [1, 2] } }));
    }

    #[tokio::test]
    async fn test_not_found_is_server_error_with_code() {
        let endpoint = spawn(stub(Seen::default(), StatusCode::NOT_FOUND, "{}")).await;

        match fetcher(&endpoint).fetch(Some(Cursor::new(0))).await {
            Err(PollError::Server {
                endpoint: reported,
                cause: ServerCause::Status(code),
            }) => {
                assert_eq!(code, StatusCode::NOT_FOUND);
                assert_eq!(reported, endpoint);
            }
            other => panic!("expected Server(Status(404)), got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_200_success_codes_are_server_errors() {
        let endpoint = spawn(stub(Seen::default(), StatusCode::ACCEPTED, "{}")).await;

        assert!(matches!(
            fetcher(&endpoint).fetch(Some(Cursor::new(0))).await,
            Err(PollError::Server {
                cause: ServerCause::Status(code),
                ..
            }) if code == StatusCode::ACCEPTED
        ));
    }

    #[tokio::test]
    async fn test_invalid_json_is_unknown() {
        let endpoint = spawn(stub(Seen::default(), StatusCode::OK, "<html>oops</html>")).await;

        assert!(matches!(
            fetcher(&endpoint).fetch(Some(Cursor::new(0))).await,
            Err(PollError::Unknown(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = format!("http://{addr}/statuses/");
        let err = fetcher(&endpoint)
            .fetch(Some(Cursor::new(0)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PollError::Server {
                cause: ServerCause::Transport(_),
                ..
            }
        ));
        assert!(!err.to_string().contains("from_date"));
    }

    #[tokio::test]
    async fn test_body_stalled_past_timeout_is_transport_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            // Read the request head before answering
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n{\"homeworks\":",
                )
                .await
                .unwrap();
            socket.flush().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let endpoint = format!("http://{addr}/statuses/");
        let fetcher = ApiFetcher::new(endpoint, "secret", Duration::from_secs(1)).unwrap();
        let err = fetcher.fetch(Some(Cursor::new(0))).await.unwrap_err();

        assert_eq!(err.kind(), "server", "{err}");
        assert!(matches!(
            err,
            PollError::Server {
                cause: ServerCause::Transport(_),
                ..
            }
        ));
    }
}
