//! Browser driver interface and the WebDriver wire client

use crate::errors::{MonitorError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info};

/// Narrow interface to the page-driving collaborator
///
/// The checker sequences these three operations per URL; anything that can
/// drive a page to the bottom and wait satisfies it, which is what makes
/// the checker testable without a real browser.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Load the given URL in the browser session
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Scroll the loaded page to the bottom, forcing lazy content to load
    async fn scroll_to_bottom(&self) -> Result<()>;

    /// Wait for the page to settle before the check is considered complete
    async fn settle(&self, duration: Duration) -> Result<()>;
}

/// A single browser session driven over the W3C WebDriver wire protocol
///
/// Exclusively owned by the check loop; one session exists process-wide.
#[derive(Debug)]
pub struct WebDriverSession {
    client: Client,
    base_url: String,
    session_id: String,
}

impl WebDriverSession {
    /// Start a headless Chrome session against the driver endpoint
    ///
    /// Failure here is unrecoverable at startup; nothing else can function
    /// without a session.
    pub async fn launch(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("wakeweb/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MonitorError::Http)?;

        let base_url = base_url.trim_end_matches('/').to_string();
        info!("Launching browser session via {}", base_url);

        let capabilities = json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": {
                        "args": [
                            "--headless",
                            "--no-sandbox",
                            "--disable-gpu",
                            "--disable-dev-shm-usage",
                            "--disable-extensions",
                            "--disable-logging",
                            "--log-level=3"
                        ]
                    }
                }
            }
        });

        let response = client
            .post(format!("{}/session", base_url))
            .json(&capabilities)
            .send()
            .await?;
        let value = handle_response(response).await?;

        let session_id = value["sessionId"]
            .as_str()
            .ok_or_else(|| {
                MonitorError::Driver("driver returned no session id".to_string())
            })?
            .to_string();

        info!("Browser session {} ready", session_id);

        Ok(Self {
            client,
            base_url,
            session_id,
        })
    }

    /// End the browser session
    pub async fn quit(&self) -> Result<()> {
        debug!("Deleting session {}", self.session_id);
        self.command(Method::DELETE, "", None).await?;
        Ok(())
    }

    /// Issue one wire-protocol command against the session
    async fn command(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = format!("{}/session/{}{}", self.base_url, self.session_id, path);
        debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        handle_response(request.send().await?).await
    }
}

#[async_trait]
impl PageDriver for WebDriverSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.command(Method::POST, "/url", Some(json!({ "url": url })))
            .await?;
        Ok(())
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        self.command(
            Method::POST,
            "/execute/sync",
            Some(json!({
                "script": "window.scrollTo(0, document.body.scrollHeight);",
                "args": []
            })),
        )
        .await?;
        Ok(())
    }

    async fn settle(&self, duration: Duration) -> Result<()> {
        tokio::time::sleep(duration).await;
        Ok(())
    }
}

/// Unwrap a wire-protocol response into its `value` payload
///
/// Error responses carry `{"value": {"error", "message"}}`; the message is
/// what ends up in the journal line for a failed check.
async fn handle_response(response: Response) -> Result<Value> {
    let status = response.status();
    let body: Value = match response.json().await {
        Ok(body) => body,
        Err(_) if status.is_success() => Value::Null,
        Err(e) => return Err(MonitorError::Http(e)),
    };

    if status.is_success() {
        return Ok(body["value"].clone());
    }

    let message = body["value"]["message"]
        .as_str()
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("driver responded with status {}", status));

    Err(MonitorError::Driver(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_session(server: &MockServer) -> WebDriverSession {
        Mock::given(method("POST"))
            .and(path("/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": { "sessionId": "abc123", "capabilities": {} }
            })))
            .mount(server)
            .await;

        WebDriverSession::launch(&server.uri(), Duration::from_secs(5))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_launch_stores_session_id() {
        let server = MockServer::start().await;
        let session = mock_session(&server).await;
        assert_eq!(session.session_id, "abc123");
    }

    #[tokio::test]
    async fn test_launch_fails_without_session_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": {} })))
            .mount(&server)
            .await;

        let err = WebDriverSession::launch(&server.uri(), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, MonitorError::Driver(_)));
    }

    #[tokio::test]
    async fn test_navigate_posts_url() {
        let server = MockServer::start().await;
        let session = mock_session(&server).await;

        Mock::given(method("POST"))
            .and(path("/session/abc123/url"))
            .and(body_partial_json(json!({ "url": "https://a.test" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": null })))
            .expect(1)
            .mount(&server)
            .await;

        session.navigate("https://a.test").await.unwrap();
    }

    #[tokio::test]
    async fn test_scroll_runs_script() {
        let server = MockServer::start().await;
        let session = mock_session(&server).await;

        Mock::given(method("POST"))
            .and(path("/session/abc123/execute/sync"))
            .and(body_partial_json(json!({
                "script": "window.scrollTo(0, document.body.scrollHeight);"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": null })))
            .expect(1)
            .mount(&server)
            .await;

        session.scroll_to_bottom().await.unwrap();
    }

    #[tokio::test]
    async fn test_driver_error_message_surfaces() {
        let server = MockServer::start().await;
        let session = mock_session(&server).await;

        Mock::given(method("POST"))
            .and(path("/session/abc123/url"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "value": {
                    "error": "invalid session id",
                    "message": "session deleted as the browser has closed"
                }
            })))
            .mount(&server)
            .await;

        let err = session.navigate("https://a.test").await.unwrap_err();
        match err {
            MonitorError::Driver(msg) => {
                assert!(msg.contains("session deleted"));
            }
            other => panic!("expected driver error, got {}", other),
        }
    }

    #[tokio::test]
    async fn test_quit_deletes_session() {
        let server = MockServer::start().await;
        let session = mock_session(&server).await;

        Mock::given(method("DELETE"))
            .and(path("/session/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": null })))
            .expect(1)
            .mount(&server)
            .await;

        session.quit().await.unwrap();
    }
}
