use std::future::Future;
use std::time::Duration;

use crate::error::ExplorerError;

/// Status and body of one GET.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Issues a single GET and hands back whatever the server answered.
///
/// Non-success statuses are not errors at this level, `fetch_json` decides
/// what they mean.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpReply, ExplorerError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, ExplorerError> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ExplorerError::Client(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    fn request_error(&self, url: &str, error: &reqwest::Error) -> ExplorerError {
        if error.is_timeout() {
            ExplorerError::Timeout {
                url: url.to_string(),
                seconds: self.timeout.map_or(0, |t| t.as_secs()),
            }
        } else {
            ExplorerError::Transport {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<HttpReply, ExplorerError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| self.request_error(url, &e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.request_error(url, &e))?;

        Ok(HttpReply { status, body })
    }
}
