//! Remote integer entropy over HTTP.
//!
//! Speaks the random.org plain-text integer protocol:
//!
//! ```text
//! GET {endpoint}?num=D&min=0&max=255&col=1&base=10&format=plain&rnd=new
//!
//! 17
//! 203
//! ...
//! ```
//!
//! One integer per line (any whitespace is accepted). The body must contain
//! exactly `D` integers, each in `[0, 255]`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{scale_byte, EntropyError, EntropyResult, EntropySource};

/// HTTP client for a random.org-compatible integer service.
pub struct RemoteEntropy {
    endpoint: String,
    http: Client,
}

impl RemoteEntropy {
    /// Create a client whose requests are cut off after `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> EntropyResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    /// Full request URL for `count` integers.
    pub fn request_url(&self, count: usize) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{}{}num={}&min=0&max=255&col=1&base=10&format=plain&rnd=new",
            self.endpoint, separator, count
        )
    }
}

/// Parse a plain-text integer body into scaled values.
pub fn parse_integers(body: &str, expected: usize) -> EntropyResult<Vec<f32>> {
    let values = body
        .split_whitespace()
        .map(|token| {
            token
                .parse::<u8>()
                .map(scale_byte)
                .map_err(|_| EntropyError::Malformed(format!("'{}' is not an integer in [0, 255]", token)))
        })
        .collect::<EntropyResult<Vec<f32>>>()?;

    if values.len() != expected {
        return Err(EntropyError::CountMismatch {
            expected,
            actual: values.len(),
        });
    }

    Ok(values)
}

#[async_trait]
impl EntropySource for RemoteEntropy {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn draw(&self, dimension: usize) -> EntropyResult<Vec<f32>> {
        let url = self.request_url(dimension);
        debug!(url = %url, "Requesting remote entropy");

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(EntropyError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        parse_integers(&body, dimension)
    }
}
