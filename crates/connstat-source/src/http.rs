//! HTTP record source

use async_trait::async_trait;
use connstat_core::{ConnstatError, RawRecord, Result};
use std::time::Duration;
use tracing::debug;

use crate::record_source::{RecordSource, decode_records};

/// Student connections API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://www.yool.education/api/student-connections";

/// Upper bound on a single fetch, so a stalled endpoint cannot hang the dashboard
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches records as a JSON array from an HTTP endpoint
pub struct HttpRecordSource {
    url: String,
    timeout: Duration,
    use_system_proxy: bool,
}

impl Default for HttpRecordSource {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl HttpRecordSource {
    /// Create a new source for `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            use_system_proxy: true,
        }
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether to honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment
    pub fn with_system_proxy(mut self, enabled: bool) -> Self {
        self.use_system_proxy = enabled;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        if !self.use_system_proxy {
            builder = builder.no_proxy();
        }
        Ok(builder.build()?)
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch(&self) -> Result<Vec<RawRecord>> {
        debug!("GET {} (timeout {:?})", self.url, self.timeout);
        let response = self.client()?.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConnstatError::UnexpectedStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let payload: serde_json::Value = response.json().await?;
        decode_records(payload)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
