use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, COOKIE};

use rihla_core::auth::AUTH_TOKEN_KEY;
use rihla_core::ports::{ContentRefresher, RefreshError};

use crate::cookies::StoredCookieJar;

/// Re-requests a portal page with the jar's current auth cookie, so the
/// portal verifies the repaired cookie instead of whatever it saw last.
pub struct HttpContentRefresher {
    client: reqwest::Client,
    url: String,
    cookies: Arc<StoredCookieJar>,
}

impl HttpContentRefresher {
    pub fn new(
        url: impl Into<String>,
        cookies: Arc<StoredCookieJar>,
        timeout: Duration,
    ) -> Result<Self, RefreshError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| RefreshError::Request(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            cookies,
        })
    }
}

#[async_trait]
impl ContentRefresher for HttpContentRefresher {
    async fn refresh(&self) -> Result<(), RefreshError> {
        let cookie = self
            .cookies
            .header_value(&[AUTH_TOKEN_KEY])
            .await
            .map_err(|e| RefreshError::Request(e.to_string()))?;

        let mut request = self.client.get(&self.url).header(CACHE_CONTROL, "no-cache");
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RefreshError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RefreshError::Status(status.as_u16()));
        }

        tracing::debug!(url = %self.url, "Server content refreshed");
        Ok(())
    }
}
