//! Shortened-link expansion.

use std::time::Duration;

use reqwest::Client;

use crate::error::ExtractError;

/// Follows a shortened map link to its canonical expanded URL.
///
/// One request, redirects followed by the client, no retries. A bounded
/// timeout covers the whole exchange.
pub struct LinkResolver {
    client: Client,
}

impl LinkResolver {
    /// Creates a resolver with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the underlying client cannot be built.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Resolve `url` and return the final URL after redirects.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::LinkExpansionFailed`] on any network failure,
    /// timeout, or non-success final status.
    pub async fn resolve(&self, url: &str) -> Result<String, ExtractError> {
        let failed = |source: reqwest::Error| ExtractError::LinkExpansionFailed {
            url: url.to_owned(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(failed)?;
        let response = response.error_for_status().map_err(failed)?;

        Ok(response.url().as_str().to_owned())
    }
}
