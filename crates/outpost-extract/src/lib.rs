//! Coordinate extraction from free-form location input.
//!
//! Users paste either a raw `lat,long` pair or any of several Google Maps
//! URL shapes (full link, shortened link, app deep link). Shortened links
//! are expanded with a single redirect-following request before parsing;
//! parsing itself tries a fixed pattern sequence in priority order.

mod error;
mod parse;
mod resolver;

pub use error::ExtractError;
pub use parse::parse_coordinate;
pub use resolver::LinkResolver;

use outpost_core::Coordinate;

/// Host substrings that mark a pasted link as a shortener needing expansion.
const SHORT_LINK_HOSTS: &[&str] = &["maps.app.goo.gl", "goo.gl/maps"];

/// Turns raw location input into a [`Coordinate`].
///
/// Use [`Extractor::new`] for production. Tests point the short-link
/// detection at a mock server with [`Extractor::with_short_link_hosts`].
pub struct Extractor {
    resolver: LinkResolver,
    short_link_hosts: Vec<String>,
}

impl Extractor {
    /// Creates an extractor whose link expansion times out after
    /// `timeout_secs` seconds.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            resolver: LinkResolver::new(timeout_secs, user_agent)?,
            short_link_hosts: SHORT_LINK_HOSTS.iter().map(ToString::to_string).collect(),
        })
    }

    /// Replaces the recognized short-link host markers (test seam).
    #[must_use]
    pub fn with_short_link_hosts(mut self, hosts: Vec<String>) -> Self {
        self.short_link_hosts = hosts;
        self
    }

    fn is_short_link(&self, text: &str) -> bool {
        self.short_link_hosts.iter().any(|host| text.contains(host))
    }

    /// Extract a coordinate from `input`.
    ///
    /// Performs exactly zero or one outbound request: one when the input
    /// carries a short-link marker, zero otherwise. A failed expansion is
    /// terminal — the short link itself is never parsed as a fallback.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::EmptyInput`] for empty or whitespace-only input.
    /// - [`ExtractError::LinkExpansionFailed`] if the single expansion
    ///   request fails or resolves to a non-success status.
    /// - [`ExtractError::UnrecognizedFormat`] if no pattern matches.
    pub async fn extract(&self, input: &str) -> Result<Coordinate, ExtractError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ExtractError::EmptyInput);
        }

        let expanded;
        let candidate = if self.is_short_link(trimmed) {
            let url = self.short_link_url(trimmed);
            tracing::debug!(url = %url, "expanding shortened map link");
            expanded = self.resolver.resolve(&url).await?;
            expanded.as_str()
        } else {
            trimmed
        };

        parse_coordinate(candidate).ok_or_else(|| ExtractError::UnrecognizedFormat {
            input: trimmed.to_owned(),
        })
    }

    /// Pick the whitespace-delimited token carrying the short-link marker
    /// and make sure it has a scheme; pasted links often lack `https://`.
    fn short_link_url(&self, text: &str) -> String {
        let token = text
            .split_whitespace()
            .find(|t| self.is_short_link(t))
            .unwrap_or(text);

        if token.starts_with("http://") || token.starts_with("https://") {
            token.to_owned()
        } else {
            format!("https://{token}")
        }
    }
}
