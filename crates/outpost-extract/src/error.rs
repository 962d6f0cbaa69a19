use thiserror::Error;

/// Extraction failures. All are terminal for the current request: the
/// caller surfaces a message and does not retry.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input was empty or whitespace-only.
    #[error("location input is empty")]
    EmptyInput,

    /// The single short-link expansion request failed. The original short
    /// link is never parsed as a fallback.
    #[error("failed to expand short link {url}: {source}")]
    LinkExpansionFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// No recognized coordinate pattern matched the (expanded) input.
    #[error("unrecognized location format: {input}")]
    UnrecognizedFormat { input: String },
}
