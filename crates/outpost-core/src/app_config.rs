use std::net::SocketAddr;
use std::path::PathBuf;

use crate::links::TravelMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub outlets_path: PathBuf,
    /// Emails allowed through the server's gate, lowercased. Empty means
    /// the gate is disabled in development and a startup error elsewhere.
    pub allowed_emails: Vec<String>,
    /// Timeout for the single short-link expansion request, in seconds.
    pub expand_timeout_secs: u64,
    pub travel_mode: Option<TravelMode>,
    pub user_agent: String,
}
