//! Error types for clabcli.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClabError {
    #[error("Could not reach {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Server returned HTTP {status} for {url}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed configuration document at {url}: {reason}")]
    MalformedConfig { url: String, reason: String },

    #[error("Invalid CIDR segment: {0}")]
    InvalidCidr(String),

    #[error("Invalid event name '{0}': only ASCII letters, digits, '-' and '_' are allowed")]
    InvalidEventName(String),

    #[error("No account with uid 1000 found in the account database")]
    NoPrimaryUser,

    #[error("File system error at {path}: {source}")]
    FileSystem {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("systemctl {action} failed: {detail}")]
    Systemctl { action: String, detail: String },

    #[error("Permission denied: {0}")]
    Permission(String),
}
