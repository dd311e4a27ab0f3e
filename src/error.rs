//! Typed errors for the feed loader.
//!
//! None of these escape to the user: the loader logs them and falls back
//! to mock data.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {source_name} failed: {err}")]
    Network {
        source_name: String,
        #[source]
        err: reqwest::Error,
    },

    #[error("{source_name} answered HTTP {status}")]
    Status {
        source_name: String,
        status: reqwest::StatusCode,
    },

    #[error("could not read {source_name}: {err}")]
    Io {
        source_name: String,
        #[source]
        err: std::io::Error,
    },

    #[error("{source_name} is not a valid feed document: {err}")]
    Parse {
        source_name: String,
        #[source]
        err: serde_json::Error,
    },
}
