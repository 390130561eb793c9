use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CohortError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No platform URL configured. Add base_url to ~/.config/cohort/config.toml or run 'cohort init'"
    )]
    MissingBaseUrl,

    #[error("No username configured. Set COHORT_USERNAME or add username to the config file")]
    MissingUsername,

    #[error("Course not specified and no default course_id in config")]
    NoCourse,

    #[error("Team not found: {0}")]
    TeamNotFound(String),

    #[error("Could not leave the team: {0}")]
    LeaveFailed(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, CohortError>;
