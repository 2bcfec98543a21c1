use thiserror::Error;

use crate::browser::locator::Locator;
use crate::page::fields::Field;

/// Failures reported by a browser session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No element matched the locator
    #[error("no element matches {locator}")]
    NotFound { locator: String },

    /// More than one element matched a locator that must be unique
    #[error("{count} elements match {locator}, expected exactly one")]
    AmbiguousLocator { locator: String, count: usize },

    /// Element exists but cannot be interacted with (hidden, disabled, stale)
    #[error("{command} failed: {message}")]
    Interaction { command: String, message: String },

    /// WebDriver endpoint returned an error we do not classify
    #[error("{command} returned '{error}': {message}")]
    Protocol {
        command: String,
        error: String,
        message: String,
    },

    /// Response body did not have the expected shape
    #[error("unexpected response to {command}: {detail}")]
    MalformedResponse { command: String, detail: String },

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The session was already closed
    #[error("no active WebDriver session")]
    NoSession,
}

impl SessionError {
    pub fn not_found(locator: &Locator) -> Self {
        SessionError::NotFound {
            locator: locator.to_string(),
        }
    }
}

/// Failures reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration key '{0}' is not set")]
    MissingKey(String),

    #[error("could not read config file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Data value that is not a YAML string and would not be used verbatim
    #[error("configuration key '{key}' must be a quoted string, found {kind}")]
    NotText { key: String, kind: &'static str },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Locator override names a field the page does not bind
    #[error("unknown field '{0}' in locator overrides")]
    UnknownField(String),
}

/// Failures surfaced by page object operations. Every variant is terminal for
/// the step that produced it.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("{field} not found on page ({locator})")]
    LocatorNotFound { field: Field, locator: Locator },

    #[error("{field} matched {count} elements ({locator})")]
    AmbiguousLocator {
        field: Field,
        locator: Locator,
        count: usize,
    },

    #[error("interaction with {field} failed: {source}")]
    Interaction {
        field: Field,
        #[source]
        source: SessionError,
    },

    #[error("navigation to '{url}' failed: {source}")]
    Navigation {
        url: String,
        #[source]
        source: SessionError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PageError {
    /// Classify a session failure that happened while working with `field`.
    pub fn from_session(field: Field, locator: &Locator, err: SessionError) -> Self {
        match err {
            SessionError::NotFound { .. } => PageError::LocatorNotFound {
                field,
                locator: locator.clone(),
            },
            SessionError::AmbiguousLocator { count, .. } => PageError::AmbiguousLocator {
                field,
                locator: locator.clone(),
                count,
            },
            source => PageError::Interaction { field, source },
        }
    }

    pub fn is_locator_not_found(&self) -> bool {
        matches!(self, PageError::LocatorNotFound { .. })
    }

    /// Configuration key whose absence caused this error, if any.
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            PageError::Config(ConfigError::MissingKey(key)) => Some(key),
            _ => None,
        }
    }
}
