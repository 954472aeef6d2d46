use thiserror::Error;

#[derive(Error, Debug)]
pub enum MangaDlError {
    #[error("Unsupported website: {0}")]
    UnsupportedWebsite(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Selector matched nothing: {0}")]
    SelectorNotFound(String),

    #[error("Could not derive page URL pattern: {0}")]
    PatternExtraction(String),
}

impl MangaDlError {
    pub fn invalid_rule(msg: impl Into<String>) -> Self {
        Self::InvalidRule(msg.into())
    }

    pub fn selector_not_found(selector: impl Into<String>) -> Self {
        Self::SelectorNotFound(selector.into())
    }

    pub fn pattern_extraction(msg: impl Into<String>) -> Self {
        Self::PatternExtraction(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, MangaDlError>;
