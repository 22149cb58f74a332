use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

impl Error {
    /// Short label of the stage that failed, used for logs and metric labels.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Connection(_) => "connection",
            Error::Query(_) => "query",
            Error::Template(_) => "render",
            Error::Config(_) => "config",
            Error::Metrics(_) => "metrics",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
