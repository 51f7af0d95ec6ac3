use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("armory returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("malformed document: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("document has no <{0}> element")]
    MissingElement(&'static str),

    #[error("<{element}> is missing the `{attribute}` attribute")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("`{field}` is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// The service answered but flagged the lookup with an `errCode`.
    #[error("{code}")]
    Upstream { code: String },

    #[error("No item found ({id})")]
    ItemNotFound { id: u32 },
}

impl Error {
    /// The service's own error code, if this error came from one.
    pub fn upstream_code(&self) -> Option<&str> {
        match self {
            Error::Upstream { code } => Some(code),
            _ => None,
        }
    }
}
