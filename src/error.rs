use miette::Diagnostic;
use thiserror::Error;

/// Main error type for embkit operations
#[derive(Error, Diagnostic, Debug)]
pub enum EmbError {
    #[error("IO error: {0}")]
    #[diagnostic(code(embkit::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(embkit::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Malformed XML: {message}")]
    #[diagnostic(code(embkit::xml))]
    Xml { message: String },

    #[error("Malformed XML attribute: {0}")]
    #[diagnostic(code(embkit::xml))]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("JSON error: {0}")]
    #[diagnostic(code(embkit::json))]
    Json(#[from] serde_json::Error),

    #[error("Operation cancelled")]
    #[diagnostic(code(embkit::cancelled))]
    Cancelled,

    #[error("Unsupported format: {path}")]
    #[diagnostic(code(embkit::unsupported))]
    Unsupported {
        path: std::path::PathBuf,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(embkit::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl From<quick_xml::Error> for EmbError {
    fn from(e: quick_xml::Error) -> Self {
        match e {
            quick_xml::Error::Io(io) => EmbError::IoError(std::io::Error::new(io.kind(), io.to_string())),
            other => EmbError::Xml {
                message: other.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, EmbError>;
