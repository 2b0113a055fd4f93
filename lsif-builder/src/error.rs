use lsif_type::{Uri, Violation};
use std::path::PathBuf;

/// Errors that abort an indexing pass.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error(transparent)]
    Graph(#[from] lsif_dom::Error),

    #[error("emitted {label} element violates the schema: {violation}")]
    Schema {
        label: &'static str,
        violation: Violation,
    },

    #[error("failed to serialize element: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write element: {0}")]
    Io(#[from] std::io::Error),

    #[error("{uri}: symbol {symbol:?}: {source}")]
    Symbol {
        uri: Uri,
        symbol: String,
        #[source]
        source: Box<IndexError>,
    },

    #[error("{uri}: {source}")]
    Document {
        uri: Uri,
        #[source]
        source: Box<IndexError>,
    },
}

impl IndexError {
    /// Attach the symbol an event was about.
    pub fn in_symbol(self, uri: &Uri, symbol: &str) -> IndexError {
        IndexError::Symbol {
            uri: uri.clone(),
            symbol: symbol.to_owned(),
            source: Box::new(self),
        }
    }

    /// Attach the document being indexed, unless a more precise context is
    /// already there.
    pub fn in_document(self, uri: &Uri) -> IndexError {
        match self {
            IndexError::Symbol { .. } | IndexError::Document { .. } => self,
            other => IndexError::Document {
                uri: uri.clone(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, without location context.
    pub fn root_cause(&self) -> &IndexError {
        match self {
            IndexError::Symbol { source, .. } | IndexError::Document { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read semantic model {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid semantic model {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
