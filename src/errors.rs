use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("malformed snapshot document: {source}")]
    Snapshot {
        #[from]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
