use thiserror::Error;

pub type RelayResult<T> = Result<T, RelayError>;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Payload is not valid UTF-8: {0}")]
    PayloadDecode(String),

    #[error("Payload is not a JSON document: {0}")]
    DocumentParse(String),

    #[error("Document insert failed: {0}")]
    StoreInsert(String),

    #[error("Output route submission failed: {0}")]
    PipeSend(String),

    #[error("Storage client initialization failed: {0}")]
    ClientInit(String),
}
