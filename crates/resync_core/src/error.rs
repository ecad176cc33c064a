use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("XML read error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(String),

    #[error("malformed timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        source: time::error::Parse,
    },

    #[error("unexpected document structure: {0}")]
    Structure(String),

    // Write failures are a defect in the projection logic, not bad caller
    // data. Kept as a separate variant so hosts can tell the two apart.
    #[error("serialise failure: {0}")]
    Write(String),
}

pub type Result<T> = std::result::Result<T, Error>;
