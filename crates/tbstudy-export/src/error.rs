use thiserror::Error;

use tbstudy_instruments::error::InstrumentError;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("missing essential fields: {}", .missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },

    #[error("nothing to export")]
    Empty,

    #[error("row {row} does not match the header columns")]
    ColumnMismatch { row: usize },

    #[error("literacy score error: {0}")]
    Instrument(#[from] InstrumentError),

    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tera::Error> for ExportError {
    fn from(e: tera::Error) -> Self {
        ExportError::TemplateRender(e.to_string())
    }
}
