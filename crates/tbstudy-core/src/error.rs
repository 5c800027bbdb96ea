use thiserror::Error;

use tbstudy_instruments::error::InstrumentError;

use crate::pathway::SequenceError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error("literacy response error: {0}")]
    Instrument(#[from] InstrumentError),

    #[error("unknown sequence policy: {0}")]
    UnknownSequencePolicy(String),
}
