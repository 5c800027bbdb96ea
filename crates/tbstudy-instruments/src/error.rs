use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("item {} response {value} is outside range [{min}, {max}]", .item_index + 1)]
    OutOfRange {
        item_index: usize,
        value: u8,
        min: u8,
        max: u8,
    },

    #[error("item index {item_index} does not exist on a {item_count}-item instrument")]
    UnknownItem { item_index: usize, item_count: usize },

    #[error("total score {total} is outside range [{min}, {max}]")]
    InvalidScore { total: u32, min: u32, max: u32 },

    #[error("expected {expected} responses, got {actual}")]
    ResponseCount { expected: usize, actual: usize },
}
