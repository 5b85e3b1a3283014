//! Error types for the status widget

use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusError {
    #[error("widget registry is full (capacity {capacity})")]
    RegistryFull { capacity: usize },
    #[error("could not allocate {requested} pixels of rotation scratch")]
    ScratchAllocation { requested: usize },
    #[error("label does not fit in the configured capacity")]
    LabelTooLong,
}
