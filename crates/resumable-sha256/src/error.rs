#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("state must be 32 bytes (eight 32-bit registers), got {actual}")]
    InvalidStateSize { actual: usize },

    #[error("engine already finalized: digest consumed its state")]
    EngineFinalized,
}

pub type Result<T> = std::result::Result<T, EngineError>;
