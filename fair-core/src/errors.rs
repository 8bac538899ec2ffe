use thiserror::Error;

/// Error type for invalid scenarios and rejected simulator inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FairError {
    #[error("Emissions timeseries is empty")]
    EmptyInput,
    #[error("Length mismatch between emissions ({emissions}) and other forcing ({other_forcing})")]
    LengthMismatch {
        emissions: usize,
        other_forcing: usize,
    },
    #[error("Unsupported simulator configuration: {0}")]
    UnsupportedConfiguration(String),
    #[error("Non-finite value in {name} at index {index}: {value}")]
    NonFinite {
        name: String,
        index: usize,
        value: f64,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),
    #[error("Carbon cycle failed at index {index}: {reason}")]
    CarbonCycle { index: usize, reason: String },
}

/// Convenience type for `Result<T, FairError>`.
pub type FairResult<T> = Result<T, FairError>;
