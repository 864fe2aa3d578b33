//! Error types for the Curve stETH adapter

use thiserror::Error;

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, BridgeDataError>;

/// Main error type for adapter queries
#[derive(Debug, Error)]
pub enum BridgeDataError {
    /// Collaborator address could not be parsed into a 20-byte address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Input/output asset combination is not one of the supported directions
    #[error("Invalid asset combination: {0}")]
    InvalidAssetCombination(String),

    /// Asset has no underlying representation in this adapter
    #[error("Unsupported asset: {0}")]
    UnsupportedAsset(String),

    /// Rebase report with zero pooled ether or zero elapsed time
    #[error("Division by zero: {0}")]
    DivisionByZero(&'static str),

    /// Fixed-point intermediate or converted value does not fit its target type
    #[error("Value out of range: {0}")]
    ValueOutOfRange(String),

    /// Contract call or transport failure, passed through unmodified
    #[error("Contract read failed: {0}")]
    Contract(#[from] web3::contract::Error),

    /// Inline ABI fragment failed to load
    #[error("ABI error: {0}")]
    Abi(#[from] web3::ethabi::Error),

    /// Configuration error in adapter settings
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config_rs::ConfigError> for BridgeDataError {
    fn from(err: config_rs::ConfigError) -> Self {
        BridgeDataError::Config(err.to_string())
    }
}
