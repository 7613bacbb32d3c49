use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdgError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Connection timeout")]
    Timeout,
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Not connected to the instrument")]
    NotConnected,
    #[error("Type error: {0}")]
    Type(String),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
