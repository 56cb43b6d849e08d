use thiserror::Error;

#[derive(Error, Debug)]
pub enum PxPayError {
    #[error("Mock scenario not supplied")]
    MockScenarioMissing,
    #[error("Payment {0} not found")]
    PaymentNotFound(u64),
    #[error("Currency not supported: {0}")]
    UnsupportedCurrency(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("XML encoding error: {0}")]
    Xml(#[from] quick_xml::de::DeError),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PxPayError>;
