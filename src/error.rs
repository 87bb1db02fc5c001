use thiserror::Error;

#[derive(Error, Debug)]
pub enum SenseError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Invalid Device Data: {0}")]
    InvalidDevice(String),

    #[error("Invalid Game: {0}")]
    InvalidGame(String),

    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Calculation Aborted: {0}")]
    Pipeline(String),

    #[error("Update Check Failed: {0}")]
    Update(String),
}

pub type SenseResult<T> = Result<T, SenseError>;
