use crate::domain::money::{Amount, Balance};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("authentication failed")]
    AuthenticationFailed,
    #[error("{0}")]
    Validation(String),
    #[error("insufficient funds: balance {balance} does not cover {requested}")]
    InsufficientFunds { balance: Balance, requested: Amount },
    #[error("no user with id {0}")]
    UnknownUser(i64),
    #[error("no account with id {0}")]
    UnknownAccount(i64),
    #[error("no transfer with id {0}")]
    UnknownTransfer(i64),
    #[error("transfer {0} is not pending")]
    TransferNotPending(i64),
}
