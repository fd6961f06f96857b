//! Errors raised while parsing or validating fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid token amount: {0}")]
    InvalidAmount(String),

    #[error("invalid account id: {0:?}")]
    InvalidAccount(String),
}
