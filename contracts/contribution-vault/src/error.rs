use cosmwasm_std::{OverflowError, StdError, Uint128};
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    OverflowError(#[from] OverflowError),

    #[error(transparent)]
    PaymentError(#[from] PaymentError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Paused")]
    Paused,

    #[error("Not paused")]
    NotPaused,

    #[error("Reentrant call")]
    Reentrant,

    #[error("Invalid identity: '{value}'")]
    InvalidIdentity { value: String },

    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Token {token} is not allowed")]
    NotAllowed { token: String },

    #[error("Token {token} is not in the allowed tokens list")]
    NotFound { token: String },

    #[error("Token {token} is already allowed")]
    AlreadyAllowed { token: String },

    #[error("Cannot allow more than {max} tokens")]
    CapacityExceeded { max: usize },

    #[error("Insufficient custody of {token}: available {available}, required {required}")]
    InsufficientCustody {
        token: String,
        available: Uint128,
        required: Uint128,
    },

    #[error("New value is the same as the current one")]
    Unchanged,

    #[error("No ownership transfer is pending")]
    NoPendingOwner,

    #[error("Token transfer failed: {reason}")]
    TransferFailed { reason: String },
}

pub fn new_generic_error(msg: impl Into<String>) -> ContractError {
    ContractError::Std(StdError::generic_err(msg))
}
