use cosmwasm_std::StdError;
use thiserror::Error;

/// Coarse classification of failures, mirroring how callers are expected to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller lacks the role the operation requires.
    Authorization,
    /// System paused, unknown or inactive class, duplicate name, repeated grant.
    State,
    /// Balance, points, pool or backing too low.
    InsufficientFunds,
    /// Malformed input: zero amounts, mismatched batches, rounding to nothing.
    Validation,
    /// Storage, serialization or arithmetic overflow.
    Internal,
}

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: only {role} can perform this action")]
    Unauthorized { role: String },

    #[error("contract is paused")]
    Paused,

    #[error("contract is not paused")]
    NotPaused,

    #[error("contract is already paused")]
    AlreadyPaused,

    #[error("unexpected funds sent with this message")]
    UnexpectedFunds,

    #[error("zero amount not allowed")]
    ZeroAmount,

    #[error("overflow in arithmetic operation")]
    Overflow,

    #[error("insufficient balance of class {class_id}: have {balance}, need {required}")]
    InsufficientBalance {
        class_id: u64,
        balance: String,
        required: String,
    },

    #[error("{holder} has already received the onboarding grant")]
    AlreadyGranted { holder: String },

    #[error("onboarding pool exhausted: have {available}, need {required}")]
    InsufficientPool { available: String, required: String },

    #[error("unknown asset class: {class_id}")]
    UnknownClass { class_id: u64 },

    #[error("asset class {class_id} is not active")]
    ClassInactive { class_id: u64 },

    #[error("asset class name '{name}' is already taken")]
    DuplicateName { name: String },

    #[error("invalid name: must be 1-{max} characters")]
    InvalidName { max: usize },

    #[error("invalid symbol: must be 1-{max} characters")]
    InvalidSymbol { max: usize },

    #[error("invalid decimals: {decimals} (max {max})")]
    InvalidDecimals { decimals: u8, max: u8 },

    #[error("collateral too small to produce any initial supply")]
    ZeroInitialSupply,

    #[error("deposit too small: mints zero class tokens at the fixed rate")]
    ZeroMintAmount,

    #[error("burn too small: returns zero base asset at the fixed rate")]
    ZeroReturnAmount,

    #[error("insufficient backing: need {needed}, available {available}")]
    InsufficientBacking { needed: String, available: String },

    #[error("withdrawal exceeds unlocked surplus of {available}")]
    SurplusExceeded { available: String },

    #[error("batch length mismatch: {actions} actions, {points} point values")]
    LengthMismatch { actions: usize, points: usize },

    #[error("batch must not be empty")]
    EmptyBatch,

    #[error("batch too large (max {max})")]
    BatchTooLarge { max: usize },

    #[error("duplicate holder in batch: {holder}")]
    DuplicateInBatch { holder: String },

    #[error("invalid action name: must be 1-{max} characters")]
    InvalidAction { max: usize },

    #[error("insufficient points: available {available}, requested {requested}")]
    InsufficientPoints { available: String, requested: String },
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::Unauthorized { .. } => ErrorCategory::Authorization,
            ContractError::Paused
            | ContractError::NotPaused
            | ContractError::AlreadyPaused
            | ContractError::AlreadyGranted { .. }
            | ContractError::UnknownClass { .. }
            | ContractError::ClassInactive { .. }
            | ContractError::DuplicateName { .. } => ErrorCategory::State,
            ContractError::InsufficientBalance { .. }
            | ContractError::InsufficientPool { .. }
            | ContractError::InsufficientBacking { .. }
            | ContractError::SurplusExceeded { .. }
            | ContractError::InsufficientPoints { .. } => ErrorCategory::InsufficientFunds,
            ContractError::UnexpectedFunds
            | ContractError::ZeroAmount
            | ContractError::InvalidName { .. }
            | ContractError::InvalidSymbol { .. }
            | ContractError::InvalidDecimals { .. }
            | ContractError::ZeroInitialSupply
            | ContractError::ZeroMintAmount
            | ContractError::ZeroReturnAmount
            | ContractError::LengthMismatch { .. }
            | ContractError::EmptyBatch
            | ContractError::BatchTooLarge { .. }
            | ContractError::DuplicateInBatch { .. }
            | ContractError::InvalidAction { .. } => ErrorCategory::Validation,
            ContractError::Std(_) | ContractError::Overflow => ErrorCategory::Internal,
        }
    }
}
