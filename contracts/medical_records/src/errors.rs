use mr_common::CommonError;
use soroban_sdk::contracttype;

/// Error categories for classifying different types of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Lifecycle errors: calls made before or against initialization
    Lifecycle = 1,
    /// Authorization errors: caller is not in the required set or role
    Authorization = 2,
    /// Not found errors: resource lookup failures
    NotFound = 3,
    /// Validation errors: invalid input parameters or configuration
    Validation = 4,
    /// Storage errors: persisted bytes do not match the account schema
    Storage = 5,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    /// Low severity: rejected input, nothing is wrong with stored state
    Low = 1,
    /// Medium severity: access control rejected the caller
    Medium = 2,
    /// Critical severity: stored state is unreadable
    Critical = 3,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    NotFound = 4,
    MalformedAccount = 5,
    InvalidPayload = 6,
    PayloadTooLarge = 7,
    InvalidConfig = 8,
    RootAuthorityProtected = 9,
    AuthorityLimitReached = 10,
    InvalidSeeds = 11,
    InvalidIdentity = 12,
}

impl From<CommonError> for ContractError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::InvalidSeeds => ContractError::InvalidSeeds,
            CommonError::InvalidIdentity => ContractError::InvalidIdentity,
            CommonError::MalformedAccount => ContractError::MalformedAccount,
        }
    }
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Lifecycle
            }
            ContractError::Unauthorized | ContractError::RootAuthorityProtected => {
                ErrorCategory::Authorization
            }
            ContractError::NotFound => ErrorCategory::NotFound,
            ContractError::InvalidPayload
            | ContractError::PayloadTooLarge
            | ContractError::InvalidConfig
            | ContractError::AuthorityLimitReached
            | ContractError::InvalidSeeds
            | ContractError::InvalidIdentity => ErrorCategory::Validation,
            ContractError::MalformedAccount => ErrorCategory::Storage,
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::Unauthorized | ContractError::RootAuthorityProtected => {
                ErrorSeverity::Medium
            }
            ContractError::MalformedAccount => ErrorSeverity::Critical,
            _ => ErrorSeverity::Low,
        }
    }

    /// Every failure aborts the whole call and none of them clears up by
    /// resubmitting the same call unchanged.
    pub fn retryable(&self) -> bool {
        false
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Admin registry has not been initialized",
            ContractError::AlreadyInitialized => "Patient record already exists",
            ContractError::Unauthorized => "Unauthorized access",
            ContractError::NotFound => "Account does not exist",
            ContractError::MalformedAccount => "Account data does not match its schema",
            ContractError::InvalidPayload => "Encrypted payload must not be empty",
            ContractError::PayloadTooLarge => "Encrypted payload exceeds the account bound",
            ContractError::InvalidConfig => "Invalid program configuration",
            ContractError::RootAuthorityProtected => {
                "The root authority cannot be removed from its own sets"
            }
            ContractError::AuthorityLimitReached => "Authority set is full",
            ContractError::InvalidSeeds => "Invalid address seeds",
            ContractError::InvalidIdentity => "Identity has an unsupported encoding",
        }
    }
}
