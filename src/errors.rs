//! Card errors. Every action failure ends up here before it is toasted.

use thiserror::Error;

pub type CardResult<T> = Result<T, CardError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("Insufficient funds")]
    InsufficientFunds { required: u64, available: u64 },

    /// Provider message, passed through verbatim.
    #[error("{0}")]
    Provider(String),

    #[error("No payment address for the active session")]
    MissingPaymentAddress,

    #[error("Unknown wallet: {0}")]
    UnknownWallet(String),

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Config: {0}")]
    Config(String),
}

impl CardError {
    pub fn provider(err: anyhow::Error) -> Self {
        CardError::Provider(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_message_is_verbatim() {
        let err = CardError::provider(anyhow::anyhow!("User rejected the request"));
        assert_eq!(err.to_string(), "User rejected the request");
    }

    #[test]
    fn insufficient_funds_message() {
        let err = CardError::InsufficientFunds { required: 1500, available: 1000 };
        assert_eq!(err.to_string(), "Insufficient funds");
    }
}
