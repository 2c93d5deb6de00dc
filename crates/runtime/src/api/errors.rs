//! Error types surfaced by the remote simulator services.
//!
//! Behaviors never propagate these out of a tick; they log them and end the
//! current step.
use thiserror::Error;

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{service} service is unavailable")]
    Unavailable { service: &'static str },

    #[error("{service} service rejected the request: {reason}")]
    Rejected {
        service: &'static str,
        reason: String,
    },

    #[error("service channel closed")]
    ChannelClosed,
}
