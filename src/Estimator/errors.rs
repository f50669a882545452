use std::fmt;
use thiserror::Error;

/// error types of the estimation exchange
///
/// Only `ProtocolError` aborts a call. `ServiceUnavailable` is reported through
/// [`ServiceStatus::Unavailable`], the remaining variants are notices attached to an
/// otherwise successful result.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EstimatorError {
    #[error("Estimation service at {address} is unavailable: {reason}")]
    ServiceUnavailable { address: String, reason: String },
    #[error("Malformed response from estimation service: {0}")]
    ProtocolError(String),
    #[error("Species not found in the service dictionary: {0}")]
    UnresolvedSpecies(String),
    #[error("Duplicate rate for reaction {0} was not summed")]
    DuplicateRateUnhandled(String),
}

/// whether the service took part in the exchange
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceStatus {
    Reached,
    Unavailable(EstimatorError),
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ServiceStatus::Reached => write!(f, "reached"),
            ServiceStatus::Unavailable(err) => write!(f, "unavailable ({})", err),
        }
    }
}
