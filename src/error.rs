//! Failure modes of a jet propagation

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum JetError {
    #[error("domain attenuation 'sens' must lie strictly between 0 and 1, got {0}")]
    InvalidSensitivity(f64),

    #[error("outer radius Rmax = {r_max} pc must exceed R_BLR = {r_blr} pc")]
    InvalidExtent { r_blr: f64, r_max: f64 },

    #[error("parameter '{name}' has invalid value {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("unknown jet parameter '{0}'")]
    UnknownParameter(String),

    #[error("jet requires {count} domains, more than the limit of {limit}")]
    TooManyDomains { count: usize, limit: usize },

    #[error("transfer matrix contains non-finite entries")]
    NonFiniteResult,
}

pub type Result<T> = std::result::Result<T, JetError>;
