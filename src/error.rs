//! Crate-level error type for embedders that drive the whole stack.

use std::fmt;

use crate::config::ConfigError;
use crate::ops::OpError;
use crate::store::StoreError;

#[derive(Debug)]
pub enum RxError {
    Config(ConfigError),
    Store(StoreError),
    Op(OpError),
}

impl fmt::Display for RxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RxError::Config(err) => write!(f, "{}", err),
            RxError::Store(err) => write!(f, "{}", err),
            RxError::Op(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for RxError {}

impl From<ConfigError> for RxError {
    fn from(error: ConfigError) -> Self {
        RxError::Config(error)
    }
}

impl From<StoreError> for RxError {
    fn from(error: StoreError) -> Self {
        RxError::Store(error)
    }
}

impl From<OpError> for RxError {
    fn from(error: OpError) -> Self {
        RxError::Op(error)
    }
}
