//! Tagged fetch state
//!
//! Every view that loads remote data holds one of these per request
//! instead of separate loading/error/data flags.

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Success(T),
    Error(ClientError),
}

impl<T> FetchState<T> {
    pub fn from_result(result: ClientResult<T>) -> Self {
        match result {
            Ok(value) => FetchState::Success(value),
            Err(e) => FetchState::Error(e),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            FetchState::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            FetchState::Loading => FetchState::Loading,
            FetchState::Success(value) => FetchState::Success(f(value)),
            FetchState::Error(e) => FetchState::Error(e),
        }
    }

    pub fn as_ref(&self) -> FetchState<&T> {
        match self {
            FetchState::Loading => FetchState::Loading,
            FetchState::Success(value) => FetchState::Success(value),
            FetchState::Error(e) => FetchState::Error(e.clone()),
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Loading
    }
}

impl<T> From<ClientResult<T>> for FetchState<T> {
    fn from(result: ClientResult<T>) -> Self {
        FetchState::from_result(result)
    }
}
