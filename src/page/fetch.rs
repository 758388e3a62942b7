//! Per-resource fetch state and request generation tokens.

/// Lifecycle of one remote resource
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    /// Nothing requested yet
    #[default]
    Idle,
    Loading,
    /// Request succeeded with no data
    Empty,
    Ready(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FetchState::Empty)
    }
}

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Issues tokens for a resource and tells whether a response is current.
///
/// Only the most recently issued token is current, so a response from a
/// superseded request can be recognised and dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestGenerations {
    latest: u64,
}

impl RequestGenerations {
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}
