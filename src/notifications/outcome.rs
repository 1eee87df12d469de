//! Results of synchronizer operations
//!
//! Every operation has two paths: a remote one (the request to the server), and a local one (the change to the in-memory state).
//! The local path never depends on the remote one.

use std::fmt::{Display, Error, Formatter};

use crate::traits::BoxError;

/// What happened on the server side
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// The server accepted the request
    Confirmed,
    /// The request failed. The local effect has been applied anyway
    Failed(String),
}

impl RemoteOutcome {
    /// Log and convert the result of a request
    pub(crate) fn from_result<T>(what: &str, result: Result<T, BoxError>) -> Self {
        match result {
            Ok(_) => Self::Confirmed,
            Err(err) => {
                log::warn!("Unable to {} on the server ({}). Keeping the local change only", what, err);
                Self::Failed(err.to_string())
            },
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

/// What happened to the local state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalOutcome {
    /// The state has been changed (or replaced)
    Applied,
    /// Nothing had to change, e.g. the notification was already read, or does not exist
    Unchanged,
    /// The synchronizer has been disposed, its state is not updated anymore
    Detached,
}

/// The result of a synchronizer operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncOutcome {
    pub remote: RemoteOutcome,
    pub local: LocalOutcome,
}

impl SyncOutcome {
    pub fn new(remote: RemoteOutcome, local: LocalOutcome) -> Self {
        Self { remote, local }
    }

    pub fn is_applied(&self) -> bool {
        self.local == LocalOutcome::Applied
    }
}

impl Display for SyncOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let local = match self.local {
            LocalOutcome::Applied => "applied",
            LocalOutcome::Unchanged => "unchanged",
            LocalOutcome::Detached => "detached",
        };
        match &self.remote {
            RemoteOutcome::Confirmed => write!(f, "remote confirmed, local {}", local),
            RemoteOutcome::Failed(err) => write!(f, "remote failed ({}), local {}", err, local),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_result() {
        assert_eq!(RemoteOutcome::from_result("ping", Ok::<_, BoxError>(())), RemoteOutcome::Confirmed);
        let failed = RemoteOutcome::from_result::<()>("ping", Err("connection refused".into()));
        assert_eq!(failed, RemoteOutcome::Failed("connection refused".to_string()));
        assert_eq!(failed.is_confirmed(), false);

        let outcome = SyncOutcome::new(failed, LocalOutcome::Applied);
        assert!(outcome.is_applied());
        assert_eq!(outcome.to_string(), "remote failed (connection refused), local applied");
    }
}
