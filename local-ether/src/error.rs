//! Failure types for interface address lookups.
//!
//! Backends report a `LookupError` so tests and callers of `try_lookup` can tell an
//! index that simply does not exist from an OS call that failed. The simple API
//! collapses every variant into `NotFound`.

use std::io;

use thiserror::Error;

use crate::InterfaceIndex;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no interface at index {0}")]
    NoSuchInterface(InterfaceIndex),

    #[error("index {0} is not served, only the primary interface can be looked up")]
    UnsupportedIndex(InterfaceIndex),

    #[error("permission denied: {0}")]
    PermissionDenied(#[source] io::Error),

    #[error("{call} failed: {source}")]
    OsCall {
        call: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("no interface address backend for this target")]
    Unsupported,
}

impl LookupError {
    /// Classifies an error returned by the OS call `call` made on behalf of `index`.
    ///
    /// Errors that mean "there is no such device" become `NoSuchInterface`, access
    /// errors become `PermissionDenied`, anything else is kept as `OsCall`.
    pub fn from_os(call: &'static str, index: InterfaceIndex, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => return LookupError::NoSuchInterface(index),
            io::ErrorKind::PermissionDenied => return LookupError::PermissionDenied(source),
            _ => {}
        }
        #[cfg(unix)]
        {
            if let Some(libc::ENODEV | libc::ENXIO) = source.raw_os_error() {
                return LookupError::NoSuchInterface(index);
            }
        }
        LookupError::OsCall { call, source }
    }

    /// Returns `true` if the failure means the index does not name an interface.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LookupError::NoSuchInterface(_) | LookupError::UnsupportedIndex(_)
        )
    }
}

/// The only failure reported by `lookup`: no address could be obtained for the index.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("local ethernet address not found")]
pub struct NotFound;

impl From<LookupError> for NotFound {
    fn from(err: LookupError) -> Self {
        log::debug!("interface lookup failed: {err}");
        NotFound
    }
}
