//! Error kinds and the diagnostic-handler contract (spec §7).
//!
//! Public API never unwinds a `Result` across its boundary: a fallible
//! operation returns a neutral value (an empty sequence/set, `NULL_STATE`,
//! `false`, ...) and reports exactly one diagnostic through
//! [`notice`]. `FsmError` exists so that call sites and tests can still
//! talk about *why* an operation failed, and so internal plumbing that
//! chains several fallible steps (file parsing, cache population) can use
//! `?` against an `anyhow::Result` before converting to the public type.

use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Mutex;

/// One of the six error kinds named in spec §7.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum FsmError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("operation not supported by this FSM variant: {0}")]
    NotSupportedByVariant(String),

    #[error("operation requires a reduced, compact machine")]
    UnreducedMachine,

    #[error("requested artifact does not exist for this FSM: {0}")]
    NotApplicable(String),

    #[error("external solver unavailable: {0}")]
    ExternalUnavailable(String),

    #[error("I/O failure: {0}")]
    IoFailure(String),
}

/// Handler type installed via [`set_error_msg_handler`]; mirrors the C++
/// `errorMsgHandler` function pointer in `FSMlib.h`.
pub type ErrorMsgHandler = fn(&str);

fn display_error_msg_on_stderr(msg: &str) {
    eprintln!("{msg}");
}

static HANDLER: Lazy<Mutex<ErrorMsgHandler>> =
    Lazy::new(|| Mutex::new(display_error_msg_on_stderr));

/// Installs a new diagnostic handler, replacing the default (stderr) one.
pub fn set_error_msg_handler(handler: ErrorMsgHandler) {
    *HANDLER.lock().unwrap() = handler;
}

/// Resets the diagnostic handler to its default (stderr) behavior.
pub fn reset_error_msg_handler() {
    *HANDLER.lock().unwrap() = display_error_msg_on_stderr;
}

/// Emits `err` through the currently installed handler and logs it at
/// `warn` level so a binary wiring up `log`/`env_logger` sees it too.
pub fn notice(err: &FsmError) {
    let msg = err.to_string();
    log::warn!("{msg}");
    let handler = *HANDLER.lock().unwrap();
    handler(&msg);
}

impl fmt::Display for ErrorKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A tag-only view of [`FsmError`], useful in tests that only care which
/// branch fired, not the formatted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKindTag {
    InvalidArgument,
    NotSupportedByVariant,
    UnreducedMachine,
    NotApplicable,
    ExternalUnavailable,
    IoFailure,
}

impl FsmError {
    pub fn kind(&self) -> ErrorKindTag {
        match self {
            FsmError::InvalidArgument(_) => ErrorKindTag::InvalidArgument,
            FsmError::NotSupportedByVariant(_) => ErrorKindTag::NotSupportedByVariant,
            FsmError::UnreducedMachine => ErrorKindTag::UnreducedMachine,
            FsmError::NotApplicable(_) => ErrorKindTag::NotApplicable,
            FsmError::ExternalUnavailable(_) => ErrorKindTag::ExternalUnavailable,
            FsmError::IoFailure(_) => ErrorKindTag::IoFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static CALLS: AtomicUsize = AtomicUsize::new(0);

    fn counting_handler(_msg: &str) {
        CALLS.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn custom_handler_is_invoked() {
        set_error_msg_handler(counting_handler);
        notice(&FsmError::UnreducedMachine);
        assert!(CALLS.load(Ordering::SeqCst) >= 1);
        reset_error_msg_handler();
    }
}
