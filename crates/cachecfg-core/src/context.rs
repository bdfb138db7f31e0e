//! Error context: the registry that mints, counts, and guards coded errors
//!
//! A context moves through two states. While `Configuring`, default messages
//! may be registered and the internal error mode chosen. The first call to
//! [`ErrorContext::new_error`] or [`ErrorContext::new_error_fmt`] moves it
//! to `Active`, after which every configuration call fails with
//! [`BAD_INIT_TIMING`](crate::codes::BAD_INIT_TIMING). Choosing an internal
//! error mode also locks configuration.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use tracing::{debug, info, warn};

use crate::codes::ErrorCode;
use crate::error::{CodedError, Misuse};

/// What the error-creation path does when it detects framework misuse
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InternalErrorMode {
    /// Hand back a descriptive internal error
    #[default]
    Return,
    /// Panic with the internal error
    Abort,
}

/// Lifecycle state of an [`ErrorContext`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Configuring,
    Active,
}

/// Per-code count of errors minted by a context
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct UsageStats {
    counts: BTreeMap<ErrorCode, u64>,
}

impl UsageStats {
    /// Count for `code`, zero if never minted
    pub fn get(&self, code: ErrorCode) -> u64 {
        self.counts.get(&code).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate `(code, count)` pairs in code order
    pub fn iter(&self) -> impl Iterator<Item = (ErrorCode, u64)> + '_ {
        self.counts.iter().map(|(&code, &count)| (code, count))
    }
}

#[derive(Debug, Default)]
struct Inner {
    called_new_error: bool,
    mode_chosen: bool,
    mode: InternalErrorMode,
    default_messages: HashMap<ErrorCode, String>,
    created: BTreeMap<ErrorCode, u64>,
}

impl Inner {
    fn is_locked(&self) -> bool {
        self.called_new_error || self.mode_chosen
    }
}

/// Whitelist-backed registry of error codes for one validation domain.
///
/// Constructed once by the owning module and passed by reference to the
/// functions that report errors. Interior state sits behind a mutex, so a
/// shared reference may be used from several threads.
pub struct ErrorContext {
    name: String,
    codes: BTreeSet<ErrorCode>,
    inner: Mutex<Inner>,
}

impl fmt::Debug for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorContext")
            .field("name", &self.name)
            .field("codes", &self.codes)
            .field("state", &self.state())
            .finish()
    }
}

impl ErrorContext {
    /// Create a context accepting exactly `codes`.
    ///
    /// Every code must be positive; the negative range belongs to the
    /// framework.
    pub fn new(
        name: impl Into<String>,
        codes: impl IntoIterator<Item = ErrorCode>,
    ) -> Result<Self, CodedError> {
        let name = name.into();
        let mut set = BTreeSet::new();
        for code in codes {
            if code <= 0 {
                return Err(Misuse::ReservedCode(code).into_coded(&name));
            }
            set.insert(code);
        }

        debug!("Created error context '{}' with {} codes", name, set.len());

        Ok(Self {
            name,
            codes: set,
            inner: Mutex::new(Inner::default()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contains(&self, code: ErrorCode) -> bool {
        self.codes.contains(&code)
    }

    pub fn state(&self) -> ContextState {
        if self.inner.lock().called_new_error {
            ContextState::Active
        } else {
            ContextState::Configuring
        }
    }

    pub fn internal_error_mode(&self) -> InternalErrorMode {
        self.inner.lock().mode
    }

    /// Register the default message for `code`
    pub fn add_mapping(&self, code: ErrorCode, message: impl Into<String>) -> Result<(), CodedError> {
        let mut inner = self.inner.lock();
        self.add_mapping_locked(&mut inner, code, message.into())
    }

    /// Register several default messages, stopping at the first failure
    pub fn add_mappings<I, S>(&self, mappings: I) -> Result<(), CodedError>
    where
        I: IntoIterator<Item = (ErrorCode, S)>,
        S: Into<String>,
    {
        let mut inner = self.inner.lock();
        for (code, message) in mappings {
            self.add_mapping_locked(&mut inner, code, message.into())?;
        }
        Ok(())
    }

    fn add_mapping_locked(
        &self,
        inner: &mut Inner,
        code: ErrorCode,
        message: String,
    ) -> Result<(), CodedError> {
        if inner.is_locked() {
            return Err(self.misuse(Misuse::InitTiming));
        }
        if !self.codes.contains(&code) {
            return Err(self.misuse(Misuse::BadErrorCode(code)));
        }
        if inner.default_messages.contains_key(&code) {
            return Err(self.misuse(Misuse::DuplicateMapping(code)));
        }
        inner.default_messages.insert(code, message);
        Ok(())
    }

    /// Resolve how framework misuse is reported.
    ///
    /// May be called once, before the first error is created. The choice is
    /// final and locks further configuration.
    pub fn set_internal_error_mode(&self, mode: InternalErrorMode) -> Result<(), CodedError> {
        let mut inner = self.inner.lock();
        if inner.is_locked() {
            return Err(self.misuse(Misuse::InitTiming));
        }
        inner.mode = mode;
        inner.mode_chosen = true;
        info!("Error context '{}' internal error mode: {:?}", self.name, mode);
        Ok(())
    }

    /// Mint an error for `code` using its registered default message
    pub fn new_error(&self, code: ErrorCode) -> CodedError {
        let mut inner = self.inner.lock();
        inner.called_new_error = true;

        if !self.codes.contains(&code) {
            return self.creation_misuse(&inner, Misuse::BadErrorCode(code));
        }
        let message = match inner.default_messages.get(&code) {
            Some(message) => message.clone(),
            None => return self.creation_misuse(&inner, Misuse::MissingMapping(code)),
        };
        self.mint(&mut inner, code, message)
    }

    /// Mint an error for `code` with an explicit formatted message.
    ///
    /// Usually reached through [`coded_error!`](crate::coded_error).
    pub fn new_error_fmt(&self, code: ErrorCode, args: fmt::Arguments<'_>) -> CodedError {
        let mut inner = self.inner.lock();
        inner.called_new_error = true;

        if !self.codes.contains(&code) {
            return self.creation_misuse(&inner, Misuse::BadErrorCode(code));
        }
        self.mint(&mut inner, code, args.to_string())
    }

    /// Snapshot of per-code counts, `None` until an error has been minted
    pub fn usage_stats(&self) -> Option<UsageStats> {
        let inner = self.inner.lock();
        if inner.created.is_empty() {
            return None;
        }
        Some(UsageStats {
            counts: inner.created.clone(),
        })
    }

    fn mint(&self, inner: &mut Inner, code: ErrorCode, message: String) -> CodedError {
        *inner.created.entry(code).or_insert(0) += 1;
        metrics::counter!(
            "cachecfg_errors_total",
            "context" => self.name.clone(),
            "code" => code.to_string()
        )
        .increment(1);
        debug!("Error context '{}' minted code {}: {}", self.name, code, message);
        CodedError::new(code, message)
    }

    fn creation_misuse(&self, inner: &Inner, misuse: Misuse) -> CodedError {
        let err = self.misuse(misuse);
        if inner.mode == InternalErrorMode::Abort {
            panic!("{}", err);
        }
        err
    }

    fn misuse(&self, misuse: Misuse) -> CodedError {
        warn!("Error context '{}' misuse: {}", self.name, misuse);
        misuse.into_coded(&self.name)
    }
}

/// Mint a coded error from a context.
///
/// With only a code, the context's default message is used. With a format
/// string and arguments, the message is formatted instead.
///
/// ```
/// use cachecfg_core::{coded_error, ErrorContext};
///
/// let ctx = ErrorContext::new("demo", [10, 11]).unwrap();
/// ctx.add_mapping(10, "too short").unwrap();
///
/// assert_eq!(coded_error!(ctx, 10).to_string(), "too short");
/// assert_eq!(coded_error!(ctx, 11, "bad token {}", "x").to_string(), "bad token x");
/// ```
#[macro_export]
macro_rules! coded_error {
    ($ctx:expr, $code:expr $(,)?) => {
        $ctx.new_error($code)
    };
    ($ctx:expr, $code:expr, $($arg:tt)+) => {
        $ctx.new_error_fmt($code, ::std::format_args!($($arg)+))
    };
}
