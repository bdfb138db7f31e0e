//! Cache Config Validation Core
//!
//! This crate parses and validates cache-control rule lines and provides
//! the coded-error framework the validators report through.
//!
//! ```
//! use cachecfg_core::{ContextConfig, codes, rules};
//!
//! let ctx = rules::error_context(&ContextConfig::default()).unwrap();
//! assert!(rules::validate_rules(&ctx, "dest_domain=example.com suffix=js revalidate=1d").is_ok());
//!
//! let err = rules::validate_rules(&ctx, "dest_ip=bad_ip foo1=foo").unwrap_err();
//! assert_eq!(err.code(), codes::INVALID_IP);
//! ```

pub mod codes;
pub mod config;
pub mod context;
pub mod error;
pub mod rules;

pub use codes::ErrorCode;
pub use config::ContextConfig;
pub use context::{ContextState, ErrorContext, InternalErrorMode, UsageStats};
pub use error::{Cause, CodedError, Misuse};
pub use rules::{Rule, parse_rule, validate_rule, validate_rules};
