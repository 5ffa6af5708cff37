//! Error types for memokit.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a cache is constructed with invalid
//!   parameters (e.g. zero capacity).
//! - [`CleanupError`]: Describes a teardown callback that failed while the
//!   [`CleanupRegistry`](crate::cleanup::CleanupRegistry) ran it.
//!
//! ## Example Usage
//!
//! ```
//! use memokit::error::ConfigError;
//! use memokit::policy::lru::BoundedCache;
//!
//! let cache: Result<BoundedCache<String, i32>, ConfigError> = BoundedCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! let bad = BoundedCache::<String, i32>::try_new(0);
//! assert!(matches!(bad, Err(ConfigError::InvalidArgument { param: "capacity", .. })));
//! ```

use thiserror::Error;

/// Boxed error returned by fallible cleanup callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned when cache configuration parameters are invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid argument `{param}`: {reason}")]
    InvalidArgument {
        param: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(param: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            param,
            reason: reason.into(),
        }
    }

    /// Name of the offending parameter.
    pub fn param(&self) -> &'static str {
        match self {
            Self::InvalidArgument { param, .. } => param,
        }
    }
}

/// A cleanup callback that did not complete.
///
/// The registry never propagates these out of
/// [`cleanup_all`](crate::cleanup::CleanupRegistry::cleanup_all); they are
/// logged and collected into a [`CleanupReport`](crate::cleanup::CleanupReport).
#[derive(Debug, Error)]
pub enum CleanupError {
    /// The callback returned an error.
    #[error("cleanup `{name}` failed: {source}")]
    Failed {
        name: String,
        #[source]
        source: BoxError,
    },
    /// The callback panicked.
    #[error("cleanup `{name}` panicked: {message}")]
    Panicked { name: String, message: String },
}

impl CleanupError {
    /// Name the failed callback was registered under.
    pub fn name(&self) -> &str {
        match self {
            Self::Failed { name, .. } | Self::Panicked { name, .. } => name,
        }
    }

    pub fn is_panic(&self) -> bool {
        matches!(self, Self::Panicked { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_names_param_and_reason() {
        let err = ConfigError::invalid("capacity", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid argument `capacity`: must be greater than zero"
        );
        assert_eq!(err.param(), "capacity");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::invalid("capacity", "x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ConfigError>();
    }

    // -- CleanupError -----------------------------------------------------

    #[test]
    fn cleanup_failed_keeps_source() {
        use std::error::Error as _;

        let source: BoxError = "disk gone".into();
        let err = CleanupError::Failed {
            name: "flush".into(),
            source,
        };
        assert_eq!(err.name(), "flush");
        assert!(!err.is_panic());
        assert_eq!(err.to_string(), "cleanup `flush` failed: disk gone");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("disk gone"));
    }

    #[test]
    fn cleanup_panicked_display() {
        let err = CleanupError::Panicked {
            name: "timer".into(),
            message: "boom".into(),
        };
        assert!(err.is_panic());
        assert_eq!(err.to_string(), "cleanup `timer` panicked: boom");
    }

    #[test]
    fn cleanup_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<CleanupError>();
    }
}
