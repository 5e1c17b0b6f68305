//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, language codes and value ranges
//! - Reject static asset patterns that would match every path
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::ServiceConfig;
use crate::layout::key::Language;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("layout.site_name must not be empty")]
    EmptySiteName,

    #[error("layout.default_language '{0}' is not a valid language code")]
    InvalidDefaultLanguage(String),

    #[error("layout.data_dir must not be empty")]
    EmptyDataDir,

    #[error("{0} must not contain empty patterns")]
    EmptyStaticPattern(&'static str),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("observability.log_level '{0}' is not a valid filter directive")]
    InvalidLogLevel(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let layout = &config.layout;
    if layout.site_name.trim().is_empty() {
        errors.push(ValidationError::EmptySiteName);
    }
    if Language::parse(&layout.default_language).is_none() {
        errors.push(ValidationError::InvalidDefaultLanguage(
            layout.default_language.clone(),
        ));
    }
    if layout.data_dir.trim().is_empty() {
        errors.push(ValidationError::EmptyDataDir);
    }
    if layout.extra_static_prefixes.iter().any(String::is_empty) {
        errors.push(ValidationError::EmptyStaticPattern("layout.extra_static_prefixes"));
    }
    if layout.extra_static_substrings.iter().any(String::is_empty) {
        errors.push(ValidationError::EmptyStaticPattern("layout.extra_static_substrings"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let observability = &config.observability;
    if EnvFilter::try_new(&observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(observability.log_level.clone()));
    }
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
