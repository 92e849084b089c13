//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check URLs parse and addresses are well formed
//! - Validate value ranges (timeouts > 0, TTLs > 0)
//! - Detect duplicate service entries
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: AppConfig -> Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("invalid URL for {field}: '{value}'")]
    Url { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error("duplicate service '{0}'")]
    DuplicateService(String),

    #[error("service name must not be empty")]
    EmptyServiceName,

    #[error("upstream default_error_status {0} is not a valid HTTP status")]
    ErrorStatus(u16),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    check_url(&mut errors, "upstream.base_url", &config.upstream.base_url);
    check_url(&mut errors, "toggles.endpoint", &config.toggles.endpoint);
    check_url(
        &mut errors,
        "response.onion_origin",
        &config.response.onion_origin,
    );

    if config.upstream.timeout_ms == 0 {
        errors.push(ValidationError::ZeroDuration {
            field: "upstream.timeout_ms",
        });
    }
    if config.toggles.timeout_ms == 0 {
        errors.push(ValidationError::ZeroDuration {
            field: "toggles.timeout_ms",
        });
    }
    if config.toggles.cache_ttl_secs == 0 {
        errors.push(ValidationError::ZeroDuration {
            field: "toggles.cache_ttl_secs",
        });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroDuration {
            field: "timeouts.request_secs",
        });
    }

    if !(100..=599).contains(&config.upstream.default_error_status) {
        errors.push(ValidationError::ErrorStatus(
            config.upstream.default_error_status,
        ));
    }

    let mut seen = HashSet::new();
    for service in &config.services {
        if service.name.is_empty() {
            errors.push(ValidationError::EmptyServiceName);
        } else if !seen.insert(service.name.clone()) {
            errors.push(ValidationError::DuplicateService(service.name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if Url::parse(value).is_err() {
        errors.push(ValidationError::Url {
            field,
            value: value.to_string(),
        });
    }
}
