//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce the one-outcome-per-route rule (redirect, leaf, or children)
//! - Validate path patterns and guard keys
//! - Validate value ranges (timeouts > 0, redirect bound > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::fmt;

use crate::config::schema::{RouteConfig, RouterConfig};

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Location of the offending route, e.g. `routes[1].children[0]`.
    pub location: String,
    pub message: String,
}

impl ValidationError {
    fn new(location: &str, message: impl Into<String>) -> Self {
        Self {
            location: location.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Validate a complete configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.navigation.max_redirects == 0 {
        errors.push(ValidationError::new(
            "navigation.max_redirects",
            "must be greater than zero",
        ));
    }
    if config.timeouts.guard_ms == 0 {
        errors.push(ValidationError::new("timeouts.guard_ms", "must be greater than zero"));
    }
    if config.timeouts.load_ms == 0 {
        errors.push(ValidationError::new("timeouts.load_ms", "must be greater than zero"));
    }

    validate_routes(&config.routes, "routes", &mut errors);
    for (name, routes) in &config.modules {
        if name.trim().is_empty() {
            errors.push(ValidationError::new("modules", "module name must not be empty"));
        }
        validate_routes(routes, &format!("modules.{}", name), &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a list of sibling routes, recursing into children.
pub fn validate_routes(routes: &[RouteConfig], location: &str, errors: &mut Vec<ValidationError>) {
    for (i, route) in routes.iter().enumerate() {
        let here = format!("{}[{}]", location, i);
        validate_route(route, &here, errors);
        if !route.children.is_empty() {
            validate_routes(&route.children, &format!("{}.children", here), errors);
        }
    }
}

fn validate_route(route: &RouteConfig, location: &str, errors: &mut Vec<ValidationError>) {
    if route.path.starts_with('/') {
        errors.push(ValidationError::new(
            location,
            format!("path '{}' must not start with a slash", route.path),
        ));
    }

    let segments: Vec<&str> = route.path.split('/').filter(|s| !s.is_empty()).collect();
    let mut params = HashSet::new();
    for (i, segment) in segments.iter().enumerate() {
        if *segment == "**" && i + 1 != segments.len() {
            errors.push(ValidationError::new(location, "'**' must be the last path segment"));
        }
        if let Some(name) = segment.strip_prefix(':') {
            if name.is_empty() {
                errors.push(ValidationError::new(location, "parameter segment has no name"));
            } else if !params.insert(name) {
                errors.push(ValidationError::new(
                    location,
                    format!("duplicate parameter ':{}'", name),
                ));
            }
        }
    }

    if route.redirect_to.is_some() {
        let has_outcome = !route.children.is_empty()
            || route.load_children.is_some()
            || route.component.is_some();
        if has_outcome {
            errors.push(ValidationError::new(
                location,
                "redirectTo cannot be combined with children, loadChildren or component",
            ));
        }
        if !route.can_activate.is_empty() || !route.can_activate_child.is_empty() {
            errors.push(ValidationError::new(location, "redirect routes cannot declare guards"));
        }
    }

    if !route.children.is_empty() && route.load_children.is_some() {
        errors.push(ValidationError::new(
            location,
            "children and loadChildren are mutually exclusive",
        ));
    }
    if let Some(module) = &route.load_children {
        if module.trim().is_empty() {
            errors.push(ValidationError::new(location, "loadChildren must not be empty"));
        }
    }

    for key in route.can_activate.iter().chain(route.can_activate_child.iter()) {
        if key.trim().is_empty() {
            errors.push(ValidationError::new(location, "guard keys must not be empty"));
        }
    }
}
