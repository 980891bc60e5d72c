//! Route tree nodes.
//!
//! # Responsibilities
//! - Represent a single entry of the route tree
//! - Enforce that each node has exactly one resolution outcome
//! - Build nodes from configuration or through the builder API
//!
//! # Design Decisions
//! - Nodes are immutable once constructed and shared via `Arc`
//! - The resolution outcome is an enum, so a node cannot be both a redirect and a leaf
//! - Lazy subtrees are referenced by `ModuleRef` and resolved through the module cache

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::schema::{PathMatch, RouteConfig};
use crate::guards::GuardKey;
use crate::routing::matcher::PathPattern;

/// Opaque reference to a lazily loaded module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleRef(String);

impl ModuleRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleRef {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

/// What a node resolves to once matched.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Re-dispatch navigation to another URL.
    Redirect(String),
    /// Activatable destination.
    Leaf { component: Option<String> },
    /// Eagerly declared children.
    Children(Vec<Arc<RouteNode>>),
    /// Children provided by a module that has not been loaded yet.
    Lazy(ModuleRef),
}

/// Error raised when a node description violates the tree invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("route '{path}': redirectTo excludes children, loadChildren and component")]
    RedirectWithOutcome { path: String },

    #[error("route '{path}': children and loadChildren are mutually exclusive")]
    ChildrenAndLazy { path: String },

    #[error("route '{path}': {reason}")]
    InvalidPattern { path: String, reason: String },
}

/// A single entry in the route tree.
#[derive(Debug, Clone)]
pub struct RouteNode {
    pattern: PathPattern,
    match_mode: PathMatch,
    guards: Vec<GuardKey>,
    child_guards: Vec<GuardKey>,
    data: BTreeMap<String, String>,
    resolution: Resolution,
}

impl RouteNode {
    fn with_resolution(path: &str, resolution: Resolution) -> Self {
        Self {
            pattern: PathPattern::parse(path),
            match_mode: PathMatch::Prefix,
            guards: Vec::new(),
            child_guards: Vec::new(),
            data: BTreeMap::new(),
            resolution,
        }
    }

    /// An activatable leaf without a component name.
    pub fn leaf(path: &str) -> Self {
        Self::with_resolution(path, Resolution::Leaf { component: None })
    }

    /// A redirect to `target`.
    pub fn redirect(path: &str, target: &str) -> Self {
        Self::with_resolution(path, Resolution::Redirect(target.to_string()))
    }

    /// A node with eagerly declared children.
    pub fn parent(path: &str, children: Vec<RouteNode>) -> Self {
        Self::with_resolution(
            path,
            Resolution::Children(children.into_iter().map(Arc::new).collect()),
        )
    }

    /// A node whose children come from a lazily loaded module.
    pub fn lazy(path: &str, module: impl Into<ModuleRef>) -> Self {
        Self::with_resolution(path, Resolution::Lazy(module.into()))
    }

    /// Require the node to consume every remaining segment.
    pub fn full(mut self) -> Self {
        self.match_mode = PathMatch::Full;
        self
    }

    /// Append a `canActivate` guard.
    pub fn guard(mut self, key: impl Into<GuardKey>) -> Self {
        self.guards.push(key.into());
        self
    }

    /// Append a `canActivateChild` guard.
    pub fn child_guard(mut self, key: impl Into<GuardKey>) -> Self {
        self.child_guards.push(key.into());
        self
    }

    /// Attach static data.
    pub fn data(mut self, key: &str, value: &str) -> Self {
        self.data.insert(key.to_string(), value.to_string());
        self
    }

    /// Name the component of a leaf. No effect on other nodes.
    pub fn component(mut self, name: &str) -> Self {
        if let Resolution::Leaf { component } = &mut self.resolution {
            *component = Some(name.to_string());
        }
        self
    }

    /// Build a node (and its eager children) from configuration.
    pub fn from_config(config: &RouteConfig) -> Result<Self, NodeError> {
        PathPattern::try_parse(&config.path).map_err(|reason| NodeError::InvalidPattern {
            path: config.path.clone(),
            reason,
        })?;

        let resolution = match (&config.redirect_to, &config.load_children) {
            (Some(_), _) if !config.children.is_empty()
                || config.load_children.is_some()
                || config.component.is_some() =>
            {
                return Err(NodeError::RedirectWithOutcome { path: config.path.clone() });
            }
            (Some(target), None) => Resolution::Redirect(target.clone()),
            (None, Some(_)) if !config.children.is_empty() => {
                return Err(NodeError::ChildrenAndLazy { path: config.path.clone() });
            }
            (None, Some(module)) => Resolution::Lazy(ModuleRef::new(module.clone())),
            (None, None) if !config.children.is_empty() => Resolution::Children(
                config
                    .children
                    .iter()
                    .map(|child| RouteNode::from_config(child).map(Arc::new))
                    .collect::<Result<_, _>>()?,
            ),
            _ => Resolution::Leaf { component: config.component.clone() },
        };

        Ok(Self {
            match_mode: config.match_mode(),
            guards: config.can_activate.iter().map(GuardKey::from).collect(),
            child_guards: config.can_activate_child.iter().map(GuardKey::from).collect(),
            data: config.data.clone(),
            ..Self::with_resolution(&config.path, resolution)
        })
    }

    /// Build a list of sibling nodes from configuration.
    pub fn from_configs(configs: &[RouteConfig]) -> Result<Vec<Self>, NodeError> {
        configs.iter().map(RouteNode::from_config).collect()
    }

    pub fn path(&self) -> &str {
        self.pattern.source()
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn match_mode(&self) -> PathMatch {
        self.match_mode
    }

    pub fn guards(&self) -> &[GuardKey] {
        &self.guards
    }

    pub fn child_guards(&self) -> &[GuardKey] {
        &self.child_guards
    }

    pub fn data_value(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub fn component_name(&self) -> Option<&str> {
        match &self.resolution {
            Resolution::Leaf { component } => component.as_deref(),
            _ => None,
        }
    }
}
