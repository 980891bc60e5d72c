//! Terminal results of a navigation.

use serde::Serialize;

use crate::guards::{BlockReason, GuardKey};
use crate::loader::LoadError;
use crate::routing::chain::ActivationChain;
use crate::routing::resolver::ResolveError;

/// Terminal result of a navigation attempt.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Every guard passed; the chain is now the current route.
    Activated(ActivationChain),
    /// A guard stopped the navigation.
    Blocked { guard: GuardKey, reason: BlockReason },
    /// No route matches.
    NotFound { url: String },
    /// Redirects looped or exceeded the hop bound.
    RedirectLoop { url: String },
    /// A lazy module could not be loaded.
    LoadFailed(LoadError),
    /// A newer navigation superseded this one.
    Cancelled,
}

/// Label of an [`Outcome`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Activated,
    Blocked,
    NotFound,
    RedirectLoop,
    LoadFailed,
    Cancelled,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Activated => "activated",
            OutcomeKind::Blocked => "blocked",
            OutcomeKind::NotFound => "not_found",
            OutcomeKind::RedirectLoop => "redirect_loop",
            OutcomeKind::LoadFailed => "load_failed",
            OutcomeKind::Cancelled => "cancelled",
        }
    }
}

impl Outcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Activated(_) => OutcomeKind::Activated,
            Outcome::Blocked { .. } => OutcomeKind::Blocked,
            Outcome::NotFound { .. } => OutcomeKind::NotFound,
            Outcome::RedirectLoop { .. } => OutcomeKind::RedirectLoop,
            Outcome::LoadFailed(_) => OutcomeKind::LoadFailed,
            Outcome::Cancelled => OutcomeKind::Cancelled,
        }
    }

    pub fn is_activated(&self) -> bool {
        matches!(self, Outcome::Activated(_))
    }

    /// The activated chain, if any.
    pub fn chain(&self) -> Option<&ActivationChain> {
        match self {
            Outcome::Activated(chain) => Some(chain),
            _ => None,
        }
    }

    /// The guard that blocked, if any.
    pub fn blocked_by(&self) -> Option<&GuardKey> {
        match self {
            Outcome::Blocked { guard, .. } => Some(guard),
            _ => None,
        }
    }
}

impl From<ResolveError> for Outcome {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::NotFound { url } => Outcome::NotFound { url },
            ResolveError::RedirectLoop { url, .. } => Outcome::RedirectLoop { url },
            ResolveError::LoadFailed(e) => Outcome::LoadFailed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::node::ModuleRef;

    #[test]
    fn test_from_resolve_error() {
        let outcome = Outcome::from(ResolveError::RedirectLoop { url: "/a".into(), hops: 2 });
        assert_eq!(outcome.kind(), OutcomeKind::RedirectLoop);

        let outcome = Outcome::from(ResolveError::LoadFailed(LoadError::UnknownModule(
            ModuleRef::new("m"),
        )));
        assert!(matches!(&outcome, Outcome::LoadFailed(e) if e.module().as_str() == "m"));
        assert!(!outcome.is_activated());
        assert!(outcome.chain().is_none());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(OutcomeKind::NotFound.as_str(), "not_found");
        assert_eq!(
            serde_json::to_string(&OutcomeKind::RedirectLoop).unwrap(),
            r#""redirect_loop""#
        );
    }
}
