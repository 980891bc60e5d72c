//! Route tree resolution.
//!
//! # Responsibilities
//! - Match a navigation URL against the route tree, depth first
//! - Apply redirects by restarting from the root with the rewritten URL
//! - Load lazy subtrees through the module cache
//! - Return an activation chain or an explicit failure
//!
//! # Design Decisions
//! - Siblings are tried in declaration order; first match wins
//! - A sibling whose subtree does not match is backtracked, unless it matched
//!   in `full` mode, which commits the level
//! - Redirect loops are caught by a visited set and a hop bound
//! - An empty-path redirect matches only when no segments remain, in either mode
//! - Deterministic: same tree state and URL always give the same result

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use thiserror::Error;

use crate::config::schema::PathMatch;
use crate::loader::{LoadError, ModuleCache};
use crate::routing::chain::{ActivatedRoute, ActivationChain};
use crate::routing::node::{Resolution, RouteNode};
use crate::routing::url::{split_path, NavigationUrl};

/// Errors that end route resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No route matches the URL.
    #[error("No route matches '{url}'")]
    NotFound { url: String },

    /// Redirects revisited a URL or exceeded the hop bound.
    #[error("Redirect loop detected at '{url}' after {hops} redirects")]
    RedirectLoop { url: String, hops: usize },

    /// A lazy module could not be loaded.
    #[error(transparent)]
    LoadFailed(#[from] LoadError),
}

/// Outcome of matching one level of the tree.
enum LevelMatch {
    Matched(Vec<ActivatedRoute>),
    Redirect(Vec<String>),
    NoMatch,
}

/// Resolves navigation URLs against the route tree.
pub struct RouteResolver {
    routes: Arc<[Arc<RouteNode>]>,
    modules: ModuleCache,
    max_redirects: usize,
}

impl RouteResolver {
    pub fn new(routes: Vec<RouteNode>, modules: ModuleCache, max_redirects: usize) -> Self {
        Self {
            routes: routes.into_iter().map(Arc::new).collect(),
            modules,
            max_redirects,
        }
    }

    pub fn routes(&self) -> &[Arc<RouteNode>] {
        &self.routes
    }

    pub fn modules(&self) -> &ModuleCache {
        &self.modules
    }

    /// Resolve `url` to an activation chain.
    pub async fn resolve(&self, url: &str) -> Result<ActivationChain, ResolveError> {
        let mut current = NavigationUrl::parse(url);
        let mut visited = HashSet::new();
        visited.insert(current.path());
        let mut hops = 0;

        loop {
            let level = self
                .match_level(&self.routes, &current.segments, 0, BTreeMap::new())
                .await?;

            match level {
                LevelMatch::Matched(routes) => {
                    tracing::debug!(url = %current, depth = routes.len(), "Route resolved");
                    return Ok(ActivationChain::new(current, routes));
                }
                LevelMatch::NoMatch => {
                    tracing::debug!(url = %current, "No route matched");
                    return Err(ResolveError::NotFound { url: current.to_string() });
                }
                LevelMatch::Redirect(segments) => {
                    hops += 1;
                    let next = current.with_segments(segments);
                    tracing::debug!(from = %current, to = %next, hops, "Redirecting");

                    if hops > self.max_redirects || !visited.insert(next.path()) {
                        tracing::warn!(url = %next, hops, "Redirect loop detected");
                        return Err(ResolveError::RedirectLoop { url: next.to_string(), hops });
                    }
                    current = next;
                }
            }
        }
    }

    /// Match `nodes` against `url[offset..]`.
    ///
    /// `inherited` holds the parameters captured by ancestors, used for
    /// redirect substitution.
    fn match_level<'a>(
        &'a self,
        nodes: &'a [Arc<RouteNode>],
        url: &'a [String],
        offset: usize,
        inherited: BTreeMap<String, String>,
    ) -> BoxFuture<'a, Result<LevelMatch, ResolveError>> {
        async move {
            let remaining = &url[offset..];

            for node in nodes {
                let Some(matched) = node.pattern().match_segments(remaining) else {
                    continue;
                };
                let full = node.match_mode() == PathMatch::Full;
                if full && matched.consumed != remaining.len() {
                    continue;
                }
                // An empty redirect only fires at the end of the URL.
                let redirect = matches!(node.resolution(), Resolution::Redirect(_));
                if redirect && node.pattern().is_empty() && !remaining.is_empty() {
                    continue;
                }

                let end = offset + matched.consumed;
                let mut params = inherited.clone();
                params.extend(matched.params.clone());

                let activated = ActivatedRoute {
                    node: node.clone(),
                    segments: url[offset..end].to_vec(),
                    params: matched.params,
                };

                let deeper = match node.resolution() {
                    Resolution::Redirect(target) => {
                        let segments = redirect_segments(
                            target,
                            &url[..offset],
                            &url[end..],
                            node.match_mode(),
                            &params,
                        );
                        return Ok(LevelMatch::Redirect(segments));
                    }
                    Resolution::Leaf { .. } if end == url.len() => {
                        return Ok(LevelMatch::Matched(vec![activated]));
                    }
                    Resolution::Leaf { .. } => LevelMatch::NoMatch,
                    Resolution::Children(children) => {
                        self.match_level(children, url, end, params).await?
                    }
                    Resolution::Lazy(module) => {
                        let children = self.modules.load(module).await?;
                        self.match_level(&children, url, end, params).await?
                    }
                };

                match deeper {
                    LevelMatch::Matched(mut routes) => {
                        routes.insert(0, activated);
                        return Ok(LevelMatch::Matched(routes));
                    }
                    LevelMatch::Redirect(segments) => return Ok(LevelMatch::Redirect(segments)),
                    LevelMatch::NoMatch if full => return Ok(LevelMatch::NoMatch),
                    LevelMatch::NoMatch => continue,
                }
            }

            Ok(LevelMatch::NoMatch)
        }
        .boxed()
    }
}

/// Build the URL segments a redirect leads to.
///
/// Relative targets replace the redirecting node's segments under its parent.
/// Prefix redirects keep the unconsumed remainder.
fn redirect_segments(
    target: &str,
    parent: &[String],
    rest: &[String],
    mode: PathMatch,
    params: &BTreeMap<String, String>,
) -> Vec<String> {
    let mut segments = if target.starts_with('/') {
        Vec::new()
    } else {
        parent.to_vec()
    };

    segments.extend(split_path(target).into_iter().map(|segment| {
        let param = segment
            .strip_prefix(':')
            .and_then(|name| params.get(name))
            .cloned();
        param.unwrap_or(segment)
    }));

    if mode == PathMatch::Prefix {
        segments.extend_from_slice(rest);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::StaticModuleLoader;
    use std::time::Duration;

    fn resolver(routes: Vec<RouteNode>) -> RouteResolver {
        let loader = Arc::new(StaticModuleLoader::default());
        let cache = ModuleCache::new(loader, Duration::from_secs(1));
        RouteResolver::new(routes, cache, 16)
    }

    fn segs(path: &str) -> Vec<String> {
        split_path(path)
    }

    #[tokio::test]
    async fn test_nested_params() {
        let r = resolver(vec![RouteNode::parent(
            "users/:id",
            vec![RouteNode::leaf("").full(), RouteNode::leaf("posts/:post")],
        )]);

        let chain = r.resolve("/users/7/posts/3").await.unwrap();
        assert_eq!(chain.paths(), vec!["users/:id", "posts/:post"]);
        assert_eq!(chain.params()["id"], "7");
        assert_eq!(chain.params()["post"], "3");
        assert_eq!(chain.routes()[0].segments, segs("users/7"));

        let chain = r.resolve("/users/7").await.unwrap();
        assert_eq!(chain.paths(), vec!["users/:id", ""]);
    }

    #[tokio::test]
    async fn test_leaf_with_remaining_segments_does_not_match() {
        let r = resolver(vec![RouteNode::leaf("a"), RouteNode::leaf("a/b")]);
        let chain = r.resolve("a/b").await.unwrap();
        assert_eq!(chain.paths(), vec!["a/b"]);
    }

    #[tokio::test]
    async fn test_backtracks_to_sibling() {
        let r = resolver(vec![
            RouteNode::parent("shop", vec![RouteNode::leaf("cart")]),
            RouteNode::parent("shop", vec![RouteNode::leaf("orders")]),
        ]);
        let chain = r.resolve("shop/orders").await.unwrap();
        assert!(Arc::ptr_eq(&chain.routes()[0].node, &r.routes()[1]));
    }

    #[tokio::test]
    async fn test_full_match_commits() {
        let r = resolver(vec![
            RouteNode::parent("shop", vec![RouteNode::leaf("cart")]).full(),
            RouteNode::leaf("shop"),
        ]);
        // The full-mode parent matched but its children did not
        let err = r.resolve("shop").await.unwrap_err();
        assert_eq!(err, ResolveError::NotFound { url: "/shop".into() });
    }

    #[tokio::test]
    async fn test_wildcard_fallback() {
        let r = resolver(vec![
            RouteNode::leaf("home"),
            RouteNode::leaf("**").component("PageNotFound"),
        ]);
        let chain = r.resolve("/missing/page").await.unwrap();
        assert_eq!(chain.leaf().unwrap().node.component_name(), Some("PageNotFound"));
    }

    #[tokio::test]
    async fn test_redirect_forms() {
        let r = resolver(vec![
            RouteNode::redirect("old/:id", "/items/:id"),
            RouteNode::redirect("legacy", "items"),
            RouteNode::parent(
                "items",
                vec![RouteNode::leaf(":id"), RouteNode::leaf(":id/details")],
            ),
        ]);

        let chain = r.resolve("old/5?x=1#frag").await.unwrap();
        assert_eq!(chain.url().to_string(), "/items/5?x=1#frag");
        assert_eq!(chain.query_param("x"), Some("1"));

        // Prefix redirect keeps the remainder
        let chain = r.resolve("legacy/9/details").await.unwrap();
        assert_eq!(chain.url().path(), "items/9/details");
        assert_eq!(chain.paths(), vec!["items", ":id/details"]);
    }

    #[tokio::test]
    async fn test_empty_prefix_redirect_fires_only_at_url_end() {
        let r = resolver(vec![RouteNode::parent(
            "feature-one",
            vec![RouteNode::redirect("", "inner"), RouteNode::leaf("inner")],
        )]);

        let chain = r.resolve("feature-one").await.unwrap();
        assert_eq!(chain.paths(), vec!["feature-one", "inner"]);
        assert_eq!(chain.url().path(), "feature-one/inner");

        // Already on the target, the redirect is skipped
        let chain = r.resolve("feature-one/inner").await.unwrap();
        assert_eq!(chain.paths(), vec!["feature-one", "inner"]);
    }

    #[tokio::test]
    async fn test_self_redirect_is_loop() {
        let r = resolver(vec![RouteNode::redirect("", "")]);
        let err = r.resolve("").await.unwrap_err();
        assert!(matches!(err, ResolveError::RedirectLoop { hops: 1, .. }));
    }

    #[tokio::test]
    async fn test_hop_bound() {
        // Each hop produces a new URL, so only the bound stops it
        let r = RouteResolver::new(
            vec![RouteNode::redirect("a", "a/a")],
            ModuleCache::new(Arc::new(StaticModuleLoader::default()), Duration::from_secs(1)),
            4,
        );
        let err = r.resolve("a").await.unwrap_err();
        assert!(matches!(err, ResolveError::RedirectLoop { hops: 5, .. }));
    }

    #[tokio::test]
    async fn test_unknown_module() {
        let r = resolver(vec![RouteNode::lazy("lazy", "missing")]);
        let err = r.resolve("lazy").await.unwrap_err();
        assert!(matches!(err, ResolveError::LoadFailed(LoadError::UnknownModule(_))));
        assert_eq!(err.to_string(), "Unknown module 'missing'");
    }

    #[test]
    fn test_redirect_segments() {
        let mut params = BTreeMap::new();
        params.insert("id".to_string(), "42".to_string());

        assert_eq!(
            redirect_segments("inner", &segs("feature-one"), &[], PathMatch::Full, &params),
            segs("feature-one/inner")
        );
        assert_eq!(
            redirect_segments("/x/:id", &segs("p"), &segs("rest"), PathMatch::Full, &params),
            segs("x/42")
        );
        assert_eq!(
            redirect_segments("x/:other", &[], &segs("rest"), PathMatch::Prefix, &params),
            segs("x/:other/rest")
        );
    }
}
