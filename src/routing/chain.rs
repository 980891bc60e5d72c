//! Activation chains produced by route resolution.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::routing::node::RouteNode;
use crate::routing::url::NavigationUrl;

/// A matched route together with the URL segments it consumed.
#[derive(Debug, Clone)]
pub struct ActivatedRoute {
    pub node: Arc<RouteNode>,
    pub segments: Vec<String>,
    pub params: BTreeMap<String, String>,
}

impl ActivatedRoute {
    pub fn path(&self) -> &str {
        self.node.path()
    }
}

/// Root-to-leaf sequence of matched routes for one navigation.
#[derive(Debug, Clone)]
pub struct ActivationChain {
    url: NavigationUrl,
    routes: Vec<ActivatedRoute>,
}

impl ActivationChain {
    pub(crate) fn new(url: NavigationUrl, routes: Vec<ActivatedRoute>) -> Self {
        Self { url, routes }
    }

    /// The URL after all redirects were applied.
    pub fn url(&self) -> &NavigationUrl {
        &self.url
    }

    pub fn routes(&self) -> &[ActivatedRoute] {
        &self.routes
    }

    /// Configured paths of the chain, root first.
    pub fn paths(&self) -> Vec<&str> {
        self.routes.iter().map(ActivatedRoute::path).collect()
    }

    pub fn leaf(&self) -> Option<&ActivatedRoute> {
        self.routes.last()
    }

    /// Parameters of every route, descendants overriding ancestors.
    pub fn params(&self) -> BTreeMap<String, String> {
        self.routes
            .iter()
            .flat_map(|route| route.params.clone())
            .collect()
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.url
            .query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
