//! Module loader backed by the `[modules]` section of the configuration.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::config::schema::RouteConfig;
use crate::loader::{LoadError, ModuleLoader};
use crate::routing::node::{ModuleRef, RouteNode};

/// Serves module routes declared up front in configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticModuleLoader {
    modules: BTreeMap<ModuleRef, Vec<RouteConfig>>,
}

impl StaticModuleLoader {
    pub fn new(modules: &BTreeMap<String, Vec<RouteConfig>>) -> Self {
        Self {
            modules: modules
                .iter()
                .map(|(name, routes)| (ModuleRef::new(name.clone()), routes.clone()))
                .collect(),
        }
    }

    /// Register or replace a module.
    pub fn insert(&mut self, module: impl Into<ModuleRef>, routes: Vec<RouteConfig>) {
        self.modules.insert(module.into(), routes);
    }

    pub fn contains(&self, module: &ModuleRef) -> bool {
        self.modules.contains_key(module)
    }
}

#[async_trait]
impl ModuleLoader for StaticModuleLoader {
    async fn load(&self, module: &ModuleRef) -> Result<Vec<RouteNode>, LoadError> {
        let routes = self
            .modules
            .get(module)
            .ok_or_else(|| LoadError::UnknownModule(module.clone()))?;

        RouteNode::from_configs(routes).map_err(|e| LoadError::Failed {
            module: module.clone(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_loader() {
        let mut modules = BTreeMap::new();
        modules.insert(
            "feature-one".to_string(),
            vec![RouteConfig {
                component: Some("FeatureOneComponent".into()),
                can_activate: vec!["feature-specific".into()],
                ..Default::default()
            }],
        );
        let loader = StaticModuleLoader::new(&modules);

        let routes = loader.load(&ModuleRef::new("feature-one")).await.unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].component_name(), Some("FeatureOneComponent"));

        let err = loader.load(&ModuleRef::new("feature-three")).await.unwrap_err();
        assert_eq!(err, LoadError::UnknownModule(ModuleRef::new("feature-three")));
    }

    #[tokio::test]
    async fn test_invalid_module_routes() {
        let mut loader = StaticModuleLoader::default();
        loader.insert(
            "broken",
            vec![RouteConfig {
                redirect_to: Some("x".into()),
                component: Some("C".into()),
                ..Default::default()
            }],
        );
        assert!(loader.contains(&ModuleRef::new("broken")));

        let err = loader.load(&ModuleRef::new("broken")).await.unwrap_err();
        assert!(matches!(err, LoadError::Failed { .. }));
    }
}
