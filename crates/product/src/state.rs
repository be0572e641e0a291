use crate::{
    abstract_trait::product::repository::{DynProductCommandRepository, DynProductQueryRepository},
    di::{DependenciesInject, DependenciesInjectDeps},
    handler::http::HttpState,
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("registry", &self.registry)
            .finish()
    }
}

impl AppState {
    pub fn new(pool: ConnectionPool) -> Self {
        let mut registry = Registry::default();

        let di_container = DependenciesInject::new(DependenciesInjectDeps { pool }, &mut registry);

        Self {
            di_container,
            registry: Arc::new(registry),
        }
    }

    pub fn from_repositories(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
    ) -> Self {
        let mut registry = Registry::default();

        let di_container = DependenciesInject::from_repositories(query, command, &mut registry);

        Self {
            di_container,
            registry: Arc::new(registry),
        }
    }

    pub fn http_state(&self) -> HttpState {
        HttpState {
            query: self.di_container.product_query.clone(),
            command: self.di_container.product_command.clone(),
            registry: self.registry.clone(),
        }
    }
}
