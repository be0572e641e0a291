use crate::{
    domain::requests::product::{CreateProductRequest, ProductChanges},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

/// Writes are conditional on `available = true`; `Ok(None)` means no
/// available row matched the id.
#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError>;
    async fn update_product(
        &self,
        id: i32,
        changes: &ProductChanges,
    ) -> Result<Option<ProductModel>, RepositoryError>;
    async fn mark_unavailable(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError>;
}
