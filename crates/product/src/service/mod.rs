pub mod command;
pub mod query;

use crate::{
    abstract_trait::product::repository::DynProductQueryRepository,
    model::product::Product as ProductModel,
};
use shared::errors::ServiceError;

pub(crate) fn not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Product with id {id} not found"))
}

/// The single existence check: a product exists only while it is available.
pub(crate) async fn find_one(
    repo: &DynProductQueryRepository,
    id: i32,
) -> Result<ProductModel, ServiceError> {
    repo.find_available_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))
}
