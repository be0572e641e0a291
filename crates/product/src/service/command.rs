use crate::{
    abstract_trait::product::{
        repository::{DynProductCommandRepository, DynProductQueryRepository},
        service::ProductCommandServiceTrait,
    },
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::{api::ApiResponse, product::ProductResponse},
    },
    service::{find_one, not_found},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use tracing::{error, info};

const TRACER: &str = "product-command-service";

#[derive(Clone)]
pub struct ProductCommandService {
    pub query: DynProductQueryRepository,
    pub command: DynProductCommandRepository,
    pub metrics: Metrics,
}

impl ProductCommandService {
    pub fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_command_service", "ProductCommandService");

        Self {
            query,
            command,
            metrics,
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🏗️ Creating product: {}", req.name);

        let tracing_ctx = TracingContext::start(
            TRACER,
            "product_create",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "create"),
                KeyValue::new("product.name", req.name.clone()),
            ],
        );

        let result = self
            .command
            .create_product(req)
            .await
            .map_err(ServiceError::Repo);

        tracing_ctx.finish_result(&self.metrics, Method::Post, &result);

        let product = result.inspect_err(|e| error!("❌ Failed to create product: {e:?}"))?;

        info!("✅ Product created: '{}' (ID: {})", product.name, product.id);

        Ok(ApiResponse::success(
            "Product created successfully",
            ProductResponse::from(product),
        ))
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let (id, changes) = req.clone().into_parts();

        info!("🔄 Updating product ID: {id}");

        let tracing_ctx = TracingContext::start(
            TRACER,
            "product_update",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "update"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let result = async {
            find_one(&self.query, id).await?;

            // removed between the check and the write
            self.command
                .update_product(id, &changes)
                .await?
                .ok_or_else(|| not_found(id))
        }
        .await;

        tracing_ctx.finish_result(&self.metrics, Method::Patch, &result);

        let product = result?;

        info!("✅ Product updated: '{}' (ID: {id})", product.name);

        Ok(ApiResponse::success(
            "Product updated successfully",
            ProductResponse::from(product),
        ))
    }

    async fn remove_product(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🗑️ Removing product ID: {id}");

        let tracing_ctx = TracingContext::start(
            TRACER,
            "product_remove",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "remove"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let result = async {
            find_one(&self.query, id).await?;

            self.command
                .mark_unavailable(id)
                .await?
                .ok_or_else(|| not_found(id))
        }
        .await;

        tracing_ctx.finish_result(&self.metrics, Method::Delete, &result);

        let product = result?;

        info!("✅ Product ID {id} marked unavailable");

        Ok(ApiResponse::success(
            "Product removed successfully",
            ProductResponse::from(product),
        ))
    }
}
