use crate::{
    abstract_trait::product::{
        repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
    },
    domain::{
        requests::product::{FindAllProducts, distinct_ids},
        response::{
            api::{ApiResponse, ApiResponsePagination},
            pagination::PaginationMeta,
            product::ProductResponse,
        },
    },
    service::find_one,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use std::collections::HashSet;
use tracing::{error, info};

const TRACER: &str = "product-query-service";

#[derive(Clone)]
pub struct ProductQueryService {
    pub query: DynProductQueryRepository,
    pub metrics: Metrics,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_query_service", "ProductQueryService");

        Self { query, metrics }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        info!(
            "🔍 Finding available products | Page: {}, Limit: {}",
            req.page, req.limit
        );

        let tracing_ctx = TracingContext::start(
            TRACER,
            "product_find_all",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_all"),
                KeyValue::new("page", req.page.to_string()),
                KeyValue::new("limit", req.limit.to_string()),
            ],
        );

        let result = async {
            let total = self.query.count_available().await?;
            let products = self.query.find_available(req).await?;

            Ok::<_, ServiceError>((products, total))
        }
        .await;

        tracing_ctx.finish_result(&self.metrics, Method::Get, &result);

        let (products, total) = result.inspect_err(|e| {
            error!("❌ Failed to fetch available products: {e:?}");
        })?;

        let data: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

        info!("✅ Found {} products (total: {total})", data.len());

        Ok(ApiResponsePagination {
            status: "success".to_string(),
            message: "Products retrieved successfully".to_string(),
            data,
            meta: PaginationMeta::new(req.page, req.limit, total),
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🆔 Finding product by ID: {id}");

        let tracing_ctx = TracingContext::start(
            TRACER,
            "product_find_by_id",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let result = find_one(&self.query, id).await;

        tracing_ctx.finish_result(&self.metrics, Method::Get, &result);

        let product = result?;

        info!("✅ Product retrieved: '{}' (ID: {id})", product.name);

        Ok(ApiResponse::success(
            "Product retrieved successfully",
            ProductResponse::from(product),
        ))
    }

    async fn validate_products(
        &self,
        ids: &[i32],
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        let ids = distinct_ids(ids);

        info!("🧾 Validating {} distinct product IDs", ids.len());

        let tracing_ctx = TracingContext::start(
            TRACER,
            "product_validate",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "validate_products"),
                KeyValue::new("product.ids", format!("{ids:?}")),
            ],
        );

        let result = async {
            let products = self.query.find_by_ids(&ids).await?;

            if products.len() < ids.len() {
                let found: HashSet<i32> = products.iter().map(|p| p.id).collect();
                let missing: Vec<i32> = ids
                    .iter()
                    .copied()
                    .filter(|id| !found.contains(id))
                    .collect();

                error!("❌ Unknown product IDs: {missing:?}");

                return Err(ServiceError::InvalidIds(missing));
            }

            Ok::<_, ServiceError>(products)
        }
        .await;

        tracing_ctx.finish_result(&self.metrics, Method::Post, &result);

        let products = result?;

        Ok(ApiResponse::success(
            "Products validated successfully",
            products.into_iter().map(ProductResponse::from).collect(),
        ))
    }
}
