use crate::{
    abstract_trait::product::service::{DynProductCommandService, DynProductQueryService},
    domain::{
        requests::product::{
            CreateProductRequest, FindAllProducts, UpdateProductRequest, ValidateProductsRequest,
        },
        response::{
            api::{ApiResponse, ApiResponsePagination},
            pagination::PaginationMeta,
            product::ProductResponse,
        },
    },
    middleware::validate::{IdPath, ValidatedJson, ValidatedQuery},
};
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use prometheus_client::{encoding::text::encode, registry::Registry};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;

#[derive(Clone)]
pub struct HttpState {
    pub query: DynProductQueryService,
    pub command: DynProductCommandService,
    pub registry: Arc<Registry>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        get_products,
        get_product,
        create_product,
        update_product,
        delete_product,
        validate_products
    ),
    components(schemas(
        ProductResponse,
        PaginationMeta,
        CreateProductRequest,
        UpdateProductRequest,
        ValidateProductsRequest,
        ErrorResponse
    )),
    tags((name = "Product", description = "Product catalog"))
)]
pub struct ApiDoc;

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/api/products", get(get_products).post(create_product))
        .route("/api/products/validate", post(validate_products))
        .route(
            "/api/products/{id}",
            get(get_product).patch(update_product).delete(delete_product),
        )
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Product",
    params(FindAllProducts),
    responses(
        (status = 200, description = "Page of available products", body = ApiResponsePagination<Vec<ProductResponse>>),
        (status = 400, description = "Invalid pagination", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_products(
    State(state): State<HttpState>,
    ValidatedQuery(params): ValidatedQuery<FindAllProducts>,
) -> Result<impl IntoResponse, HttpError> {
    let response = state.query.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    State(state): State<HttpState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, HttpError> {
    let response = state.query.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Product",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation error", body = ErrorResponse)
    )
)]
pub async fn create_product(
    State(state): State<HttpState>,
    ValidatedJson(body): ValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = state.command.create_product(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn update_product(
    State(state): State<HttpState>,
    IdPath(id): IdPath,
    ValidatedJson(mut body): ValidatedJson<UpdateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    // the path decides which product is written, never the body
    body.id = id;

    let response = state.command.update_product(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product marked unavailable", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    State(state): State<HttpState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, HttpError> {
    let response = state.command.remove_product(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/products/validate",
    tag = "Product",
    request_body = ValidateProductsRequest,
    responses(
        (status = 200, description = "All ids exist", body = ApiResponse<Vec<ProductResponse>>),
        (status = 400, description = "Some ids do not exist", body = ErrorResponse)
    )
)]
pub async fn validate_products(
    State(state): State<HttpState>,
    ValidatedJson(body): ValidatedJson<ValidateProductsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = state.query.validate_products(&body.ids).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub async fn metrics(State(state): State<HttpState>) -> Result<impl IntoResponse, HttpError> {
    let mut buffer = String::new();

    encode(&mut buffer, &state.registry)
        .map_err(|e| HttpError::Internal(format!("Failed to encode metrics: {e}")))?;

    Ok((
        [(
            header::CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    ))
}

pub async fn openapi() -> impl IntoResponse {
    info!("Serving OpenAPI document");
    Json(ApiDoc::openapi())
}
