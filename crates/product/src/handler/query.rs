use crate::{
    abstract_trait::product::service::DynProductQueryService,
    domain::requests::product::{FindAllProducts, ValidateProductsRequest},
};
use genproto::product::{
    ApiResponsePaginationProduct, ApiResponseProduct, ApiResponseProducts, FindAllProductRequest,
    FindByIdProductRequest, ValidateProductsRequest as ProtoValidateProductsRequest,
    product_query_service_server::ProductQueryService,
};
use shared::errors::{AppErrorGrpc, ServiceError};
use tonic::{Request, Response, Status};
use tracing::info;
use validator::Validate;

#[derive(Clone)]
pub struct ProductQueryServiceImpl {
    pub query: DynProductQueryService,
}

impl ProductQueryServiceImpl {
    pub fn new(query: DynProductQueryService) -> Self {
        Self { query }
    }
}

fn validated<T: Validate>(req: T) -> Result<T, AppErrorGrpc> {
    req.validate().map_err(ServiceError::from)?;
    Ok(req)
}

#[tonic::async_trait]
impl ProductQueryService for ProductQueryServiceImpl {
    async fn find_all(
        &self,
        request: Request<FindAllProductRequest>,
    ) -> Result<Response<ApiResponsePaginationProduct>, Status> {
        info!("Handling gRPC request: FindAll Products");

        let req = request.into_inner();
        let defaults = FindAllProducts::default();

        // proto3 sends 0 for an unset field
        let domain_req = validated(FindAllProducts {
            page: if req.page == 0 { defaults.page } else { req.page },
            limit: if req.limit == 0 { defaults.limit } else { req.limit },
        })?;

        let api_response = self
            .query
            .find_all(&domain_req)
            .await
            .map_err(AppErrorGrpc::from)?;

        let data: Vec<genproto::product::ProductResponse> = api_response
            .data
            .into_iter()
            .map(|item| item.into())
            .collect();

        let len = data.len();

        let reply = ApiResponsePaginationProduct {
            status: api_response.status,
            message: api_response.message,
            data,
            meta: Some(api_response.meta.into()),
        };

        info!("Successfully fetched {} Products", len);

        Ok(Response::new(reply))
    }

    async fn find_by_id(
        &self,
        request: Request<FindByIdProductRequest>,
    ) -> Result<Response<ApiResponseProduct>, Status> {
        info!("Handling gRPC request: Find Product by ID");

        let req = request.into_inner();

        let api_response = self
            .query
            .find_by_id(req.id)
            .await
            .map_err(AppErrorGrpc::from)?;

        let reply = ApiResponseProduct {
            status: api_response.status,
            message: api_response.message,
            data: Some(api_response.data.into()),
        };

        info!("Successfully fetched Product with ID: {}", req.id);
        Ok(Response::new(reply))
    }

    async fn validate_products(
        &self,
        request: Request<ProtoValidateProductsRequest>,
    ) -> Result<Response<ApiResponseProducts>, Status> {
        info!("Handling gRPC request: Validate Products");

        let req = validated(ValidateProductsRequest {
            ids: request.into_inner().ids,
        })?;

        let api_response = self
            .query
            .validate_products(&req.ids)
            .await
            .map_err(AppErrorGrpc::from)?;

        let reply = ApiResponseProducts {
            status: api_response.status,
            message: api_response.message,
            data: api_response.data.into_iter().map(Into::into).collect(),
        };

        info!("Validated {} Products", reply.data.len());
        Ok(Response::new(reply))
    }
}
