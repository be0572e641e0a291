use crate::{
    abstract_trait::product::service::DynProductCommandService,
    domain::requests::product::{
        CreateProductRequest as DomainCreateProductRequest,
        UpdateProductRequest as DomainUpdateProductRequest,
    },
};
use genproto::product::{
    ApiResponseProduct, CreateProductRequest, FindByIdProductRequest, UpdateProductRequest,
    product_command_service_server::ProductCommandService,
};
use shared::errors::{AppErrorGrpc, ServiceError};
use tonic::{Request, Response, Status};
use tracing::info;
use validator::Validate;

#[derive(Clone)]
pub struct ProductCommandServiceImpl {
    pub command: DynProductCommandService,
}

impl ProductCommandServiceImpl {
    pub fn new(command: DynProductCommandService) -> Self {
        Self { command }
    }
}

#[tonic::async_trait]
impl ProductCommandService for ProductCommandServiceImpl {
    async fn create(
        &self,
        request: Request<CreateProductRequest>,
    ) -> Result<Response<ApiResponseProduct>, Status> {
        info!("Creating new Product");

        let req = request.into_inner();

        let domain_req = DomainCreateProductRequest {
            name: req.name,
            price: req.price,
        };

        domain_req
            .validate()
            .map_err(|e| AppErrorGrpc::from(ServiceError::from(e)))?;

        let api_response = self
            .command
            .create_product(&domain_req)
            .await
            .map_err(AppErrorGrpc::from)?;

        info!(
            "Product created successfully with ID: {}",
            api_response.data.id
        );

        let reply = ApiResponseProduct {
            status: api_response.status,
            message: api_response.message,
            data: Some(api_response.data.into()),
        };

        Ok(Response::new(reply))
    }

    async fn update(
        &self,
        request: Request<UpdateProductRequest>,
    ) -> Result<Response<ApiResponseProduct>, Status> {
        info!("Updating Product");

        let req = request.into_inner();

        let domain_req = DomainUpdateProductRequest {
            id: req.id,
            name: req.name,
            price: req.price,
        };

        domain_req
            .validate()
            .map_err(|e| AppErrorGrpc::from(ServiceError::from(e)))?;

        let api_response = self
            .command
            .update_product(&domain_req)
            .await
            .map_err(AppErrorGrpc::from)?;

        let reply = ApiResponseProduct {
            status: api_response.status,
            message: api_response.message,
            data: Some(api_response.data.into()),
        };

        info!("Product updated successfully: ID={}", req.id);
        Ok(Response::new(reply))
    }

    async fn remove(
        &self,
        request: Request<FindByIdProductRequest>,
    ) -> Result<Response<ApiResponseProduct>, Status> {
        info!("Removing Product");

        let req = request.into_inner();

        let api_response = self
            .command
            .remove_product(req.id)
            .await
            .map_err(AppErrorGrpc::from)?;

        let reply = ApiResponseProduct {
            status: api_response.status,
            message: api_response.message,
            data: Some(api_response.data.into()),
        };

        info!("Product removed: ID={}", req.id);
        Ok(Response::new(reply))
    }
}
