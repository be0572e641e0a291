mod common;

use common::app_state;
use genproto::product::{
    CreateProductRequest, FindAllProductRequest, FindByIdProductRequest, UpdateProductRequest,
    ValidateProductsRequest, product_command_service_server::ProductCommandService,
    product_query_service_server::ProductQueryService,
};
use product::handler::{command::ProductCommandServiceImpl, query::ProductQueryServiceImpl};
use tonic::{Code, Request};

fn handlers() -> (ProductQueryServiceImpl, ProductCommandServiceImpl) {
    let (state, _) = app_state();
    (
        ProductQueryServiceImpl::new(state.di_container.product_query.clone()),
        ProductCommandServiceImpl::new(state.di_container.product_command.clone()),
    )
}

async fn seed(command: &ProductCommandServiceImpl, count: usize) {
    for i in 0..count {
        command
            .create(Request::new(CreateProductRequest {
                name: format!("Product {i}"),
                price: 10.0,
            }))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn find_all_treats_zero_page_and_limit_as_defaults() {
    let (query, command) = handlers();
    seed(&command, 12).await;

    let reply = query
        .find_all(Request::new(FindAllProductRequest { page: 0, limit: 0 }))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(reply.data.len(), 10);
    let meta = reply.meta.unwrap();
    assert_eq!(meta.page, 1);
    assert_eq!(meta.total, 12);
    assert_eq!(meta.last_page, 2);
}

#[tokio::test]
async fn find_all_rejects_negative_page() {
    let (query, _) = handlers();

    let status = query
        .find_all(Request::new(FindAllProductRequest {
            page: -1,
            limit: 10,
        }))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn find_by_id_of_unknown_product_is_not_found() {
    let (query, _) = handlers();

    let status = query
        .find_by_id(Request::new(FindByIdProductRequest { id: 3 }))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::NotFound);
    assert_eq!(status.message(), "Product with id 3 not found");
}

#[tokio::test]
async fn validate_products_with_missing_id_is_invalid_argument() {
    let (query, command) = handlers();
    seed(&command, 1).await;

    let status = query
        .validate_products(Request::new(ValidateProductsRequest { ids: vec![1, 2] }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);

    let status = query
        .validate_products(Request::new(ValidateProductsRequest { ids: vec![] }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn create_rejects_invalid_fields() {
    let (_, command) = handlers();

    for (name, price) in [("", 1.0), ("Lamp", -1.0), ("Lamp", f64::NAN)] {
        let status = command
            .create(Request::new(CreateProductRequest {
                name: name.to_string(),
                price,
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }
}

#[tokio::test]
async fn update_and_remove_through_grpc() {
    let (query, command) = handlers();
    seed(&command, 1).await;

    let updated = command
        .update(Request::new(UpdateProductRequest {
            id: 1,
            name: None,
            price: Some(12.5),
        }))
        .await
        .unwrap()
        .into_inner()
        .data
        .unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.price, 12.5);
    assert!(updated.available);

    let status = command
        .update(Request::new(UpdateProductRequest {
            id: 1,
            name: Some(String::new()),
            price: None,
        }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);

    let removed = command
        .remove(Request::new(FindByIdProductRequest { id: 1 }))
        .await
        .unwrap()
        .into_inner()
        .data
        .unwrap();
    assert!(!removed.available);

    let status = command
        .remove(Request::new(FindByIdProductRequest { id: 1 }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    let status = query
        .find_by_id(Request::new(FindByIdProductRequest { id: 1 }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}
