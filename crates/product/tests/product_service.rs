mod common;

use common::{app_state, create_request, racing_app_state};
use product::domain::requests::product::{FindAllProducts, UpdateProductRequest};
use shared::errors::ServiceError;

#[tokio::test]
async fn created_product_is_available_and_retrievable() {
    let (state, _) = app_state();
    let services = &state.di_container;

    let created = services
        .product_command
        .create_product(&create_request("Keyboard", 49.9))
        .await
        .unwrap();

    assert!(created.data.available);
    assert_eq!(created.data.name, "Keyboard");

    let found = services
        .product_query
        .find_by_id(created.data.id)
        .await
        .unwrap();
    assert_eq!(found.data.id, created.data.id);
    assert_eq!(found.data.price, 49.9);
}

#[tokio::test]
async fn find_by_id_of_unknown_product_is_not_found() {
    let (state, _) = app_state();

    let err = state
        .di_container
        .product_query
        .find_by_id(42)
        .await
        .unwrap_err();

    match err {
        ServiceError::NotFound(message) => assert_eq!(message, "Product with id 42 not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn removed_product_disappears_but_row_remains() {
    let (state, repo) = app_state();
    let services = &state.di_container;

    let id = services
        .product_command
        .create_product(&create_request("Mouse", 19.0))
        .await
        .unwrap()
        .data
        .id;

    let removed = services.product_command.remove_product(id).await.unwrap();
    assert!(!removed.data.available);

    assert!(matches!(
        services.product_query.find_by_id(id).await,
        Err(ServiceError::NotFound(_))
    ));

    let rows = repo.snapshot();
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].available);
}

#[tokio::test]
async fn removing_twice_is_not_found() {
    let (state, _) = app_state();
    let command = &state.di_container.product_command;

    let id = command
        .create_product(&create_request("Cable", 5.0))
        .await
        .unwrap()
        .data
        .id;

    command.remove_product(id).await.unwrap();

    assert!(matches!(
        command.remove_product(id).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn update_merges_fields_and_keeps_identity() {
    let (state, _) = app_state();
    let command = &state.di_container.product_command;

    let created = command
        .create_product(&create_request("Monitor", 199.0))
        .await
        .unwrap()
        .data;

    let updated = command
        .update_product(&UpdateProductRequest {
            id: created.id,
            name: None,
            price: Some(179.0),
        })
        .await
        .unwrap()
        .data;

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Monitor");
    assert_eq!(updated.price, 179.0);
    assert!(updated.available);
}

#[tokio::test]
async fn update_of_removed_product_is_not_found() {
    let (state, repo) = app_state();
    let command = &state.di_container.product_command;

    let id = command
        .create_product(&create_request("Webcam", 60.0))
        .await
        .unwrap()
        .data
        .id;
    command.remove_product(id).await.unwrap();

    let err = command
        .update_product(&UpdateProductRequest {
            id,
            name: Some("Webcam HD".into()),
            price: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(_)));
    assert_eq!(repo.snapshot()[0].name, "Webcam");
}

#[tokio::test]
async fn find_all_pages_over_available_products() {
    let (state, _) = app_state();
    let services = &state.di_container;

    for i in 1..=7 {
        services
            .product_command
            .create_product(&create_request(&format!("Product {i}"), f64::from(i)))
            .await
            .unwrap();
    }
    services.product_command.remove_product(2).await.unwrap();

    let first = services
        .product_query
        .find_all(&FindAllProducts { page: 1, limit: 4 })
        .await
        .unwrap();

    assert_eq!(first.meta.total, 6);
    assert_eq!(first.meta.last_page, 2);
    assert_eq!(first.meta.page, 1);
    assert_eq!(
        first.data.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![1, 3, 4, 5]
    );

    let second = services
        .product_query
        .find_all(&FindAllProducts { page: 2, limit: 4 })
        .await
        .unwrap();
    assert_eq!(
        second.data.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![6, 7]
    );

    let beyond = services
        .product_query
        .find_all(&FindAllProducts { page: 5, limit: 4 })
        .await
        .unwrap();
    assert!(beyond.data.is_empty());
    assert_eq!(beyond.meta.total, 6);
}

#[tokio::test]
async fn find_all_on_empty_catalog() {
    let (state, _) = app_state();

    let page = state
        .di_container
        .product_query
        .find_all(&FindAllProducts::default())
        .await
        .unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.meta.total, 0);
    assert_eq!(page.meta.last_page, 0);
}

#[tokio::test]
async fn validate_products_reports_missing_ids() {
    let (state, _) = app_state();
    let services = &state.di_container;

    for name in ["A", "B", "C"] {
        services
            .product_command
            .create_product(&create_request(name, 1.0))
            .await
            .unwrap();
    }

    let err = services
        .product_query
        .validate_products(&[7, 7, 3])
        .await
        .unwrap_err();

    match err {
        ServiceError::InvalidIds(missing) => assert_eq!(missing, vec![7]),
        other => panic!("expected InvalidIds, got {other:?}"),
    }
}

#[tokio::test]
async fn validate_products_deduplicates_and_includes_unavailable() {
    let (state, _) = app_state();
    let services = &state.di_container;

    for name in ["A", "B", "C"] {
        services
            .product_command
            .create_product(&create_request(name, 1.0))
            .await
            .unwrap();
    }
    services.product_command.remove_product(3).await.unwrap();

    let validated = services
        .product_query
        .validate_products(&[3, 1, 3])
        .await
        .unwrap();

    let mut ids: Vec<i32> = validated.data.iter().map(|p| p.id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 3]);
    assert!(validated.data.iter().any(|p| p.id == 3 && !p.available));
}

#[tokio::test]
async fn create_then_remove_leaves_catalog_empty() {
    let (state, _) = app_state();
    let services = &state.di_container;

    let id = services
        .product_command
        .create_product(&create_request("Lamp", 25.0))
        .await
        .unwrap()
        .data
        .id;

    let listed = services
        .product_query
        .find_all(&FindAllProducts::default())
        .await
        .unwrap();
    assert_eq!(listed.meta.total, 1);
    assert_eq!(
        listed.data.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![id]
    );

    services.product_command.remove_product(id).await.unwrap();

    let listed = services
        .product_query
        .find_all(&FindAllProducts::default())
        .await
        .unwrap();
    assert_eq!(listed.meta.total, 0);
    assert!(listed.data.is_empty());

    let validated = services.product_query.validate_products(&[id]).await.unwrap();
    assert_eq!(validated.data.len(), 1);
}

#[tokio::test]
async fn update_racing_a_removal_is_not_found() {
    let (state, repo) = racing_app_state();
    let command = &state.di_container.product_command;

    let id = command
        .create_product(&create_request("Speaker", 90.0))
        .await
        .unwrap()
        .data
        .id;

    let err = command
        .update_product(&UpdateProductRequest {
            id,
            name: Some("Speaker Pro".into()),
            price: None,
        })
        .await
        .unwrap_err();

    match err {
        ServiceError::NotFound(message) => {
            assert_eq!(message, format!("Product with id {id} not found"))
        }
        other => panic!("expected NotFound, got {other:?}"),
    }

    let rows = repo.snapshot();
    assert_eq!(rows[0].name, "Speaker");
    assert!(!rows[0].available);
}

#[tokio::test]
async fn remove_racing_a_removal_is_not_found() {
    let (state, _) = racing_app_state();
    let command = &state.di_container.product_command;

    let id = command
        .create_product(&create_request("Router", 70.0))
        .await
        .unwrap()
        .data
        .id;

    assert!(matches!(
        command.remove_product(id).await,
        Err(ServiceError::NotFound(_))
    ));
}
