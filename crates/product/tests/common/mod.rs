#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use product::{
    abstract_trait::product::repository::{
        DynProductCommandRepository, DynProductQueryRepository, ProductCommandRepositoryTrait,
        ProductQueryRepositoryTrait,
    },
    domain::requests::product::{CreateProductRequest, FindAllProducts, ProductChanges},
    model::product::Product,
    state::AppState,
};
use shared::errors::RepositoryError;
use std::sync::{Arc, Mutex};

/// Keeps rows in insertion order and applies the same availability
/// filters as the Postgres statements.
#[derive(Default)]
pub struct InMemoryProductRepository {
    rows: Mutex<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn snapshot(&self) -> Vec<Product> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryProductRepository {
    async fn find_available(
        &self,
        req: &FindAllProducts,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|p| p.available)
            .skip(req.offset() as usize)
            .take(req.take() as usize)
            .cloned()
            .collect())
    }

    async fn count_available(&self) -> Result<i64, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|p| p.available).count() as i64)
    }

    async fn find_available_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|p| p.id == id && p.available).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|p| ids.contains(&p.id)).cloned().collect())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryProductRepository {
    async fn create_product(&self, req: &CreateProductRequest) -> Result<Product, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now().naive_utc();
        let product = Product {
            id: rows.len() as i32 + 1,
            name: req.name.clone(),
            price: req.price,
            available: true,
            created_at: now,
            updated_at: now,
        };
        rows.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: i32,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(product) = rows.iter_mut().find(|p| p.id == id && p.available) else {
            return Ok(None);
        };

        if let Some(name) = &changes.name {
            product.name = name.clone();
        }
        if let Some(price) = changes.price {
            product.price = price;
        }
        product.updated_at = Utc::now().naive_utc();

        Ok(Some(product.clone()))
    }

    async fn mark_unavailable(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(product) = rows.iter_mut().find(|p| p.id == id && p.available) else {
            return Ok(None);
        };

        product.available = false;
        product.updated_at = Utc::now().naive_utc();

        Ok(Some(product.clone()))
    }
}

/// Command side that lets another writer remove the product between the
/// service's existence check and its own write.
pub struct RemovedBeforeWrite {
    inner: Arc<InMemoryProductRepository>,
}

#[async_trait]
impl ProductCommandRepositoryTrait for RemovedBeforeWrite {
    async fn create_product(&self, req: &CreateProductRequest) -> Result<Product, RepositoryError> {
        self.inner.create_product(req).await
    }

    async fn update_product(
        &self,
        id: i32,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, RepositoryError> {
        self.inner.mark_unavailable(id).await?;
        self.inner.update_product(id, changes).await
    }

    async fn mark_unavailable(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        self.inner.mark_unavailable(id).await?;
        self.inner.mark_unavailable(id).await
    }
}

pub fn racing_app_state() -> (AppState, Arc<InMemoryProductRepository>) {
    let repo = InMemoryProductRepository::new();
    let racing = Arc::new(RemovedBeforeWrite {
        inner: repo.clone(),
    });
    let state = AppState::from_repositories(
        repo.clone() as DynProductQueryRepository,
        racing as DynProductCommandRepository,
    );
    (state, repo)
}

pub fn app_state() -> (AppState, Arc<InMemoryProductRepository>) {
    let repo = InMemoryProductRepository::new();
    let state = AppState::from_repositories(
        repo.clone() as DynProductQueryRepository,
        repo.clone() as DynProductCommandRepository,
    );
    (state, repo)
}

pub fn create_request(name: &str, price: f64) -> CreateProductRequest {
    CreateProductRequest {
        name: name.to_string(),
        price,
    }
}
