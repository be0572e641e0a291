use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    domain::requests::product::FindAllProducts, model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_available(
        &self,
        req: &FindAllProducts,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        info!(
            "🟢 Fetching available products | page: {}, limit: {}",
            req.page, req.limit
        );

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let products = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, name, price, available, created_at, updated_at
            FROM products
            WHERE available = TRUE
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(req.take())
        .bind(req.offset())
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Error fetching available products: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(products)
    }

    async fn count_available(&self) -> Result<i64, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let total: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM products WHERE available = TRUE"#)
                .fetch_one(&mut *conn)
                .await
                .map_err(|e| {
                    error!("❌ Error counting available products: {:?}", e);
                    RepositoryError::from(e)
                })?;

        Ok(total)
    }

    async fn find_available_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🆔 Fetching available product by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, name, price, available, created_at, updated_at
            FROM products
            WHERE id = $1 AND available = TRUE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(result)
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🔍 Fetching {} products by ID set", ids.len());

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let products = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, name, price, available, created_at, updated_at
            FROM products
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Error fetching products by IDs {:?}: {:?}", ids, e);
            RepositoryError::from(e)
        })?;

        Ok(products)
    }
}
