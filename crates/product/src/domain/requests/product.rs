use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be a positive number"))]
    pub page: i32,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, message = "Limit must be a positive number"))]
    pub limit: i32,
}

fn default_page() -> i32 {
    1
}

fn default_limit() -> i32 {
    10
}

impl Default for FindAllProducts {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl FindAllProducts {
    // page and limit are validated at the transport; clamp so SQL never sees a negative window
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1).max(0) * self.take()
    }

    pub fn take(&self) -> i64 {
        i64::from(self.limit).max(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Keyboard")]
    pub name: String,

    #[validate(
        range(min = 0.0, message = "Price cannot be negative"),
        custom(function = "validate_finite_price")
    )]
    #[schema(example = 49.9)]
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub id: i32,

    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Mechanical keyboard")]
    pub name: Option<String>,

    #[validate(
        range(min = 0.0, message = "Price cannot be negative"),
        custom(function = "validate_finite_price")
    )]
    #[schema(example = 59.9)]
    pub price: Option<f64>,
}

/// The writable part of an update. Carries no id, so an update can never
/// rewrite a product's identity or its availability.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl UpdateProductRequest {
    pub fn into_parts(self) -> (i32, ProductChanges) {
        let UpdateProductRequest { id, name, price } = self;
        (id, ProductChanges { name, price })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ValidateProductsRequest {
    #[validate(length(min = 1, message = "At least one product id is required"))]
    #[schema(example = json!([1, 2, 3]))]
    pub ids: Vec<i32>,
}

fn validate_finite_price(price: f64) -> Result<(), ValidationError> {
    if price.is_finite() {
        return Ok(());
    }

    let mut err = ValidationError::new("finite");
    err.message = Some("Price must be a finite number".into());
    Err(err)
}

/// Ids in ascending order with duplicates removed.
pub fn distinct_ids(ids: &[i32]) -> Vec<i32> {
    ids.iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
