use genproto::api::PaginationMeta as ProtoPaginationMeta;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
pub struct PaginationMeta {
    pub page: i32,
    /// Number of available products, not the size of the returned page.
    pub total: i64,
    pub last_page: i64,
}

impl PaginationMeta {
    pub fn new(page: i32, limit: i32, total: i64) -> Self {
        let limit = i64::from(limit);
        let last_page = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };

        Self {
            page,
            total,
            last_page,
        }
    }
}

impl From<PaginationMeta> for ProtoPaginationMeta {
    fn from(value: PaginationMeta) -> Self {
        Self {
            page: value.page,
            total: value.total,
            last_page: value.last_page,
        }
    }
}
