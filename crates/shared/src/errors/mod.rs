mod error;
mod grpc;
mod http;
mod repository;
mod service;

pub use self::error::ErrorResponse;
pub use self::grpc::AppErrorGrpc;
pub use self::http::HttpError;
pub use self::repository::RepositoryError;
pub use self::service::ServiceError;
