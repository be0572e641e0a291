use crate::errors::{repository::RepositoryError, service::ServiceError};
use thiserror::Error;
use tonic::Status;

#[derive(Debug, Error)]
pub enum AppErrorGrpc {
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
    #[error("Unhandled: {0}")]
    Unhandled(String),
}

impl From<AppErrorGrpc> for Status {
    fn from(err: AppErrorGrpc) -> Self {
        match err {
            AppErrorGrpc::Service(service_err) => match service_err {
                ServiceError::NotFound(msg) => Status::not_found(msg),

                ServiceError::InvalidIds(ids) => Status::invalid_argument(format!(
                    "Some products were not found: {ids:?}"
                )),

                ServiceError::Validation(errors) => {
                    Status::invalid_argument(format!("Validation failed: {errors:?}"))
                }

                ServiceError::Repo(repo_err) => match repo_err {
                    RepositoryError::NotFound => Status::not_found("Not found"),
                    RepositoryError::Sqlx(_) => Status::internal("Database error"),
                    RepositoryError::Custom(msg) => Status::internal(msg),
                },

                ServiceError::Internal(msg) => Status::internal(msg),
            },

            AppErrorGrpc::Unhandled(msg) => Status::internal(format!("Unhandled error: {msg}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    fn to_status(err: ServiceError) -> Status {
        Status::from(AppErrorGrpc::from(err))
    }

    #[test]
    fn not_found_keeps_message() {
        let status = to_status(ServiceError::NotFound("Product with id 4 not found".into()));

        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "Product with id 4 not found");
    }

    #[test]
    fn invalid_ids_is_invalid_argument() {
        let status = to_status(ServiceError::InvalidIds(vec![7]));

        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(status.message().contains("[7]"));
    }

    #[test]
    fn database_errors_are_not_leaked() {
        let status = to_status(ServiceError::Repo(RepositoryError::Sqlx(
            sqlx::Error::PoolTimedOut,
        )));

        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "Database error");
    }
}
