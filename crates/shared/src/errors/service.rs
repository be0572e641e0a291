use crate::errors::repository::RepositoryError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("{0}")]
    NotFound(String),

    #[error("Some products were not found: {0:?}")]
    InvalidIds(Vec<i32>),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{field}: {msg}"),
                    None => format!("{field}: {}", e.code),
                })
            })
            .collect();

        messages.sort();

        ServiceError::Validation(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(range(min = 1, message = "Page must be at least 1"))]
        page: i32,
        #[validate(range(min = 1))]
        limit: i32,
    }

    #[test]
    fn validation_errors_are_flattened_per_field() {
        let probe = Probe { page: 0, limit: 0 };

        let err = ServiceError::from(probe.validate().unwrap_err());

        match err {
            ServiceError::Validation(messages) => {
                assert_eq!(messages.len(), 2);
                assert_eq!(messages[0], "limit: range");
                assert_eq!(messages[1], "page: Page must be at least 1");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_ids_message_lists_missing_ids() {
        let err = ServiceError::InvalidIds(vec![7, 9]);
        assert_eq!(err.to_string(), "Some products were not found: [7, 9]");
    }
}
