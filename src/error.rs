use thiserror::Error;

/// Failures surfaced by the data access boundary.
///
/// Transport problems and non-404 HTTP statuses both count as `Network`;
/// the views only distinguish "the server said no such thing" from
/// "the call did not work" from "we refused to send it".
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("network failure calling {endpoint}: {message}")]
    Network { endpoint: String, message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("validation failed: {0}")]
    Validation(String),
}

impl ApiError {
    pub fn network(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Network {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        ApiError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }
}

/// A route preload failed: one of the bundled fetches errored.
/// `name` identifies which fetch so the view (and the log line)
/// can say more than "loading failed".
#[derive(Error, Debug)]
#[error("preload of {name} failed: {source}")]
pub struct PreloadError {
    pub name: &'static str,
    #[source]
    pub source: ApiError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_message_names_endpoint() {
        let err = ApiError::network("/patients", "connection refused");
        assert_eq!(
            err.to_string(),
            "network failure calling /patients: connection refused"
        );
    }

    #[test]
    fn not_found_names_entity_and_id() {
        let err = ApiError::not_found("patient", "42");
        assert_eq!(err.to_string(), "patient not found: 42");
    }

    #[test]
    fn preload_error_names_failed_fetch() {
        let err = PreloadError {
            name: "patients",
            source: ApiError::network("/patients", "timeout"),
        };
        assert!(err.to_string().starts_with("preload of patients failed"));
    }
}
