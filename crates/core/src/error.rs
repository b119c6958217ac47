/// Domain-level errors raised by request validation and lookups.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Errors surfaced by a document or blob store client.
///
/// The `Display` text carries the raw detail reported by the backing
/// service so callers can relay it verbatim.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A create was rejected because a document with the same id exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The service answered with a non-success status.
    #[error("Store returned HTTP {status}: {body}")]
    Backend { status: u16, body: String },

    /// The request never produced a response (network, DNS, TLS).
    #[error("Store request failed: {0}")]
    Transport(String),

    /// A document could not be sent or understood (missing id, bad JSON).
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// The client was constructed from unusable settings.
    #[error("Invalid store configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "Catalog",
            id: "10".into(),
        };
        assert_eq!(err.to_string(), "Entity not found: Catalog with id 10");
    }

    #[test]
    fn backend_display_keeps_raw_body() {
        let err = StoreError::Backend {
            status: 503,
            body: r#"{"code":"ServiceUnavailable"}"#.into(),
        };
        assert_eq!(
            err.to_string(),
            r#"Store returned HTTP 503: {"code":"ServiceUnavailable"}"#
        );
    }
}
