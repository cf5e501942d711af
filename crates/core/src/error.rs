use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The caller's `If-Match` token does not match the current version.
    #[error("Precondition failed: {entity} with id {id} has moved past the expected version")]
    PreconditionFailed { entity: &'static str, id: DbId },

    #[error("Precondition required: {0}")]
    PreconditionRequired(String),
}
