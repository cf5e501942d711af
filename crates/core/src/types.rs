/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Optimistic concurrency counter carried by every persisted widget.
///
/// Starts at [`INITIAL_VERSION`] and grows by exactly one per successful write.
pub type Version = i64;

/// Version assigned to a widget the first time it is persisted.
pub const INITIAL_VERSION: Version = 1;
