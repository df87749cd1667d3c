use uuid::Uuid;

/// Error taxonomy shared across the engine.
///
/// Every variant is surfaced to the caller; the engine never retries on the
/// user's behalf and every abort path leaves zero persisted rows for the
/// failed attempt.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A referenced id (movie, show, seat, user, booking) did not resolve.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    /// The caller's fault: empty or duplicated seat set, seats from the
    /// wrong show, booking a show that already started.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The seat is already part of a committed booking. The caller may
    /// re-query availability and retry with a different selection.
    #[error("seat unavailable: {0}")]
    SeatUnavailable(Uuid),

    /// The claim transaction did not finish within the configured bound.
    /// Fail closed; callers treat this like `SeatUnavailable`.
    #[error("seat claim timed out after {0}ms")]
    ClaimTimeout(u64),

    /// Transaction, connectivity or constraint failure. Fatal for the
    /// current request; the transaction is rolled back entirely.
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl EngineError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        EngineError::NotFound { entity, id }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        EngineError::InvalidRequest(reason.into())
    }
}
