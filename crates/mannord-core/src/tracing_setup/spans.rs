//! Span definitions per operation: propagation, incremental update, batch run.

/// Create a propagation span.
#[macro_export]
macro_rules! propagation_span {
    ($algorithm:expr, $k_max:expr) => {
        tracing::info_span!("mannord.propagation", algorithm = %$algorithm, k_max = $k_max)
    };
}

/// Create an incremental update span.
#[macro_export]
macro_rules! incremental_span {
    ($item_id:expr, $user_id:expr) => {
        tracing::debug_span!("mannord.incremental", item_id = %$item_id, user_id = %$user_id)
    };
}

/// Create a batch run span.
#[macro_export]
macro_rules! batch_span {
    ($algorithm:expr) => {
        tracing::info_span!("mannord.batch", algorithm = %$algorithm)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const PROPAGATION: &str = "mannord.propagation";
    pub const INCREMENTAL: &str = "mannord.incremental";
    pub const BATCH: &str = "mannord.batch";
}
