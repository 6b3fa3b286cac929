//! Error handling for mannord.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod mannord_error;
pub mod moderation_error;
pub mod propagation_error;
pub mod store_error;

pub use config_error::ConfigError;
pub use error_code::MannordErrorCode;
pub use mannord_error::{MannordError, MannordResult};
pub use moderation_error::ModerationError;
pub use propagation_error::PropagationError;
pub use store_error::StoreError;
