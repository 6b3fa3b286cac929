//! Configuration system for mannord.
//! TOML-based, resolution: env > file > compiled defaults.

pub mod defaults;
pub mod dirichlet_config;
pub mod karger_config;
pub mod mannord_config;
pub mod thresholds;

pub use dirichlet_config::DirichletConfig;
pub use karger_config::KargerConfig;
pub use mannord_config::{Algorithm, MannordConfig};
pub use thresholds::ClassificationThresholds;
