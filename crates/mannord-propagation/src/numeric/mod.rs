//! Numeric primitives shared by the engines and the incremental controller.

mod beta_percentile;
mod normalization;
mod saturation;
mod sign_split;

pub use beta_percentile::BetaPercentile;
pub use normalization::rms_or_neutral;
pub use saturation::Saturation;
pub use sign_split::{sign, split_by_sign};
