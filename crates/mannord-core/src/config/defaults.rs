//! Compiled defaults for every configuration section.

// Weighted-normalized engine.
pub const DEFAULT_KARGER_K_MAX: usize = 10;
pub const DEFAULT_ASYMPTOTE: f64 = 10.0;
pub const DEFAULT_GAIN: f64 = 1.6;
pub const DEFAULT_USE_SATURATION: bool = true;
pub const DEFAULT_RELIABILITY: f64 = 0.5;
pub const DEFAULT_KARGER_KARMA_USER_VOTE: f64 = 0.3;
pub const DEFAULT_KARGER_BASE_INCREMENT: f64 = 1.0;
pub const DEFAULT_KARGER_SPAM: f64 = -1.0;
pub const DEFAULT_KARGER_HAM: f64 = 5.0;
pub const DEFAULT_KARGER_DEFINITELY_SPAM: f64 = -10.0;
pub const DEFAULT_KARGER_DEFINITELY_HAM: f64 = 10.0;

// Dirichlet-posterior engine.
pub const DEFAULT_DIRICHLET_K_MAX: usize = 10;
pub const DEFAULT_PERCENTILE: f64 = 0.8;
pub const DEFAULT_GRID_STEP: f64 = 1e-4;
pub const DEFAULT_EVIDENCE_BOUND: f64 = 1e6;
pub const DEFAULT_DIRICHLET_KARMA_USER_VOTE: f64 = 0.1;
pub const DEFAULT_DIRICHLET_BASE_INCREMENT: f64 = 1.0;
pub const DEFAULT_DIRICHLET_SPAM: f64 = -0.001;
pub const DEFAULT_DIRICHLET_HAM: f64 = 0.03;
pub const DEFAULT_DIRICHLET_DEFINITELY_SPAM: f64 = -0.15;
pub const DEFAULT_DIRICHLET_DEFINITELY_HAM: f64 = 0.6;
