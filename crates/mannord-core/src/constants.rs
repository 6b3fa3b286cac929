/// Mannord version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Computation record name for the weighted-normalized engine.
pub const COMPUTATION_KARGER: &str = "karger";

/// Computation record name for the Dirichlet-posterior engine.
pub const COMPUTATION_DIRICHLET: &str = "dirichlet";

/// An entity needs at least this many incoming messages to take part in a round.
pub const MIN_MESSAGES_PER_ROUND: usize = 2;

/// Normalization coefficient used before the first batch run and whenever the RMS is zero.
pub const NEUTRAL_NORMALIZATION: f64 = 1.0;

/// Prefix used when rendering a KarmaUser key (`-<author id>`).
pub const KARMA_KEY_PREFIX: char = '-';

/// Tolerance used when comparing floats for "no change".
pub const FLOAT_TOLERANCE: f64 = 1e-9;
