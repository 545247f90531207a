// Ground effect window
pub const DEFAULT_MAX_DRAG_REDUCTION: f64 = 0.5; // fraction of drag removed at full strength
pub const DEFAULT_START_ALTITUDE: f64 = 20.0; // m AGL, effect begins
pub const DEFAULT_FULL_ALTITUDE: f64 = 2.0; // m AGL, full strength
pub const FULL_STRENGTH_SPAN_RATIO: f64 = 0.5; // full strength at half the effective span

// Geometry
pub const DEFAULT_WINGSPAN: f64 = 10.0; // m
pub const DEFAULT_WINGSPAN_SCALE: f64 = 1.0;
pub const MAX_PLAUSIBLE_WINGSPAN: f64 = 2000.0; // m, anything wider is a broken mesh

// Activation guards
pub const MIN_SURFACE_SPEED: f64 = 2.5; // m/s
pub const MIN_VELOCITY_SQ: f64 = 1.0; // m^2/s^2, below this the flight direction is noise
pub const MIN_SEA_LEVEL_ALTITUDE: f64 = -10.0; // m
pub const ACTIVATION_THRESHOLD: f64 = 0.001;

// Throttling
pub const GEOMETRY_REFRESH_INTERVAL: f64 = 2.0; // s
pub const STATUS_LOG_INTERVAL: f64 = 1.0; // s

pub const THRESHOLD_EPSILON: f64 = 1e-6;
