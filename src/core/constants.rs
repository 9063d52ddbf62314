// Play field (logical pixels)
pub const FIELD_WIDTH: f64 = 400.0;
pub const FIELD_HEIGHT: f64 = 600.0;

// Frame timing
pub const FRAME_MS: u64 = 16; // ~60 FPS
pub const MAX_FRAME_DT: f64 = 0.25;

// Bird
pub const BIRD_START_X: f64 = 100.0;
pub const BIRD_START_Y: f64 = 260.0;
pub const BIRD_WIDTH: f64 = 28.0;
pub const BIRD_HEIGHT: f64 = 22.0;
/// Exponential smoothing rate (1/s) for position control.
pub const FOLLOW_RATE: f64 = 12.0;

// Pipes
/// Minimum distance between the gap center and the ceiling/ground.
pub const GAP_CENTER_MARGIN: f64 = 120.0;
/// Pipes whose right edge is at or beyond this far left of x=0 are dropped.
pub const PIPE_PRUNE_MARGIN: f64 = 10.0;

// Ground
pub const GROUND_TILE_WIDTH: f64 = 32.0;
pub const GROUND_SCROLL_FACTOR: f64 = 0.25;

// Keyboard
/// Terminals without key-release reporting: release after this long without a repeat.
pub const KEY_HOLD_TIMEOUT_MS: u64 = 150;

// Slider
pub const SLIDER_DEFAULT_VALUE: f64 = 0.5;
pub const SLIDER_KEY_STEP: f64 = 0.05;

// Files
pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "flappy-rehab.log";
pub const APP_DIR: &str = "flappy-rehab";
