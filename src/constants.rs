// Tick and timing
pub const FIXED_STEP_MS: f64 = 1000.0 / 60.0;
pub const MAX_FRAME_DELTA_MS: f64 = 100.0;
pub const TICKS_PER_SECOND: u32 = 60;

// Offline progression
pub const MAX_OFFLINE_MINUTES: i64 = 480; // 8 hours
pub const OFFLINE_EFFICIENCY: f64 = 0.25;
pub const XP_PER_KILL: f64 = 2.5;
pub const PYREAL_FACTOR_MIN: f64 = 1.0;
pub const PYREAL_FACTOR_MAX: f64 = 5.0;

// XP and leveling
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;
pub const POWER_PER_LEVEL: u32 = 1;
pub const BASE_POWER: u32 = 4;

// Persisted counter
pub const COUNTER_MAX_VALUE: u64 = 9_007_199_254_740_991; // 2^53 - 1
pub const COUNTER_DEBOUNCE_MS: u64 = 500;

// Storage keys
pub const BACKGROUND_TIME_KEY: &str = "background_time";
pub const PYREAL_COUNTER_KEY: &str = "pyreal_total";

// Save file
pub const SAVE_VERSION_MAGIC: u64 = 0x5045_5453_4F46_5431; // "PETSOFT1"
