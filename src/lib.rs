//! Drift Field - ambient animated background shapes
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, per-frame step, perturbations, bursts)
//! - `render`: Render-target capability and the DOM implementation
//! - `settings`: User preferences persisted to LocalStorage

pub mod render;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Field tuning constants
pub mod consts {
    /// Number of shapes in the field
    pub const SHAPE_COUNT: usize = 36;
    /// Probability a shape spawns as a sparkle instead of a blob
    pub const SPARKLE_PROB: f64 = 0.28;

    /// Sparkle diameter range (px)
    pub const SPARKLE_SIZE: (f32, f32) = (14.0, 28.0);
    /// Blob diameter range (px)
    pub const BLOB_SIZE: (f32, f32) = (60.0, 160.0);
    /// Sparkle launch speed range (px/s)
    pub const SPARKLE_SPEED: (f32, f32) = (50.0, 110.0);
    /// Blob launch speed range (px/s)
    pub const BLOB_SPEED: (f32, f32) = (25.0, 70.0);
    /// Initial rotation range (degrees)
    pub const ROTATION_RANGE: (f32, f32) = (-20.0, 20.0);
    /// Angular velocity range (degrees/s)
    pub const SPIN_RANGE: (f32, f32) = (-14.0, 14.0);

    /// Cursor attraction strength at zero distance (px/s²)
    pub const CURSOR_FORCE: f32 = 180.0;
    /// Cursor attraction radius (px)
    pub const CURSOR_RADIUS: f32 = 260.0;
    /// Per-frame velocity damping multiplier (flat, not dt-scaled)
    pub const DAMPING: f32 = 0.98;
    /// Frame delta clamp (seconds) - keeps integration stable after
    /// tab-inactive gaps
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Outward kick applied to every shape on a breakpoint crossing (px/s)
    pub const KICK_FORCE: f32 = 260.0;
    /// Redistribute launch speed range (px/s)
    pub const SPREAD_SPEED: (f32, f32) = (180.0, 420.0);

    /// Burst particle count
    pub const BURST_COUNT: usize = 40;
    /// Burst lifetime (seconds)
    pub const BURST_LIFE: f32 = 0.65;
    /// Burst launch speed ceiling (px/s)
    pub const BURST_FORCE: f32 = 520.0;
    /// Probability a burst particle is a spark
    pub const BURST_SPARK_PROB: f64 = 0.35;
    /// Burst particle diameter range (px)
    pub const BURST_SIZE: (f32, f32) = (8.0, 18.0);
    /// Burst initial rotation range (degrees)
    pub const BURST_ROTATION_RANGE: (f32, f32) = (-30.0, 30.0);

    /// Mobile/desktop breakpoint (CSS px)
    pub const BREAKPOINT_PX: f32 = 600.0;
    /// Number of palette entries shapes index into
    pub const PALETTE_LEN: usize = 5;
}
