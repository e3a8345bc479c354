//! Deterministic field simulation
//!
//! All shape logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - No rendering or platform dependencies
//! - Callers perturb velocities/positions between frames; only the tick
//!   integrates

pub mod burst;
pub mod perturb;
pub mod state;
pub mod tick;

pub use burst::{Burst, BurstParticle};
pub use perturb::{apply_radial_impulse, redistribute};
pub use state::{BoundsMode, Domain, FieldState, Shape, ShapeKind};
pub use tick::{FrameInput, tick};
