//! Field state and shape types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::burst::Burst;
use crate::consts::*;
use crate::render::VisualHandle;

/// Visual variant, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Large, slow, blurred
    Blob,
    /// Small, quick, semi-transparent
    Sparkle,
}

/// Boundary handling for the field edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundsMode {
    /// Clamp to the wall and reflect the velocity component
    #[default]
    Bounce,
    /// Leave one edge, re-enter at the opposite one
    Wrap,
}

/// Rectangular viewport region shapes are bounded within (px)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub width: f32,
    pub height: f32,
}

impl Domain {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Uniform top-left position keeping a shape of `size` fully inside
    fn random_pos(&self, size: f32, rng: &mut Pcg32) -> Vec2 {
        Vec2::new(
            rng.random_range(0.0..(self.width - size).max(1.0)),
            rng.random_range(0.0..(self.height - size).max(1.0)),
        )
    }
}

/// One animated background shape
#[derive(Debug, Clone)]
pub struct Shape {
    /// Top-left corner, viewport px
    pub pos: Vec2,
    /// px/s
    pub vel: Vec2,
    /// Diameter, immutable after creation
    pub size: f32,
    /// Immutable after creation
    pub kind: ShapeKind,
    /// Degrees
    pub rot: f32,
    /// Degrees/s, undamped
    pub rot_vel: f32,
    /// Palette index for the renderer
    pub color: usize,
    /// Attached visual element, if mounted
    pub handle: Option<VisualHandle>,
}

impl Shape {
    /// Shape center in viewport coordinates
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    fn spawn(rng: &mut Pcg32, domain: Domain) -> Self {
        // Some sparkles, mostly blobs
        let kind = if rng.random_bool(SPARKLE_PROB) {
            ShapeKind::Sparkle
        } else {
            ShapeKind::Blob
        };
        let (size_range, speed_range) = match kind {
            ShapeKind::Sparkle => (SPARKLE_SIZE, SPARKLE_SPEED),
            ShapeKind::Blob => (BLOB_SIZE, BLOB_SPEED),
        };

        let size = rng.random_range(size_range.0..size_range.1);
        let pos = domain.random_pos(size, rng);

        let speed = rng.random_range(speed_range.0..speed_range.1);
        let angle = rng.random_range(0.0..std::f32::consts::TAU);

        Self {
            pos,
            vel: Vec2::from_angle(angle) * speed,
            size,
            kind,
            rot: rng.random_range(ROTATION_RANGE.0..ROTATION_RANGE.1),
            rot_vel: rng.random_range(SPIN_RANGE.0..SPIN_RANGE.1),
            color: rng.random_range(0..PALETTE_LEN),
            handle: None,
        }
    }
}

/// Complete field state (deterministic given seed and inputs)
///
/// Exclusively owns the shape collection: external callers perturb
/// velocity/position through `perturb`, never add or remove shapes.
#[derive(Debug, Clone)]
pub struct FieldState {
    pub seed: u64,
    pub domain: Domain,
    pub mode: BoundsMode,
    pub shapes: Vec<Shape>,
    /// Short-lived blast effects, stepped separately from the field
    pub bursts: Vec<Burst>,
    pub(crate) rng: Pcg32,
}

impl FieldState {
    /// Create a field of `count` shapes scattered across `domain`
    pub fn new(seed: u64, count: usize, domain: Domain, mode: BoundsMode) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let shapes = (0..count).map(|_| Shape::spawn(&mut rng, domain)).collect();
        Self {
            seed,
            domain,
            mode,
            shapes,
            bursts: Vec::new(),
            rng,
        }
    }

    /// Adopt a new viewport size; shapes re-clamp on the next tick
    pub fn set_domain(&mut self, domain: Domain) {
        self.domain = domain;
    }

    /// Spawn a burst at `origin`; visuals attach on the next mount
    pub fn spawn_burst(&mut self, origin: Vec2) {
        let burst = Burst::spawn(&mut self.rng, origin);
        self.bursts.push(burst);
    }

    /// Advance bursts and drop finished ones, returning the visual handles
    /// the caller must remove
    pub fn step_bursts(&mut self, dt: f32) -> Vec<VisualHandle> {
        let dt = dt.min(MAX_FRAME_DT);
        let mut removed = Vec::new();
        for burst in &mut self.bursts {
            burst.step(dt);
            if burst.finished() {
                removed.extend(burst.particles.iter().filter_map(|p| p.handle));
            }
        }
        self.bursts.retain(|b| !b.finished());
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_positions_in_bounds() {
        let domain = Domain::new(800.0, 600.0);
        let state = FieldState::new(12345, SHAPE_COUNT, domain, BoundsMode::Bounce);

        assert_eq!(state.shapes.len(), SHAPE_COUNT);
        for shape in &state.shapes {
            assert!(shape.pos.x >= 0.0 && shape.pos.x <= domain.width - shape.size);
            assert!(shape.pos.y >= 0.0 && shape.pos.y <= domain.height - shape.size);
        }
    }

    #[test]
    fn test_spawn_variant_ranges() {
        let domain = Domain::new(1920.0, 1080.0);
        let state = FieldState::new(777, 200, domain, BoundsMode::Bounce);

        for shape in &state.shapes {
            let (size_range, speed_range) = match shape.kind {
                ShapeKind::Sparkle => (SPARKLE_SIZE, SPARKLE_SPEED),
                ShapeKind::Blob => (BLOB_SIZE, BLOB_SPEED),
            };
            assert!(shape.size >= size_range.0 && shape.size < size_range.1);
            let speed = shape.vel.length();
            assert!(speed >= speed_range.0 - 1e-3 && speed < speed_range.1 + 1e-3);
            assert!(shape.rot >= ROTATION_RANGE.0 && shape.rot < ROTATION_RANGE.1);
            assert!(shape.rot_vel >= SPIN_RANGE.0 && shape.rot_vel < SPIN_RANGE.1);
            assert!(shape.color < PALETTE_LEN);
        }
    }

    #[test]
    fn test_spawn_determinism() {
        let domain = Domain::new(800.0, 600.0);
        let a = FieldState::new(99999, SHAPE_COUNT, domain, BoundsMode::Bounce);
        let b = FieldState::new(99999, SHAPE_COUNT, domain, BoundsMode::Bounce);

        for (x, y) in a.shapes.iter().zip(&b.shapes) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.vel, y.vel);
            assert_eq!(x.size, y.size);
            assert_eq!(x.kind, y.kind);
        }
    }

    #[test]
    fn test_burst_lifecycle() {
        let domain = Domain::new(800.0, 600.0);
        let mut state = FieldState::new(1, 0, domain, BoundsMode::Bounce);

        state.spawn_burst(domain.center());
        assert_eq!(state.bursts.len(), 1);
        assert_eq!(state.bursts[0].particles.len(), BURST_COUNT);

        // No handles were mounted, so nothing to remove, but the burst
        // must still expire
        let mut removed = Vec::new();
        for _ in 0..40 {
            removed.extend(state.step_bursts(0.033));
        }
        assert!(state.bursts.is_empty());
        assert!(removed.is_empty());
    }
}
