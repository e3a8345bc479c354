//! Finite-lifetime radial burst
//!
//! A blast of small particles flying outward from a focal point, eased to a
//! stop and faded out over a fixed lifetime. Modeled as an explicit
//! time-driven sequence rather than chained deferred callbacks, so it is
//! restartable and testable without wall-clock waits.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::render::VisualHandle;

/// One burst particle
#[derive(Debug, Clone)]
pub struct BurstParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Small bright variant
    pub spark: bool,
    pub color: usize,
    /// Initial tilt, degrees
    pub rot: f32,
    /// Published rotation: tilt plus the lifetime spin
    pub display_rot: f32,
    pub scale: f32,
    pub opacity: f32,
    pub handle: Option<VisualHandle>,
}

/// An active burst effect
#[derive(Debug, Clone)]
pub struct Burst {
    pub particles: Vec<BurstParticle>,
    elapsed: f32,
}

impl Burst {
    /// Spawn a full burst at `origin`
    pub fn spawn(rng: &mut Pcg32, origin: Vec2) -> Self {
        let mut particles = Vec::with_capacity(BURST_COUNT);
        for _ in 0..BURST_COUNT {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(BURST_FORCE * 0.45..BURST_FORCE);
            let rot = rng.random_range(BURST_ROTATION_RANGE.0..BURST_ROTATION_RANGE.1);
            particles.push(BurstParticle {
                pos: origin,
                vel: Vec2::from_angle(angle) * speed,
                size: rng.random_range(BURST_SIZE.0..BURST_SIZE.1),
                spark: rng.random_bool(BURST_SPARK_PROB),
                color: rng.random_range(0..PALETTE_LEN),
                rot,
                display_rot: rot,
                scale: 1.0,
                opacity: 1.0,
                handle: None,
            });
        }
        Self {
            particles,
            elapsed: 0.0,
        }
    }

    /// Lifetime progress, 0..=1
    pub fn progress(&self) -> f32 {
        (self.elapsed / BURST_LIFE).min(1.0)
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= BURST_LIFE
    }

    /// Advance the effect: movement slows as the cubic ease completes,
    /// opacity fades linearly, particles spin up and grow slightly
    pub fn step(&mut self, dt: f32) {
        self.elapsed += dt;
        let k = self.progress();
        let ease = 1.0 - (1.0 - k).powi(3);
        let fade = (1.0 - k).max(0.0);

        for p in &mut self.particles {
            p.pos += p.vel * dt * (1.0 - ease * 0.65);
            p.opacity = fade;
            p.display_rot = p.rot + ease * 120.0;
            p.scale = 1.0 + ease * 0.25;
        }
    }
}
