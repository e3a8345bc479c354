//! External perturbations
//!
//! UI events (breakpoint crossings) may kick or scatter the field between
//! frames. Injected velocities are not clamped; the next tick's damping is
//! the only brake.

use glam::Vec2;
use rand::Rng;

use super::state::{Domain, FieldState};
use crate::consts::*;

/// Add `magnitude` to every shape's velocity, directed outward from
/// `focal`. A shape centered exactly on the focal point has no defined
/// direction and is left unchanged.
pub fn apply_radial_impulse(state: &mut FieldState, focal: Vec2, magnitude: f32) {
    for shape in &mut state.shapes {
        let away = shape.center() - focal;
        let dist = away.length();
        if dist > 0.0 {
            shape.vel += (away / dist) * magnitude;
        }
    }
}

/// Adopt a new domain and scatter every shape uniformly inside it, flying
/// outward from the domain center
pub fn redistribute(state: &mut FieldState, domain: Domain) {
    state.domain = domain;
    let origin = domain.center();

    let rng = &mut state.rng;
    for shape in &mut state.shapes {
        shape.pos = Vec2::new(
            rng.random_range(0.0..(domain.width - shape.size).max(1.0)),
            rng.random_range(0.0..(domain.height - shape.size).max(1.0)),
        );

        let away = shape.center() - origin;
        let dist = away.length();
        if dist > 0.0 {
            let burst = rng.random_range(SPREAD_SPEED.0..SPREAD_SPEED.1);
            shape.vel = (away / dist) * burst;
        } else {
            shape.vel = Vec2::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BoundsMode;

    #[test]
    fn test_radial_impulse_pushes_outward() {
        let domain = Domain::new(800.0, 600.0);
        let mut state = FieldState::new(7, 16, domain, BoundsMode::Bounce);
        for shape in &mut state.shapes {
            shape.vel = Vec2::ZERO;
        }

        let focal = Vec2::new(400.0, 300.0);
        apply_radial_impulse(&mut state, focal, KICK_FORCE);

        for shape in &state.shapes {
            let away = shape.center() - focal;
            if away.length() > 0.0 {
                assert!((shape.vel.length() - KICK_FORCE).abs() < 1e-2);
                assert!(shape.vel.dot(away) > 0.0);
            }
        }
    }

    #[test]
    fn test_radial_impulse_degenerate_focal() {
        let domain = Domain::new(800.0, 600.0);
        let mut state = FieldState::new(7, 1, domain, BoundsMode::Bounce);
        state.shapes[0].pos = domain.center() - Vec2::splat(state.shapes[0].size / 2.0);
        let before = state.shapes[0].vel;

        // Focal point exactly on the shape center: direction undefined,
        // velocity must stay untouched
        apply_radial_impulse(&mut state, domain.center(), KICK_FORCE);
        assert_eq!(state.shapes[0].vel, before);
    }

    #[test]
    fn test_redistribute_scatters_into_new_domain() {
        let mut state = FieldState::new(31337, 24, Domain::new(600.0, 400.0), BoundsMode::Bounce);

        let wide = Domain::new(1600.0, 900.0);
        redistribute(&mut state, wide);

        assert_eq!(state.domain, wide);
        let origin = wide.center();
        for shape in &state.shapes {
            assert!(shape.pos.x >= 0.0 && shape.pos.x <= wide.width - shape.size);
            assert!(shape.pos.y >= 0.0 && shape.pos.y <= wide.height - shape.size);

            let away = shape.center() - origin;
            if away.length() > 0.0 {
                let speed = shape.vel.length();
                assert!(speed >= SPREAD_SPEED.0 - 1e-3 && speed < SPREAD_SPEED.1 + 1e-3);
                assert!(shape.vel.dot(away) > 0.0);
            }
        }
    }

    #[test]
    fn test_impulses_accumulate_unclamped() {
        let domain = Domain::new(800.0, 600.0);
        let mut state = FieldState::new(7, 4, domain, BoundsMode::Bounce);
        for shape in &mut state.shapes {
            shape.vel = Vec2::ZERO;
            shape.pos = Vec2::new(10.0, 10.0);
        }

        let focal = Vec2::ZERO;
        for _ in 0..5 {
            apply_radial_impulse(&mut state, focal, KICK_FORCE);
        }

        // No speed cap on injected impulses
        for shape in &state.shapes {
            assert!((shape.vel.length() - 5.0 * KICK_FORCE).abs() < 1e-1);
        }
    }
}
