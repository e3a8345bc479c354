//! Per-frame field step
//!
//! One call per display refresh. Order matters and is fixed: cursor
//! attraction, position integration, damping, rotation, boundary
//! resolution. External perturbations land between frames and are never
//! applied here.

use glam::Vec2;

use super::state::{BoundsMode, FieldState};
use crate::consts::*;

/// Host inputs sampled for a single frame
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    /// Pointer position, viewport px
    pub pointer: Vec2,
    /// Shapes drift toward the pointer when set
    pub cursor_attraction: bool,
    /// Host accessibility preference; freezes the field when set
    pub reduced_motion: bool,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            pointer: Vec2::ZERO,
            cursor_attraction: true,
            reduced_motion: false,
        }
    }
}

/// Advance every shape by one frame
pub fn tick(state: &mut FieldState, input: &FrameInput, dt: f32) {
    let dt = dt.min(MAX_FRAME_DT);

    if input.reduced_motion {
        return;
    }

    let domain = state.domain;
    let mode = state.mode;

    for shape in &mut state.shapes {
        // Cursor attraction: radially decaying pull, re-applied fresh each
        // frame
        let to_pointer = input.pointer - shape.center();
        let dist = to_pointer.length();
        if input.cursor_attraction && dist < CURSOR_RADIUS {
            // Zero distance leaves the direction undefined; fall back to a
            // unit vector rather than dividing by zero
            let dir = if dist > 0.0 { to_pointer / dist } else { Vec2::X };
            let strength = (1.0 - dist / CURSOR_RADIUS) * CURSOR_FORCE;
            shape.vel += dir * strength * dt;
        }

        // Natural roaming (explicit Euler)
        shape.pos += shape.vel * dt;

        // Flat per-frame damping, deliberately not dt-scaled
        shape.vel *= DAMPING;

        // Rotation, undamped
        shape.rot += shape.rot_vel * dt;

        match mode {
            BoundsMode::Bounce => {
                let max_x = domain.width - shape.size;
                let max_y = domain.height - shape.size;
                // Per-axis clamp and reflect; both axes may fire in the
                // same step
                if shape.pos.x < 0.0 {
                    shape.pos.x = 0.0;
                    shape.vel.x = -shape.vel.x;
                }
                if shape.pos.y < 0.0 {
                    shape.pos.y = 0.0;
                    shape.vel.y = -shape.vel.y;
                }
                if shape.pos.x > max_x {
                    shape.pos.x = max_x;
                    shape.vel.x = -shape.vel.x;
                }
                if shape.pos.y > max_y {
                    shape.pos.y = max_y;
                    shape.vel.y = -shape.vel.y;
                }
            }
            BoundsMode::Wrap => {
                if shape.pos.x < -shape.size {
                    shape.pos.x = domain.width;
                }
                if shape.pos.x > domain.width {
                    shape.pos.x = -shape.size;
                }
                if shape.pos.y < -shape.size {
                    shape.pos.y = domain.height;
                }
                if shape.pos.y > domain.height {
                    shape.pos.y = -shape.size;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Domain;
    use proptest::prelude::*;

    /// Pointer far outside the attraction radius of everything
    const FAR_POINTER: Vec2 = Vec2::new(1.0e6, 1.0e6);

    fn quiet_state(domain: Domain, mode: BoundsMode) -> FieldState {
        FieldState::new(424242, 8, domain, mode)
    }

    #[test]
    fn test_zero_dt_freezes_positions() {
        let mut state = quiet_state(Domain::new(800.0, 600.0), BoundsMode::Bounce);
        let before: Vec<(Vec2, f32)> = state.shapes.iter().map(|s| (s.pos, s.rot)).collect();

        let input = FrameInput {
            pointer: Vec2::new(400.0, 300.0),
            ..FrameInput::default()
        };
        tick(&mut state, &input, 0.0);

        for (shape, (pos, rot)) in state.shapes.iter().zip(&before) {
            assert_eq!(shape.pos, *pos);
            assert_eq!(shape.rot, *rot);
        }
    }

    #[test]
    fn test_reduced_motion_is_noop() {
        let mut state = quiet_state(Domain::new(800.0, 600.0), BoundsMode::Bounce);
        let before = state.shapes.clone();

        let input = FrameInput {
            pointer: Vec2::new(10.0, 10.0),
            reduced_motion: true,
            ..FrameInput::default()
        };
        tick(&mut state, &input, 0.033);
        tick(&mut state, &input, 0.016);

        for (shape, prev) in state.shapes.iter().zip(&before) {
            assert_eq!(shape.pos, prev.pos);
            assert_eq!(shape.vel, prev.vel);
            assert_eq!(shape.rot, prev.rot);
        }
    }

    #[test]
    fn test_damping_decay() {
        let mut state = quiet_state(Domain::new(1.0e5, 1.0e5), BoundsMode::Bounce);
        state.shapes[0].pos = Vec2::new(5000.0, 5000.0);
        state.shapes[0].vel = Vec2::new(100.0, 0.0);

        let input = FrameInput {
            pointer: FAR_POINTER,
            ..FrameInput::default()
        };
        let k = 10;
        for _ in 0..k {
            tick(&mut state, &input, 1.0 / 60.0);
        }

        let expected = 100.0 * DAMPING.powi(k);
        let speed = state.shapes[0].vel.length();
        assert!((speed - expected).abs() < 1e-3, "speed {speed} vs {expected}");
    }

    #[test]
    fn test_corner_bounce_reflects_both_axes() {
        let mut state = quiet_state(Domain::new(800.0, 600.0), BoundsMode::Bounce);
        state.shapes[0].pos = Vec2::ZERO;
        state.shapes[0].vel = Vec2::new(-50.0, -50.0);

        let input = FrameInput {
            pointer: FAR_POINTER,
            ..FrameInput::default()
        };
        tick(&mut state, &input, 0.1);

        let shape = &state.shapes[0];
        assert_eq!(shape.pos, Vec2::ZERO);
        // Sign flips once per axis; damping has already been applied
        assert!((shape.vel.x - 50.0 * DAMPING).abs() < 1e-3);
        assert!((shape.vel.y - 50.0 * DAMPING).abs() < 1e-3);
    }

    #[test]
    fn test_pointer_on_center_uses_fallback_direction() {
        let mut state = quiet_state(Domain::new(800.0, 600.0), BoundsMode::Bounce);
        state.shapes[0].pos = Vec2::new(300.0, 300.0);
        state.shapes[0].vel = Vec2::ZERO;

        let dt = 1.0 / 60.0;
        let input = FrameInput {
            pointer: state.shapes[0].center(),
            ..FrameInput::default()
        };
        tick(&mut state, &input, dt);

        // Full-strength pull along the +X fallback, then damped
        let shape = &state.shapes[0];
        assert!(shape.vel.is_finite());
        assert!((shape.vel.x - CURSOR_FORCE * dt * DAMPING).abs() < 1e-3);
        assert_eq!(shape.vel.y, 0.0);
    }

    #[test]
    fn test_attraction_can_be_disabled() {
        let mut state = quiet_state(Domain::new(800.0, 600.0), BoundsMode::Bounce);
        state.shapes[0].pos = Vec2::new(300.0, 300.0);
        state.shapes[0].vel = Vec2::ZERO;

        // Pointer dead on the shape center, the strongest possible pull
        let input = FrameInput {
            pointer: state.shapes[0].center(),
            cursor_attraction: false,
            ..FrameInput::default()
        };
        tick(&mut state, &input, 1.0 / 60.0);

        // Roaming, damping and bounds still apply; the pull does not
        assert_eq!(state.shapes[0].vel, Vec2::ZERO);
    }

    #[test]
    fn test_attraction_decays_with_distance() {
        let mut state = quiet_state(Domain::new(2000.0, 2000.0), BoundsMode::Bounce);
        for shape in &mut state.shapes {
            shape.vel = Vec2::ZERO;
        }
        state.shapes[0].pos = Vec2::new(500.0, 500.0);

        // Pointer sits 50px right of shape 0's center, 200px left of shape 1's
        let pointer = state.shapes[0].center() + Vec2::new(50.0, 0.0);
        state.shapes[1].pos = pointer + Vec2::new(200.0, 0.0) - Vec2::splat(state.shapes[1].size / 2.0);

        let input = FrameInput {
            pointer,
            ..FrameInput::default()
        };
        tick(&mut state, &input, 1.0 / 60.0);

        let near_pull = state.shapes[0].vel.length();
        let far_pull = state.shapes[1].vel.length();
        assert!(near_pull > far_pull, "near {near_pull} <= far {far_pull}");
    }

    #[test]
    fn test_wrap_mode_reenters_opposite_edge() {
        let domain = Domain::new(800.0, 600.0);
        let mut state = quiet_state(domain, BoundsMode::Wrap);
        let size = state.shapes[0].size;
        state.shapes[0].pos = Vec2::new(domain.width - 0.5, 100.0);
        state.shapes[0].vel = Vec2::new(500.0, 0.0);

        let input = FrameInput {
            pointer: FAR_POINTER,
            ..FrameInput::default()
        };
        tick(&mut state, &input, 0.033);

        assert_eq!(state.shapes[0].pos.x, -size);
    }

    proptest! {
        #[test]
        fn prop_bounce_keeps_shapes_in_bounds(
            seed in any::<u64>(),
            steps in 1usize..150,
            px in -500.0f32..1500.0,
            py in -500.0f32..1200.0,
        ) {
            let domain = Domain::new(800.0, 600.0);
            let mut state = FieldState::new(seed, 12, domain, BoundsMode::Bounce);
            let input = FrameInput { pointer: Vec2::new(px, py), ..FrameInput::default() };

            for _ in 0..steps {
                tick(&mut state, &input, 1.0 / 60.0);
            }

            for shape in &state.shapes {
                prop_assert!(shape.pos.x >= 0.0);
                prop_assert!(shape.pos.y >= 0.0);
                prop_assert!(shape.pos.x <= domain.width - shape.size + 1e-3);
                prop_assert!(shape.pos.y <= domain.height - shape.size + 1e-3);
            }
        }
    }
}
