//! Render-target capability
//!
//! The simulation never touches the DOM directly: it publishes transforms
//! through this trait. wasm32 gets a DOM-backed implementation; tests and
//! the native smoke binary use a recording target.

use std::collections::HashMap;

use glam::Vec2;

use crate::sim::{FieldState, ShapeKind};

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub use dom::DomTarget;

/// Opaque handle to a shape's visual representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualHandle(pub u32);

/// Visual class of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeClass {
    Blob,
    Sparkle,
    Burst,
    BurstSpark,
}

/// Creation-time styling for a visual element
#[derive(Debug, Clone, Copy)]
pub struct ShapeStyle {
    pub class: ShapeClass,
    /// Diameter, px
    pub size: f32,
    /// Palette index
    pub color: usize,
}

/// Capability the field consumes from its host
pub trait RenderTarget {
    /// Create a visual element; the handle stays valid until `remove`
    fn create(&mut self, style: &ShapeStyle) -> VisualHandle;
    /// Single combined transform write for one element
    fn write_transform(&mut self, handle: VisualHandle, pos: Vec2, rot_deg: f32, scale: f32);
    fn set_opacity(&mut self, handle: VisualHandle, opacity: f32);
    fn remove(&mut self, handle: VisualHandle);
}

/// Create visuals for anything not yet mounted and write the initial
/// transform immediately (prevents a top-left flash on first paint)
pub fn mount(state: &mut FieldState, target: &mut dyn RenderTarget) {
    for shape in &mut state.shapes {
        if shape.handle.is_none() {
            let class = match shape.kind {
                ShapeKind::Blob => ShapeClass::Blob,
                ShapeKind::Sparkle => ShapeClass::Sparkle,
            };
            let handle = target.create(&ShapeStyle {
                class,
                size: shape.size,
                color: shape.color,
            });
            target.write_transform(handle, shape.pos, shape.rot, 1.0);
            shape.handle = Some(handle);
        }
    }

    for burst in &mut state.bursts {
        for p in &mut burst.particles {
            if p.handle.is_none() {
                let class = if p.spark {
                    ShapeClass::BurstSpark
                } else {
                    ShapeClass::Burst
                };
                let handle = target.create(&ShapeStyle {
                    class,
                    size: p.size,
                    color: p.color,
                });
                target.write_transform(handle, p.pos, p.display_rot, p.scale);
                p.handle = Some(handle);
            }
        }
    }
}

/// Publish current transforms for every mounted element
pub fn publish(state: &FieldState, target: &mut dyn RenderTarget) {
    for shape in &state.shapes {
        if let Some(handle) = shape.handle {
            target.write_transform(handle, shape.pos, shape.rot, 1.0);
        }
    }

    for burst in &state.bursts {
        for p in &burst.particles {
            if let Some(handle) = p.handle {
                target.write_transform(handle, p.pos, p.display_rot, p.scale);
                target.set_opacity(handle, p.opacity);
            }
        }
    }
}

/// Records every call; used by tests and the native binary
#[derive(Debug, Default)]
pub struct RecordingTarget {
    next: u32,
    pub created: Vec<ShapeStyle>,
    pub writes: u64,
    pub last_transform: HashMap<u32, (Vec2, f32, f32)>,
    pub last_opacity: HashMap<u32, f32>,
    pub removed: Vec<u32>,
}

impl RenderTarget for RecordingTarget {
    fn create(&mut self, style: &ShapeStyle) -> VisualHandle {
        let handle = VisualHandle(self.next);
        self.next += 1;
        self.created.push(*style);
        handle
    }

    fn write_transform(&mut self, handle: VisualHandle, pos: Vec2, rot_deg: f32, scale: f32) {
        self.writes += 1;
        self.last_transform.insert(handle.0, (pos, rot_deg, scale));
    }

    fn set_opacity(&mut self, handle: VisualHandle, opacity: f32) {
        self.last_opacity.insert(handle.0, opacity);
    }

    fn remove(&mut self, handle: VisualHandle) {
        self.last_transform.remove(&handle.0);
        self.last_opacity.remove(&handle.0);
        self.removed.push(handle.0);
    }
}
