//! DOM-backed render target
//!
//! One absolutely-positioned `div` per shape inside a wrapper element.
//! Position, rotation and scale land in a single `transform` write per
//! frame; styling is set once at creation.

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::{RenderTarget, ShapeClass, ShapeStyle, VisualHandle};

/// Background palette, matched to the page theme
pub const PALETTE: [&str; 5] = [
    "rgba(255, 193, 5, 0.69)",
    "rgba(255, 77, 0, 0.65)",
    "rgba(17, 99, 250, 0.59)",
    "rgba(4, 34, 6, 0.61)",
    "rgba(196, 140, 255, 0.56)",
];

pub struct DomTarget {
    document: Document,
    wrap: Element,
    elements: HashMap<u32, HtmlElement>,
    next: u32,
}

impl DomTarget {
    /// Returns `None` when the wrapper element is absent; the field is then
    /// simply not built
    pub fn new(document: &Document, wrap_id: &str) -> Option<Self> {
        let wrap = document.get_element_by_id(wrap_id)?;
        Some(Self {
            document: document.clone(),
            wrap,
            elements: HashMap::new(),
            next: 0,
        })
    }
}

impl RenderTarget for DomTarget {
    fn create(&mut self, style: &ShapeStyle) -> VisualHandle {
        let el: HtmlElement = self
            .document
            .create_element("div")
            .expect("create_element failed")
            .dyn_into()
            .expect("div is not an HtmlElement");

        match style.class {
            ShapeClass::Blob => el.set_class_name("shape"),
            ShapeClass::Sparkle => el.set_class_name("shape is-sparkle"),
            ShapeClass::Burst => el.set_class_name("burst-particle"),
            ShapeClass::BurstSpark => el.set_class_name("burst-particle spark"),
        }

        let css = el.style();
        let _ = css.set_property("width", &format!("{}px", style.size));
        let _ = css.set_property("height", &format!("{}px", style.size));

        let color = PALETTE[style.color % PALETTE.len()];
        match style.class {
            ShapeClass::Blob | ShapeClass::Sparkle => {
                let _ = css.set_property(
                    "background",
                    &format!("radial-gradient(circle at 30% 30%, {color}, rgba(255,255,255,.15))"),
                );
            }
            ShapeClass::Burst | ShapeClass::BurstSpark => {
                let _ = css.set_property(
                    "background",
                    &format!("radial-gradient(circle at 30% 30%, {color}, rgba(255,255,255,.2))"),
                );
            }
        }

        // Softness differences between the variants
        match style.class {
            ShapeClass::Blob => {
                let _ = css.set_property("filter", "blur(1px) saturate(1.1)");
            }
            ShapeClass::Sparkle => {
                let _ = css.set_property("opacity", "0.75");
            }
            _ => {}
        }

        let _ = self.wrap.append_child(&el);

        let handle = VisualHandle(self.next);
        self.next += 1;
        self.elements.insert(handle.0, el);
        handle
    }

    fn write_transform(&mut self, handle: VisualHandle, pos: Vec2, rot_deg: f32, scale: f32) {
        if let Some(el) = self.elements.get(&handle.0) {
            let transform = format!(
                "translate3d({}px, {}px, 0) rotate({}deg) scale({})",
                pos.x, pos.y, rot_deg, scale
            );
            let _ = el.style().set_property("transform", &transform);
        }
    }

    fn set_opacity(&mut self, handle: VisualHandle, opacity: f32) {
        if let Some(el) = self.elements.get(&handle.0) {
            let _ = el.style().set_property("opacity", &opacity.max(0.0).to_string());
        }
    }

    fn remove(&mut self, handle: VisualHandle) {
        if let Some(el) = self.elements.remove(&handle.0) {
            el.remove();
        }
    }
}
