//! 3D card tilt effect.
//!
//! Pointer position over a card maps to a bounded rotation pair plus a
//! constant lift; leaving the card clears the transform entirely.

use std::collections::HashMap;

use crate::page::SectionId;

/// Maximum rotation in degrees on either axis
pub const MAX_TILT_DEG: f32 = 8.0;

/// Constant upward lift applied while a card is tilted, in pixels
pub const TILT_LIFT: f32 = 8.0;

/// Key identifying a tiltable card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardKey {
    pub section: SectionId,
    pub index: usize,
}

/// The transform applied to a hovered card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltTransform {
    pub lift: f32,
    pub rot_x_deg: f32,
    pub rot_y_deg: f32,
}

pub struct TiltEffect {
    current: HashMap<CardKey, TiltTransform>,
}

impl TiltEffect {
    pub fn new() -> Self {
        Self {
            current: HashMap::new(),
        }
    }

    /// Pointer moved over a card. `rel_x`/`rel_y` are the cursor position
    /// within the card in [0, 1] from its top-left corner.
    pub fn pointer_moved(&mut self, key: CardKey, rel_x: f32, rel_y: f32) -> TiltTransform {
        let x = rel_x.clamp(0.0, 1.0) - 0.5;
        let y = rel_y.clamp(0.0, 1.0) - 0.5;
        let transform = TiltTransform {
            lift: -TILT_LIFT,
            rot_x_deg: -y * MAX_TILT_DEG,
            rot_y_deg: x * MAX_TILT_DEG,
        };
        self.current.insert(key, transform);
        transform
    }

    /// Pointer left the card; the transform resets to identity
    pub fn pointer_left(&mut self, key: CardKey) {
        self.current.remove(&key);
    }

    pub fn transform(&self, key: CardKey) -> Option<TiltTransform> {
        self.current.get(&key).copied()
    }
}

impl Default for TiltEffect {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: CardKey = CardKey {
        section: SectionId::About,
        index: 0,
    };

    #[test]
    fn rotation_is_bounded_for_in_bounds_cursors() {
        let mut tilt = TiltEffect::new();
        for &(x, y) in &[
            (0.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (1.0, 0.0),
            (0.5, 0.5),
            (0.25, 0.75),
        ] {
            let t = tilt.pointer_moved(KEY, x, y);
            assert!(t.rot_x_deg.abs() <= MAX_TILT_DEG, "rot_x at ({}, {})", x, y);
            assert!(t.rot_y_deg.abs() <= MAX_TILT_DEG, "rot_y at ({}, {})", x, y);
        }
    }

    #[test]
    fn center_cursor_yields_lift_only() {
        let mut tilt = TiltEffect::new();
        let t = tilt.pointer_moved(KEY, 0.5, 0.5);
        assert_eq!(t.rot_x_deg, 0.0);
        assert_eq!(t.rot_y_deg, 0.0);
        assert_eq!(t.lift, -TILT_LIFT);
    }

    #[test]
    fn corners_tilt_toward_cursor() {
        let mut tilt = TiltEffect::new();
        // Cursor at the bottom-right corner tilts the card down-right.
        let t = tilt.pointer_moved(KEY, 1.0, 1.0);
        assert!(t.rot_x_deg < 0.0);
        assert!(t.rot_y_deg > 0.0);
    }

    #[test]
    fn out_of_bounds_cursor_is_clamped() {
        let mut tilt = TiltEffect::new();
        let t = tilt.pointer_moved(KEY, 2.0, -1.0);
        assert!(t.rot_x_deg.abs() <= MAX_TILT_DEG);
        assert!(t.rot_y_deg.abs() <= MAX_TILT_DEG);
    }

    #[test]
    fn leave_clears_transform_immediately() {
        let mut tilt = TiltEffect::new();
        tilt.pointer_moved(KEY, 0.9, 0.1);
        assert!(tilt.transform(KEY).is_some());
        tilt.pointer_left(KEY);
        assert_eq!(tilt.transform(KEY), None);
    }
}
