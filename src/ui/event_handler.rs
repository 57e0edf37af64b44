use winit::{
    dpi::PhysicalPosition,
    event::MouseScrollDelta,
};

use crate::tilt::{CardKey, TiltEffect};

use super::layout_manager::RectPx;

const LINE_SCROLL_SPEED: f32 = 48.0;
const PIXEL_SCROLL_MULTIPLIER: f32 = 0.75;

/// Pill hover transitions produced by a cursor move
#[derive(Debug, Default, Clone, Copy)]
pub struct HoverChanges {
    pub pill_entered: Option<usize>,
    pub pill_left: Option<usize>,
}

// Event handling methods that will be used by WindowState
pub struct EventHandler {
    pub cursor_position: Option<PhysicalPosition<f64>>,
    /// Cursor normalized to [-1, 1] over the viewport, for the parallax
    pub pointer_norm: (f32, f32),
    pub hovered_card: Option<CardKey>,
    pub hovered_pill: Option<usize>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            cursor_position: None,
            pointer_norm: (0.0, 0.0),
            hovered_card: None,
            hovered_pill: None,
        }
    }

    pub fn handle_scroll(
        &mut self,
        scroll_offset: &mut f32,
        max_scroll_offset: f32,
        delta: MouseScrollDelta,
    ) {
        match delta {
            MouseScrollDelta::LineDelta(_, y) => {
                *scroll_offset = (*scroll_offset - y * LINE_SCROLL_SPEED)
                    .max(0.0)
                    .min(max_scroll_offset);
            }
            MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => {
                *scroll_offset = (*scroll_offset - y as f32 * PIXEL_SCROLL_MULTIPLIER)
                    .max(0.0)
                    .min(max_scroll_offset);
            }
        }
    }

    /// Track the cursor: update the parallax offset, drive the card tilt
    /// against the given screen-space card rects, and report tech pill
    /// hover transitions. Rect lists are rebuilt by the caller each call
    /// since the page scrolls under the cursor.
    pub fn handle_cursor_moved(
        &mut self,
        position: PhysicalPosition<f64>,
        viewport: (f32, f32),
        cards: &[(CardKey, RectPx)],
        pills: &[RectPx],
        tilt: &mut TiltEffect,
    ) -> HoverChanges {
        self.cursor_position = Some(position);
        let x = position.x as f32;
        let y = position.y as f32;
        self.pointer_norm = (
            (x / viewport.0.max(1.0) - 0.5) * 2.0,
            (y / viewport.1.max(1.0) - 0.5) * 2.0,
        );

        let over = cards
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(key, rect)| (*key, *rect));

        if let Some(previous) = self.hovered_card {
            if over.map(|(key, _)| key) != Some(previous) {
                tilt.pointer_left(previous);
            }
        }
        if let Some((key, rect)) = over {
            let (rel_x, rel_y) = rect.relative(x, y);
            tilt.pointer_moved(key, rel_x, rel_y);
        }
        self.hovered_card = over.map(|(key, _)| key);

        let pill = pills.iter().position(|rect| rect.contains(x, y));
        let mut changes = HoverChanges::default();
        if pill != self.hovered_pill {
            changes.pill_left = self.hovered_pill;
            changes.pill_entered = pill;
            self.hovered_pill = pill;
        }
        changes
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::SectionId;

    fn pos(x: f64, y: f64) -> PhysicalPosition<f64> {
        PhysicalPosition { x, y }
    }

    #[test]
    fn scroll_is_clamped_to_the_page() {
        let mut handler = EventHandler::new();
        let mut offset = 0.0;

        handler.handle_scroll(&mut offset, 500.0, MouseScrollDelta::LineDelta(0.0, 2.0));
        assert_eq!(offset, 0.0);

        handler.handle_scroll(&mut offset, 500.0, MouseScrollDelta::LineDelta(0.0, -20.0));
        assert_eq!(offset, 500.0);
    }

    #[test]
    fn pointer_norm_spans_minus_one_to_one() {
        let mut handler = EventHandler::new();
        let mut tilt = TiltEffect::new();
        handler.handle_cursor_moved(pos(0.0, 0.0), (1280.0, 800.0), &[], &[], &mut tilt);
        assert_eq!(handler.pointer_norm, (-1.0, -1.0));
        handler.handle_cursor_moved(pos(1280.0, 800.0), (1280.0, 800.0), &[], &[], &mut tilt);
        assert_eq!(handler.pointer_norm, (1.0, 1.0));
        handler.handle_cursor_moved(pos(640.0, 400.0), (1280.0, 800.0), &[], &[], &mut tilt);
        assert_eq!(handler.pointer_norm, (0.0, 0.0));
    }

    #[test]
    fn leaving_a_card_clears_its_tilt() {
        let mut handler = EventHandler::new();
        let mut tilt = TiltEffect::new();
        let key = CardKey {
            section: SectionId::About,
            index: 0,
        };
        let cards = [(
            key,
            RectPx {
                x: 100.0,
                y: 100.0,
                w: 200.0,
                h: 150.0,
            },
        )];

        handler.handle_cursor_moved(pos(150.0, 120.0), (1280.0, 800.0), &cards, &[], &mut tilt);
        assert!(tilt.transform(key).is_some());

        handler.handle_cursor_moved(pos(700.0, 700.0), (1280.0, 800.0), &cards, &[], &mut tilt);
        assert_eq!(tilt.transform(key), None);
        assert_eq!(handler.hovered_card, None);
    }

    #[test]
    fn pill_hover_reports_transitions_once() {
        let mut handler = EventHandler::new();
        let mut tilt = TiltEffect::new();
        let pills = [RectPx {
            x: 10.0,
            y: 10.0,
            w: 100.0,
            h: 30.0,
        }];

        let entered =
            handler.handle_cursor_moved(pos(20.0, 20.0), (1280.0, 800.0), &[], &pills, &mut tilt);
        assert_eq!(entered.pill_entered, Some(0));

        // Still inside: no transition.
        let steady =
            handler.handle_cursor_moved(pos(30.0, 20.0), (1280.0, 800.0), &[], &pills, &mut tilt);
        assert_eq!(steady.pill_entered, None);
        assert_eq!(steady.pill_left, None);

        let left =
            handler.handle_cursor_moved(pos(500.0, 500.0), (1280.0, 800.0), &[], &pills, &mut tilt);
        assert_eq!(left.pill_left, Some(0));
    }
}
