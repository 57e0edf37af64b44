//! Vertical page layout.
//!
//! Maps the page model onto pixel geometry: section ranges in page
//! coordinates, per-section visibility fractions for the observers, and
//! the rectangles every panel and text block is drawn into. Pure math so
//! the observers can be driven in tests without a window.

use crate::page::SectionId;

pub const NAV_HEIGHT: f32 = 64.0;
pub const CONTENT_MAX_WIDTH: f32 = 1100.0;
pub const CONTENT_SIDE_MARGIN: f32 = 24.0;

// Section heights as multiples of the viewport height.
const SECTION_HEIGHTS: [(SectionId, f32); 5] = [
    (SectionId::Hero, 1.0),
    (SectionId::About, 0.95),
    (SectionId::Timeline, 1.0),
    (SectionId::Features, 1.0),
    (SectionId::Demo, 1.15),
];

/// An axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPx {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RectPx {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }

    pub fn shifted(&self, dx: f32, dy: f32) -> RectPx {
        RectPx {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Cursor position within the rect, normalized to [0, 1]
    pub fn relative(&self, px: f32, py: f32) -> (f32, f32) {
        ((px - self.x) / self.w.max(1.0), (py - self.y) / self.h.max(1.0))
    }
}

pub struct LayoutManager {
    viewport_w: f32,
    viewport_h: f32,
}

impl LayoutManager {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport_w: width as f32,
            viewport_h: height as f32,
        }
    }

    /// Update the window dimensions
    pub fn update_dimensions(&mut self, width: u32, height: u32) {
        self.viewport_w = width as f32;
        self.viewport_h = height as f32;
    }

    pub fn viewport(&self) -> (f32, f32) {
        (self.viewport_w, self.viewport_h)
    }

    fn section_height(&self, id: SectionId) -> f32 {
        let factor = SECTION_HEIGHTS
            .iter()
            .find(|(s, _)| *s == id)
            .map(|(_, f)| *f)
            .unwrap_or(1.0);
        self.viewport_h * factor
    }

    /// Section top and bottom in page coordinates
    pub fn section_range(&self, id: SectionId) -> (f32, f32) {
        let mut top = 0.0;
        for (s, _) in SECTION_HEIGHTS {
            let h = self.section_height(s);
            if s == id {
                return (top, top + h);
            }
            top += h;
        }
        (top, top)
    }

    pub fn page_height(&self) -> f32 {
        SECTION_HEIGHTS
            .iter()
            .map(|(s, _)| self.section_height(*s))
            .sum()
    }

    pub fn max_scroll(&self) -> f32 {
        (self.page_height() - self.viewport_h).max(0.0)
    }

    /// Fraction of the section's own height inside the viewport
    pub fn visible_fraction(&self, id: SectionId, scroll: f32) -> f32 {
        self.visible_fraction_clipped(id, scroll, 0.0)
    }

    /// Visibility fraction with the viewport bottom edge pulled inward
    /// by `bottom_margin` pixels
    pub fn visible_fraction_clipped(&self, id: SectionId, scroll: f32, bottom_margin: f32) -> f32 {
        let (top, bottom) = self.section_range(id);
        let view_top = scroll;
        let view_bottom = scroll + self.viewport_h - bottom_margin;
        let overlap = (bottom.min(view_bottom) - top.max(view_top)).max(0.0);
        let height = (bottom - top).max(1.0);
        overlap / height
    }

    /// Whether the section's top has crossed the horizontal line at
    /// `viewport_frac` of the viewport height
    pub fn section_top_crossed(&self, id: SectionId, scroll: f32, viewport_frac: f32) -> bool {
        let (top, _) = self.section_range(id);
        top - scroll <= self.viewport_h * viewport_frac
    }

    /// Section top in screen coordinates at the given scroll
    pub fn section_screen_y(&self, id: SectionId, scroll: f32) -> f32 {
        self.section_range(id).0 - scroll
    }

    // ---- content geometry (page coordinates) ----

    pub fn content_width(&self) -> f32 {
        (self.viewport_w - 2.0 * CONTENT_SIDE_MARGIN).min(CONTENT_MAX_WIDTH)
    }

    pub fn content_x(&self) -> f32 {
        (self.viewport_w - self.content_width()) / 2.0
    }

    /// Title block of a section: heading plus subtitle
    pub fn section_title_rect(&self, id: SectionId) -> RectPx {
        let (top, _) = self.section_range(id);
        RectPx {
            x: self.content_x(),
            y: top + 72.0,
            w: self.content_width(),
            h: 72.0,
        }
    }

    /// Content area of a section below the title block
    pub fn section_content(&self, id: SectionId) -> RectPx {
        let (top, bottom) = self.section_range(id);
        RectPx {
            x: self.content_x(),
            y: top + 176.0,
            w: self.content_width(),
            h: (bottom - top - 216.0).max(0.0),
        }
    }

    /// Lay `count` cells out in a column grid within `area`
    pub fn grid(&self, area: RectPx, count: usize, cols: usize, cell_h: f32, gap: f32) -> Vec<RectPx> {
        let cols = cols.max(1);
        let cell_w = (area.w - gap * (cols as f32 - 1.0)) / cols as f32;
        (0..count)
            .map(|i| {
                let col = i % cols;
                let row = i / cols;
                RectPx {
                    x: area.x + col as f32 * (cell_w + gap),
                    y: area.y + row as f32 * (cell_h + gap),
                    w: cell_w,
                    h: cell_h,
                }
            })
            .collect()
    }

    // ---- fixed chrome (screen coordinates) ----

    pub fn nav_rect(&self) -> RectPx {
        RectPx {
            x: 0.0,
            y: 0.0,
            w: self.viewport_w,
            h: NAV_HEIGHT,
        }
    }

    /// Nav link hit boxes, right-aligned in the nav bar
    pub fn nav_link_rects(&self, count: usize) -> Vec<RectPx> {
        let link_w = 118.0;
        let link_h = 32.0;
        let right = self.viewport_w - CONTENT_SIDE_MARGIN;
        (0..count)
            .map(|i| RectPx {
                x: right - (count - i) as f32 * link_w,
                y: (NAV_HEIGHT - link_h) / 2.0,
                w: link_w,
                h: link_h,
            })
            .collect()
    }

    /// Scroll indicator near the bottom of the hero viewport
    pub fn scroll_indicator_rect(&self) -> RectPx {
        RectPx {
            x: self.viewport_w / 2.0 - 12.0,
            y: self.viewport_h - 56.0,
            w: 24.0,
            h: 38.0,
        }
    }

    // ---- demo stage geometry (page coordinates) ----

    pub fn demo_browser_rect(&self) -> RectPx {
        let content = self.section_content(SectionId::Demo);
        RectPx {
            x: content.x,
            y: content.y,
            w: content.w,
            h: (self.viewport_h * 0.62).min(content.h),
        }
    }

    /// Avatar pods in a row across the left two thirds of the stage
    pub fn avatar_pod_rects(&self, count: usize) -> Vec<RectPx> {
        let stage = self.demo_browser_rect();
        let area = RectPx {
            x: stage.x + 20.0,
            y: stage.y + 52.0,
            w: stage.w * 0.62 - 40.0,
            h: stage.h - 140.0,
        };
        self.grid(area, count, 2, (area.h - 16.0) / 2.0, 16.0)
    }

    /// Control bar buttons centered under the pods
    pub fn control_button_rects(&self, count: usize) -> Vec<RectPx> {
        let stage = self.demo_browser_rect();
        let size = 40.0;
        let gap = 14.0;
        let total = count as f32 * size + (count as f32 - 1.0) * gap;
        let start_x = stage.x + (stage.w * 0.62 - total) / 2.0;
        (0..count)
            .map(|i| RectPx {
                x: start_x + i as f32 * (size + gap),
                y: stage.y + stage.h - 62.0,
                w: size,
                h: size,
            })
            .collect()
    }

    /// Side panel holding the clock, chain log and emotion bars
    pub fn demo_side_panel_rect(&self) -> RectPx {
        let stage = self.demo_browser_rect();
        RectPx {
            x: stage.x + stage.w * 0.64,
            y: stage.y + 16.0,
            w: stage.w * 0.36 - 16.0,
            h: stage.h - 32.0,
        }
    }

    pub fn chain_log_rect(&self) -> RectPx {
        let panel = self.demo_side_panel_rect();
        RectPx {
            x: panel.x + 12.0,
            y: panel.y + 56.0,
            w: panel.w - 24.0,
            h: 6.0 * 26.0,
        }
    }

    pub fn chain_row_rect(&self, index: usize) -> RectPx {
        let log = self.chain_log_rect();
        RectPx {
            x: log.x,
            y: log.y + index as f32 * 26.0,
            w: log.w,
            h: 22.0,
        }
    }

    pub fn emotion_bar_rects(&self, count: usize) -> Vec<RectPx> {
        let panel = self.demo_side_panel_rect();
        let log = self.chain_log_rect();
        (0..count)
            .map(|i| RectPx {
                x: panel.x + 12.0,
                y: log.y + log.h + 28.0 + i as f32 * 34.0,
                w: panel.w - 24.0,
                h: 8.0,
            })
            .collect()
    }

    /// Tech pill row under the demo stage
    pub fn tech_pill_rects(&self, count: usize) -> Vec<RectPx> {
        let stage = self.demo_browser_rect();
        let pill_w = 118.0;
        let pill_h = 30.0;
        let gap = 12.0;
        let total = count as f32 * pill_w + (count as f32 - 1.0) * gap;
        let start_x = stage.x + (stage.w - total) / 2.0;
        (0..count)
            .map(|i| RectPx {
                x: start_x + i as f32 * (pill_w + gap),
                y: stage.y + stage.h + 28.0,
                w: pill_w,
                h: pill_h,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> LayoutManager {
        LayoutManager::new(1280, 800)
    }

    #[test]
    fn sections_tile_the_page() {
        let layout = layout();
        let mut expected_top = 0.0;
        for id in crate::page::SectionId::ALL {
            let (top, bottom) = layout.section_range(id);
            assert_eq!(top, expected_top, "{:?}", id);
            assert!(bottom > top);
            expected_top = bottom;
        }
        assert_eq!(expected_top, layout.page_height());
    }

    #[test]
    fn hero_fills_the_viewport_at_rest() {
        let layout = layout();
        assert_eq!(layout.visible_fraction(SectionId::Hero, 0.0), 1.0);
        assert_eq!(layout.visible_fraction(SectionId::Features, 0.0), 0.0);
    }

    #[test]
    fn visible_fraction_tracks_scroll() {
        let layout = layout();
        let (top, _) = layout.section_range(SectionId::About);
        // Scroll so half of About is inside the viewport.
        let about_h = layout.section_range(SectionId::About).1 - top;
        let scroll = top - 800.0 + about_h * 0.5;
        let fraction = layout.visible_fraction(SectionId::About, scroll);
        assert!((fraction - 0.5).abs() < 0.01, "fraction = {}", fraction);
    }

    #[test]
    fn bottom_margin_shrinks_the_fraction() {
        let layout = layout();
        let (top, _) = layout.section_range(SectionId::About);
        let scroll = top - 800.0 + 120.0;
        let plain = layout.visible_fraction(SectionId::About, scroll);
        let clipped = layout.visible_fraction_clipped(SectionId::About, scroll, 50.0);
        assert!(clipped < plain);
    }

    #[test]
    fn top_crossing_matches_scroll_position() {
        let layout = layout();
        let (top, _) = layout.section_range(SectionId::Features);
        let line = 800.0 * 0.8;
        assert!(!layout.section_top_crossed(SectionId::Features, top - line - 1.0, 0.8));
        assert!(layout.section_top_crossed(SectionId::Features, top - line, 0.8));
        assert!(layout.section_top_crossed(SectionId::Features, top, 0.8));
    }

    #[test]
    fn max_scroll_reaches_the_page_bottom() {
        let layout = layout();
        assert_eq!(layout.max_scroll(), layout.page_height() - 800.0);
    }

    #[test]
    fn grid_fills_rows_left_to_right() {
        let layout = layout();
        let area = RectPx {
            x: 100.0,
            y: 50.0,
            w: 900.0,
            h: 600.0,
        };
        let cells = layout.grid(area, 6, 3, 160.0, 20.0);
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0].y, cells[2].y);
        assert!(cells[3].y > cells[0].y);
        for cell in &cells {
            assert!(cell.x >= area.x);
            assert!(cell.x + cell.w <= area.x + area.w + 0.5);
        }
    }

    #[test]
    fn rect_relative_is_normalized() {
        let rect = RectPx {
            x: 10.0,
            y: 20.0,
            w: 100.0,
            h: 50.0,
        };
        assert_eq!(rect.relative(10.0, 20.0), (0.0, 0.0));
        assert_eq!(rect.relative(110.0, 70.0), (1.0, 1.0));
        assert!(rect.contains(60.0, 45.0));
        assert!(!rect.contains(0.0, 0.0));
    }
}
