//! Nav bar scroll state and active-link tracking.

use crate::page::SectionId;

/// Scroll offset in pixels past which the nav bar switches to its
/// condensed "scrolled" style
pub const NAV_SCROLL_THRESHOLD: f32 = 40.0;

/// Fraction of a section's own height that must be visible for its nav
/// link to become active
pub const ACTIVE_SECTION_FRACTION: f32 = 0.4;

/// Tracks the nav bar visual state.
///
/// `scrolled` is a pure function of the scroll offset and is re-evaluated
/// on every scroll change. The active link follows whichever linked
/// section last reported a visible fraction at or above the threshold;
/// a qualifying section without a nav link clears the active link.
pub struct NavObserver {
    linked: Vec<SectionId>,
    scrolled: bool,
    active: Option<SectionId>,
}

impl NavObserver {
    /// `linked` lists the sections that carry a nav link, in page order
    pub fn new(linked: Vec<SectionId>) -> Self {
        Self {
            linked,
            scrolled: false,
            active: None,
        }
    }

    pub fn on_scroll(&mut self, scroll_y: f32) {
        self.scrolled = scroll_y > NAV_SCROLL_THRESHOLD;
    }

    pub fn scrolled(&self) -> bool {
        self.scrolled
    }

    /// Feed the current visibility fraction of every section, in page
    /// order. The last section at or above the threshold wins; which one
    /// wins under simultaneous qualification is implementation-defined,
    /// but at most one link is ever active.
    pub fn observe<I>(&mut self, visibility: I)
    where
        I: IntoIterator<Item = (SectionId, f32)>,
    {
        for (id, fraction) in visibility {
            if fraction >= ACTIVE_SECTION_FRACTION {
                self.active = if self.linked.contains(&id) {
                    Some(id)
                } else {
                    None
                };
            }
        }
    }

    pub fn active_link(&self) -> Option<SectionId> {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observer() -> NavObserver {
        NavObserver::new(vec![
            SectionId::About,
            SectionId::Timeline,
            SectionId::Features,
            SectionId::Demo,
        ])
    }

    #[test]
    fn scrolled_state_matches_threshold() {
        let mut nav = observer();
        for (y, expected) in [
            (0.0, false),
            (39.0, false),
            (40.0, false),
            (41.0, true),
            (1000.0, true),
        ] {
            nav.on_scroll(y);
            assert_eq!(nav.scrolled(), expected, "scroll_y = {}", y);
        }
    }

    #[test]
    fn at_most_one_active_link() {
        let mut nav = observer();
        nav.observe([
            (SectionId::About, 0.9),
            (SectionId::Timeline, 0.5),
            (SectionId::Features, 0.1),
        ]);
        // Two sections qualified; exactly one link is active.
        assert!(nav.active_link().is_some());

        nav.observe([(SectionId::Features, 0.8)]);
        assert_eq!(nav.active_link(), Some(SectionId::Features));
    }

    #[test]
    fn active_link_persists_when_nothing_qualifies() {
        let mut nav = observer();
        nav.observe([(SectionId::About, 0.7)]);
        assert_eq!(nav.active_link(), Some(SectionId::About));

        nav.observe([(SectionId::About, 0.2), (SectionId::Timeline, 0.1)]);
        assert_eq!(nav.active_link(), Some(SectionId::About));
    }

    #[test]
    fn unlinked_section_clears_active_link() {
        let mut nav = observer();
        nav.observe([(SectionId::About, 0.7)]);
        assert_eq!(nav.active_link(), Some(SectionId::About));

        nav.observe([(SectionId::Hero, 0.9)]);
        assert_eq!(nav.active_link(), None);
    }

    #[test]
    fn below_threshold_never_activates() {
        let mut nav = observer();
        nav.observe([(SectionId::Demo, 0.39)]);
        assert_eq!(nav.active_link(), None);
    }
}
