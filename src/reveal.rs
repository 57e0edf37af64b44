//! Reveal-on-scroll controller.
//!
//! Containers become visible once their viewport intersection fraction
//! reaches the threshold; visibility is one-way and never revoked.
//! Children of a freshly revealed container are scheduled to appear with
//! a linearly increasing stagger delay.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::page::SectionId;

/// Intersection fraction at which a container is revealed
pub const REVEAL_FRACTION: f32 = 0.1;

/// Pixels the viewport bottom edge is pulled inward when computing
/// intersection, so reveals fire slightly before the element fully enters
pub const REVEAL_BOTTOM_MARGIN: f32 = 50.0;

/// Delay between consecutive child reveals within a container
pub const CHILD_STAGGER: Duration = Duration::from_millis(120);

/// Key identifying a revealable container (one per content section)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealKey(pub SectionId);

pub struct RevealController {
    child_counts: HashMap<RevealKey, usize>,
    visible: HashSet<RevealKey>,
    visible_children: HashSet<(RevealKey, usize)>,
    pending: Vec<(RevealKey, usize, Duration)>,
}

impl RevealController {
    pub fn new<I>(containers: I) -> Self
    where
        I: IntoIterator<Item = (RevealKey, usize)>,
    {
        Self {
            child_counts: containers.into_iter().collect(),
            visible: HashSet::new(),
            visible_children: HashSet::new(),
            pending: Vec::new(),
        }
    }

    /// Report a container's current (margin-adjusted) intersection
    /// fraction. Crossing the threshold reveals the container and
    /// schedules its children; reporting a lower fraction later has no
    /// effect.
    pub fn observe(&mut self, key: RevealKey, fraction: f32, now: Duration) {
        if fraction < REVEAL_FRACTION || self.visible.contains(&key) {
            return;
        }
        let Some(&count) = self.child_counts.get(&key) else {
            return;
        };
        self.visible.insert(key);
        for index in 0..count {
            self.pending.push((key, index, now + CHILD_STAGGER * index as u32));
        }
    }

    /// Promote children whose stagger delay has elapsed
    pub fn tick(&mut self, now: Duration) {
        let visible_children = &mut self.visible_children;
        self.pending.retain(|&(key, index, due)| {
            if now >= due {
                visible_children.insert((key, index));
                false
            } else {
                true
            }
        });
    }

    pub fn is_visible(&self, key: RevealKey) -> bool {
        self.visible.contains(&key)
    }

    pub fn child_visible(&self, key: RevealKey, index: usize) -> bool {
        self.visible_children.contains(&(key, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: RevealKey = RevealKey(SectionId::About);

    fn controller() -> RevealController {
        RevealController::new([(KEY, 3)])
    }

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn reveal_is_one_way() {
        let mut reveal = controller();
        reveal.observe(KEY, 0.5, secs(1.0));
        assert!(reveal.is_visible(KEY));

        // Scrolling away never revokes visibility.
        reveal.observe(KEY, 0.0, secs(2.0));
        assert!(reveal.is_visible(KEY));
    }

    #[test]
    fn below_threshold_does_not_reveal() {
        let mut reveal = controller();
        reveal.observe(KEY, 0.09, secs(1.0));
        assert!(!reveal.is_visible(KEY));
    }

    #[test]
    fn children_stagger_at_120ms_steps() {
        let mut reveal = controller();
        reveal.observe(KEY, 0.2, secs(1.0));

        reveal.tick(secs(1.0));
        assert!(reveal.child_visible(KEY, 0));
        assert!(!reveal.child_visible(KEY, 1));

        reveal.tick(secs(1.119));
        assert!(!reveal.child_visible(KEY, 1));

        reveal.tick(secs(1.12));
        assert!(reveal.child_visible(KEY, 1));
        assert!(!reveal.child_visible(KEY, 2));

        reveal.tick(secs(1.24));
        assert!(reveal.child_visible(KEY, 2));
    }

    #[test]
    fn re_observing_does_not_restart_stagger() {
        let mut reveal = controller();
        reveal.observe(KEY, 0.2, secs(1.0));
        reveal.tick(secs(1.3));
        assert!(reveal.child_visible(KEY, 2));

        // A later observation schedules nothing new.
        reveal.observe(KEY, 0.9, secs(5.0));
        reveal.tick(secs(5.0));
        assert!(reveal.child_visible(KEY, 0));
        assert!(reveal.child_visible(KEY, 1));
        assert!(reveal.child_visible(KEY, 2));
    }

    #[test]
    fn unknown_container_is_ignored() {
        let mut reveal = controller();
        let other = RevealKey(SectionId::Demo);
        reveal.observe(other, 1.0, secs(0.0));
        assert!(!reveal.is_visible(other));
    }
}
