//! Synthetic chain activity log.
//!
//! A timer appends fake events with hash-like labels; each entry starts
//! live and flips to verified a fixed delay after its own append time.
//! The visible window is capped by evicting the oldest entry.

use std::collections::VecDeque;
use std::time::Duration;

use rand::Rng;

/// Interval between append ticks
pub const APPEND_INTERVAL: Duration = Duration::from_millis(2500);

/// Delay after which an entry flips from live to verified
pub const VERIFY_DELAY: Duration = Duration::from_millis(1200);

/// The log never holds more than this many entries
pub const VISIBLE_CAP: usize = 6;

// Eviction happens before append, once the count exceeds this.
const EVICT_ABOVE: usize = 5;

pub const HASHES: [&str; 8] = [
    "0x1a3f", "0x9c2d", "0xb4e1", "0x5f8a", "0x2c7b", "0xd3e9", "0x4f1c", "0x8a5d",
];

pub const LABELS: [&str; 8] = [
    "Msg Encrypted",
    "Block Confirmed",
    "ZK Proof OK",
    "Sig Verified",
    "Handshake",
    "Data Chunk",
    "Auth Token",
    "State Update",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Live,
    Verified,
}

#[derive(Debug, Clone)]
pub struct ChainEntry {
    pub hash: &'static str,
    pub label: &'static str,
    pub appended_at: Duration,
    pub status: EntryStatus,
}

pub struct ChainLog {
    entries: VecDeque<ChainEntry>,
    verify_delay: Duration,
}

impl ChainLog {
    pub fn new() -> Self {
        Self::with_verify_delay(VERIFY_DELAY)
    }

    pub fn with_verify_delay(verify_delay: Duration) -> Self {
        Self {
            entries: VecDeque::new(),
            verify_delay,
        }
    }

    /// One append tick: evict the oldest entry if the window is full,
    /// then append a fresh live entry with random hash and label.
    pub fn tick<R: Rng>(&mut self, now: Duration, rng: &mut R) {
        if self.entries.len() > EVICT_ABOVE {
            self.entries.pop_front();
        }
        let hash = HASHES[rng.random_range(0..HASHES.len())];
        let label = LABELS[rng.random_range(0..LABELS.len())];
        self.entries.push_back(ChainEntry {
            hash,
            label,
            appended_at: now,
            status: EntryStatus::Live,
        });
    }

    /// Apply per-entry verify transitions that have come due
    pub fn refresh(&mut self, now: Duration) {
        for entry in &mut self.entries {
            if entry.status == EntryStatus::Live && now >= entry.appended_at + self.verify_delay {
                entry.status = EntryStatus::Verified;
            }
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &ChainEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ChainLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn never_exceeds_visible_cap() {
        let mut log = ChainLog::new();
        let mut rng = SmallRng::seed_from_u64(42);
        for k in 0..40 {
            log.tick(secs(k as f64 * 2.5), &mut rng);
            assert!(log.len() <= VISIBLE_CAP, "after tick {}", k);
        }
        assert_eq!(log.len(), VISIBLE_CAP);
    }

    #[test]
    fn entries_come_from_fixed_sets() {
        let mut log = ChainLog::new();
        let mut rng = SmallRng::seed_from_u64(1);
        for k in 0..12 {
            log.tick(secs(k as f64 * 2.5), &mut rng);
        }
        for entry in log.entries() {
            assert!(HASHES.contains(&entry.hash));
            assert!(LABELS.contains(&entry.label));
        }
    }

    #[test]
    fn new_entry_is_live_then_verified_once() {
        let mut log = ChainLog::new();
        let mut rng = SmallRng::seed_from_u64(7);
        log.tick(secs(0.0), &mut rng);
        assert_eq!(log.entries().next().unwrap().status, EntryStatus::Live);

        log.refresh(secs(1.19));
        assert_eq!(log.entries().next().unwrap().status, EntryStatus::Live);

        log.refresh(secs(1.2));
        assert_eq!(log.entries().next().unwrap().status, EntryStatus::Verified);

        // Verified never reverts.
        log.refresh(secs(100.0));
        assert_eq!(log.entries().next().unwrap().status, EntryStatus::Verified);
    }

    #[test]
    fn verify_transitions_are_per_entry() {
        // Three append ticks at 2.5s cadence; each entry flips exactly
        // 1.2s after its own append: t = 1.2, 3.7 and 6.2.
        let mut log = ChainLog::new();
        let mut rng = SmallRng::seed_from_u64(9);
        log.tick(secs(0.0), &mut rng);
        log.tick(secs(2.5), &mut rng);
        log.tick(secs(5.0), &mut rng);
        assert_eq!(log.len(), 3);

        let statuses = |log: &ChainLog| -> Vec<EntryStatus> {
            log.entries().map(|e| e.status).collect()
        };

        log.refresh(secs(1.2));
        assert_eq!(
            statuses(&log),
            vec![EntryStatus::Verified, EntryStatus::Live, EntryStatus::Live]
        );

        log.refresh(secs(3.7));
        assert_eq!(
            statuses(&log),
            vec![
                EntryStatus::Verified,
                EntryStatus::Verified,
                EntryStatus::Live
            ]
        );

        log.refresh(secs(6.2));
        assert!(statuses(&log)
            .iter()
            .all(|&s| s == EntryStatus::Verified));
    }

    #[test]
    fn no_eviction_before_window_fills() {
        let mut log = ChainLog::new();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut first_hash_label = None;
        for k in 0..VISIBLE_CAP {
            log.tick(secs(k as f64 * 2.5), &mut rng);
            if k == 0 {
                let first = log.entries().next().unwrap();
                first_hash_label = Some((first.hash, first.label));
            }
        }
        // Six appends, still no eviction: the first entry survives.
        assert_eq!(log.len(), VISIBLE_CAP);
        let first = log.entries().next().unwrap();
        assert_eq!(first_hash_label, Some((first.hash, first.label)));
        assert_eq!(first.appended_at, secs(0.0));

        // The seventh tick evicts the oldest.
        log.tick(secs(6.0 * 2.5), &mut rng);
        assert_eq!(log.len(), VISIBLE_CAP);
        assert_eq!(log.entries().next().unwrap().appended_at, secs(2.5));
    }
}
