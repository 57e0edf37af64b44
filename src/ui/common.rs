use crate::avatar::PodState;
use crate::chain_log::EntryStatus;

/// One chain log row as shown in the demo stage
#[derive(Debug, Clone)]
pub struct ChainEntryView {
    pub hash: &'static str,
    pub label: &'static str,
    pub status: EntryStatus,
}

/// Snapshot of the simulated page activity
/// Published by the activity simulator and read by the UI each frame
#[derive(Debug, Clone)]
pub struct PageActivity {
    /// Chain log rows, oldest first
    pub chain_entries: Vec<ChainEntryView>,
    /// Per-pod avatar decoration state
    pub pods: Vec<PodState>,
    /// Index of the current speaker
    pub speaker: usize,
    /// HUD clock text
    pub clock_text: String,
}

impl PageActivity {
    pub fn empty(pod_count: usize) -> Self {
        Self {
            chain_entries: Vec::new(),
            pods: vec![
                PodState {
                    speaking: false,
                    ring: false,
                    mouth: crate::avatar::Mouth::Neutral,
                };
                pod_count
            ],
            speaker: crate::avatar::INITIAL_SPEAKER,
            clock_text: String::new(),
        }
    }
}
