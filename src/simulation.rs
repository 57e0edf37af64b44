//! Activity simulator: the timer-driven side of the page.
//!
//! Owns the chain log, the avatar speaker rotation and the HUD clock,
//! runs them on independent interval tasks, and publishes a snapshot the
//! UI reads once per frame. The tasks never touch the renderer; the UI
//! never touches the state machines directly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::avatar::SpeakerRotation;
use crate::chain_log::ChainLog;
use crate::config::AppConfig;
use crate::hud_clock::HudClock;
use crate::ui::common::{ChainEntryView, PageActivity};

/// Coordinates the simulated activity feeds behind the demo stage
pub struct ActivitySimulator {
    chain_log: Arc<Mutex<ChainLog>>,
    speakers: Arc<Mutex<SpeakerRotation>>,
    clock: Arc<Mutex<HudClock>>,
    activity: Arc<RwLock<PageActivity>>,
    running: Arc<AtomicBool>,
    started_at: Instant,
    chain_interval: Duration,
    speaker_interval: Duration,
    refresh_interval: Duration,
}

impl ActivitySimulator {
    pub fn new(pod_count: usize, app_config: &AppConfig) -> Self {
        let sim = &app_config.simulator;
        Self {
            chain_log: Arc::new(Mutex::new(ChainLog::with_verify_delay(
                Duration::from_secs_f32(sim.verify_delay_secs),
            ))),
            speakers: Arc::new(Mutex::new(SpeakerRotation::new(pod_count))),
            clock: Arc::new(Mutex::new(HudClock::new())),
            activity: Arc::new(RwLock::new(PageActivity::empty(pod_count))),
            running: Arc::new(AtomicBool::new(false)),
            started_at: Instant::now(),
            chain_interval: Duration::from_secs_f32(sim.chain_interval_secs),
            speaker_interval: Duration::from_secs_f32(sim.speaker_interval_secs),
            refresh_interval: Duration::from_millis(sim.refresh_interval_ms.max(1)),
        }
    }

    /// Spawn the interval tasks. Idempotent start is not supported; call
    /// once after construction.
    pub fn start(&self) {
        self.running.store(true, Ordering::Relaxed);

        // Chain log append tick
        {
            let chain_log = self.chain_log.clone();
            let running = self.running.clone();
            let started_at = self.started_at;
            let period = self.chain_interval;
            tokio::spawn(async move {
                let mut rng = SmallRng::from_os_rng();
                let mut interval = tokio::time::interval(period);
                interval.tick().await;
                while running.load(Ordering::Relaxed) {
                    interval.tick().await;
                    chain_log.lock().tick(started_at.elapsed(), &mut rng);
                }
            });
        }

        // Avatar speaker rotation
        {
            let speakers = self.speakers.clone();
            let running = self.running.clone();
            let period = self.speaker_interval;
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(period);
                interval.tick().await;
                while running.load(Ordering::Relaxed) {
                    interval.tick().await;
                    speakers.lock().tick();
                }
            });
        }

        // HUD clock
        {
            let clock = self.clock.clone();
            let running = self.running.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(Duration::from_secs(1));
                while running.load(Ordering::Relaxed) {
                    interval.tick().await;
                    clock.lock().tick();
                }
            });
        }

        // Snapshot refresh: applies due verify transitions and publishes
        // the view the UI reads each frame
        {
            let chain_log = self.chain_log.clone();
            let speakers = self.speakers.clone();
            let clock = self.clock.clone();
            let activity = self.activity.clone();
            let running = self.running.clone();
            let started_at = self.started_at;
            let period = self.refresh_interval;
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(period);
                while running.load(Ordering::Relaxed) {
                    interval.tick().await;

                    let chain_entries = {
                        let mut log = chain_log.lock();
                        log.refresh(started_at.elapsed());
                        log.entries()
                            .map(|e| ChainEntryView {
                                hash: e.hash,
                                label: e.label,
                                status: e.status,
                            })
                            .collect()
                    };
                    let (pods, speaker) = {
                        let rotation = speakers.lock();
                        (rotation.pods().to_vec(), rotation.current())
                    };
                    let clock_text = clock.lock().text().to_string();

                    let mut snapshot = activity.write();
                    snapshot.chain_entries = chain_entries;
                    snapshot.pods = pods;
                    snapshot.speaker = speaker;
                    snapshot.clock_text = clock_text;
                }
                println!("Activity simulator stopped");
            });
        }
    }

    /// Signal every task to wind down at its next tick
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// Get the activity snapshot reference
    pub fn get_activity(&self) -> Arc<RwLock<PageActivity>> {
        self.activity.clone()
    }

    /// Get the running state reference
    pub fn get_running(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }
}

impl Drop for ActivitySimulator {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}
