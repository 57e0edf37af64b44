pub mod avatar;
pub mod chain_log;
pub mod choreography;
pub mod config;
pub mod hud_clock;
pub mod nav;
pub mod page;
pub mod prelude;
pub mod reveal;
pub mod simulation;
pub mod tilt;
pub mod ui;

// Re-export key components for easier access
pub use avatar::SpeakerRotation;
pub use chain_log::ChainLog;
pub use choreography::Choreography;
pub use config::read_app_config;
pub use hud_clock::HudClock;
pub use nav::NavObserver;
pub use page::PageModel;
pub use reveal::RevealController;
pub use simulation::ActivitySimulator;
pub use tilt::TiltEffect;
