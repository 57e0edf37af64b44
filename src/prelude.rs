// Re-export common types and functions for easier imports
pub use crate::avatar::{Mouth, PodState, SpeakerRotation};
pub use crate::chain_log::{ChainEntry, ChainLog, EntryStatus};
pub use crate::config::{AppConfig, HeroConfig, SimulatorConfig};
pub use crate::page::{PageModel, SectionId};
pub use crate::simulation::ActivitySimulator;
pub use crate::ui::common::PageActivity;

// Re-export common external dependencies
pub use anyhow::{anyhow, Context, Result};
pub use serde::{Deserialize, Serialize};
pub use std::collections::VecDeque;
pub use std::sync::Arc;
pub use std::time::Duration;
