use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

/// Hero scene configuration parameters
///
/// Controls the density of the particle field and the strength of the
/// cursor parallax. The seed makes the generated layout reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroConfig {
    /// Number of particles in the hero point cloud
    pub particle_count: usize,
    /// Number of random connecting line segments
    pub line_count: usize,
    /// Multiplier applied to the cursor parallax offsets
    pub parallax_strength: f32,
    /// Seed for the generated particle/line layout
    pub seed: u64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            particle_count: 2400,
            line_count: 60,
            parallax_strength: 1.0,
            seed: 7,
        }
    }
}

/// Timing configuration for the simulated activity feeds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Seconds between chain log appends
    pub chain_interval_secs: f32,
    /// Seconds before a chain entry flips from live to verified
    pub verify_delay_secs: f32,
    /// Seconds between avatar speaker rotations
    pub speaker_interval_secs: f32,
    /// Milliseconds between snapshot refreshes published to the UI
    pub refresh_interval_ms: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            chain_interval_secs: 2.5,
            verify_delay_secs: 1.2,
            speaker_interval_secs: 4.0,
            refresh_interval_ms: 100,
        }
    }
}

/// Configuration for keyboard shortcuts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardShortcuts {
    /// Key to toggle the microphone control
    pub toggle_mic: String,
    /// Key to toggle the camera control
    pub toggle_cam: String,
    /// Key to toggle the screen-share control
    pub toggle_screen: String,
    /// Key to toggle the VR control
    pub toggle_vr: String,
    /// Key to exit the application
    pub exit_application: String,
}

impl Default for KeyboardShortcuts {
    fn default() -> Self {
        Self {
            toggle_mic: "KeyM".to_string(),
            toggle_cam: "KeyC".to_string(),
            toggle_screen: "KeyS".to_string(),
            toggle_vr: "KeyV".to_string(),
            exit_application: "Escape".to_string(),
        }
    }
}

impl KeyboardShortcuts {
    /// Convert a key string to a KeyCode
    pub fn to_key_code(&self, key_str: &str) -> Option<KeyCode> {
        match key_str {
            "KeyA" => Some(KeyCode::KeyA),
            "KeyB" => Some(KeyCode::KeyB),
            "KeyC" => Some(KeyCode::KeyC),
            "KeyD" => Some(KeyCode::KeyD),
            "KeyE" => Some(KeyCode::KeyE),
            "KeyF" => Some(KeyCode::KeyF),
            "KeyG" => Some(KeyCode::KeyG),
            "KeyH" => Some(KeyCode::KeyH),
            "KeyI" => Some(KeyCode::KeyI),
            "KeyJ" => Some(KeyCode::KeyJ),
            "KeyK" => Some(KeyCode::KeyK),
            "KeyL" => Some(KeyCode::KeyL),
            "KeyM" => Some(KeyCode::KeyM),
            "KeyN" => Some(KeyCode::KeyN),
            "KeyO" => Some(KeyCode::KeyO),
            "KeyP" => Some(KeyCode::KeyP),
            "KeyQ" => Some(KeyCode::KeyQ),
            "KeyR" => Some(KeyCode::KeyR),
            "KeyS" => Some(KeyCode::KeyS),
            "KeyT" => Some(KeyCode::KeyT),
            "KeyU" => Some(KeyCode::KeyU),
            "KeyV" => Some(KeyCode::KeyV),
            "KeyW" => Some(KeyCode::KeyW),
            "KeyX" => Some(KeyCode::KeyX),
            "KeyY" => Some(KeyCode::KeyY),
            "KeyZ" => Some(KeyCode::KeyZ),
            "Space" => Some(KeyCode::Space),
            "Escape" => Some(KeyCode::Escape),
            "Enter" => Some(KeyCode::Enter),
            "Tab" => Some(KeyCode::Tab),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Initial window width in pixels
    pub window_width: u32,
    /// Initial window height in pixels
    pub window_height: u32,
    /// Hero scene configuration
    pub hero: HeroConfig,
    /// Activity simulator timing configuration
    pub simulator: SimulatorConfig,
    /// Keyboard shortcuts configuration
    pub keyboard_shortcuts: KeyboardShortcuts,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 800,
            hero: HeroConfig::default(),
            simulator: SimulatorConfig::default(),
            keyboard_shortcuts: KeyboardShortcuts::default(),
        }
    }
}

/// Helper function to read the application configuration
pub fn read_app_config() -> AppConfig {
    match std::fs::read_to_string("config.json") {
        Ok(config_str) => match serde_json::from_str(&config_str) {
            Ok(config) => config,
            Err(e) => {
                println!(
                    "Failed to parse config.json: {}. Using default configuration.",
                    e
                );
                AppConfig::default()
            }
        },
        Err(e) => {
            println!(
                "Failed to read config.json: {}. Using default configuration.",
                e
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_timings() {
        let config = AppConfig::default();
        assert_eq!(config.hero.particle_count, 2400);
        assert_eq!(config.hero.line_count, 60);
        assert!((config.simulator.chain_interval_secs - 2.5).abs() < f32::EPSILON);
        assert!((config.simulator.verify_delay_secs - 1.2).abs() < f32::EPSILON);
        assert!((config.simulator.speaker_interval_secs - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn shortcut_keys_resolve() {
        let shortcuts = KeyboardShortcuts::default();
        assert_eq!(
            shortcuts.to_key_code(&shortcuts.toggle_mic),
            Some(KeyCode::KeyM)
        );
        assert_eq!(
            shortcuts.to_key_code(&shortcuts.exit_application),
            Some(KeyCode::Escape)
        );
        assert_eq!(shortcuts.to_key_code("NoSuchKey"), None);
    }
}
