//! HUD clock shown in the demo stage header.

use chrono::{DateTime, Local, Timelike};

/// Format a timestamp the way the HUD shows it: 24-hour `HH:MM:SS`
pub fn format_time<Tz: chrono::TimeZone>(time: &DateTime<Tz>) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

pub struct HudClock {
    text: String,
}

impl HudClock {
    pub fn new() -> Self {
        let mut clock = Self {
            text: String::new(),
        };
        clock.tick();
        clock
    }

    /// Refresh the displayed time from the local wall clock
    pub fn tick(&mut self) {
        self.text = format_time(&Local::now());
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for HudClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_24_hour_with_zero_padding() {
        let t = chrono::Utc.with_ymd_and_hms(2026, 3, 1, 9, 5, 7).unwrap();
        assert_eq!(format_time(&t), "09:05:07");

        let evening = chrono::Utc
            .with_ymd_and_hms(2026, 3, 1, 23, 59, 0)
            .unwrap();
        assert_eq!(format_time(&evening), "23:59:00");
    }

    #[test]
    fn clock_text_is_populated_on_creation() {
        let clock = HudClock::new();
        assert_eq!(clock.text().len(), 8);
        assert_eq!(clock.text().matches(':').count(), 2);
    }
}
