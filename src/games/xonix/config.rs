use std::time::Duration;

#[derive(Debug, Clone)]
pub struct XonixConfig {
    /// Field width in cells
    pub field_width: u32,
    /// Field height in cells
    pub field_height: u32,
    /// Border margin of permanent land, in cells
    pub border_margin: u32,
    /// Lives at game start
    pub starting_lives: u32,
    /// Capture percentage that completes a level
    pub capture_threshold_percent: u32,
    /// Round timer in seconds; expiry spawns a bounded enemy
    pub round_seconds: f32,
    /// Pause after a life loss before play resumes
    pub respawn_delay_seconds: f32,
    /// Pause after a level-up before play resumes
    pub levelup_delay_seconds: f32,
    /// Simulation tick rate in Hz
    pub tick_rate_hz: u32,
    /// RNG seed for reproducible runs; `None` seeds from entropy
    pub rng_seed: Option<u64>,
}

impl XonixConfig {
    pub fn with_field_size(width: u32, height: u32) -> Self {
        Self {
            field_width: width,
            field_height: height,
            ..Default::default()
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng_seed: Some(seed),
            ..Default::default()
        }
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(1000 / self.tick_rate_hz as u64)
    }
}

impl Default for XonixConfig {
    fn default() -> Self {
        Self {
            field_width: 64,
            field_height: 43,
            border_margin: 2,
            starting_lives: 3,
            capture_threshold_percent: 75,
            round_seconds: 60.0,
            respawn_delay_seconds: 2.0,
            levelup_delay_seconds: 1.0,
            tick_rate_hz: 60,
            rng_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = XonixConfig::default();
        assert_eq!(config.field_width, 64);
        assert_eq!(config.field_height, 43);
        assert_eq!(config.border_margin, 2);
        assert_eq!(config.starting_lives, 3);
        assert_eq!(config.capture_threshold_percent, 75);
        assert_eq!(config.round_seconds, 60.0);
        assert_eq!(config.tick_duration(), Duration::from_millis(16));
    }

    #[test]
    fn test_with_field_size() {
        let config = XonixConfig::with_field_size(10, 7);
        assert_eq!(config.field_width, 10);
        assert_eq!(config.field_height, 7);
        assert_eq!(config.border_margin, 2);
    }

    #[test]
    fn test_with_seed() {
        let config = XonixConfig::with_seed(99);
        assert_eq!(config.rng_seed, Some(99));
    }
}
