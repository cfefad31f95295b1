use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Tunables for the clock. Every field can be omitted when deserializing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Meters per second at 1x speed
    pub base_speed_mps: f64,
    /// Used for the first tick after starting, when there's no previous frame to measure from
    pub default_frame_ms: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub initial_speed: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            base_speed_mps: 50.0,
            default_frame_ms: 16.0,
            min_speed: 0.1,
            max_speed: 5.0,
            initial_speed: 1.0,
        }
    }
}

impl AnimationConfig {
    /// Unlike f64::clamp, doesn't panic if the bounds are backwards.
    pub fn clamp_speed(&self, speed: f64) -> f64 {
        speed.max(self.min_speed).min(self.max_speed)
    }

    /// Rejects settings that would let the marker stall, run backwards, or escape the speed range.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("base_speed_mps", self.base_speed_mps),
            ("default_frame_ms", self.default_frame_ms),
            ("min_speed", self.min_speed),
            ("max_speed", self.max_speed),
            ("initial_speed", self.initial_speed),
        ] {
            if !value.is_finite() {
                bail!("{name} must be a finite number, not {value}");
            }
        }
        if self.base_speed_mps <= 0.0 {
            bail!("base_speed_mps must be positive, not {}", self.base_speed_mps);
        }
        if self.default_frame_ms < 0.0 {
            bail!("default_frame_ms can't be negative, not {}", self.default_frame_ms);
        }
        if self.min_speed <= 0.0 {
            bail!("min_speed must be positive, not {}", self.min_speed);
        }
        if self.min_speed > self.max_speed {
            bail!(
                "min_speed {} is bigger than max_speed {}",
                self.min_speed,
                self.max_speed
            );
        }
        Ok(())
    }
}
