use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

// ============================================================
// Serializable animation config
// ============================================================

/// Every tunable of the animation core, with defaults matching the
/// reference constants. Sections fall back to their defaults when absent
/// from a loaded document, so partial configs stay valid.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnimConfig {
    pub version: u32,
    #[serde(default)]
    pub mood: MoodConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub blink: BlinkConfig,
    #[serde(default)]
    pub lids: LidConfig,
    #[serde(default)]
    pub pupil: PupilConfig,
}

/// Thresholds and timers for mood classification.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoodConfig {
    /// Minimum per-frame pointer travel that counts as movement.
    pub move_epsilon: f32,
    /// Per-frame pointer travel that reads as a flick and triggers surprise.
    pub flick_distance: f32,
    /// Both |x| and |y| must exceed this to be in a corner.
    pub corner_threshold: f32,
    /// Both |x| and |y| must stay under this to be centered.
    pub center_threshold: f32,
    /// How long surprise holds before reverting to neutral.
    pub surprise_hold_ms: f64,
    /// Inactivity before the mood drops to tired.
    pub tired_after_ms: f64,
    /// Inactivity before the sleep flag is set.
    pub sleep_after_ms: f64,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            move_epsilon: 0.001,
            flick_distance: 0.1,
            corner_threshold: 0.8,
            center_threshold: 0.15,
            surprise_hold_ms: 1000.0,
            tired_after_ms: 4000.0,
            sleep_after_ms: 8000.0,
        }
    }
}

/// Eyeball rotation behavior.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Pointer-to-rotation gain. Higher values follow the cursor to the
    /// viewport edges.
    pub sensitivity: f32,
    /// Microsaccade jitter amplitude, radians.
    pub jitter_amplitude: f32,
    /// Dizzy swirl amplitude, radians.
    pub swirl_amplitude: f32,
    /// Dizzy swirl frequency, rad/s.
    pub swirl_frequency: f32,
    /// Continuous iris rotation rate while dizzy, rad/s.
    pub iris_spin_rate: f32,
    /// Per-frame relax factor pulling the iris spin back to zero.
    pub iris_spin_relax: f32,
    /// Fixed inward yaw magnitude for the cross-eyed override.
    pub cross_eye_yaw: f32,
    /// Per-frame rotation lerp factor in the normal case.
    pub snappy_factor: f32,
    /// Per-frame rotation lerp factor while tired or sleeping.
    pub sluggish_factor: f32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            sensitivity: 1.2,
            jitter_amplitude: 0.005,
            swirl_amplitude: 0.1,
            swirl_frequency: 10.0,
            iris_spin_rate: 5.0,
            iris_spin_relax: 0.1,
            cross_eye_yaw: 0.35,
            snappy_factor: 0.2,
            sluggish_factor: 0.03,
        }
    }
}

/// Blink cadence and durations. The actual delay to the next blink is
/// `rand[0, interval) + lead_ms`, with the interval picked by mood.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlinkConfig {
    pub first_blink_min_ms: f64,
    pub first_blink_max_ms: f64,
    pub lead_ms: f64,
    pub neutral_interval_ms: f64,
    pub suspicious_interval_ms: f64,
    pub surprised_interval_ms: f64,
    pub tired_interval_ms: f64,
    pub min_duration_s: f32,
    pub max_duration_s: f32,
    /// Tired blinks are long and fixed rather than randomized.
    pub tired_duration_s: f32,
    /// Duration of an externally forced blink.
    pub forced_duration_s: f32,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            first_blink_min_ms: 2000.0,
            first_blink_max_ms: 5000.0,
            lead_ms: 1000.0,
            neutral_interval_ms: 3000.0,
            suspicious_interval_ms: 4000.0,
            surprised_interval_ms: 5000.0,
            tired_interval_ms: 1000.0,
            min_duration_s: 0.10,
            max_duration_s: 0.15,
            tired_duration_s: 0.4,
            forced_duration_s: 0.15,
        }
    }
}

/// Lid open-angle targets per mood as `[upper, lower]` radians. Upper lids
/// open upward (negative), lower lids downward (positive). Sleep is not a
/// row here: it forces both angles to zero regardless of mood.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LidConfig {
    pub neutral: [f32; 2],
    pub suspicious: [f32; 2],
    pub surprised: [f32; 2],
    pub tired: [f32; 2],
    /// Per-frame lerp factor toward the open target when not blinking.
    pub smoothing: f32,
}

impl Default for LidConfig {
    fn default() -> Self {
        Self {
            neutral: [-PI / 2.6, PI / 2.6],
            suspicious: [-PI / 3.5, PI / 3.5],
            surprised: [-PI / 2.1, PI / 2.1],
            // Upper lid droops more than the lower one.
            tired: [-PI / 4.0, PI / 2.5],
            smoothing: 0.15,
        }
    }
}

/// Pupil dilation targets per mood; unlisted moods stay at 1.0.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PupilConfig {
    pub surprised_scale: f32,
    pub suspicious_scale: f32,
    pub tired_scale: f32,
    /// Per-frame lerp factor toward the target scale.
    pub smoothing: f32,
}

impl Default for PupilConfig {
    fn default() -> Self {
        Self {
            surprised_scale: 0.5,
            suspicious_scale: 0.8,
            tired_scale: 0.9,
            smoothing: 0.1,
        }
    }
}

// ============================================================
// AnimConfig: top-level config
// ============================================================

impl AnimConfig {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for AnimConfig {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            mood: MoodConfig::default(),
            tracking: TrackingConfig::default(),
            blink: BlinkConfig::default(),
            lids: LidConfig::default(),
            pupil: PupilConfig::default(),
        }
    }
}
