use log::trace;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::BlinkConfig;
use crate::mood::Mood;

/// Ease-out quadratic, applied to the triangular blink ramp.
fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// An in-progress blink.
#[derive(Clone, Copy, Debug)]
pub struct BlinkState {
    pub start_ms: f64,
    /// Total blink duration, seconds.
    pub duration: f32,
}

/// Per-eye blink scheduler and envelope.
///
/// Each eye owns its own `Blinker`, so the two eyes blink independently
/// even though they read the same mood.
pub struct Blinker {
    cfg: BlinkConfig,
    active: Option<BlinkState>,
    next_blink_ms: f64,
    force_requested: bool,
    rng: SmallRng,
}

impl Blinker {
    pub fn new(cfg: BlinkConfig, now_ms: f64) -> Self {
        Self::with_rng(cfg, now_ms, SmallRng::from_entropy())
    }

    /// Deterministic construction for replay and tests.
    pub fn from_seed(cfg: BlinkConfig, now_ms: f64, seed: u64) -> Self {
        Self::with_rng(cfg, now_ms, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(cfg: BlinkConfig, now_ms: f64, mut rng: SmallRng) -> Self {
        let next_blink_ms =
            now_ms + rng.gen_range(cfg.first_blink_min_ms..cfg.first_blink_max_ms);
        Self {
            cfg,
            active: None,
            next_blink_ms,
            force_requested: false,
            rng,
        }
    }

    pub fn is_blinking(&self) -> bool {
        self.active.is_some()
    }

    /// Request a blink outside the regular schedule, e.g. from a direct
    /// interaction on the eye. Applied on the next update; restarts the
    /// blink if one is already running, and leaves the scheduled next-blink
    /// time untouched.
    pub fn force(&mut self) {
        self.force_requested = true;
    }

    /// Scheduled inter-blink interval for a mood, milliseconds. Moods
    /// without a dedicated cadence blink at the neutral rate.
    fn interval_ms(&self, mood: Mood) -> f64 {
        match mood {
            Mood::Suspicious => self.cfg.suspicious_interval_ms,
            Mood::Surprised => self.cfg.surprised_interval_ms,
            Mood::Tired => self.cfg.tired_interval_ms,
            _ => self.cfg.neutral_interval_ms,
        }
    }

    /// Advance the blink machine. Returns the eased lid closure in [0, 1]
    /// while a blink runs (including the frame it completes, which yields
    /// 0.0), or `None` when the lids are free to track their mood target.
    pub fn update(&mut self, mood: Mood, now_ms: f64) -> Option<f32> {
        if self.force_requested {
            self.force_requested = false;
            self.active = Some(BlinkState {
                start_ms: now_ms,
                duration: self.cfg.forced_duration_s,
            });
            trace!("forced blink at {now_ms}ms");
        } else if self.active.is_none() && now_ms > self.next_blink_ms {
            let duration = if mood == Mood::Tired {
                self.cfg.tired_duration_s
            } else {
                self.rng
                    .gen_range(self.cfg.min_duration_s..self.cfg.max_duration_s)
            };
            self.active = Some(BlinkState {
                start_ms: now_ms,
                duration,
            });
            let interval = self.interval_ms(mood);
            self.next_blink_ms = now_ms + self.rng.gen_range(0.0..interval) + self.cfg.lead_ms;
            trace!(
                "blink at {now_ms}ms ({duration}s), next at {}ms",
                self.next_blink_ms
            );
        }

        let blink = self.active?;
        let elapsed = ((now_ms - blink.start_ms) / 1000.0) as f32;
        let half = blink.duration / 2.0;
        let progress = if elapsed < half {
            elapsed / half
        } else if elapsed < blink.duration {
            1.0 - (elapsed - half) / half
        } else {
            // Auto-clear; the lids snap back to the open target this frame.
            self.active = None;
            0.0
        };
        Some(ease_out_quad(progress))
    }
}
