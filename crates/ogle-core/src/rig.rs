use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::animator::{EyeAnimator, EyePose, EyeSide};
use crate::config::AnimConfig;
use crate::frame::FrameInput;
use crate::mood::{Mood, MoodController, SharedMoodState};

/// Poses for both eyes plus the shared state they were computed against.
#[derive(Clone, Copy, Debug)]
pub struct RigPose {
    pub left: EyePose,
    pub right: EyePose,
    pub mood: Mood,
    pub sleeping: bool,
}

/// A pair of eyes with a shared mood, advanced once per rendered frame.
///
/// The mood controller always runs before either eye, so both eyes observe
/// one consistent mood/sleep value per frame.
pub struct EyeRig {
    shared: SharedMoodState,
    controller: MoodController,
    left: EyeAnimator,
    right: EyeAnimator,
}

impl EyeRig {
    pub fn new(cfg: AnimConfig, now_ms: f64) -> Self {
        Self::with_seed(cfg, now_ms, rand::random())
    }

    /// Deterministic construction for replay and tests. The seed fans out
    /// to the two independent blink schedulers.
    pub fn with_seed(cfg: AnimConfig, now_ms: f64, seed: u64) -> Self {
        let mut seeds = SmallRng::seed_from_u64(seed);
        let left = EyeAnimator::from_seed(EyeSide::Left, &cfg, now_ms, seeds.gen());
        let right = EyeAnimator::from_seed(EyeSide::Right, &cfg, now_ms, seeds.gen());
        Self {
            shared: SharedMoodState::new(),
            controller: MoodController::new(cfg.mood),
            left,
            right,
        }
    }

    pub fn mood(&self) -> Mood {
        self.shared.mood()
    }

    pub fn set_mood(&mut self, mood: Mood) {
        self.shared.set_mood(mood);
    }

    pub fn is_sleeping(&self) -> bool {
        self.shared.is_sleeping()
    }

    pub fn toggle_sleep(&mut self) {
        self.shared.toggle_sleep();
    }

    pub fn shared(&self) -> &SharedMoodState {
        &self.shared
    }

    /// Force a blink on one eye, e.g. from a direct interaction on its
    /// visual surface. Takes effect at the next frame update.
    pub fn force_blink(&mut self, side: EyeSide) {
        match side {
            EyeSide::Left => self.left.force_blink(),
            EyeSide::Right => self.right.force_blink(),
        }
    }

    /// Advance one frame. A missing or non-finite input skips the frame
    /// entirely, leaving all state as it was.
    pub fn update(&mut self, input: Option<FrameInput>) -> Option<RigPose> {
        let input = input.filter(FrameInput::is_finite)?;
        self.controller
            .update(&mut self.shared, input.pointer, input.now_ms);
        let left = self.left.update(&self.shared, &input);
        let right = self.right.update(&self.shared, &input);
        Some(RigPose {
            left,
            right,
            mood: self.shared.mood(),
            sleeping: self.shared.is_sleeping(),
        })
    }
}
