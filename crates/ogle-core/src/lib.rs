pub mod animator;
pub mod blink;
pub mod config;
pub mod frame;
pub mod mood;
pub mod rig;

pub use animator::{EyeAnimator, EyePose, EyeSide};
pub use blink::{BlinkState, Blinker};
pub use config::AnimConfig;
pub use frame::{FrameInput, PointerSample};
pub use mood::{Mood, MoodController, SharedMoodState};
pub use rig::{EyeRig, RigPose};
