use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::MoodConfig;
use crate::frame::PointerSample;

/// Discrete expressive state shared by both eyes. Governs lid angles,
/// pupil scale, tracking speed, and blink cadence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Neutral,
    Suspicious,
    Surprised,
    Tired,
    Dizzy,
    Angry,
    Cross,
}

/// Mood and sleep flag shared by both eyes. Written by [`MoodController`]
/// once per frame before either animator reads it.
///
/// Every mood write bumps a generation counter so deferred effects (the
/// surprise revert) can tell when a newer write has superseded them.
#[derive(Clone, Debug, Default)]
pub struct SharedMoodState {
    mood: Mood,
    sleeping: bool,
    generation: u64,
}

impl SharedMoodState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn set_mood(&mut self, mood: Mood) {
        if mood != self.mood {
            debug!("mood {:?} -> {:?}", self.mood, mood);
        }
        self.mood = mood;
        self.generation += 1;
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    pub fn set_sleeping(&mut self, sleeping: bool) {
        if sleeping != self.sleeping {
            debug!("sleeping -> {sleeping}");
        }
        self.sleeping = sleeping;
    }

    pub fn toggle_sleep(&mut self) {
        self.set_sleeping(!self.sleeping);
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A scheduled surprise-to-neutral revert. Applied only if the mood
/// generation is unchanged when it comes due, so it never stomps a mood
/// set after the surprise.
#[derive(Clone, Copy, Debug)]
struct PendingRevert {
    due_ms: f64,
    generation: u64,
}

/// Classifies pointer behavior into a mood and sleep flag.
///
/// Rules are applied every frame against the mood/sleep snapshot taken at
/// frame entry; a later rule writing over an earlier one in the same frame
/// is intentional (a flick into a corner lands on suspicious, not
/// surprised).
pub struct MoodController {
    cfg: MoodConfig,
    last_pointer: Option<PointerSample>,
    last_move_ms: f64,
    revert: Option<PendingRevert>,
}

impl MoodController {
    pub fn new(cfg: MoodConfig) -> Self {
        Self {
            cfg,
            last_pointer: None,
            last_move_ms: 0.0,
            revert: None,
        }
    }

    pub fn update(&mut self, shared: &mut SharedMoodState, pointer: PointerSample, now_ms: f64) {
        if self.last_pointer.is_none() {
            self.last_move_ms = now_ms;
        }
        let dist = self
            .last_pointer
            .map(|p| p.distance_to(pointer))
            .unwrap_or(0.0);
        self.last_pointer = Some(pointer);

        // Deferred surprise revert fires between frames, before the rules.
        if let Some(pending) = self.revert {
            if now_ms >= pending.due_ms {
                if shared.generation() == pending.generation {
                    shared.set_mood(Mood::Neutral);
                }
                self.revert = None;
            }
        }

        let mood = shared.mood();
        let sleeping = shared.is_sleeping();

        // Movement detection: wake up, shake off tiredness.
        if dist > self.cfg.move_epsilon {
            self.last_move_ms = now_ms;
            if sleeping {
                shared.set_sleeping(false);
            }
            if mood == Mood::Tired {
                shared.set_mood(Mood::Neutral);
            }
        }

        // A fast flick in a single frame startles.
        if dist > self.cfg.flick_distance && mood != Mood::Surprised {
            shared.set_mood(Mood::Surprised);
            self.revert = Some(PendingRevert {
                due_ms: now_ms + self.cfg.surprise_hold_ms,
                generation: shared.generation(),
            });
        }

        // Out-of-range samples are tolerated but never match a region.
        let in_range = pointer.x.abs() <= 1.0 && pointer.y.abs() <= 1.0;
        let corner = in_range
            && pointer.x.abs() > self.cfg.corner_threshold
            && pointer.y.abs() > self.cfg.corner_threshold;
        let center = in_range
            && pointer.x.abs() < self.cfg.center_threshold
            && pointer.y.abs() < self.cfg.center_threshold;

        if corner && mood != Mood::Suspicious && mood != Mood::Surprised && !sleeping {
            shared.set_mood(Mood::Suspicious);
        } else if center && mood != Mood::Cross && mood != Mood::Surprised && !sleeping {
            shared.set_mood(Mood::Cross);
        } else if !corner && !center && (mood == Mood::Suspicious || mood == Mood::Cross) {
            shared.set_mood(Mood::Neutral);
        }

        // Inactivity: tired first, then the sleep flag.
        let idle_ms = now_ms - self.last_move_ms;
        if idle_ms > self.cfg.tired_after_ms && !sleeping && mood != Mood::Tired {
            shared.set_mood(Mood::Tired);
        }
        if idle_ms > self.cfg.sleep_after_ms && !sleeping {
            shared.set_sleeping(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (MoodController, SharedMoodState) {
        (
            MoodController::new(MoodConfig::default()),
            SharedMoodState::new(),
        )
    }

    fn step(
        ctl: &mut MoodController,
        shared: &mut SharedMoodState,
        x: f32,
        y: f32,
        now_ms: f64,
    ) {
        ctl.update(shared, PointerSample::new(x, y), now_ms);
    }

    #[test]
    fn sub_epsilon_travel_is_not_movement() {
        let (mut ctl, mut shared) = setup();
        step(&mut ctl, &mut shared, 0.5, 0.5, 0.0);
        shared.set_mood(Mood::Tired);
        // 0.0005 of travel is below the movement epsilon, so the tired
        // reset must not fire.
        step(&mut ctl, &mut shared, 0.5005, 0.5, 16.0);
        assert_eq!(shared.mood(), Mood::Tired);
    }

    #[test]
    fn flick_startles_then_reverts() {
        let (mut ctl, mut shared) = setup();
        step(&mut ctl, &mut shared, 0.5, 0.5, 0.0);
        step(&mut ctl, &mut shared, 0.75, 0.5, 16.0);
        assert_eq!(shared.mood(), Mood::Surprised);
        // Still surprised just before the hold expires.
        step(&mut ctl, &mut shared, 0.75, 0.5, 900.0);
        assert_eq!(shared.mood(), Mood::Surprised);
        step(&mut ctl, &mut shared, 0.75, 0.5, 1100.0);
        assert_eq!(shared.mood(), Mood::Neutral);
    }

    #[test]
    fn stale_revert_does_not_stomp_newer_mood() {
        let (mut ctl, mut shared) = setup();
        step(&mut ctl, &mut shared, 0.5, 0.5, 0.0);
        step(&mut ctl, &mut shared, 0.75, 0.5, 16.0);
        assert_eq!(shared.mood(), Mood::Surprised);
        // A direct mood set supersedes the scheduled revert.
        shared.set_mood(Mood::Dizzy);
        step(&mut ctl, &mut shared, 0.75, 0.5, 1100.0);
        assert_eq!(shared.mood(), Mood::Dizzy);
    }

    #[test]
    fn second_flick_does_not_extend_the_hold() {
        let (mut ctl, mut shared) = setup();
        step(&mut ctl, &mut shared, 0.5, 0.5, 0.0);
        step(&mut ctl, &mut shared, 0.75, 0.5, 16.0);
        // Flicking again while surprised neither re-enters the mood nor
        // reschedules the revert.
        step(&mut ctl, &mut shared, 0.5, 0.5, 500.0);
        assert_eq!(shared.mood(), Mood::Surprised);
        step(&mut ctl, &mut shared, 0.5, 0.5, 1100.0);
        assert_eq!(shared.mood(), Mood::Neutral);
    }

    #[test]
    fn corner_dwell_turns_suspicious() {
        let (mut ctl, mut shared) = setup();
        step(&mut ctl, &mut shared, 0.9, 0.9, 0.0);
        step(&mut ctl, &mut shared, 0.9, 0.9, 16.0);
        assert_eq!(shared.mood(), Mood::Suspicious);
    }

    #[test]
    fn center_dwell_crosses_the_eyes() {
        let (mut ctl, mut shared) = setup();
        step(&mut ctl, &mut shared, 0.05, -0.05, 0.0);
        step(&mut ctl, &mut shared, 0.05, -0.05, 16.0);
        assert_eq!(shared.mood(), Mood::Cross);
    }

    #[test]
    fn leaving_a_region_reverts_to_neutral() {
        let (mut ctl, mut shared) = setup();
        step(&mut ctl, &mut shared, 0.9, 0.9, 0.0);
        assert_eq!(shared.mood(), Mood::Suspicious);
        step(&mut ctl, &mut shared, 0.5, 0.0, 16.0);
        assert_eq!(shared.mood(), Mood::Neutral);
    }

    #[test]
    fn flick_into_a_corner_lands_on_suspicious() {
        // The corner rule is checked against the frame-entry mood, so it
        // wins over the surprise set earlier in the same frame, and the
        // stale revert must not fire later.
        let (mut ctl, mut shared) = setup();
        step(&mut ctl, &mut shared, 0.5, 0.5, 0.0);
        step(&mut ctl, &mut shared, 0.95, 0.95, 16.0);
        assert_eq!(shared.mood(), Mood::Suspicious);
        step(&mut ctl, &mut shared, 0.95, 0.95, 1100.0);
        assert_eq!(shared.mood(), Mood::Suspicious);
    }

    #[test]
    fn inactivity_tires_then_sleeps() {
        let (mut ctl, mut shared) = setup();
        step(&mut ctl, &mut shared, 0.5, 0.5, 0.0);
        step(&mut ctl, &mut shared, 0.5, 0.5, 4100.0);
        assert_eq!(shared.mood(), Mood::Tired);
        assert!(!shared.is_sleeping());
        step(&mut ctl, &mut shared, 0.5, 0.5, 8100.0);
        assert!(shared.is_sleeping());
    }

    #[test]
    fn movement_wakes_within_one_frame() {
        let (mut ctl, mut shared) = setup();
        step(&mut ctl, &mut shared, 0.5, 0.5, 0.0);
        step(&mut ctl, &mut shared, 0.5, 0.5, 4100.0);
        step(&mut ctl, &mut shared, 0.5, 0.5, 8100.0);
        assert!(shared.is_sleeping());
        step(&mut ctl, &mut shared, 0.55, 0.5, 8116.0);
        assert!(!shared.is_sleeping());
        assert_eq!(shared.mood(), Mood::Neutral);
    }

    #[test]
    fn out_of_range_pointer_matches_no_region() {
        let (mut ctl, mut shared) = setup();
        step(&mut ctl, &mut shared, 1.5, 1.5, 0.0);
        step(&mut ctl, &mut shared, 1.5, 1.5, 16.0);
        assert_eq!(shared.mood(), Mood::Neutral);
    }

    #[test]
    fn corners_are_ignored_while_sleeping() {
        let (mut ctl, mut shared) = setup();
        step(&mut ctl, &mut shared, 0.9, 0.9, 0.0);
        shared.set_mood(Mood::Neutral);
        shared.set_sleeping(true);
        step(&mut ctl, &mut shared, 0.9, 0.9, 16.0);
        assert_eq!(shared.mood(), Mood::Neutral);
    }
}
