use crate::blink::Blinker;
use crate::config::AnimConfig;
use crate::frame::FrameInput;
use crate::mood::{Mood, SharedMoodState};

/// Which side of the face an eye sits on. Left is the eye at the negative
/// lateral offset; the cross-eyed yaw override flips sign with the side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EyeSide {
    Left,
    Right,
}

/// Instantaneous pose for one eye. Angles in radians, pupil scale unitless.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EyePose {
    pub pitch: f32,
    pub yaw: f32,
    pub upper_lid: f32,
    pub lower_lid: f32,
    pub pupil_scale: f32,
    pub iris_spin: f32,
}

/// Microsaccade jitter frequencies, rad/s. Two incommensurate terms per
/// axis keep the offset from reading as periodic.
const JITTER_FREQ_PITCH: (f32, f32) = (20.0, 45.0);
const JITTER_FREQ_YAW: (f32, f32) = (15.0, 35.0);

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Per-eye kinematics: pointer tracking, blinking, lids, pupil, iris.
///
/// Holds only this eye's state; mood and sleep are read from the shared
/// state each frame after the controller has settled them.
pub struct EyeAnimator {
    side: EyeSide,
    cfg: AnimConfig,
    blinker: Blinker,
    pitch: f32,
    yaw: f32,
    upper_lid: f32,
    lower_lid: f32,
    pupil_scale: f32,
    iris_spin: f32,
}

impl EyeAnimator {
    pub fn new(side: EyeSide, cfg: &AnimConfig, now_ms: f64) -> Self {
        let blinker = Blinker::new(cfg.blink.clone(), now_ms);
        Self::with_blinker(side, cfg.clone(), blinker)
    }

    /// Deterministic construction for replay and tests.
    pub fn from_seed(side: EyeSide, cfg: &AnimConfig, now_ms: f64, seed: u64) -> Self {
        let blinker = Blinker::from_seed(cfg.blink.clone(), now_ms, seed);
        Self::with_blinker(side, cfg.clone(), blinker)
    }

    fn with_blinker(side: EyeSide, cfg: AnimConfig, blinker: Blinker) -> Self {
        let [upper_lid, lower_lid] = cfg.lids.neutral;
        Self {
            side,
            cfg,
            blinker,
            pitch: 0.0,
            yaw: 0.0,
            upper_lid,
            lower_lid,
            pupil_scale: 1.0,
            iris_spin: 0.0,
        }
    }

    pub fn side(&self) -> EyeSide {
        self.side
    }

    pub fn is_blinking(&self) -> bool {
        self.blinker.is_blinking()
    }

    /// Force a blink outside the regular schedule; applied at the next
    /// frame update.
    pub fn force_blink(&mut self) {
        self.blinker.force();
    }

    /// Advance one frame and return this eye's pose.
    pub fn update(&mut self, shared: &SharedMoodState, input: &FrameInput) -> EyePose {
        let mood = shared.mood();
        let sleeping = shared.is_sleeping();
        let t = input.elapsed;
        let tr = &self.cfg.tracking;

        // Pointer tracking plus deterministic microsaccade jitter.
        let mut target_pitch = -input.pointer.y * tr.sensitivity
            + (t * JITTER_FREQ_PITCH.0).sin() * tr.jitter_amplitude
            + (t * JITTER_FREQ_PITCH.1).cos() * tr.jitter_amplitude;
        let mut target_yaw = input.pointer.x * tr.sensitivity
            + (t * JITTER_FREQ_YAW.0).cos() * tr.jitter_amplitude
            + (t * JITTER_FREQ_YAW.1).sin() * tr.jitter_amplitude;

        if mood == Mood::Dizzy {
            target_pitch += (t * tr.swirl_frequency).sin() * tr.swirl_amplitude;
            target_yaw += (t * tr.swirl_frequency).cos() * tr.swirl_amplitude;
            self.iris_spin = -t * tr.iris_spin_rate;
        } else {
            self.iris_spin = lerp(self.iris_spin, 0.0, tr.iris_spin_relax);
        }

        // Cross-eyed override ignores the pointer entirely; each side aims
        // inward at a fixed angle.
        if mood == Mood::Cross {
            target_pitch = 0.0;
            target_yaw = match self.side {
                EyeSide::Left => tr.cross_eye_yaw,
                EyeSide::Right => -tr.cross_eye_yaw,
            };
        }

        // Fixed per-frame lerp factor: response speed varies with display
        // refresh rate. Kept that way on purpose, see DESIGN.md.
        let speed = if mood == Mood::Tired || sleeping {
            tr.sluggish_factor
        } else {
            tr.snappy_factor
        };
        self.pitch = lerp(self.pitch, target_pitch, speed);
        self.yaw = lerp(self.yaw, target_yaw, speed);

        let [open_upper, open_lower] = self.open_angles(mood, sleeping);
        match self.blinker.update(mood, input.now_ms) {
            // The envelope drives the lids directly while a blink runs.
            Some(closure) => {
                self.upper_lid = lerp(open_upper, 0.0, closure);
                self.lower_lid = lerp(open_lower, 0.0, closure);
            }
            None => {
                let k = self.cfg.lids.smoothing;
                self.upper_lid = lerp(self.upper_lid, open_upper, k);
                self.lower_lid = lerp(self.lower_lid, open_lower, k);
            }
        }

        let pupil_target = match mood {
            Mood::Surprised => self.cfg.pupil.surprised_scale,
            Mood::Suspicious => self.cfg.pupil.suspicious_scale,
            Mood::Tired => self.cfg.pupil.tired_scale,
            _ => 1.0,
        };
        self.pupil_scale = lerp(self.pupil_scale, pupil_target, self.cfg.pupil.smoothing);

        EyePose {
            pitch: self.pitch,
            yaw: self.yaw,
            upper_lid: self.upper_lid,
            lower_lid: self.lower_lid,
            pupil_scale: self.pupil_scale,
            iris_spin: self.iris_spin,
        }
    }

    /// Lid open-angle targets for a mood. Sleep overrides everything with
    /// fully closed lids; moods without a dedicated row use the neutral
    /// angles.
    fn open_angles(&self, mood: Mood, sleeping: bool) -> [f32; 2] {
        if sleeping {
            return [0.0, 0.0];
        }
        let lids = &self.cfg.lids;
        match mood {
            Mood::Suspicious => lids.suspicious,
            Mood::Surprised => lids.surprised,
            Mood::Tired => lids.tired,
            _ => lids.neutral,
        }
    }
}
