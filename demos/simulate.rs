use std::f32::consts::TAU;

use ogle::{AnimConfig, EyeRig, EyeSide, FrameInput, PointerSample};

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Scripted pointer session: a slow sweep, a flick, a corner dwell, a
/// center dwell, then stillness until the rig falls asleep.
fn pointer_at(t: f32) -> PointerSample {
    match t {
        t if t < 3.0 => {
            let a = t / 3.0 * TAU;
            PointerSample::new(a.cos() * 0.5, a.sin() * 0.5)
        }
        t if t < 6.0 => PointerSample::new(-0.9, 0.4),
        t if t < 9.0 => PointerSample::new(0.95, 0.95),
        t if t < 12.0 => PointerSample::new(0.0, 0.0),
        _ => PointerSample::new(0.5, 0.0),
    }
}

fn main() {
    env_logger::init();

    let mut rig = EyeRig::new(AnimConfig::default(), 0.0);

    for n in 0u64..(22.0 * 1000.0 / FRAME_MS) as u64 {
        let now_ms = n as f64 * FRAME_MS;
        let t = (now_ms / 1000.0) as f32;

        // Poke the left eye once, mid-session.
        if n == 400 {
            rig.force_blink(EyeSide::Left);
        }

        let input = FrameInput::new(pointer_at(t), t, now_ms);
        if let Some(pose) = rig.update(Some(input)) {
            if n % 30 == 0 {
                println!(
                    "t={t:5.2}s mood={:<10?} sleeping={:<5} \
                     left(pitch={:+.3} yaw={:+.3} upper={:+.3} pupil={:.2}) \
                     right(yaw={:+.3})",
                    pose.mood,
                    pose.sleeping,
                    pose.left.pitch,
                    pose.left.yaw,
                    pose.left.upper_lid,
                    pose.left.pupil_scale,
                    pose.right.yaw,
                );
            }
        }
    }
}
