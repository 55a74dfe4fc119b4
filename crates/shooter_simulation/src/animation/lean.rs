//! Lean — сглаженная скорость поворота актора (для strafe lean)

use bevy::prelude::*;

use crate::shared::{interp_to, normalized_delta};

#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct Lean {
    /// Сглаженный yaw rate (град/сек), clamp [-limit, limit]
    pub yaw_delta: f32,
    previous_yaw: Option<f32>,
}

impl Lean {
    /// Первый sample только запоминает yaw. `delta_time <= 0` → тик пропускается.
    pub fn update(&mut self, actor_yaw: f32, delta_time: f32, interp_speed: f32, limit: f32) {
        if delta_time <= 0.0 {
            return;
        }

        let Some(previous_yaw) = self.previous_yaw.replace(actor_yaw) else {
            return;
        };

        let target = normalized_delta(actor_yaw, previous_yaw) / delta_time;
        let smoothed = interp_to(self.yaw_delta, target, delta_time, interp_speed);

        self.yaw_delta = smoothed.clamp(-limit, limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_constant_yaw_converges_to_zero() {
        let mut lean = Lean::default();
        lean.update(10.0, DT, 6.0, 90.0);
        lean.update(12.0, DT, 6.0, 90.0);
        assert!(lean.yaw_delta > 0.0);

        for _ in 0..600 {
            lean.update(12.0, DT, 6.0, 90.0);
        }
        assert!(lean.yaw_delta.abs() < 1.0e-3, "yaw_delta = {}", lean.yaw_delta);
    }

    #[test]
    fn test_spike_is_clamped() {
        let mut lean = Lean::default();
        lean.update(0.0, DT, 6.0, 90.0);
        // 90° за один кадр = 5400 град/сек
        lean.update(90.0, DT, 6.0, 90.0);
        assert!(lean.yaw_delta <= 90.0);
        assert!(lean.yaw_delta > 0.0);
    }

    #[test]
    fn test_zero_delta_time_skips_update() {
        let mut lean = Lean::default();
        lean.update(0.0, DT, 6.0, 90.0);
        lean.update(30.0, 0.0, 6.0, 90.0);
        assert_eq!(lean.yaw_delta, 0.0);

        // История не сдвинулась: следующий delta считается от 0°
        lean.update(1.0, DT, 6.0, 90.0);
        assert!(lean.yaw_delta > 0.0);
    }

    #[test]
    fn test_wraparound_turn_is_short_path() {
        let mut lean = Lean::default();
        lean.update(179.0, DT, 6.0, 90.0);
        lean.update(-179.0, DT, 6.0, 90.0);
        // +2° а не -358°
        assert!(lean.yaw_delta > 0.0);
    }
}
