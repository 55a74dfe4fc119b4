//! Named animation curve samples
//!
//! Host animation system пишет значения кривых текущего проигрываемого
//! клипа по имени каждый кадр. Нет клипа / нет кривой → 0.

use bevy::prelude::*;
use std::collections::HashMap;

/// Кривая turn-in-place клипа: > 0 пока играет поворот
pub const TURNING_CURVE: &str = "Turning";
/// Накопленный поворот root bone в turn-клипе (град)
pub const ROTATION_CURVE: &str = "Rotation";

#[derive(Component, Debug, Clone, Default)]
pub struct AnimationCurves {
    samples: HashMap<String, f32>,
}

impl AnimationCurves {
    pub fn value(&self, name: &str) -> f32 {
        self.samples.get(name).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, name: impl Into<String>, value: f32) {
        self.samples.insert(name.into(), value);
    }

    /// Клип закончился — все кривые снова читаются как 0
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_curve_reads_zero() {
        let mut curves = AnimationCurves::default();
        assert_eq!(curves.value(TURNING_CURVE), 0.0);

        curves.set(TURNING_CURVE, 1.0);
        assert_eq!(curves.value(TURNING_CURVE), 1.0);

        curves.clear();
        assert_eq!(curves.value(TURNING_CURVE), 0.0);
    }
}
