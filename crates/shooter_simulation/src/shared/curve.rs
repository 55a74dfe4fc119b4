//! Float curve — замена curve-ассетов движка
//!
//! Кусочно-линейная кривая по ключам `(time, value)`.
//! Используется для z-curve (подъём предмета к камере) и scale-curve.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FloatCurve {
    /// Ключи, отсортированные по времени
    pub keys: Vec<(f32, f32)>,
}

impl FloatCurve {
    pub fn new(keys: Vec<(f32, f32)>) -> Self {
        Self { keys }
    }

    /// Значение в момент `time`
    ///
    /// До первого ключа → значение первого ключа, после последнего → последнего.
    /// Пустая кривая → 0.
    pub fn sample(&self, time: f32) -> f32 {
        let Some(&(first_time, first_value)) = self.keys.first() else {
            return 0.0;
        };
        if time <= first_time {
            return first_value;
        }

        for window in self.keys.windows(2) {
            let (t0, v0) = window[0];
            let (t1, v1) = window[1];
            if time <= t1 {
                let span = t1 - t0;
                if span <= f32::EPSILON {
                    return v1;
                }
                let alpha = (time - t0) / span;
                return v0 + (v1 - v0) * alpha;
            }
        }

        self.keys.last().map(|&(_, value)| value).unwrap_or(0.0)
    }

    pub fn is_sorted(&self) -> bool {
        self.keys.windows(2).all(|pair| pair[0].0 <= pair[1].0)
    }

    /// Z-curve по умолчанию: подъём с небольшим overshoot и выход на 1.0
    pub fn default_item_z() -> Self {
        Self::new(vec![(0.0, 0.0), (0.45, 1.15), (0.7, 1.0)])
    }

    /// Scale-curve по умолчанию: предмет "вспухает" и возвращается к 1.0
    pub fn default_item_scale() -> Self {
        Self::new(vec![(0.0, 1.0), (0.35, 1.3), (0.7, 1.0)])
    }
}
