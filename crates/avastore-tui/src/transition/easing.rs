//! Easing curves for slide transitions

pub use avastore_core::EasingType;

pub trait EasingTypeExt {
    /// Map progress `t` in [0, 1] to eased progress in [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        // NaN means the clock went backwards or the duration is zero: finish
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            EasingType::None => t.floor(),
            EasingType::Linear => t,
            EasingType::EaseOut => ease_out_pow(t, 2),
            EasingType::Cubic => ease_out_pow(t, 3),
        }
    }
}

/// f(t) = 1 - (1-t)^n
#[inline]
fn ease_out_pow(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [EasingType; 3] = [EasingType::Linear, EasingType::Cubic, EasingType::EaseOut];

    #[test]
    fn test_curves_start_at_zero_and_end_at_one() {
        for easing in CURVES {
            assert!(easing.apply(0.0).abs() < 1e-9, "{:?}", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{:?}", easing);
        }
    }

    #[test]
    fn test_none_jumps_at_the_end() {
        assert_eq!(EasingType::None.apply(0.99), 0.0);
        assert_eq!(EasingType::None.apply(1.0), 1.0);
        assert_eq!(EasingType::None.apply(f64::NAN), 1.0);
    }

    #[test]
    fn test_curves_never_go_backwards() {
        for easing in CURVES {
            let samples: Vec<f64> = (0..=20).map(|i| easing.apply(i as f64 / 20.0)).collect();
            assert!(samples.windows(2).all(|w| w[1] >= w[0]), "{:?}", easing);
        }
    }

    #[test]
    fn test_ease_out_front_loads_motion() {
        assert_eq!(EasingType::EaseOut.apply(0.5), 0.75);
        assert!(EasingType::Cubic.apply(0.5) > EasingType::EaseOut.apply(0.5));
        assert_eq!(EasingType::Linear.apply(2.0), 1.0);
    }
}
