//! Timed interpolation between two values

use crate::easing::Easing;

/// A fixed-duration interpolation from one value to another
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    /// Duration in seconds
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing: Easing::default(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Progress through the tween (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let eased = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_reaches_target() {
        let mut tween = Tween::new(0.0, 100.0, 0.1).with_easing(Easing::Linear);
        assert_eq!(tween.value(), 0.0);

        tween.step(0.05);
        assert!((tween.value() - 50.0).abs() < 0.01);
        assert!(!tween.is_finished());

        tween.step(1.0);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 100.0);
    }

    #[test]
    fn test_zero_duration_is_immediate() {
        let tween = Tween::new(10.0, -20.0, 0.0);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), -20.0);
        assert_eq!(tween.progress(), 1.0);
    }
}
