use std::time::{Duration, Instant};

/// A single animated attribute.
///
/// Retargeting while in flight starts the new animation from the value
/// currently on screen, so the latest update always wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    start: Instant,
    duration: Duration,
}

impl Tween {
    pub fn fixed(value: f64, now: Instant) -> Self {
        Tween {
            from: value,
            to: value,
            start: now,
            duration: Duration::ZERO,
        }
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_cubic_in_out(progress)
    }

    pub fn retarget(&mut self, to: f64, now: Instant, duration: Duration) {
        self.from = self.value_at(now);
        self.to = to;
        self.start = now;
        self.duration = duration;
    }

    pub fn is_settled(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaches_target_after_duration() {
        let t0 = Instant::now();
        let mut tween = Tween::fixed(0.0, t0);
        tween.retarget(100.0, t0, Duration::from_millis(1000));

        assert_eq!(tween.value_at(t0), 0.0);
        assert!((tween.value_at(t0 + Duration::from_millis(500)) - 50.0).abs() < 1e-9);
        assert_eq!(tween.value_at(t0 + Duration::from_millis(1000)), 100.0);
        assert!(tween.is_settled(t0 + Duration::from_secs(2)));
        assert!(!tween.is_settled(t0 + Duration::from_millis(10)));
    }

    #[test]
    fn retarget_mid_flight_starts_from_current_value() {
        let t0 = Instant::now();
        let mut tween = Tween::fixed(0.0, t0);
        tween.retarget(100.0, t0, Duration::from_millis(1000));
        let mid = t0 + Duration::from_millis(500);
        tween.retarget(0.0, mid, Duration::from_millis(1000));

        assert!((tween.value_at(mid) - 50.0).abs() < 1e-9);
        assert_eq!(tween.value_at(mid + Duration::from_millis(1000)), 0.0);
    }

    #[test]
    fn fixed_is_immediately_settled() {
        let t0 = Instant::now();
        let tween = Tween::fixed(4.0, t0);
        assert!(tween.is_settled(t0));
        assert_eq!(tween.value_at(t0), 4.0);
    }
}
