/// Continuous mapping from a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        LinearScale { domain, range }
    }

    pub fn scale(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Roughly `count` round tick values covering the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let [lo, hi] = if self.domain[0] <= self.domain[1] {
            self.domain
        } else {
            [self.domain[1], self.domain[0]]
        };
        let step = tick_step(lo, hi, count);
        if step <= 0.0 || !step.is_finite() {
            return vec![lo];
        }
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count.max(1) as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    power * factor
}

/// Discrete bands of equal height, one per category.
///
/// The first category sits at the start of `range`; with a reversed range
/// such as `[height, 0]` the first category is drawn at the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    positions: Vec<f64>,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: [f64; 2], padding: f64) -> Self {
        let n = domain.len() as f64;
        let [r0, r1] = range;
        let reverse = r1 < r0;
        let (start, stop) = if reverse { (r1, r0) } else { (r0, r1) };
        let step = (stop - start) / (n - padding + padding * 2.0).max(1.0);
        let offset = start + (stop - start - step * (n - padding)) * 0.5;
        let mut positions: Vec<f64> = (0..domain.len()).map(|i| offset + step * i as f64).collect();
        if reverse {
            positions.reverse();
        }
        BandScale {
            domain,
            positions,
            bandwidth: step * (1.0 - padding),
        }
    }

    /// Start of the band for `category`, if it is part of the domain.
    pub fn position(&self, category: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|c| c == category)
            .map(|i| self.positions[i])
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn linear_scale_maps_percent_domain() {
        let x = LinearScale::new([-20.0, 20.0], [0.0, 430.0]);
        assert!(close(x.scale(0.0), 215.0));
        assert!(close(x.scale(-10.0), 107.5));
        assert!(close(x.scale(20.0), 430.0));
        assert!(close(x.scale(10.0), 322.5));
    }

    #[test]
    fn five_ticks_over_symmetric_domain() {
        let x = LinearScale::new([-20.0, 20.0], [0.0, 430.0]);
        assert_eq!(x.ticks(5), vec![-20.0, -10.0, 0.0, 10.0, 20.0]);
    }

    #[test]
    fn ticks_pick_round_steps() {
        let x = LinearScale::new([0.0, 100.0], [0.0, 400.0]);
        assert_eq!(x.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        let x = LinearScale::new([0.0, 7.0], [0.0, 100.0]);
        assert_eq!(x.ticks(3), vec![0.0, 2.0, 4.0, 6.0]);
    }

    #[test]
    fn single_band_is_centred_with_padding() {
        let y = BandScale::new(vec!["a".into()], [100.0, 0.0], 0.1);
        let step = 100.0 / 1.1;
        assert!(close(y.bandwidth(), step * 0.9));
        assert!(close(y.position("a").unwrap(), (100.0 - step * 0.9) / 2.0));
    }

    #[test]
    fn reversed_range_puts_first_category_at_bottom() {
        let y = BandScale::new(vec!["young".into(), "mid".into(), "old".into()], [300.0, 0.0], 0.1);
        let young = y.position("young").unwrap();
        let old = y.position("old").unwrap();
        assert!(young > old);
        assert!(young + y.bandwidth() <= 300.0);
        assert!(old >= 0.0);
        assert_eq!(y.position("missing"), None);
    }
}
