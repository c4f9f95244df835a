/// Logarithmic scale. The domain must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    domain: [f64; 2],
    range: [f64; 2],
    base: f64,
}

impl LogScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self {
            domain,
            range,
            base: 10.0,
        }
    }

    pub fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    fn log(&self, value: f64) -> f64 {
        value.ln() / self.base.ln()
    }

    pub fn scale(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let (l0, l1) = (self.log(d0), self.log(d1));
        if l0 == l1 {
            return (r0 + r1) / 2.0;
        }
        r0 + (self.log(value) - l0) / (l1 - l0) * (r1 - r0)
    }

    pub fn invert(&self, px: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if r0 == r1 {
            return d0;
        }
        let (l0, l1) = (self.log(d0), self.log(d1));
        self.base.powf(l0 + (px - r0) / (r1 - r0) * (l1 - l0))
    }

    /// Integer powers of the base within the domain.
    pub fn ticks(&self) -> Vec<f64> {
        let [d0, d1] = self.domain;
        let (lo, hi) = (d0.min(d1), d0.max(d1));
        if lo <= 0.0 {
            return Vec::new();
        }
        let (first, last) = (self.log(lo).ceil() as i32, self.log(hi).floor() as i32);
        (first..=last).map(|k| self.base.powi(k)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decades_are_evenly_spaced() {
        let scale = LogScale::new([100.0, 100_000.0], [0.0, 900.0]);
        assert!((scale.scale(1_000.0) - 300.0).abs() < 1e-9);
        assert!((scale.scale(10_000.0) - 600.0).abs() < 1e-9);
        assert!((scale.invert(300.0) - 1_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_ticks_are_powers() {
        let scale = LogScale::new([142.0, 179_000.0], [0.0, 1.0]);
        assert_eq!(scale.ticks(), vec![1_000.0, 10_000.0, 100_000.0]);
    }
}
