use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    pub fn scale(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if d0 == d1 {
            // Degenerate domain, everything sits in the middle of the range.
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, px: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if r0 == r1 {
            return d0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Roughly `count` human friendly tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let [d0, d1] = self.domain;
        tick_values(d0, d1, count)
    }
}

/// Tick values at multiples of 1, 2 or 5 times a power of ten.
pub fn tick_values(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };

    let step = (hi - lo) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    let mut ticks: Vec<f64> = if power < 0.0 {
        // Dividing by the inverse step keeps decimals like 0.3 exact.
        let inc = 10f64.powf(-power) / factor;
        let (i0, i1) = ((lo * inc).ceil() as i64, (hi * inc).floor() as i64);
        (i0..=i1).map(|i| i as f64 / inc).collect()
    } else {
        let inc = 10f64.powf(power) * factor;
        let (i0, i1) = ((lo / inc).ceil() as i64, (hi / inc).floor() as i64);
        (i0..=i1).map(|i| i as f64 * inc).collect()
    };
    if reverse {
        ticks.reverse();
    }
    ticks
}
