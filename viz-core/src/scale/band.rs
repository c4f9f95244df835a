/// Discrete scale splitting the range into equally wide bands, one per
/// domain entry, separated by padding.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: [f64; 2],
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: [f64; 2]) -> Self {
        Self {
            domain,
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        }
    }

    pub fn with_padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self
    }

    pub fn with_padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = padding.max(0.0);
        self
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Distance between the starts of two neighbouring bands.
    pub fn step(&self) -> f64 {
        let [r0, r1] = self.range;
        let n = self.domain.len() as f64;
        (r1 - r0) / (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    fn start(&self) -> f64 {
        let [r0, r1] = self.range;
        let n = self.domain.len() as f64;
        r0 + (r1 - r0 - self.step() * (n - self.padding_inner)) * self.align
    }

    /// Start of the band for `key`, `None` for keys outside the domain.
    pub fn scale(&self, key: &str) -> Option<f64> {
        let index = self.domain.iter().position(|k| k == key)?;
        Some(self.start() + self.step() * index as f64)
    }
}
