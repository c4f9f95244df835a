use crate::color::Color;

/// Maps category names onto a palette, cycling when there are more
/// categories than colours.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale {
    domain: Vec<String>,
    range: Vec<Color>,
}

impl OrdinalScale {
    pub fn new(domain: Vec<String>, range: &[Color]) -> Self {
        Self {
            domain,
            range: range.to_vec(),
        }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn scale(&self, key: &str) -> Color {
        if self.range.is_empty() {
            return Color::BLACK;
        }
        // Unknown keys behave as if appended to the domain.
        let index = self
            .domain
            .iter()
            .position(|k| k == key)
            .unwrap_or(self.domain.len());
        self.range[index % self.range.len()]
    }
}
