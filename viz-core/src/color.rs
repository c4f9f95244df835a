use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn hex(value: u32) -> Self {
        Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub const BLACK: Color = Color::hex(0x000000);
    pub const TEXT: Color = Color::hex(0x222222);
    pub const GREY: Color = Color::hex(0x808080);
    pub const LIGHT_GREY: Color = Color::hex(0xd3d3d3);
    pub const WHITE: Color = Color::hex(0xffffff);
    pub const RED: Color = Color::hex(0xff0000);
    pub const REBECCA_PURPLE: Color = Color::hex(0x663399);
    pub const SKY_BLUE: Color = Color::hex(0x87ceeb);
}

/// The ten-colour categorical palette used for continents.
pub const CATEGORY10: [Color; 10] = [
    Color::hex(0x1f77b4),
    Color::hex(0xff7f0e),
    Color::hex(0x2ca02c),
    Color::hex(0xd62728),
    Color::hex(0x9467bd),
    Color::hex(0x8c564b),
    Color::hex(0xe377c2),
    Color::hex(0x7f7f7f),
    Color::hex(0xbcbd22),
    Color::hex(0x17becf),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip_of_palette_entry() {
        assert_eq!(CATEGORY10[0].to_hex(), "#1f77b4");
        assert_eq!(Color::REBECCA_PURPLE, Color::rgb(0x66, 0x33, 0x99));
    }
}
