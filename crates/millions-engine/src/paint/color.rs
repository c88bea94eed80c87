/// Straight-alpha RGBA color, one byte per channel (`0`–`255`).
///
/// This is the exact representation written into vertex data (`Unorm8x4`),
/// so no conversion happens during tessellation.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);

    /// Opaque color from an RGB triplet.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses any CSS color string (`#fff`, `#0d38fc`, `red`, `rgb(255, 128, 10)`, ...).
    ///
    /// Returns `None` if the string is not a valid CSS color.
    pub fn from_css(css: &str) -> Option<Self> {
        let parsed: csscolorparser::Color = css.parse().ok()?;
        let [r, g, b, a] = parsed.to_rgba8();
        Some(Self { r, g, b, a })
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Normalized clear color for a render pass load op.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64 / 255.0,
            g: self.g as f64 / 255.0,
            b: self.b as f64 / 255.0,
            a: self.a as f64 / 255.0,
        }
    }
}
