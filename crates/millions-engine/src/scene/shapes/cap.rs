/// Terminator style applied to one endpoint of a line.
///
/// Extending caps:
/// - add a variant here
/// - add a matching generator in `tessellate::caps`
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum LineCap {
    /// Flat end at the endpoint; no extra geometry.
    #[default]
    None,
    /// Semi-circular end extending past the endpoint.
    Rounded,
    /// Triangular wedge pointing away from the line.
    ///
    /// `length_scale` is the wedge length in units of the endpoint's half-thickness.
    Arrow { length_scale: f32 },
    /// One-sided barb.
    ///
    /// `width_scale` picks the side by sign (positive = left of travel) and
    /// widens or narrows the barb by magnitude.
    HalfArrow { length_scale: f32, width_scale: f32 },
}

impl LineCap {
    pub const DEFAULT_ARROW_LENGTH: f32 = 2.0;

    #[inline]
    pub const fn arrow(length_scale: f32) -> Self {
        Self::Arrow { length_scale }
    }

    #[inline]
    pub const fn half_arrow(length_scale: f32, width_scale: f32) -> Self {
        Self::HalfArrow { length_scale, width_scale }
    }

    /// Parses a cap tag (`none`, `rounded`, `arrow`, `half-arrow-left`, `half-arrow-right`).
    ///
    /// Unknown tags map to [`LineCap::None`]; they are not an error.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "rounded" => Self::Rounded,
            "arrow" => Self::arrow(Self::DEFAULT_ARROW_LENGTH),
            "half-arrow-left" => Self::half_arrow(Self::DEFAULT_ARROW_LENGTH, 1.0),
            "half-arrow-right" => Self::half_arrow(Self::DEFAULT_ARROW_LENGTH, -1.0),
            other => {
                if other != "none" {
                    log::debug!("unknown line cap tag {other:?}; using none");
                }
                Self::None
            }
        }
    }
}
