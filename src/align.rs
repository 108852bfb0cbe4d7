/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AlignX {
    #[default]
    Left,
    CenterX,
    Right,
}

/// Vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AlignY {
    #[default]
    Top,
    CenterY,
    Bottom,
}

/// Fraction of the slack that goes before the content: 0 for leading, 0.5 for
/// centered, 1 for trailing.
pub(crate) trait AlignFactor {
    fn factor(self) -> f32;
}

impl AlignFactor for AlignX {
    fn factor(self) -> f32 {
        match self {
            AlignX::Left => 0.0,
            AlignX::CenterX => 0.5,
            AlignX::Right => 1.0,
        }
    }
}

impl AlignFactor for AlignY {
    fn factor(self) -> f32 {
        match self {
            AlignY::Top => 0.0,
            AlignY::CenterY => 0.5,
            AlignY::Bottom => 1.0,
        }
    }
}
