/// Colour of the measuring toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlColor {
    /// Shown while idle.
    Blue,
    /// Shown while measuring.
    Red,
}

impl ControlColor {
    /// RGBA components in `[0, 1]`.
    pub const fn rgba(self) -> [f32; 4] {
        match self {
            Self::Blue => [0.0, 0.48, 1.0, 1.0],
            Self::Red => [1.0, 0.23, 0.19, 1.0],
        }
    }
}

/// Presentation of the single toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleControl {
    /// Button label.
    pub label: &'static str,
    /// Button background.
    pub color: ControlColor,
}

impl ToggleControl {
    /// Control presentation for the given measuring flag.
    pub const fn for_measuring(is_measuring: bool) -> Self {
        if is_measuring {
            Self {
                label: "Reset",
                color: ControlColor::Red,
            }
        } else {
            Self {
                label: "Start Measuring",
                color: ControlColor::Blue,
            }
        }
    }
}
