//! Backdrop compositor - decides how a cutout is presented for a given
//! backdrop option. Pure: nothing here touches the network or the result.

use crate::constants::{CHECKER_DARK, CHECKER_LIGHT};
use crate::models::{BackdropOption, RemovalResult, Rgb};

/// What goes behind the cutout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackdropFill {
    /// Alternating tiles that make transparency visible
    Checkerboard { light: Rgb, dark: Rgb },
    Solid(Rgb),
}

impl BackdropFill {
    /// Color of the tile at a grid position
    pub fn color_at(&self, col: u16, row: u16) -> Rgb {
        match self {
            BackdropFill::Checkerboard { light, dark } => {
                if (col + row) % 2 == 0 {
                    *light
                } else {
                    *dark
                }
            }
            BackdropFill::Solid(color) => *color,
        }
    }

    /// A label color that stays readable on top of this fill
    pub fn contrast(&self) -> Rgb {
        let base = match self {
            BackdropFill::Checkerboard { dark, .. } => *dark,
            BackdropFill::Solid(color) => *color,
        };
        if base.luma() > 140 {
            Rgb::new(0x11, 0x11, 0x11)
        } else {
            Rgb::new(0xf5, 0xf5, 0xf5)
        }
    }
}

/// Render instructions for the result panel
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Composite {
    pub option: BackdropOption,
    pub fill: BackdropFill,
    pub cutout_dimensions: Option<(u32, u32)>,
    pub cutout_bytes: usize,
}

pub fn fill_for(option: BackdropOption) -> BackdropFill {
    match option.fill_color() {
        Some(color) => BackdropFill::Solid(color),
        None => BackdropFill::Checkerboard {
            light: CHECKER_LIGHT,
            dark: CHECKER_DARK,
        },
    }
}

pub fn render(result: &RemovalResult, option: BackdropOption) -> Composite {
    Composite {
        option,
        fill: fill_for(option),
        cutout_dimensions: result.dimensions,
        cutout_bytes: result.byte_len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ACCENT_BLUE, ACCENT_GREEN, BLACK, WHITE};
    use crate::test_support::cutout;

    #[test]
    fn test_fill_policy() {
        assert!(matches!(fill_for(BackdropOption::Transparent), BackdropFill::Checkerboard { .. }));
        assert_eq!(fill_for(BackdropOption::White), BackdropFill::Solid(WHITE));
        assert_eq!(fill_for(BackdropOption::Black), BackdropFill::Solid(BLACK));
        assert_eq!(fill_for(BackdropOption::AccentBlue), BackdropFill::Solid(ACCENT_BLUE));
        assert_eq!(fill_for(BackdropOption::AccentGreen), BackdropFill::Solid(ACCENT_GREEN));
        let c = Rgb::new(0x12, 0x34, 0x56);
        assert_eq!(fill_for(BackdropOption::Custom(c)), BackdropFill::Solid(c));
    }

    #[test]
    fn test_render_leaves_result_untouched() {
        let result = cutout();
        let before = result.clone();
        let composite = render(&result, BackdropOption::Black);
        assert_eq!(result, before);
        assert_eq!(composite.cutout_dimensions, Some((2, 2)));
        assert_eq!(composite.cutout_bytes, result.bytes.len());
    }

    #[test]
    fn test_checkerboard_alternates() {
        let fill = fill_for(BackdropOption::Transparent);
        assert_eq!(fill.color_at(0, 0), CHECKER_LIGHT);
        assert_eq!(fill.color_at(1, 0), CHECKER_DARK);
        assert_eq!(fill.color_at(1, 1), CHECKER_LIGHT);
    }

    #[test]
    fn test_contrast_label() {
        assert_eq!(BackdropFill::Solid(WHITE).contrast(), Rgb::new(0x11, 0x11, 0x11));
        assert_eq!(BackdropFill::Solid(BLACK).contrast(), Rgb::new(0xf5, 0xf5, 0xf5));
    }
}
