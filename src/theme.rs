use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use plotters::style::RGBColor;

const NAVY: RGBColor = RGBColor(0x0C, 0x1B, 0x37);
const WHITE: RGBColor = RGBColor(0xFF, 0xFF, 0xFF);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// `primary` paints backgrounds and halos, `secondary` paints text, edges and grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: RGBColor,
    pub secondary: RGBColor,
}

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                primary: NAVY,
                secondary: WHITE,
            },
            Theme::Light => Palette {
                primary: WHITE,
                secondary: NAVY,
            },
        }
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(anyhow!("unknown theme '{other}' (expected dark or light)")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "Dark"),
            Theme::Light => write!(f, "Light"),
        }
    }
}
