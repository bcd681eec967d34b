use std::sync::OnceLock;

use racros::AutoStr;
use regex::Regex;

/// Custom color values: `#rgb`, `#rrggbb`, `#rrggbbaa` or `rgb(r, g, b)`.
static CUSTOM_COLOR_RE: OnceLock<Regex> = OnceLock::new();

/// Web colors accepted by the `[color]` tag.
///
/// There are 40 kinds of pre-defined colors available.
///
/// And a custom color [`WebColor::Custom`] which represent its value in string.
#[derive(AutoStr, Clone, Debug, PartialEq, Eq)]
#[autorule = "PascalCase"]
pub enum WebColor {
    Black,
    Sienna,
    DarkOliveGreen,
    DarkGreen,
    DarkSlateBlue,
    Navy,
    Indigo,
    DarkSlateGray,
    DarkRed,
    DarkOrange,
    Olive,
    Green,
    Teal,
    Blue,
    SlateGray,
    DimGray,
    Red,
    SandyBrown,
    YellowGreen,
    SeaGreen,
    MediumTurquoise,
    RoyalBlue,
    Purple,
    Gray,
    Magenta,
    Orange,
    Yellow,
    Lime,
    Cyan,
    DeepSkyBlue,
    DarkOrchid,
    Silver,
    Pink,
    Wheat,
    LemonChiffon,
    PaleGreen,
    PaleTurquoise,
    LightBlue,
    Plum,
    White,
    /// Custom web color value.
    ///
    /// Known as:
    ///
    /// 1. hex: `#ff0000`, `#f00` or `#ff000000`
    /// 2. rgb: `rgb(255, 0, 0)`
    Custom(String),
}

/// The value is neither a known color name nor a custom color.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid web color: {0:?}")]
pub struct InvalidColor(pub String);

impl WebColor {
    /// All pre-defined colors.
    pub const NAMED: [WebColor; 40] = [
        WebColor::Black,
        WebColor::Sienna,
        WebColor::DarkOliveGreen,
        WebColor::DarkGreen,
        WebColor::DarkSlateBlue,
        WebColor::Navy,
        WebColor::Indigo,
        WebColor::DarkSlateGray,
        WebColor::DarkRed,
        WebColor::DarkOrange,
        WebColor::Olive,
        WebColor::Green,
        WebColor::Teal,
        WebColor::Blue,
        WebColor::SlateGray,
        WebColor::DimGray,
        WebColor::Red,
        WebColor::SandyBrown,
        WebColor::YellowGreen,
        WebColor::SeaGreen,
        WebColor::MediumTurquoise,
        WebColor::RoyalBlue,
        WebColor::Purple,
        WebColor::Gray,
        WebColor::Magenta,
        WebColor::Orange,
        WebColor::Yellow,
        WebColor::Lime,
        WebColor::Cyan,
        WebColor::DeepSkyBlue,
        WebColor::DarkOrchid,
        WebColor::Silver,
        WebColor::Pink,
        WebColor::Wheat,
        WebColor::LemonChiffon,
        WebColor::PaleGreen,
        WebColor::PaleTurquoise,
        WebColor::LightBlue,
        WebColor::Plum,
        WebColor::White,
    ];

    /// Parse a color name, case-insensitive, or a custom hex/rgb value.
    ///
    /// # Errors
    ///
    /// When `value` is neither.
    pub fn parse(value: &str) -> Result<Self, InvalidColor> {
        if let Some(color) = Self::NAMED
            .iter()
            .find(|x| x.to_string().eq_ignore_ascii_case(value))
        {
            return Ok(color.clone());
        }

        let custom_re = CUSTOM_COLOR_RE.get_or_init(|| {
            Regex::new(
                r"^(?:#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})|rgb\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*\))$",
            )
            .expect("invalid custom color regex")
        });
        if custom_re.is_match(value) {
            return Ok(WebColor::Custom(value.to_owned()));
        }
        Err(InvalidColor(value.to_owned()))
    }
}
