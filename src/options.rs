use std::fmt;
use std::str::FromStr;

use fast_qr::ECL;
use serde::Deserialize;
use strum::{Display, EnumIter, EnumString};

use crate::consts::{MAX_MARGIN, MAX_SIZE};
use crate::errors::RuntimeError;

/// QR error correction tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString, EnumIter)]
#[serde(try_from = "String")]
#[strum(ascii_case_insensitive)]
pub enum ErrorLevel {
    /// Recovers about 7% of the symbol
    L,

    /// Recovers about 15% of the symbol
    #[default]
    M,

    /// Recovers about 25% of the symbol
    Q,

    /// Recovers about 30% of the symbol
    H,
}

impl ErrorLevel {
    pub fn ecl(self) -> ECL {
        match self {
            Self::L => ECL::L,
            Self::M => ECL::M,
            Self::Q => ECL::Q,
            Self::H => ECL::H,
        }
    }
}

impl TryFrom<String> for ErrorLevel {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Kind of surface the code is drawn onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString, EnumIter)]
#[serde(try_from = "String")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RenderAs {
    /// Raster output, exported as PNG
    #[default]
    Canvas,

    /// Vector output, exported as SVG
    Svg,
}

impl RenderAs {
    /// File extension of the exported file
    pub fn extension(self) -> &'static str {
        match self {
            Self::Canvas => "png",
            Self::Svg => "svg",
        }
    }

    /// Human readable format name, as shown in the format selector and the export button
    pub fn label(self) -> &'static str {
        match self {
            Self::Canvas => "PNG",
            Self::Svg => "SVG",
        }
    }

    pub fn mime(self) -> mime::Mime {
        match self {
            Self::Canvas => mime::IMAGE_PNG,
            Self::Svg => mime::IMAGE_SVG,
        }
    }
}

impl TryFrom<String> for RenderAs {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A `#rrggbb` color, always stored in lowercase
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Whether `src` is `#` followed by exactly six hex digits
    pub fn is_valid(src: &str) -> bool {
        src.len() == 7
            && src.starts_with('#')
            && src[1..].chars().all(|c| c.is_ascii_hexdigit())
    }

    pub fn parse(src: &str) -> Result<Self, RuntimeError> {
        if Self::is_valid(src) {
            Ok(Self(src.to_ascii_lowercase()))
        } else {
            Err(RuntimeError::InvalidHexColor(src.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Opaque RGBA components
    pub fn rgba(&self) -> [u8; 4] {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or_default();
        [channel(1), channel(3), channel(5), 255]
    }
}

impl FromStr for HexColor {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = RuntimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cosmetic parameters of a rendered QR code
///
/// This is a value object: fields cannot be mutated in place, every edit goes through one of
/// the `with_*` methods which return a new value with exactly one field replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    size: u32,
    level: ErrorLevel,
    bg_color: HexColor,
    fg_color: HexColor,
    margin: u32,
    render_as: RenderAs,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 300,
            level: ErrorLevel::M,
            bg_color: HexColor("#ffffff".to_string()),
            fg_color: HexColor("#000000".to_string()),
            margin: 1,
            render_as: RenderAs::Canvas,
        }
    }
}

impl RenderOptions {
    pub fn try_new(
        size: u32,
        level: ErrorLevel,
        bg_color: HexColor,
        fg_color: HexColor,
        margin: u32,
        render_as: RenderAs,
    ) -> Result<Self, RuntimeError> {
        Ok(Self {
            size: check_range("size", size, 1, MAX_SIZE)?,
            level,
            bg_color,
            fg_color,
            margin: check_range("margin", margin, 0, MAX_MARGIN)?,
            render_as,
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn level(&self) -> ErrorLevel {
        self.level
    }

    pub fn bg_color(&self) -> &HexColor {
        &self.bg_color
    }

    pub fn fg_color(&self) -> &HexColor {
        &self.fg_color
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    pub fn render_as(&self) -> RenderAs {
        self.render_as
    }

    pub fn with_size(&self, size: u32) -> Result<Self, RuntimeError> {
        Ok(Self {
            size: check_range("size", size, 1, MAX_SIZE)?,
            ..self.clone()
        })
    }

    pub fn with_level(&self, level: ErrorLevel) -> Self {
        Self {
            level,
            ..self.clone()
        }
    }

    pub fn with_bg_color(&self, bg_color: HexColor) -> Self {
        Self {
            bg_color,
            ..self.clone()
        }
    }

    pub fn with_fg_color(&self, fg_color: HexColor) -> Self {
        Self {
            fg_color,
            ..self.clone()
        }
    }

    pub fn with_margin(&self, margin: u32) -> Result<Self, RuntimeError> {
        Ok(Self {
            margin: check_range("margin", margin, 0, MAX_MARGIN)?,
            ..self.clone()
        })
    }

    pub fn with_render_as(&self, render_as: RenderAs) -> Self {
        Self {
            render_as,
            ..self.clone()
        }
    }
}

fn check_range(name: &'static str, value: u32, min: u32, max: u32) -> Result<u32, RuntimeError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(RuntimeError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}
