use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::infrastructure::error::AppError;

/// CSS framework whose references are baked into the page boilerplate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    Tailwind,
    Bootstrap,
}

impl Framework {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tailwind => "tailwind",
            Self::Bootstrap => "bootstrap",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Tailwind => "Tailwind CSS",
            Self::Bootstrap => "Bootstrap",
        }
    }

    pub fn all() -> &'static [Framework] {
        &[Self::Tailwind, Self::Bootstrap]
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Framework {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tailwind" => Ok(Self::Tailwind),
            "bootstrap" => Ok(Self::Bootstrap),
            other => Err(AppError::InvalidConfiguration(format!(
                "Invalid framework: {}. Must be 'tailwind' or 'bootstrap'",
                other
            ))),
        }
    }
}

/// A4 page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// A4 short and long edges in millimetres.
const A4_SHORT_MM: u32 = 210;
const A4_LONG_MM: u32 = 297;

/// A4 edges in CSS pixels (96 DPI).
const A4_SHORT_PX: u32 = 794;
const A4_LONG_PX: u32 = 1123;

impl Orientation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    pub fn all() -> &'static [Orientation] {
        &[Self::Portrait, Self::Landscape]
    }

    /// `(width, height)` of the page in millimetres.
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::Portrait => (A4_SHORT_MM, A4_LONG_MM),
            Self::Landscape => (A4_LONG_MM, A4_SHORT_MM),
        }
    }

    /// `(width, height)` of the page box in pixels at 96 DPI.
    pub fn page_size_px(&self) -> (u32, u32) {
        match self {
            Self::Portrait => (A4_SHORT_PX, A4_LONG_PX),
            Self::Landscape => (A4_LONG_PX, A4_SHORT_PX),
        }
    }

    /// CSS lengths, e.g. `("210mm", "297mm")`.
    pub fn css_dimensions(&self) -> (String, String) {
        let (w, h) = self.dimensions_mm();
        (format!("{}mm", w), format!("{}mm", h))
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Orientation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            other => Err(AppError::InvalidConfiguration(format!(
                "Invalid orientation: {}. Must be 'portrait' or 'landscape'",
                other
            ))),
        }
    }
}

/// The `(framework, orientation)` pair the boilerplate is generated from.
/// Replaced wholesale on every user change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PageConfig {
    pub framework: Framework,
    pub orientation: Orientation,
}

impl PageConfig {
    pub fn new(framework: Framework, orientation: Orientation) -> Self {
        Self { framework, orientation }
    }

    /// Parse both fields from their literal names.
    pub fn parse(framework: &str, orientation: &str) -> Result<Self, AppError> {
        Ok(Self {
            framework: framework.parse()?,
            orientation: orientation.parse()?,
        })
    }

    pub fn with_framework(self, framework: Framework) -> Self {
        Self { framework, ..self }
    }

    pub fn with_orientation(self, orientation: Orientation) -> Self {
        Self { orientation, ..self }
    }
}
