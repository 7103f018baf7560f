//! Resistor color-band arithmetic.

use crate::LogicError;
use std::fmt;
use std::str::FromStr;

/// The twelve standard band colors.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
    Black,
    Brown,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Violet,
    Gray,
    White,
    Gold,
    Silver,
}

impl Color {
    /// All colors, in standard order.
    pub const ALL: [Color; 12] = [
        Color::Black,
        Color::Brown,
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Violet,
        Color::Gray,
        Color::White,
        Color::Gold,
        Color::Silver,
    ];

    /// Significant-digit value; Gold and Silver have none.
    pub fn digit(self) -> Option<u32> {
        match self {
            Color::Black => Some(0),
            Color::Brown => Some(1),
            Color::Red => Some(2),
            Color::Orange => Some(3),
            Color::Yellow => Some(4),
            Color::Green => Some(5),
            Color::Blue => Some(6),
            Color::Violet => Some(7),
            Color::Gray => Some(8),
            Color::White => Some(9),
            Color::Gold | Color::Silver => None,
        }
    }

    /// Decimal multiplier applied to the digit bands.
    pub fn multiplier(self) -> f64 {
        match self {
            Color::Black => 1.0,
            Color::Brown => 10.0,
            Color::Red => 100.0,
            Color::Orange => 1_000.0,
            Color::Yellow => 10_000.0,
            Color::Green => 100_000.0,
            Color::Blue => 1_000_000.0,
            Color::Violet => 10_000_000.0,
            Color::Gray => 100_000_000.0,
            Color::White => 1_000_000_000.0,
            Color::Gold => 0.1,
            Color::Silver => 0.01,
        }
    }

    /// Tolerance rating in percent, for the colors that carry one.
    pub fn tolerance(self) -> Option<f64> {
        match self {
            Color::Brown => Some(1.0),
            Color::Red => Some(2.0),
            Color::Green => Some(0.5),
            Color::Blue => Some(0.25),
            Color::Violet => Some(0.1),
            Color::Gray => Some(0.05),
            Color::Gold => Some(5.0),
            Color::Silver => Some(10.0),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::Brown => "Brown",
            Color::Red => "Red",
            Color::Orange => "Orange",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
            Color::Blue => "Blue",
            Color::Violet => "Violet",
            Color::Gray => "Gray",
            Color::White => "White",
            Color::Gold => "Gold",
            Color::Silver => "Silver",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Color {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" => Ok(Color::Black),
            "brown" => Ok(Color::Brown),
            "red" => Ok(Color::Red),
            "orange" => Ok(Color::Orange),
            "yellow" => Ok(Color::Yellow),
            "green" => Ok(Color::Green),
            "blue" => Ok(Color::Blue),
            "violet" | "purple" => Ok(Color::Violet),
            "gray" | "grey" => Ok(Color::Gray),
            "white" => Ok(Color::White),
            "gold" => Ok(Color::Gold),
            "silver" => Ok(Color::Silver),
            _ => Err(LogicError::UnknownColor(s.trim().to_string())),
        }
    }
}

/// A decoded resistor value.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Resistance {
    ohms: f64,
    tolerance: Option<f64>,
}

impl Resistance {
    /// Nominal value in ohms
    pub fn ohms(self) -> f64 {
        self.ohms
    }

    /// Tolerance in percent, when a tolerance band was given
    pub fn tolerance(self) -> Option<f64> {
        self.tolerance
    }
}

impl fmt::Display for Resistance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (scaled, unit) = if self.ohms >= 1e9 {
            (self.ohms / 1e9, "GΩ")
        } else if self.ohms >= 1e6 {
            (self.ohms / 1e6, "MΩ")
        } else if self.ohms >= 1e3 {
            (self.ohms / 1e3, "kΩ")
        } else {
            (self.ohms, "Ω")
        };

        let mut digits = format!("{:.2}", scaled);
        if digits.ends_with(".00") {
            digits.truncate(digits.len() - 3);
        }
        write!(f, "{} {}", digits, unit)?;

        if let Some(tolerance) = self.tolerance {
            write!(f, " ± {}%", tolerance)?;
        }
        Ok(())
    }
}

/// Decode a 4- or 5-band color code.
///
/// The last two bands are always the multiplier and the tolerance; the
/// leading two or three are significant digits.
///
/// ```
/// use logiclab::{decode, Color};
/// # use logiclab::LogicError;
/// # fn main() -> Result<(), LogicError> {
///
/// let bands = [Color::Brown, Color::Black, Color::Red, Color::Gold];
/// let resistance = decode(&bands)?;
/// assert_eq!(resistance.ohms(), 1_000.0);
/// assert_eq!(resistance.to_string(), "1 kΩ ± 5%");
/// # Ok(())
/// # }
/// ```
pub fn decode(bands: &[Color]) -> Result<Resistance, LogicError> {
    let (digits, multiplier, tolerance) = match *bands {
        [d1, d2, m, t] => ([d1, d2].to_vec(), m, t),
        [d1, d2, d3, m, t] => ([d1, d2, d3].to_vec(), m, t),
        _ => return Err(LogicError::InvalidBandCount(bands.len())),
    };

    let mut value: u32 = 0;
    for color in digits {
        let digit = color.digit().ok_or(LogicError::NotADigitBand(color))?;
        value = value * 10 + digit;
    }

    let tolerance = tolerance
        .tolerance()
        .ok_or(LogicError::NotAToleranceBand(tolerance))?;

    Ok(Resistance {
        ohms: f64::from(value) * multiplier.multiplier(),
        tolerance: Some(tolerance),
    })
}
