use super::{Result, ShellError};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const MAX_X: i64 = 545;
pub const MIN_Y_EXCLUSIVE: f64 = -348.0;

#[derive(Debug, Clone, Copy)]
pub struct Coordinates {
    pub x: i64,
    pub y: f64,
}

impl Coordinates {
    pub fn new(x: i64, y: f64) -> Result<Self> {
        Self::validate_x(x)?;
        Self::validate_y(y)?;
        Ok(Self {
            x,
            y: normalize_zero(y),
        })
    }

    pub fn validate_x(x: i64) -> Result<()> {
        if x > MAX_X {
            return Err(ShellError::validation(
                "coordinates.x",
                format!("must not exceed {}, got {}", MAX_X, x),
            ));
        }
        Ok(())
    }

    pub fn validate_y(y: f64) -> Result<()> {
        if !y.is_finite() {
            return Err(ShellError::validation("coordinates.y", "must be a finite number"));
        }
        if y <= MIN_Y_EXCLUSIVE {
            return Err(ShellError::validation(
                "coordinates.y",
                format!("must be greater than {}, got {}", MIN_Y_EXCLUSIVE, y),
            ));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        Self::validate_x(self.x)?;
        Self::validate_y(self.y)
    }
}

fn normalize_zero(y: f64) -> f64 {
    if y == 0.0 { 0.0 } else { y }
}

impl PartialEq for Coordinates {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Coordinates {}

impl PartialOrd for Coordinates {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinates {
    fn cmp(&self, other: &Self) -> Ordering {
        // total_cmp различает -0.0 и 0.0, поэтому ноль приводится к одному знаку
        self.x
            .cmp(&other.x)
            .then_with(|| normalize_zero(self.y).total_cmp(&normalize_zero(other.y)))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Declares a closed set of upper-case keywords with parsing and display.
macro_rules! keyword_enum {
    ($name:ident, $label:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            pub fn variants_hint() -> String {
                Self::ALL.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(", ")
            }
        }

        impl FromStr for $name {
            type Err = ShellError;

            fn from_str(s: &str) -> Result<Self> {
                let upper = s.trim().to_uppercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == upper)
                    .ok_or_else(|| {
                        ShellError::validation(
                            $label,
                            format!("unknown value '{}', expected one of: {}", s.trim(), Self::variants_hint()),
                        )
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

keyword_enum!(VehicleType, "type", {
    Car => "CAR",
    Submarine => "SUBMARINE",
    Ship => "SHIP",
    Bicycle => "BICYCLE",
    Hoverboard => "HOVERBOARD",
});

keyword_enum!(FuelType, "fuel_type", {
    Kerosene => "KEROSENE",
    Electricity => "ELECTRICITY",
    Diesel => "DIESEL",
    Antimatter => "ANTIMATTER",
    Plasma => "PLASMA",
});
