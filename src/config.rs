///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Imports
///
///////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::str::FromStr;

use druid::Data;

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// ConfigKey
///
///////////////////////////////////////////////////////////////////////////////////////////////////
/// The attributes a wheel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Data)]
pub enum ConfigKey {
    Default,
    Min,
    Max,
    Step,
    ReturnToDefault,
}

/// Every attribute name the wheel observes, in declaration order.
pub const OBSERVED_ATTRIBUTES: [ConfigKey; 5] = [
    ConfigKey::Default,
    ConfigKey::Min,
    ConfigKey::Max,
    ConfigKey::Step,
    ConfigKey::ReturnToDefault,
];

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Default => "default",
            ConfigKey::Min => "min",
            ConfigKey::Max => "max",
            ConfigKey::Step => "step",
            ConfigKey::ReturnToDefault => "return-to-default",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an attribute name is not one of [`OBSERVED_ATTRIBUTES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAttribute(pub String);

impl fmt::Display for UnknownAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown wheel attribute `{}`", self.0)
    }
}

impl std::error::Error for UnknownAttribute {}

impl FromStr for ConfigKey {
    type Err = UnknownAttribute;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        OBSERVED_ATTRIBUTES
            .iter()
            .copied()
            .find(|key| key.as_str() == name)
            .ok_or_else(|| UnknownAttribute(name.to_string()))
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Parsing
///
///////////////////////////////////////////////////////////////////////////////////////////////////

/// Parses the longest numeric prefix of `input`.
///
/// Leading whitespace is skipped and anything after the number is ignored, so
/// `"45deg"` reads as `45.0`. `Infinity` (optionally signed) is accepted.
/// Returns `None` when no number can be read at all.
pub fn parse_float(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    let bytes = trimmed.as_bytes();

    let mut end = 0;
    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if trimmed[end..].starts_with("Infinity") {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let integer_start = end;
    end = skip_digits(bytes, end);
    let mut mantissa_digits = end - integer_start;

    if bytes.get(end) == Some(&b'.') {
        let fraction_end = skip_digits(bytes, end + 1);
        mantissa_digits += fraction_end - (end + 1);
        end = fraction_end;
    }

    if mantissa_digits == 0 {
        return None;
    }

    // An exponent only counts when it carries at least one digit
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+') | Some(b'-')) {
            exponent += 1;
        }
        let exponent_end = skip_digits(bytes, exponent);
        if exponent_end > exponent {
            end = exponent_end;
        }
    }

    trimmed[..end].parse().ok()
}

fn skip_digits(bytes: &[u8], from: usize) -> usize {
    let mut index = from;
    while bytes.get(index).map_or(false, u8::is_ascii_digit) {
        index += 1;
    }
    index
}

/// Formats a value so that [`parse_float`] reads it back unchanged.
///
/// Negative zero is written as `0`.
pub fn format_attribute(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Coercion
///
///////////////////////////////////////////////////////////////////////////////////////////////////
/// `None` stands for a removed attribute and falls back silently.
fn coerce(key: ConfigKey, raw: Option<&str>, fallback: f64) -> f64 {
    let Some(raw) = raw else {
        return fallback;
    };

    match parse_float(raw) {
        Some(value) => value,
        None => {
            log::warn!(
                "Wheel attribute `{}` value {:?} is not a number, using {} instead",
                key,
                raw,
                fallback
            );
            fallback
        }
    }
}

pub fn coerce_default(raw: Option<&str>) -> f64 {
    coerce(ConfigKey::Default, raw, 0.0)
}

pub fn coerce_min(raw: Option<&str>) -> f64 {
    coerce(ConfigKey::Min, raw, f64::NEG_INFINITY)
}

pub fn coerce_max(raw: Option<&str>) -> f64 {
    coerce(ConfigKey::Max, raw, f64::INFINITY)
}

/// Zero and infinite steps cannot quantize anything and fall back to `1.0`.
pub fn coerce_step(raw: Option<&str>) -> f64 {
    let step = coerce(ConfigKey::Step, raw, 1.0);
    if step == 0.0 || !step.is_finite() {
        log::warn!("Wheel step {} is unusable, using 1 instead", step);
        return 1.0;
    }
    step
}
