//! Compact settings strings for persisting compression methods.
//!
//! A method is written as `<flag><KEY>:<param>`, where the flag is `x` for an
//! active method and `o` for an inactive one, `KEY` is the three-letter
//! [`CompressionMethodType::key`] and `param` is the method's parameter (empty
//! for methods without one):
//!
//! ```text
//! xDUP:  oNEF:200  xWAC:2.0  oDPC:2000  xNED:12.5  oTSA:20  xSKI:
//! ```
//!
//! Malformed numbers are read as zero, which disables the method rather than
//! failing the whole string.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseMethodError;
use crate::methods::{CompressionMethod, CompressionMethodType, MethodKind};

/// Parse an integer parameter, falling back to 0.
pub fn parse_int_or_zero(text: &str) -> i32 {
    text.parse().unwrap_or(0)
}

/// Parse a floating point parameter, falling back to 0.0.
///
/// Surrounding whitespace is ignored; infinities and NaN count as malformed.
pub fn parse_double_or_zero(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Float parameters always carry a decimal point, e.g. `5.0`.
fn format_double(value: f64) -> String {
    format!("{value:?}")
}

// ============================================================================
// Parsers
// ============================================================================

type KindParser = fn(&str) -> MethodKind;

/// Recognisers tried in order against the text following the flag.
const PARSERS: [(CompressionMethodType, KindParser); 10] = [
    (CompressionMethodType::Duplicates, |_| MethodKind::Duplicates),
    (CompressionMethodType::NearbyWithFactor, |p| MethodKind::NearbyWithFactor {
        factor: parse_int_or_zero(p),
    }),
    (CompressionMethodType::WackyPoints, |p| MethodKind::WackyPoints {
        factor: parse_double_or_zero(p),
    }),
    (CompressionMethodType::Singletons, |p| MethodKind::Singletons {
        factor: parse_double_or_zero(p),
    }),
    (CompressionMethodType::DouglasPeucker, |p| MethodKind::DouglasPeucker {
        factor: parse_int_or_zero(p),
    }),
    (CompressionMethodType::NearbyWithDistance, |p| MethodKind::NearbyWithDistance {
        metres: parse_double_or_zero(p),
    }),
    (CompressionMethodType::TooSlow, |p| MethodKind::TooSlow {
        limit_kmh: parse_double_or_zero(p),
    }),
    (CompressionMethodType::TooFast, |p| MethodKind::TooFast {
        limit_kmh: parse_double_or_zero(p),
    }),
    (CompressionMethodType::TimeDifference, |p| MethodKind::TooSoon {
        seconds: parse_int_or_zero(p),
    }),
    (CompressionMethodType::SkiLifts, |_| MethodKind::SkiLifts),
];

impl CompressionMethod {
    /// The parameter as written in settings strings.
    pub fn param(&self) -> String {
        match self.kind {
            MethodKind::Duplicates | MethodKind::SkiLifts => String::new(),
            MethodKind::NearbyWithFactor { factor } => factor.to_string(),
            MethodKind::DouglasPeucker { factor } => factor.unsigned_abs().to_string(),
            MethodKind::TooSoon { seconds } => seconds.to_string(),
            MethodKind::WackyPoints { factor } | MethodKind::Singletons { factor } => format_double(factor),
            MethodKind::NearbyWithDistance { metres } => format_double(metres),
            MethodKind::TooSlow { limit_kmh } | MethodKind::TooFast { limit_kmh } => format_double(limit_kmh),
        }
    }

    /// Encode the active flag, key and parameter, e.g. `"xDPC:2000"`.
    pub fn to_settings_string(&self) -> String {
        format!(
            "{}{}:{}",
            if self.active { 'x' } else { 'o' },
            self.method_type().key(),
            self.param()
        )
    }

    /// Decode a settings string, or `None` if it isn't recognised.
    ///
    /// # Example
    /// ```
    /// use track_compress::{CompressionMethod, MethodKind};
    ///
    /// let method = CompressionMethod::from_settings_string("xNED:125.5").unwrap();
    /// assert!(method.is_active());
    /// assert_eq!(*method.kind(), MethodKind::NearbyWithDistance { metres: 125.5 });
    /// assert!(CompressionMethod::from_settings_string("NED:").is_none());
    /// ```
    pub fn from_settings_string(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl FromStr for CompressionMethod {
    type Err = ParseMethodError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut chars = text.chars();
        let flag = chars.next().ok_or(ParseMethodError::Empty)?;
        let rest = chars.as_str();
        if rest.chars().count() < 3 {
            return Err(ParseMethodError::TooShort(text.to_string()));
        }
        let kind = PARSERS
            .iter()
            .find_map(|(method_type, parser)| {
                rest.strip_prefix(method_type.key())
                    .and_then(|r| r.strip_prefix(':'))
                    .map(|param| parser(param))
            })
            .ok_or_else(|| ParseMethodError::UnknownKey(text.to_string()))?;

        let mut method = CompressionMethod::new(kind);
        method.set_active(flag == 'x');
        Ok(method)
    }
}

impl fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_settings_string())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CompressionMethod {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_settings_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CompressionMethod {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
