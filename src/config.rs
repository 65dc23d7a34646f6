//! Remembered parameter values for each compression method type.
//!
//! A user interface shows one parameter field per method type. The values
//! behind those fields start from fixed defaults and can be restored from two
//! persisted formats:
//!
//! - the old format, a `;`-separated list of bare numbers in fixed positions
//! - the new format, a `;`-separated list of method settings strings

use std::collections::HashMap;

use log::warn;

use crate::methods::{CompressionMethod, CompressionMethodType};

/// Parameter text per method type.
///
/// # Example
/// ```
/// use track_compress::{CompressionMethodType, ParameterValues};
///
/// let mut values = ParameterValues::default();
/// assert_eq!(values.value(CompressionMethodType::DouglasPeucker), "2000");
///
/// values.apply_new_style_config("xDPC:1500;oNEF:120");
/// assert_eq!(values.value(CompressionMethodType::DouglasPeucker), "1500");
/// assert_eq!(values.value(CompressionMethodType::NearbyWithFactor), "120");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterValues {
    values: HashMap<CompressionMethodType, String>,
}

impl Default for ParameterValues {
    fn default() -> Self {
        let values = CompressionMethodType::ALL
            .into_iter()
            .map(|t| (t, default_value(t).to_string()))
            .collect();
        Self { values }
    }
}

/// The parameter shown before the user has changed anything.
fn default_value(method_type: CompressionMethodType) -> &'static str {
    match method_type {
        CompressionMethodType::Duplicates | CompressionMethodType::SkiLifts => "",
        CompressionMethodType::NearbyWithFactor => "200",
        CompressionMethodType::WackyPoints => "2",
        CompressionMethodType::Singletons => "2",
        CompressionMethodType::DouglasPeucker => "2000",
        CompressionMethodType::NearbyWithDistance => "10",
        CompressionMethodType::TooSlow => "2",
        CompressionMethodType::TooFast => "40",
        CompressionMethodType::TimeDifference => "20",
    }
}

/// Method types stored at positions 1 to 4 of the old format.
const OLD_STYLE_FIELDS: [CompressionMethodType; 4] = [
    CompressionMethodType::NearbyWithFactor,
    CompressionMethodType::WackyPoints,
    CompressionMethodType::Singletons,
    CompressionMethodType::DouglasPeucker,
];

impl ParameterValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// The parameter text for a method type.
    pub fn value(&self, method_type: CompressionMethodType) -> &str {
        self.values.get(&method_type).map_or("", String::as_str)
    }

    pub fn set_value(&mut self, method_type: CompressionMethodType, value: impl Into<String>) {
        self.values.insert(method_type, value.into());
    }

    /// Restore values from the old positional format, e.g. `"0;10;11;12;13"`.
    ///
    /// The first field is ignored, the next four are the nearby factor, wacky
    /// factor, singleton factor and Douglas-Peucker factor. Empty fields keep
    /// their current value.
    pub fn apply_old_style_config(&mut self, config: &str) {
        for (method_type, field) in OLD_STYLE_FIELDS.into_iter().zip(config.split(';').skip(1)) {
            if !field.is_empty() {
                self.set_value(method_type, field);
            }
        }
    }

    /// Restore values from `;`-separated method settings strings.
    ///
    /// Fragments which don't parse are skipped.
    pub fn apply_new_style_config(&mut self, config: &str) {
        for fragment in config.split(';').filter(|f| !f.is_empty()) {
            match fragment.parse::<CompressionMethod>() {
                Ok(method) => self.set_value(method.method_type(), method.param()),
                Err(e) => warn!("[Config] Skipping settings fragment: {}", e),
            }
        }
    }

    /// Build an inactive method of the given type from its current value.
    ///
    /// A value which isn't a number gives a zero parameter.
    pub fn to_method(&self, method_type: CompressionMethodType) -> Option<CompressionMethod> {
        let text = format!("o{}:{}", method_type.key(), self.value(method_type));
        CompressionMethod::from_settings_string(&text)
    }
}
