///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Imports
///
///////////////////////////////////////////////////////////////////////////////////////////////////
use druid::im::HashMap;
use druid::Data;

use crate::config::{
    coerce_default, coerce_max, coerce_min, coerce_step, format_attribute, ConfigKey,
};
use crate::rotation::{RotateEvent, RotationData};
use crate::snapping::{clamp_rotation, settle};

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// WheelDataAccess
///
///////////////////////////////////////////////////////////////////////////////////////////////////
/// Attribute-level access used by the [`SET_ATTRIBUTE`](crate::SET_ATTRIBUTE) command.
pub trait WheelDataAccess: RotationData {
    /// Stores (`Some`) or removes (`None`) the raw attribute and reacts to it.
    fn apply_attribute(&mut self, key: ConfigKey, value: Option<&str>);
}

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// WheelData
///
///////////////////////////////////////////////////////////////////////////////////////////////////
/// Configuration and rotation of a single wheel.
///
/// Configuration arrives as string attributes (see [`ConfigKey`]) or through
/// the typed setters, which format their value and take the attribute path.
/// The rotation is kept on the `step` grid and inside `[min, max]`.
#[derive(Clone, Data, PartialEq, Debug)]
pub struct WheelData {
    rotation: f64,
    min: f64,
    max: f64,
    step: f64,
    default: f64,
    return_to_default: bool,
    attributes: HashMap<ConfigKey, String>,
}

impl Default for WheelData {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            step: 1.0,
            default: 0.0,
            return_to_default: false,
            attributes: HashMap::new(),
        }
    }
}

impl WheelData {
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    /// Builds a wheel from markup-style attributes, applied in order.
    ///
    /// Unknown names are ignored.
    pub fn from_attributes<'a>(attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut data = Self::new();
        for (name, value) in attributes {
            data.set_attribute(name, value);
        }
        data
    }

    // Attribute methods
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match name.parse::<ConfigKey>() {
            Ok(key) => self.apply_attribute(key, Some(value)),
            Err(err) => log::debug!("Ignoring {}", err),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) {
        match name.parse::<ConfigKey>() {
            Ok(key) => self.apply_attribute(key, None),
            Err(err) => log::debug!("Ignoring {}", err),
        }
    }

    pub fn attribute(&self, key: ConfigKey) -> Option<&str> {
        self.attributes.get(&key).map(String::as_str)
    }

    pub fn has_attribute(&self, key: ConfigKey) -> bool {
        self.attributes.contains_key(&key)
    }

    /// Reacts to a changed attribute. `None` means the attribute was removed.
    ///
    /// Rotation updates made here never produce a [`RotateEvent`].
    pub fn attribute_changed(&mut self, key: ConfigKey, value: Option<&str>) {
        log::debug!("Wheel attribute `{}` changed to {:?}", key, value);
        match key {
            ConfigKey::ReturnToDefault => {
                self.return_to_default = value.is_some();
            }
            ConfigKey::Default => {
                self.default = coerce_default(value);
                self.set_rotation(self.default, false);
            }
            ConfigKey::Min => {
                self.min = coerce_min(value);
                self.rotation = clamp_rotation(self.rotation, self.min, self.max);
            }
            ConfigKey::Max => {
                self.max = coerce_max(value);
                self.rotation = clamp_rotation(self.rotation, self.min, self.max);
            }
            ConfigKey::Step => {
                self.step = coerce_step(value);
                self.rotation = self.settle(self.rotation);
            }
        }
    }

    // Properties
    pub fn default(&self) -> f64 {
        self.default
    }

    pub fn set_default(&mut self, value: f64) {
        let value = if value.is_nan() { 0.0 } else { value };
        self.apply_attribute(ConfigKey::Default, Some(&format_attribute(value)));
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn set_min(&mut self, value: f64) {
        let value = if value.is_nan() { f64::NEG_INFINITY } else { value };
        self.apply_attribute(ConfigKey::Min, Some(&format_attribute(value)));
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn set_max(&mut self, value: f64) {
        let value = if value.is_nan() { f64::INFINITY } else { value };
        self.apply_attribute(ConfigKey::Max, Some(&format_attribute(value)));
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn set_step(&mut self, value: f64) {
        let value = if value.is_nan() || value == 0.0 { 1.0 } else { value };
        self.apply_attribute(ConfigKey::Step, Some(&format_attribute(value)));
    }

    pub fn return_to_default(&self) -> bool {
        self.return_to_default
    }

    pub fn set_return_to_default(&mut self, enabled: bool) {
        let value = if enabled { Some("") } else { None };
        self.apply_attribute(ConfigKey::ReturnToDefault, value);
    }

    // Rotation
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Snaps `angle` to the step, clamps it into range and applies it.
    ///
    /// Returns the event to publish when `publish` is set. Non-finite angles
    /// are ignored.
    pub fn set_rotation(&mut self, angle: f64, publish: bool) -> Option<RotateEvent> {
        if !angle.is_finite() {
            log::warn!("Ignoring non-finite wheel rotation {}", angle);
            return None;
        }
        self.rotation = self.settle(angle);
        if publish {
            Some(RotateEvent::new(self.rotation))
        } else {
            None
        }
    }

    fn settle(&self, angle: f64) -> f64 {
        settle(angle, self.step, self.min, self.max)
    }
}

impl WheelDataAccess for WheelData {
    fn apply_attribute(&mut self, key: ConfigKey, value: Option<&str>) {
        match value {
            Some(value) => {
                self.attributes.insert(key, value.to_string());
            }
            None => {
                self.attributes.remove(&key);
            }
        }
        self.attribute_changed(key, value);
    }
}

impl RotationData for WheelData {
    fn get_rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64, publish: bool) -> Option<RotateEvent> {
        WheelData::set_rotation(self, angle, publish)
    }

    fn apply_rotation_delta(&mut self, delta: f64) -> Option<RotateEvent> {
        let rotation = self.settle(self.rotation + delta);
        if rotation == self.rotation {
            return None;
        }
        self.rotation = rotation;
        Some(RotateEvent::new(rotation))
    }

    fn release(&mut self) -> Option<RotateEvent> {
        if self.return_to_default {
            WheelData::set_rotation(self, self.default, true)
        } else {
            None
        }
    }
}
