//! Per-call rendering preferences requested by the host
//!
//! The host sends view options as a loose JSON object. Known keys are parsed
//! into [`ViewOption`] variants; anything else is kept verbatim as
//! [`ViewOption::Unrecognized`] so newer hosts can pass options through an
//! older registry without losing them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const KEY_MIRROR: &str = "isMirror";
const KEY_OVERLAY: &str = "isOverlay";
const KEY_SCALING: &str = "scalingType";

/// How a video frame is fitted into its view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalingType {
    /// Fill the view, cropping if needed
    #[default]
    Fill,
    /// Fit inside the view, letterboxing if needed
    Fit,
}

impl ScalingType {
    /// Wire name used by the host
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalingType::Fill => "FILL",
            ScalingType::Fit => "FIT",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "FILL" => Some(ScalingType::Fill),
            "FIT" => Some(ScalingType::Fit),
            _ => None,
        }
    }
}

/// One rendering option
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOption {
    /// Mirror the local preview horizontally
    Mirror(bool),
    /// Draw the view above sibling views
    Overlay(bool),
    /// Frame scaling mode
    Scaling(ScalingType),
    /// Key or value shape this registry does not know about
    Unrecognized(Value),
}

impl ViewOption {
    fn to_value(&self) -> Value {
        match self {
            ViewOption::Mirror(flag) | ViewOption::Overlay(flag) => Value::Bool(*flag),
            ViewOption::Scaling(scaling) => Value::String(scaling.as_str().to_string()),
            ViewOption::Unrecognized(value) => value.clone(),
        }
    }
}

/// Canonical key for a host-supplied option name
fn canonical_key(key: &str) -> &str {
    match key {
        "mirror" => KEY_MIRROR,
        "overlay" => KEY_OVERLAY,
        "scaling" => KEY_SCALING,
        other => other,
    }
}

/// Rendering preferences for one call
///
/// Stored in the registry under the call's identifier but with a lifecycle of
/// its own: options may arrive before the call object exists and stay until
/// removed explicitly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ViewOptions {
    options: BTreeMap<String, ViewOption>,
}

impl ViewOptions {
    /// Empty option set; every accessor reports its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the JSON object sent by the host
    pub fn from_json_map(map: Map<String, Value>) -> Self {
        let mut options = Self::new();
        for (key, value) in map {
            options.set_raw(&key, value);
        }
        options
    }

    /// Parse a raw JSON value; anything but an object yields no options
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::from_json_map(map),
            other => {
                tracing::debug!("Ignoring non-object view options: {}", other);
                Self::new()
            }
        }
    }

    /// Set the mirror flag
    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.set(KEY_MIRROR, ViewOption::Mirror(mirror));
        self
    }

    /// Set the overlay flag
    pub fn with_overlay(mut self, overlay: bool) -> Self {
        self.set(KEY_OVERLAY, ViewOption::Overlay(overlay));
        self
    }

    /// Set the scaling mode
    pub fn with_scaling(mut self, scaling: ScalingType) -> Self {
        self.set(KEY_SCALING, ViewOption::Scaling(scaling));
        self
    }

    /// Insert a typed option under `key`.
    ///
    /// Short aliases map to their canonical key. A variant that does not
    /// belong to the key is stored as [`ViewOption::Unrecognized`].
    pub fn set(&mut self, key: &str, option: ViewOption) {
        let key = canonical_key(key);
        let matches_key = matches!(
            (key, &option),
            (KEY_MIRROR, ViewOption::Mirror(_))
                | (KEY_OVERLAY, ViewOption::Overlay(_))
                | (KEY_SCALING, ViewOption::Scaling(_))
                | (_, ViewOption::Unrecognized(_))
        );
        let option = if matches_key {
            option
        } else {
            ViewOption::Unrecognized(option.to_value())
        };
        self.options.insert(key.to_string(), option);
    }

    /// Insert a raw host value, typing it when the key is known
    pub fn set_raw(&mut self, key: &str, value: Value) {
        let key = canonical_key(key);
        let typed = match (key, &value) {
            (KEY_MIRROR, Value::Bool(flag)) => Some(ViewOption::Mirror(*flag)),
            (KEY_OVERLAY, Value::Bool(flag)) => Some(ViewOption::Overlay(*flag)),
            (KEY_SCALING, Value::String(name)) => ScalingType::parse(name).map(ViewOption::Scaling),
            _ => None,
        };
        let option = typed.unwrap_or(ViewOption::Unrecognized(value));
        self.options.insert(key.to_string(), option);
    }

    /// Option stored under `key`
    pub fn get(&self, key: &str) -> Option<&ViewOption> {
        self.options.get(canonical_key(key))
    }

    /// Whether the local preview is mirrored (default: no)
    pub fn mirror(&self) -> bool {
        matches!(self.options.get(KEY_MIRROR), Some(ViewOption::Mirror(true)))
    }

    /// Whether the view is drawn as an overlay (default: no)
    pub fn overlay(&self) -> bool {
        matches!(self.options.get(KEY_OVERLAY), Some(ViewOption::Overlay(true)))
    }

    /// Scaling mode (default: [`ScalingType::Fill`])
    pub fn scaling(&self) -> ScalingType {
        match self.options.get(KEY_SCALING) {
            Some(ViewOption::Scaling(scaling)) => *scaling,
            _ => ScalingType::default(),
        }
    }

    /// Options the registry could not type
    pub fn unrecognized(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.options.iter().filter_map(|(key, option)| match option {
            ViewOption::Unrecognized(value) => Some((key.as_str(), value)),
            _ => None,
        })
    }

    /// Number of options set
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether no option is set
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// JSON object in the host's format
    pub fn to_json_map(&self) -> Map<String, Value> {
        self.options
            .iter()
            .map(|(key, option)| (key.clone(), option.to_value()))
            .collect()
    }
}

impl From<Map<String, Value>> for ViewOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self::from_json_map(map)
    }
}

impl From<ViewOptions> for Map<String, Value> {
    fn from(options: ViewOptions) -> Self {
        options.to_json_map()
    }
}
