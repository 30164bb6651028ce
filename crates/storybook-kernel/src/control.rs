//! Controls: the value descriptors bound to constructor parameters.
//!
//! Each control carries a default value, an optional allowed-value constraint,
//! and the rendering kind the preview tool uses to draw an editor for it.
//! The variant set is closed; callers dispatch through [`Control::validate`],
//! [`Control::value`] and [`Control::arg_type`] rather than matching.

use crate::custom::CustomControl;
use crate::error::{ErrorNode, Violation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

/// Rendering tag emitted as `argTypes.<name>.control.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlKind {
    Text,
    Boolean,
    Number,
    Range,
    Color,
    Object,
    Date,
    Select,
    MultiSelect,
    Radio,
    InlineRadio,
    Check,
    InlineCheck,
    Custom,
}

impl ControlKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlKind::Text => "text",
            ControlKind::Boolean => "boolean",
            ControlKind::Number => "number",
            ControlKind::Range => "range",
            ControlKind::Color => "color",
            ControlKind::Object => "object",
            ControlKind::Date => "date",
            ControlKind::Select => "select",
            ControlKind::MultiSelect => "multi-select",
            ControlKind::Radio => "radio",
            ControlKind::InlineRadio => "inline-radio",
            ControlKind::Check => "check",
            ControlKind::InlineCheck => "inline-check",
            ControlKind::Custom => "custom",
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric control, drawn as a number field or a slider.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberControl {
    pub value: Value,
    pub min: Option<Value>,
    pub max: Option<Value>,
    pub step: Option<Value>,
    pub range: bool,
}

impl NumberControl {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            min: None,
            max: None,
            step: None,
            range: false,
        }
    }

    pub fn min(mut self, min: impl Into<Value>) -> Self {
        self.min = Some(min.into());
        self
    }

    pub fn max(mut self, max: impl Into<Value>) -> Self {
        self.max = Some(max.into());
        self
    }

    pub fn step(mut self, step: impl Into<Value>) -> Self {
        self.step = Some(step.into());
        self
    }

    /// Render as a slider.
    pub fn range(mut self) -> Self {
        self.range = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorControl {
    pub value: Value,
    pub preset_colors: Vec<String>,
}

/// Which editor an option list is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionsStyle {
    Select,
    MultiSelect,
    Radio,
    InlineRadio,
    Check,
    InlineCheck,
}

impl OptionsStyle {
    /// Styles whose value is a list of options rather than one option.
    pub fn is_multi(self) -> bool {
        matches!(
            self,
            OptionsStyle::MultiSelect | OptionsStyle::Check | OptionsStyle::InlineCheck
        )
    }

    fn kind(self) -> ControlKind {
        match self {
            OptionsStyle::Select => ControlKind::Select,
            OptionsStyle::MultiSelect => ControlKind::MultiSelect,
            OptionsStyle::Radio => ControlKind::Radio,
            OptionsStyle::InlineRadio => ControlKind::InlineRadio,
            OptionsStyle::Check => ControlKind::Check,
            OptionsStyle::InlineCheck => ControlKind::InlineCheck,
        }
    }
}

/// A value picked from a fixed option list.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionsControl {
    pub style: OptionsStyle,
    pub options: Vec<Value>,
    pub value: Value,
}

#[derive(Debug, Clone)]
pub enum Control {
    Text(Value),
    Boolean(Value),
    Number(NumberControl),
    Color(ColorControl),
    Object(Value),
    Date(DateTime<Utc>),
    Options(OptionsControl),
    Custom(CustomControl),
}

impl Control {
    pub fn text(value: impl Into<Value>) -> Self {
        Control::Text(value.into())
    }

    /// A boolean toggle. The value is not coerced, so a non-boolean default
    /// is representable and fails validation.
    pub fn boolean(value: impl Into<Value>) -> Self {
        Control::Boolean(value.into())
    }

    pub fn number(value: impl Into<Value>) -> Self {
        Control::Number(NumberControl::new(value))
    }

    pub fn color(value: impl Into<Value>) -> Self {
        Control::Color(ColorControl {
            value: value.into(),
            preset_colors: Vec::new(),
        })
    }

    pub fn color_with_presets<I, S>(value: impl Into<Value>, presets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Control::Color(ColorControl {
            value: value.into(),
            preset_colors: presets.into_iter().map(Into::into).collect(),
        })
    }

    pub fn object(value: impl Into<Value>) -> Self {
        Control::Object(value.into())
    }

    pub fn date(value: DateTime<Utc>) -> Self {
        Control::Date(value)
    }

    pub fn options<I, V>(style: OptionsStyle, options: I, value: impl Into<Value>) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Control::Options(OptionsControl {
            style,
            options: options.into_iter().map(Into::into).collect(),
            value: value.into(),
        })
    }

    pub fn select<I, V>(options: I, value: impl Into<Value>) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::options(OptionsStyle::Select, options, value)
    }

    pub fn kind(&self) -> ControlKind {
        match self {
            Control::Text(_) => ControlKind::Text,
            Control::Boolean(_) => ControlKind::Boolean,
            Control::Number(n) if n.range => ControlKind::Range,
            Control::Number(_) => ControlKind::Number,
            Control::Color(_) => ControlKind::Color,
            Control::Object(_) => ControlKind::Object,
            Control::Date(_) => ControlKind::Date,
            Control::Options(o) => o.style.kind(),
            Control::Custom(_) => ControlKind::Custom,
        }
    }

    /// The constraint on valid values; `None` means unconstrained.
    pub fn allowed_values(&self) -> Option<Vec<Value>> {
        match self {
            Control::Boolean(_) => Some(vec![Value::Bool(true), Value::Bool(false)]),
            Control::Options(o) => Some(o.options.clone()),
            Control::Custom(c) => c.allowed_values().map(<[Value]>::to_vec),
            _ => None,
        }
    }

    /// The plain value emitted under `args`.
    ///
    /// For a custom control this invokes its producer.
    pub fn value(&self) -> Value {
        match self {
            Control::Text(v) | Control::Boolean(v) | Control::Object(v) => v.clone(),
            Control::Number(n) => n.value.clone(),
            Control::Color(c) => c.value.clone(),
            Control::Date(d) => Value::from(d.timestamp_millis()),
            Control::Options(o) => o.value.clone(),
            Control::Custom(c) => c.value(),
        }
    }

    /// Validate this control. The returned nodes are the children of the
    /// control's `Controls '<Name>' is invalid` scope; empty means valid.
    pub fn validate(&self) -> Vec<ErrorNode> {
        match self {
            Control::Number(n) if !n.value.is_number() => vec![Violation::NotANumber.into()],
            Control::Options(o) if o.style.is_multi() => match &o.value {
                Value::Array(items) if items.iter().all(|i| o.options.contains(i)) => Vec::new(),
                Value::Array(_) => vec![Violation::ValueNotAllowed.into()],
                _ => vec![Violation::NotAnArray.into()],
            },
            Control::Custom(c) => c.validate(),
            _ => match self.allowed_values() {
                Some(allowed) if !allowed.contains(&self.value()) => {
                    vec![Violation::ValueNotAllowed.into()]
                }
                _ => Vec::new(),
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// The `argTypes` entry for this control under `display_name`.
    pub fn arg_type(&self, display_name: &str) -> Value {
        let mut control = Map::new();
        control.insert("type".to_string(), json!(self.kind().as_str()));

        match self {
            Control::Number(n) => {
                for (key, bound) in [("min", &n.min), ("max", &n.max), ("step", &n.step)] {
                    if let Some(bound) = bound {
                        control.insert(key.to_string(), bound.clone());
                    }
                }
            }
            Control::Color(c) if !c.preset_colors.is_empty() => {
                control.insert("presetColors".to_string(), json!(c.preset_colors));
            }
            _ => {}
        }

        let mut arg_type = Map::new();
        arg_type.insert("control".to_string(), Value::Object(control));
        if let Control::Options(o) = self {
            arg_type.insert("options".to_string(), Value::Array(o.options.clone()));
        }
        arg_type.insert("name".to_string(), json!(display_name));
        Value::Object(arg_type)
    }
}

impl From<NumberControl> for Control {
    fn from(control: NumberControl) -> Self {
        Control::Number(control)
    }
}

impl From<CustomControl> for Control {
    fn from(control: CustomControl) -> Self {
        Control::Custom(control)
    }
}

impl From<OptionsControl> for Control {
    fn from(control: OptionsControl) -> Self {
        Control::Options(control)
    }
}

/// Human display name for a parameter: words split on `_`, `-`, whitespace and
/// camelCase boundaries, each capitalised.
///
/// `title` → `Title`, `items0` → `Items0`, `background_color` → `Background Color`.
pub fn display_name(param: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in param.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
