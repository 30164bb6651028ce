//! Control specs as written in a manifest, and their conversion to kernel
//! [`Control`]s.
//!
//! ```toml
//! [stories.kwargs.size]
//! control = "select"
//! options = ["small", "large"]
//! value = "large"
//! ```

use crate::error::ManifestError;
use crate::producers::{ProducerOptions, ProducerRegistry};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use storybook_kernel::{Control, CustomControl, NumberControl, OptionsStyle};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "control", rename_all = "kebab-case")]
pub enum ControlSpec {
    Text { value: Value },
    Boolean { value: Value },
    Number(NumberSpec),
    Range(NumberSpec),
    Color {
        value: Value,
        #[serde(default)]
        preset_colors: Vec<String>,
    },
    Object { value: Value },
    /// RFC 3339 timestamp.
    Date { value: String },
    Select(OptionsSpec),
    MultiSelect(OptionsSpec),
    Radio(OptionsSpec),
    InlineRadio(OptionsSpec),
    Check(OptionsSpec),
    InlineCheck(OptionsSpec),
    Custom(CustomSpec),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NumberSpec {
    pub value: Value,
    #[serde(default)]
    pub min: Option<Value>,
    #[serde(default)]
    pub max: Option<Value>,
    #[serde(default)]
    pub step: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OptionsSpec {
    pub options: Vec<Value>,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomSpec {
    pub producer: String,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub args: IndexMap<String, ControlSpec>,
    #[serde(default)]
    pub allowed: Option<Vec<Value>>,
}

impl NumberSpec {
    fn build(&self, range: bool) -> Control {
        let mut control = NumberControl::new(self.value.clone());
        control.min = self.min.clone();
        control.max = self.max.clone();
        control.step = self.step.clone();
        control.range = range;
        control.into()
    }
}

impl OptionsSpec {
    fn build(&self, style: OptionsStyle) -> Control {
        Control::options(style, self.options.iter().cloned(), self.value.clone())
    }
}

impl ControlSpec {
    /// Convert to a kernel control. `path` names this spec in error reports,
    /// e.g. `stories[example].kwargs.title`.
    pub fn build(&self, producers: &ProducerRegistry, path: &str) -> Result<Control, ManifestError> {
        let control = match self {
            ControlSpec::Text { value } => Control::text(value.clone()),
            ControlSpec::Boolean { value } => Control::boolean(value.clone()),
            ControlSpec::Number(spec) => spec.build(false),
            ControlSpec::Range(spec) => spec.build(true),
            ControlSpec::Color {
                value,
                preset_colors,
            } => Control::color_with_presets(value.clone(), preset_colors.iter().cloned()),
            ControlSpec::Object { value } => Control::object(value.clone()),
            ControlSpec::Date { value } => {
                let parsed = DateTime::parse_from_rfc3339(value).map_err(|e| {
                    ManifestError::InvalidControl {
                        path: path.to_string(),
                        message: format!("invalid date `{value}`: {e}"),
                    }
                })?;
                Control::date(parsed.with_timezone(&Utc))
            }
            ControlSpec::Select(spec) => spec.build(OptionsStyle::Select),
            ControlSpec::MultiSelect(spec) => spec.build(OptionsStyle::MultiSelect),
            ControlSpec::Radio(spec) => spec.build(OptionsStyle::Radio),
            ControlSpec::InlineRadio(spec) => spec.build(OptionsStyle::InlineRadio),
            ControlSpec::Check(spec) => spec.build(OptionsStyle::Check),
            ControlSpec::InlineCheck(spec) => spec.build(OptionsStyle::InlineCheck),
            ControlSpec::Custom(spec) => spec.build(producers, path)?.into(),
        };
        Ok(control)
    }
}

impl CustomSpec {
    fn build(&self, producers: &ProducerRegistry, path: &str) -> Result<CustomControl, ManifestError> {
        let options = ProducerOptions {
            template: self.template.clone(),
            fields: self.fields.clone(),
        };
        let producer = producers.build(&self.producer, &options, path)?;

        let mut args: Vec<(String, Control)> = Vec::with_capacity(self.args.len());
        for (name, spec) in &self.args {
            let control = spec.build(producers, &format!("{path}.args.{name}"))?;
            args.push((name.clone(), control));
        }

        let mut control = CustomControl::new(producer).with_value(args);
        if let Some(allowed) = &self.allowed {
            control = control.with_allowed_values(allowed.iter().cloned());
        }
        Ok(control)
    }
}
