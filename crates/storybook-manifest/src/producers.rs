//! Named producer factories for custom controls.
//!
//! A manifest cannot carry code, so custom controls name a producer and pass
//! it options. Built-ins:
//!
//! - `template`: `template = "{greeting} Sarah"`. Declares one keyword per
//!   `{name}` placeholder (first-seen order) and substitutes resolved values.
//!   Strings are inserted raw; other values as JSON text.
//! - `object`: `fields = ["a", "b"]`. Declares those keywords and produces a
//!   JSON object of the resolved values in field order.

use crate::error::ManifestError;
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};
use storybook_kernel::{Producer, Signature};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern compiles")
});

/// Options a custom control passes to its producer factory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProducerOptions {
    pub template: Option<String>,
    pub fields: Vec<String>,
}

/// Builds a producer from options, or explains why it cannot.
pub type ProducerFactory = dyn Fn(&ProducerOptions) -> Result<Producer, String> + Send + Sync;

#[derive(Clone)]
pub struct ProducerRegistry {
    factories: BTreeMap<String, Arc<ProducerFactory>>,
}

impl ProducerRegistry {
    /// A registry with no producers, not even the built-ins.
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&ProducerOptions) -> Result<Producer, String> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Build the producer `name`. `path` locates the control for error reports.
    pub fn build(
        &self,
        name: &str,
        options: &ProducerOptions,
        path: &str,
    ) -> Result<Producer, ManifestError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ManifestError::UnknownProducer {
                path: path.to_string(),
                producer: name.to_string(),
            })?;
        factory(options).map_err(|message| ManifestError::InvalidControl {
            path: path.to_string(),
            message,
        })
    }
}

impl Default for ProducerRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register("template", template_producer)
            .register("object", object_producer);
        registry
    }
}

impl fmt::Debug for ProducerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProducerRegistry")
            .field("producers", &self.names())
            .finish()
    }
}

/// Placeholder names in first-seen order, without duplicates.
pub fn template_keywords(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(template) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

fn render_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn template_producer(options: &ProducerOptions) -> Result<Producer, String> {
    let template = options
        .template
        .clone()
        .ok_or_else(|| "template producer requires `template`".to_string())?;
    let signature = Signature::keywords_only(template_keywords(&template));
    Ok(Producer::new(signature, move |args: &Map<String, Value>| {
        let rendered = PLACEHOLDER.replace_all(&template, |caps: &Captures| {
            render_value(args.get(&caps[1]))
        });
        Value::String(rendered.into_owned())
    }))
}

fn object_producer(options: &ProducerOptions) -> Result<Producer, String> {
    if options.fields.is_empty() {
        return Err("object producer requires non-empty `fields`".to_string());
    }
    let fields = options.fields.clone();
    let signature = Signature::keywords_only(fields.iter().cloned());
    Ok(Producer::new(signature, move |args: &Map<String, Value>| {
        let object: Map<String, Value> = fields
            .iter()
            .map(|field| (field.clone(), args.get(field).cloned().unwrap_or(Value::Null)))
            .collect();
        Value::Object(object)
    }))
}
