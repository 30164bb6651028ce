//! Custom controls: values computed by a producer from other controls.
//!
//! A [`Producer`] is a function value paired with the keyword signature it
//! accepts. A [`CustomControl`] binds named controls to that signature; its
//! value is the producer applied to each bound control's resolved value.

use crate::control::{Control, display_name};
use crate::error::{ErrorNode, Scope, Violation};
use crate::signature::Signature;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// The callable behind a producer. Receives resolved keyword arguments.
pub type ProducerFn = dyn Fn(&Map<String, Value>) -> Value + Send + Sync;

/// A value-producing callable with an introspectable keyword signature.
#[derive(Clone)]
pub struct Producer {
    signature: Signature,
    func: Arc<ProducerFn>,
}

impl Producer {
    pub fn new<F>(signature: Signature, func: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> Value + Send + Sync + 'static,
    {
        Self {
            signature,
            func: Arc::new(func),
        }
    }

    /// A producer accepting exactly the keywords `names`.
    pub fn with_keywords<I, S, F>(names: I, func: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Map<String, Value>) -> Value + Send + Sync + 'static,
    {
        Self::new(Signature::keywords_only(names), func)
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn call(&self, args: &Map<String, Value>) -> Value {
        (self.func)(args)
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct CustomControl {
    producer: Producer,
    value_args: IndexMap<String, Control>,
    allowed: Option<Vec<Value>>,
}

impl CustomControl {
    pub fn new(producer: Producer) -> Self {
        Self {
            producer,
            value_args: IndexMap::new(),
            allowed: None,
        }
    }

    /// Bind the producer's keyword arguments. Order is kept for error reports.
    pub fn with_value<I, K>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = (K, Control)>,
        K: Into<String>,
    {
        self.value_args = args.into_iter().map(|(k, c)| (k.into(), c)).collect();
        self
    }

    /// Constrain the produced value.
    pub fn with_allowed_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn producer(&self) -> &Producer {
        &self.producer
    }

    pub fn value_args(&self) -> &IndexMap<String, Control> {
        &self.value_args
    }

    pub fn allowed_values(&self) -> Option<&[Value]> {
        self.allowed.as_deref()
    }

    /// Each bound argument resolved to its own emitted value.
    pub fn resolved_args(&self) -> Map<String, Value> {
        self.value_args
            .iter()
            .map(|(name, control)| (name.clone(), control.value()))
            .collect()
    }

    pub fn value(&self) -> Value {
        tracing::debug!(
            args = ?self.value_args.keys().collect::<Vec<_>>(),
            "invoking custom control producer"
        );
        self.producer.call(&self.resolved_args())
    }

    /// Argument errors are scoped under `Value method args invalid`; the
    /// producer only runs once its arguments are sound.
    pub fn validate(&self) -> Vec<ErrorNode> {
        let keys: Vec<&str> = self.value_args.keys().map(String::as_str).collect();
        let mut arg_errors: Vec<ErrorNode> = self
            .producer
            .signature()
            .check_keywords(&keys)
            .into_iter()
            .map(ErrorNode::from)
            .collect();

        for (name, control) in &self.value_args {
            let scope = Scope::Control {
                name: display_name(name),
            };
            arg_errors.extend(ErrorNode::nest(scope, control.validate()));
        }

        if let Some(node) = ErrorNode::nest(Scope::ValueMethodArgs, arg_errors) {
            return vec![node];
        }

        match &self.allowed {
            Some(allowed) if !allowed.contains(&self.value()) => {
                vec![Violation::ValueNotAllowed.into()]
            }
            _ => Vec::new(),
        }
    }
}
