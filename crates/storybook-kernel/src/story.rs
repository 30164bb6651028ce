//! Story configs: a titled, identified binding of controls to a component
//! constructor.
//!
//! Validation runs the signature matcher over the bound positional and
//! keyword controls, then validates every control. Sibling checks never
//! short-circuit each other, so one report carries every failure:
//!
//! ```text
//! '<title>' invalid: (Constructor args invalid: (<arity>, <keywords>, Controls '<Name>' is invalid: (...)))
//! ```

use crate::control::{Control, display_name};
use crate::csf::{CsfStory, deep_merge};
use crate::error::{ErrorNode, Scope, ValidationError};
use crate::signature::Signature;
use indexmap::IndexMap;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone)]
pub struct StoryConfig {
    id: String,
    title: String,
    component: Signature,
    disable_controls: bool,
    args: Vec<Control>,
    kwargs: IndexMap<String, Control>,
    parameters: Map<String, Value>,
}

impl StoryConfig {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        component: Signature,
        disable_controls: bool,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            component,
            disable_controls,
            args: Vec::new(),
            kwargs: IndexMap::new(),
            parameters: Map::new(),
        }
    }

    /// Bind constructor arguments, replacing any previous binding.
    pub fn constructor<A, K, S>(&mut self, args: A, kwargs: K) -> &mut Self
    where
        A: IntoIterator<Item = Control>,
        K: IntoIterator<Item = (S, Control)>,
        S: Into<String>,
    {
        self.args = args.into_iter().collect();
        self.kwargs = kwargs.into_iter().map(|(k, c)| (k.into(), c)).collect();
        self
    }

    /// Bind positional arguments only.
    pub fn constructor_args<A>(&mut self, args: A) -> &mut Self
    where
        A: IntoIterator<Item = Control>,
    {
        self.constructor(args, Vec::<(String, Control)>::new())
    }

    /// Bind keyword arguments only.
    pub fn constructor_kwargs<K, S>(&mut self, kwargs: K) -> &mut Self
    where
        K: IntoIterator<Item = (S, Control)>,
        S: Into<String>,
    {
        self.constructor(Vec::<Control>::new(), kwargs)
    }

    /// Extra metadata merged into the emitted `parameters`.
    pub fn parameters(&mut self, parameters: Map<String, Value>) -> &mut Self {
        self.parameters = parameters;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn component(&self) -> &Signature {
        &self.component
    }

    pub fn controls_disabled(&self) -> bool {
        self.disable_controls
    }

    pub fn args(&self) -> &[Control] {
        &self.args
    }

    pub fn kwargs(&self) -> &IndexMap<String, Control> {
        &self.kwargs
    }

    pub fn extra_parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }

    /// Every binding with the parameter name it is emitted under: positional
    /// bindings in call order, then keyword bindings in declaration order.
    pub fn bindings(&self) -> Vec<(String, &Control)> {
        let positional = self
            .args
            .iter()
            .enumerate()
            .map(|(i, control)| (self.component.positional_name(i), control));
        let keyword = self
            .kwargs
            .iter()
            .map(|(name, control)| (name.clone(), control));
        positional.chain(keyword).collect()
    }

    /// Children of the `Constructor args invalid` scope; empty when valid.
    pub fn constructor_errors(&self) -> Vec<ErrorNode> {
        let mut errors: Vec<ErrorNode> = self
            .component
            .check_positional(self.args.len())
            .into_iter()
            .map(ErrorNode::from)
            .collect();

        let keys: Vec<&str> = self.kwargs.keys().map(String::as_str).collect();
        errors.extend(
            self.component
                .check_keywords(&keys)
                .into_iter()
                .map(ErrorNode::from),
        );

        for (name, control) in self.bindings() {
            let scope = Scope::Control {
                name: display_name(&name),
            };
            errors.extend(ErrorNode::nest(scope, control.validate()));
        }
        errors
    }

    /// The full error tree rooted at the story scope, if any check failed.
    pub fn errors(&self) -> Option<ErrorNode> {
        let constructor = ErrorNode::nest(Scope::ConstructorArgs, self.constructor_errors())?;
        ErrorNode::nest(
            Scope::Story {
                title: self.title.clone(),
            },
            vec![constructor],
        )
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let result = match self.errors() {
            Some(root) => Err(ValidationError::new(root)),
            None => Ok(()),
        };
        tracing::debug!(story = %self.id, valid = result.is_ok(), "story validated");
        result
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Validate, then render the CSF parameter document.
    ///
    /// Never emits a partial document: any failure returns the whole tree.
    pub fn to_csf_params(&self) -> Result<CsfStory, ValidationError> {
        if let Err(err) = self.validate() {
            tracing::warn!(story = %self.id, error = %err, "story failed validation");
            return Err(err);
        }

        let mut parameters = Map::new();
        parameters.insert("server".to_string(), json!({ "id": self.id }));
        deep_merge(&mut parameters, &self.parameters);

        let mut story = CsfStory {
            name: self.title.clone(),
            parameters,
            args: None,
            arg_types: None,
        };

        let bindings = self.bindings();
        if !self.disable_controls && !bindings.is_empty() {
            let mut args = Map::new();
            let mut arg_types = Map::new();
            for (name, control) in bindings {
                args.insert(name.clone(), control.value());
                arg_types.insert(name.clone(), control.arg_type(&display_name(&name)));
            }
            story.args = Some(args);
            story.arg_types = Some(arg_types);
        }

        tracing::debug!(story = %self.id, "story rendered");
        Ok(story)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_name_positional_then_keyword() {
        let mut story = StoryConfig::new(
            "s",
            "S",
            Signature::new().required("title").rest(None).keyword("size"),
            false,
        );
        story.constructor(
            [Control::text("a"), Control::text("b"), Control::text("c")],
            [("size", Control::text("large"))],
        );
        let names: Vec<String> = story.bindings().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["title", "items0", "items1", "size"]);
    }

    #[test]
    fn rebinding_replaces_previous_bindings() {
        let mut story = StoryConfig::new("s", "S", Signature::new().keyword("title"), false);
        story.constructor_kwargs([("junk", Control::text("x"))]);
        assert!(!story.is_valid());
        story.constructor_kwargs([("title", Control::text("x"))]);
        assert!(story.is_valid());
    }

    #[test]
    fn sibling_failures_all_surface() {
        let mut story = StoryConfig::new(
            "s",
            "S",
            Signature::new().required("a").keyword("flag"),
            false,
        );
        story.constructor(Vec::<Control>::new(), [("flag", Control::boolean("nope"))]);
        let err = story.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "'S' invalid: (Constructor args invalid: (Args expected at least 1 but found 0, Controls 'Flag' is invalid: (Default value is not included in the list)))"
        );
    }

    #[test]
    fn valid_story_has_no_errors() {
        let mut story = StoryConfig::new("s", "S", Signature::new().keyword("title"), false);
        story.constructor_kwargs([("title", Control::text("OK"))]);
        assert!(story.errors().is_none());
        assert!(story.constructor_errors().is_empty());
    }
}
