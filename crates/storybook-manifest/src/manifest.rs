//! Story manifests.
//!
//! A manifest declares component signatures once and any number of stories
//! against them. Loading checks structure (TOML shape, well-formed component
//! signatures, unique story ids, resolvable component references); building
//! a story converts its control specs. Story *validity* is left to the
//! kernel so that every story can be reported, valid or not.

use crate::controls::ControlSpec;
use crate::error::ManifestError;
use crate::producers::ProducerRegistry;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use storybook_kernel::{Signature, StoryConfig};

#[derive(Debug, Clone, Deserialize)]
pub struct StorySpec {
    pub id: String,
    pub title: String,
    pub component: String,
    #[serde(default)]
    pub disable_controls: bool,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub args: Vec<ControlSpec>,
    #[serde(default)]
    pub kwargs: IndexMap<String, ControlSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    components: IndexMap<String, Signature>,
    #[serde(default)]
    stories: Vec<StorySpec>,
}

#[derive(Debug, Clone)]
pub struct Manifest {
    components: IndexMap<String, Signature>,
    stories: Vec<StorySpec>,
    producers: ProducerRegistry,
}

impl Manifest {
    /// Load and check a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ManifestError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ManifestError> {
        Self::parse(text, "<inline>")
    }

    fn parse(text: &str, origin: &str) -> Result<Self, ManifestError> {
        let file: ManifestFile = toml::from_str(text).map_err(|source| ManifestError::ParseToml {
            path: origin.to_string(),
            source,
        })?;

        for (name, signature) in &file.components {
            signature
                .check()
                .map_err(|source| ManifestError::InvalidSignature {
                    component: name.clone(),
                    source,
                })?;
        }

        let mut seen = BTreeSet::new();
        for story in &file.stories {
            if !seen.insert(story.id.as_str()) {
                return Err(ManifestError::DuplicateStory(story.id.clone()));
            }
            if !file.components.contains_key(&story.component) {
                return Err(ManifestError::UnknownComponent {
                    story: story.id.clone(),
                    component: story.component.clone(),
                });
            }
        }

        tracing::debug!(
            origin,
            components = file.components.len(),
            stories = file.stories.len(),
            "manifest loaded"
        );
        Ok(Self {
            components: file.components,
            stories: file.stories,
            producers: ProducerRegistry::default(),
        })
    }

    /// Replace the producer registry used for custom controls.
    pub fn with_producers(mut self, producers: ProducerRegistry) -> Self {
        self.producers = producers;
        self
    }

    pub fn component(&self, name: &str) -> Option<&Signature> {
        self.components.get(name)
    }

    pub fn story_ids(&self) -> Vec<&str> {
        self.stories.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn story_specs(&self) -> &[StorySpec] {
        &self.stories
    }

    /// Build one story config by id.
    pub fn story(&self, id: &str) -> Result<StoryConfig, ManifestError> {
        let spec = self
            .stories
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ManifestError::UnknownStory(id.to_string()))?;
        self.build_story(spec)
    }

    /// Build every story config in declaration order.
    pub fn stories(&self) -> Result<Vec<StoryConfig>, ManifestError> {
        self.stories.iter().map(|spec| self.build_story(spec)).collect()
    }

    fn build_story(&self, spec: &StorySpec) -> Result<StoryConfig, ManifestError> {
        let component = self.components.get(&spec.component).ok_or_else(|| {
            ManifestError::UnknownComponent {
                story: spec.id.clone(),
                component: spec.component.clone(),
            }
        })?;

        let base = format!("stories[{}]", spec.id);
        let args = spec
            .args
            .iter()
            .enumerate()
            .map(|(i, control)| control.build(&self.producers, &format!("{base}.args[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;
        let kwargs = spec
            .kwargs
            .iter()
            .map(|(name, control)| {
                control
                    .build(&self.producers, &format!("{base}.kwargs.{name}"))
                    .map(|c| (name.clone(), c))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut story = StoryConfig::new(
            spec.id.clone(),
            spec.title.clone(),
            component.clone(),
            spec.disable_controls,
        );
        story
            .constructor(args, kwargs)
            .parameters(spec.parameters.clone());
        Ok(story)
    }
}
