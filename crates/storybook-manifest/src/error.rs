use storybook_kernel::SignatureError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("component `{component}`: {source}")]
    InvalidSignature {
        component: String,
        #[source]
        source: SignatureError,
    },

    #[error("story `{story}` references unknown component `{component}`")]
    UnknownComponent { story: String, component: String },

    #[error("duplicate story id `{0}`")]
    DuplicateStory(String),

    #[error("unknown story `{0}`")]
    UnknownStory(String),

    #[error("{path}: unknown producer `{producer}`")]
    UnknownProducer { path: String, producer: String },

    #[error("{path}: {message}")]
    InvalidControl { path: String, message: String },
}
