//! Component Story Format parameter documents.
//!
//! ```json
//! {
//!   "name": "Example",
//!   "parameters": { "server": { "id": "example" }, "size": "large" },
//!   "args": { "title": "OK" },
//!   "argTypes": { "title": { "control": { "type": "text" }, "name": "Title" } }
//! }
//! ```
//!
//! `args` and `argTypes` are omitted when controls are disabled or nothing is
//! bound. Key order follows binding order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsfStory {
    pub name: String,
    pub parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg_types: Option<Map<String, Value>>,
}

impl CsfStory {
    /// The `parameters.server.id` the story was emitted with.
    pub fn server_id(&self) -> Option<&str> {
        self.parameters
            .get("server")
            .and_then(|server| server.get("id"))
            .and_then(Value::as_str)
    }
}

/// Recursively merge `overlay` into `base`. Nested objects merge key by key;
/// any other overlay value replaces the base value.
pub fn deep_merge(base: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (key, value) in overlay {
        if let (Some(Value::Object(existing)), Value::Object(incoming)) =
            (base.get_mut(key), value)
        {
            deep_merge(existing, incoming);
            continue;
        }
        base.insert(key.clone(), value.clone());
    }
}
