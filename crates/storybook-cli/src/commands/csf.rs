use crate::support::{load_manifest_or_exit, print_json, stories_or_exit};
use serde_json::json;

pub fn run(manifest: String, story: Option<String>, compact: bool) {
    let loaded = load_manifest_or_exit(&manifest);
    let stories = stories_or_exit(&loaded, story.as_deref());

    let mut documents = Vec::with_capacity(stories.len());
    for config in &stories {
        match config.to_csf_params() {
            Ok(doc) => documents.push(doc),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    }

    let pretty = !compact;
    if story.is_some() {
        if let Some(doc) = documents.first() {
            print_json(doc, pretty);
        }
    } else {
        print_json(&json!({ "stories": documents }), pretty);
    }
}
