use crate::support::{load_manifest_or_exit, print_json, stories_or_exit};
use serde_json::json;

pub fn run(manifest: String, json_output: bool) {
    let loaded = load_manifest_or_exit(&manifest);
    let stories = stories_or_exit(&loaded, None);

    let results: Vec<(String, Option<String>)> = stories
        .iter()
        .map(|story| {
            let error = story.validate().err().map(|e| e.to_string());
            (story.id().to_string(), error)
        })
        .collect();
    let all_valid = results.iter().all(|(_, error)| error.is_none());

    if json_output {
        let rows: Vec<_> = results
            .iter()
            .map(|(id, error)| match error {
                Some(message) => json!({ "id": id, "valid": false, "error": message }),
                None => json!({ "id": id, "valid": true }),
            })
            .collect();
        print_json(&json!({ "valid": all_valid, "stories": rows }), true);
    } else {
        for (id, error) in &results {
            match error {
                Some(message) => println!("invalid {id}: {message}"),
                None => println!("ok {id}"),
            }
        }
    }

    if !all_valid {
        std::process::exit(1);
    }
}
