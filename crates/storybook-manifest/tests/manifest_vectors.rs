//! Integration tests: run the manifest test vectors.
//!
//! Each fixture in tests/fixtures/ has:
//! - manifest.toml: components and stories
//! - expect.json: per story, either the emitted `csf` document or the
//!   rendered validation `error`
//!
//! Every story in the manifest is rendered, valid or not, and the whole
//! report is compared to the expected one.

use serde_json::{Value, json};
use std::path::PathBuf;
use storybook_manifest::Manifest;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn render_report(manifest: &Manifest) -> Value {
    let stories = manifest
        .stories()
        .expect("fixture stories should build")
        .iter()
        .map(|story| match story.to_csf_params() {
            Ok(csf) => json!({
                "id": story.id(),
                "csf": serde_json::to_value(&csf).expect("csf serializes"),
            }),
            Err(err) => json!({ "id": story.id(), "error": err.to_string() }),
        })
        .collect::<Vec<_>>();
    json!({ "stories": stories })
}

fn run_fixture(name: &str) {
    let dir = fixtures_dir().join(name);
    let manifest_path = dir.join("manifest.toml");
    let expect_path = dir.join("expect.json");

    let manifest = Manifest::load(&manifest_path)
        .unwrap_or_else(|e| panic!("failed to load {}: {e}", manifest_path.display()));
    let expect_str = std::fs::read_to_string(&expect_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", expect_path.display()));
    let expected: Value = serde_json::from_str(&expect_str)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", expect_path.display()));

    let report = render_report(&manifest);

    assert_eq!(
        report,
        expected,
        "\n\nFixture: {name}\n\nGot:\n{}\n\nExpected:\n{}\n",
        serde_json::to_string_pretty(&report).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap(),
    );
}

#[test]
fn golden_reference_components() {
    run_fixture("golden_reference_components");
}

#[test]
fn golden_rich_controls() {
    run_fixture("golden_rich_controls");
}

#[test]
fn adversarial_invalid_stories() {
    run_fixture("adversarial_invalid_stories");
}

#[test]
fn rich_controls_emit_in_binding_order() {
    let manifest = Manifest::load(fixtures_dir().join("golden_rich_controls/manifest.toml"))
        .expect("fixture loads");
    let story = manifest.story("card_default").expect("story builds");
    let csf = story.to_csf_params().expect("story is valid");
    let keys: Vec<&str> = csf
        .args
        .as_ref()
        .expect("args emitted")
        .keys()
        .map(String::as_str)
        .collect();
    insta::assert_json_snapshot!(keys, @r#"
    [
      "heading",
      "size",
      "tags",
      "background_color",
      "columns",
      "published_at",
      "data",
      "greeting",
      "summary"
    ]
    "#);
}
