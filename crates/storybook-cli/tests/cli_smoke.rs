use serde_json::{Value, json};
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

const VALID_MANIFEST: &str = r#"
[components.example]
keywords = [{ name = "title" }]

[components.args]
positional = [{ name = "items", kind = "rest" }]

[[stories]]
id = "example_story_config"
title = "Example Story Config"
component = "example"

[stories.kwargs.title]
control = "text"
value = "OK"

[[stories]]
id = "args_story_config"
title = "Args Story Config"
component = "args"
args = [{ control = "text", value = "OK" }]
"#;

const INVALID_MANIFEST: &str = r#"
[components.example]
keywords = [{ name = "title" }]

[[stories]]
id = "good"
title = "Good"
component = "example"

[stories.kwargs.title]
control = "text"
value = "OK"

[[stories]]
id = "junk"
title = "Example Story Config"
component = "example"

[stories.kwargs.junk]
control = "text"
value = "OK"
"#;

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "storybook-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path.join(name);
        fs::write(&path, contents).expect("fixture should be written");
        path
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_storybook<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_storybook");
    Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("storybook command should execute")
}

fn assert_exit(output: &Output, success: bool) {
    assert_eq!(
        output.status.success(),
        success,
        "unexpected exit status {:?}\nstdout:\n{}\nstderr:\n{}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not json: {e}\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

#[test]
fn csf_emits_all_stories() {
    let tmp = TempDirGuard::new("csf-all");
    let manifest = tmp.write("stories.toml", VALID_MANIFEST);

    let output = run_storybook([OsStr::new("csf"), manifest.as_os_str()]);
    assert_exit(&output, true);
    assert_eq!(
        stdout_json(&output),
        json!({
            "stories": [
                {
                    "name": "Example Story Config",
                    "parameters": { "server": { "id": "example_story_config" } },
                    "args": { "title": "OK" },
                    "argTypes": { "title": { "control": { "type": "text" }, "name": "Title" } }
                },
                {
                    "name": "Args Story Config",
                    "parameters": { "server": { "id": "args_story_config" } },
                    "args": { "items0": "OK" },
                    "argTypes": { "items0": { "control": { "type": "text" }, "name": "Items0" } }
                }
            ]
        })
    );
}

#[test]
fn csf_single_story_compact() {
    let tmp = TempDirGuard::new("csf-one");
    let manifest = tmp.write("stories.toml", VALID_MANIFEST);

    let output = run_storybook([
        OsStr::new("csf"),
        manifest.as_os_str(),
        OsStr::new("--story"),
        OsStr::new("args_story_config"),
        OsStr::new("--compact"),
    ]);
    assert_exit(&output, true);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim_end(),
        r#"{"name":"Args Story Config","parameters":{"server":{"id":"args_story_config"}},"args":{"items0":"OK"},"argTypes":{"items0":{"control":{"type":"text"},"name":"Items0"}}}"#
    );
}

#[test]
fn csf_fails_on_invalid_story() {
    let tmp = TempDirGuard::new("csf-invalid");
    let manifest = tmp.write("stories.toml", INVALID_MANIFEST);

    let output = run_storybook([OsStr::new("csf"), manifest.as_os_str()]);
    assert_exit(&output, false);
    assert!(output.stdout.is_empty(), "no partial document on stdout");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(
        "error: 'Example Story Config' invalid: (Constructor args invalid: (Kwargs 'junk' is invalid, Kwargs expected keys [title] but found [junk]))"
    ));
}

#[test]
fn check_reports_every_story() {
    let tmp = TempDirGuard::new("check-json");
    let manifest = tmp.write("stories.toml", INVALID_MANIFEST);

    let output = run_storybook([OsStr::new("check"), manifest.as_os_str(), OsStr::new("--json")]);
    assert_exit(&output, false);
    assert_eq!(
        stdout_json(&output),
        json!({
            "valid": false,
            "stories": [
                { "id": "good", "valid": true },
                {
                    "id": "junk",
                    "valid": false,
                    "error": "'Example Story Config' invalid: (Constructor args invalid: (Kwargs 'junk' is invalid, Kwargs expected keys [title] but found [junk]))"
                }
            ]
        })
    );
}

#[test]
fn check_text_output_passes_valid_manifest() {
    let tmp = TempDirGuard::new("check-text");
    let manifest = tmp.write("stories.toml", VALID_MANIFEST);

    let output = run_storybook([OsStr::new("check"), manifest.as_os_str()]);
    assert_exit(&output, true);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["ok example_story_config", "ok args_story_config"]);
}

#[test]
fn check_text_output_one_line_per_story() {
    let tmp = TempDirGuard::new("check-text-invalid");
    let manifest = tmp.write("stories.toml", INVALID_MANIFEST);

    let output = run_storybook([OsStr::new("check"), manifest.as_os_str()]);
    assert_exit(&output, false);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "ok good",
            "invalid junk: 'Example Story Config' invalid: (Constructor args invalid: (Kwargs 'junk' is invalid, Kwargs expected keys [title] but found [junk]))",
        ]
    );
}

#[test]
fn missing_manifest_is_an_error() {
    let tmp = TempDirGuard::new("missing");
    let missing = tmp.path.join("nope.toml");

    let output = run_storybook([OsStr::new("check"), missing.as_os_str()]);
    assert_exit(&output, false);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: failed to read manifest"));
}

#[test]
fn unknown_story_is_an_error() {
    let tmp = TempDirGuard::new("unknown-story");
    let manifest = tmp.write("stories.toml", VALID_MANIFEST);

    let output = run_storybook([
        OsStr::new("csf"),
        manifest.as_os_str(),
        OsStr::new("--story"),
        OsStr::new("ghost"),
    ]);
    assert_exit(&output, false);
    assert!(String::from_utf8_lossy(&output.stderr).contains("error: unknown story `ghost`"));
}

#[test]
fn malformed_component_signature_is_an_error() {
    let tmp = TempDirGuard::new("bad-signature");
    let manifest = tmp.write(
        "stories.toml",
        r#"
[components.card]
positional = [{ name = "a", kind = "rest" }, { name = "b", kind = "required" }]
"#,
    );

    let output = run_storybook([OsStr::new("check"), manifest.as_os_str()]);
    assert_exit(&output, false);
    assert!(String::from_utf8_lossy(&output.stderr).contains(
        "error: component `card`: rest parameter must be the last positional parameter"
    ));
}
