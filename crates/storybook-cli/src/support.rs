use serde::Serialize;
use storybook_kernel::StoryConfig;
use storybook_manifest::Manifest;
use tracing_subscriber::EnvFilter;

/// Log to stderr. `RUST_LOG` overrides the default `warn` filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub fn load_manifest_or_exit(path: &str) -> Manifest {
    Manifest::load(path).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn stories_or_exit(manifest: &Manifest, only: Option<&str>) -> Vec<StoryConfig> {
    let stories = match only {
        Some(id) => manifest.story(id).map(|story| vec![story]),
        None => manifest.stories(),
    };
    stories.unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    println!("{}", rendered.expect("json serialization"));
}
