//! Init command implementation
//!
//! Scaffolds a working directory for the GreenAyu client.

use super::output::Output;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// greenayu.toml already exists
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// Inference backend base URL
    pub backend_url: String,
    /// Keep the requested page across the sign-in redirect
    pub preserve_destination: bool,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing GreenAyu");

    let base_path = &config.path;

    let config_path = base_path.join("greenayu.toml");
    if config_path.exists() && !config.force {
        output.warning("greenayu.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    let data_dir = base_path.join("data");
    if data_dir.exists() {
        output.skipped("data", "already exists");
    } else {
        if let Err(e) = fs::create_dir_all(&data_dir) {
            output.error(&format!("Failed to create data: {}", e));
            return InitResult::Error(e.to_string());
        }
        output.created("directory", "data");
    }

    if let Err(e) = write_file(&config_path, &generate_greenayu_toml(&config), config.force) {
        output.error(&format!("Failed to create greenayu.toml: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", "greenayu.toml");

    let env_example_path = base_path.join(".env.example");
    if let Err(e) = write_file(&env_example_path, &generate_env_example(&config), config.force) {
        output.error(&format!("Failed to create .env.example: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("env", ".env.example");

    let gitignore_path = base_path.join(".gitignore");
    if gitignore_path.exists() {
        output.skipped(".gitignore", "already exists");
    } else if let Err(e) = write_file(&gitignore_path, GITIGNORE, false) {
        output.warning(&format!("Failed to create .gitignore: {}", e));
    } else {
        output.created("file", ".gitignore");
    }

    output.complete("GreenAyu initialized");

    output.header("Next Steps");
    output.info("1. Start the inference backend, then check the URL:");
    output.command("greenayu config --validate");
    output.info("2. Sign in with the demo account:");
    output.command("greenayu login");
    output.info("3. Run a prediction:");
    output.command("greenayu shelf-life --storage ambient");

    InitResult::Success
}

/// Writes `content` unless `path` exists and `force` is off.
fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(());
    }
    fs::write(path, content)
}

fn generate_greenayu_toml(config: &InitConfig) -> String {
    format!(
        r#"# GreenAyu client configuration

[backend]
# Every feature endpoint is resolved against this URL.
# GREENAYU_BASE_URL overrides it.
base_url = "{backend_url}"
timeout_secs = 30

[session]
path = "./data/session.json"

[guard]
# Append ?next=<page> to sign-in redirects
preserve_destination = {preserve}

[server]
host = "127.0.0.1"
port = 3000
static_dir = "ui/dist"
log_level = "info"
"#,
        backend_url = config.backend_url,
        preserve = config.preserve_destination,
    )
}

fn generate_env_example(config: &InitConfig) -> String {
    format!(
        r#"# GreenAyu environment
# Copy to .env and adjust.

# Inference backend (overrides [backend] base_url)
GREENAYU_BASE_URL={}

# Logging level (trace, debug, info, warn, error)
RUST_LOG=info,greenayu=debug
"#,
        config.backend_url
    )
}

const GITIGNORE: &str = r#"# GreenAyu local state
/data/

# Environment
.env
.env.local

# Frontend build
/ui/dist/

# Rust
/target/
"#;
