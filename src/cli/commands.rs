//! Command handlers for the `greenayu` binary.

use std::path::{Path, PathBuf};

use greenayu_core::feature::fertilizer::FertilizerResult;
use greenayu_core::feature::identify::{IdentifyInput, IdentifyResult};
use greenayu_core::feature::parts::{PartsInput, PartsResult, GRADING_PENDING};
use greenayu_core::feature::shelf_life::ShelfLifeResult;
use greenayu_core::feature::upload::validate_image_meta;
use greenayu_core::feature::yield_forecast::YieldResult;
use greenayu_core::{Access, Feature, FeatureAdapter, FeatureKind, ImageUpload, Route, Session};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use super::init::{self, InitConfig, InitResult};
use super::output::Output;
use super::{Cli, Commands};
use crate::backend::Workbench;
use crate::session::open_store;
use crate::types::{AppError, Result, RouteInfo};
use crate::utils::toml_config::GreenAyuConfig;

struct Context {
    config_path: PathBuf,
    output: Output,
    json: bool,
}

impl Context {
    fn config(&self) -> Result<GreenAyuConfig> {
        GreenAyuConfig::load(&self.config_path).map_err(|e| AppError::Config(e.to_string()))
    }

    fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        self.output
            .json(value)
            .map_err(|e| AppError::Internal(format!("Failed to encode output: {}", e)))
    }
}

/// Runs one parsed command line.
pub async fn execute(cli: Cli) -> Result<()> {
    let ctx = Context {
        config_path: cli.config,
        output: if cli.no_color {
            Output::no_color()
        } else {
            Output::new()
        },
        json: cli.json,
    };

    let result = dispatch(&ctx, cli.command).await;

    if !ctx.json {
        match &result {
            Err(AppError::Feature(e)) => ctx.output.feature_hint(e),
            Err(AppError::SignInRequired) => {
                ctx.output.hint("Sign in with the demo account:");
                ctx.output.command("greenayu login");
            }
            _ => {}
        }
    }
    result
}

async fn dispatch(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Init {
            path,
            force,
            backend_url,
            preserve_destination,
        } => run_init(
            ctx,
            InitConfig {
                path,
                force,
                backend_url,
                preserve_destination,
            },
        ),
        Commands::Config { validate } => show_config(ctx, validate),
        Commands::Login { email, password } => login(ctx, &email, &password).await,
        Commands::Logout => logout(ctx),
        Commands::Whoami => whoami(ctx),
        Commands::Route { path } => match path {
            Some(path) => resolve_route(ctx, &path),
            None => list_routes(ctx),
        },
        Commands::Identify { image, plant } => {
            let config = ctx.config()?;
            require_session(&config, FeatureKind::IdentifyHealth)?;
            let input = IdentifyInput {
                plant_name: plant,
                image: Some(load_image(&image).await?),
            };
            let bench = Workbench::from_config(&config.backend)?;
            run_feature(ctx, &bench.identify, &input, render_identify).await
        }
        Commands::Fertilizer(args) => {
            let config = ctx.config()?;
            require_session(&config, FeatureKind::Fertilizer)?;
            let bench = Workbench::from_config(&config.backend)?;
            run_feature(ctx, &bench.fertilizer, &args.into_input(), render_fertilizer).await
        }
        Commands::Yield(args) => {
            let config = ctx.config()?;
            require_session(&config, FeatureKind::Yield)?;
            let bench = Workbench::from_config(&config.backend)?;
            run_feature(ctx, &bench.yield_forecast, &args.into_input(), render_yield).await
        }
        Commands::ShelfLife(args) => {
            let config = ctx.config()?;
            require_session(&config, FeatureKind::ShelfLife)?;
            let bench = Workbench::from_config(&config.backend)?;
            run_feature(ctx, &bench.shelf_life, &args.into_input(), render_shelf_life).await
        }
        Commands::Parts { image, part } => {
            let config = ctx.config()?;
            require_session(&config, FeatureKind::PartsQuality)?;
            let input = PartsInput {
                part,
                image: Some(load_image(&image).await?),
            };
            let bench = Workbench::from_config(&config.backend)?;
            run_feature(ctx, &bench.parts, &input, render_parts).await
        }
        Commands::Serve { host, port } => {
            let mut config = ctx.config()?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config
                .validate()
                .map_err(|e| AppError::Config(e.to_string()))?;
            crate::api::serve(config).await
        }
    }
}

fn run_init(ctx: &Context, config: InitConfig) -> Result<()> {
    match init::run(config, &ctx.output) {
        InitResult::Success | InitResult::AlreadyExists => Ok(()),
        InitResult::Error(e) => Err(AppError::Internal(e)),
    }
}

fn show_config(ctx: &Context, validate_only: bool) -> Result<()> {
    let config = ctx.config()?;

    if validate_only {
        if ctx.json {
            return ctx.print_json(&json!({ "valid": true }));
        }
        ctx.output.success(&format!(
            "Configuration is valid ({})",
            source_label(&ctx.config_path)
        ));
        return Ok(());
    }

    if ctx.json {
        return ctx.print_json(&config);
    }

    ctx.output.header("Configuration");
    ctx.output.kv("Source", &source_label(&ctx.config_path));
    ctx.output.kv("Backend", &config.backend.base_url);
    ctx.output
        .kv("Timeout", &format!("{}s", config.backend.timeout_secs));
    ctx.output
        .kv("Session file", &config.session.path.display().to_string());
    ctx.output.kv(
        "Preserve destination",
        &config.guard.preserve_destination.to_string(),
    );
    ctx.output.kv("Shell host", &format!("http://{}", config.bind_addr()));
    ctx.output
        .kv("Static dir", &config.server.static_dir.display().to_string());
    ctx.output.kv("Log level", &config.server.log_level);
    Ok(())
}

fn source_label(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("defaults ({} not found)", path.display())
    }
}

async fn login(ctx: &Context, email: &str, password: &str) -> Result<()> {
    let config = ctx.config()?;
    let store = open_store(&config.session);

    let session = store.login(email, password).await?;

    if ctx.json {
        return ctx.print_json(&session);
    }
    ctx.output
        .success(&format!("Signed in as {} <{}>", session.name, session.email));
    ctx.output.hint(&format!(
        "Continue at {}",
        config.route_guard().return_target("")
    ));
    Ok(())
}

fn logout(ctx: &Context) -> Result<()> {
    let config = ctx.config()?;
    let store = open_store(&config.session);
    let was_signed_in = store.is_authenticated();

    store.logout();

    if ctx.json {
        return ctx.print_json(&json!({ "signed_out": was_signed_in }));
    }
    if was_signed_in {
        ctx.output.success("Signed out");
    } else {
        ctx.output.info("No active session");
    }
    Ok(())
}

fn whoami(ctx: &Context) -> Result<()> {
    let config = ctx.config()?;
    let session = open_store(&config.session).current();

    if ctx.json {
        return ctx.print_json(&json!({
            "authenticated": session.is_some(),
            "session": session,
        }));
    }

    match session {
        Some(session) => {
            ctx.output.header("Signed in");
            ctx.output.kv("Name", &session.name);
            ctx.output.kv("Email", &session.email);
        }
        None => ctx.output.info("Not signed in"),
    }
    Ok(())
}

fn list_routes(ctx: &Context) -> Result<()> {
    let guard = ctx.config()?.route_guard();
    let routes: Vec<RouteInfo> = Route::ALL
        .iter()
        .map(|route| RouteInfo::for_route(*route, &guard))
        .collect();

    if ctx.json {
        return ctx.print_json(&routes);
    }

    ctx.output.header("Routes");
    ctx.output.table_header(&["Path", "Page", "Access"]);
    for route in &routes {
        let access = if route.protected { "sign-in required" } else { "public" };
        ctx.output.table_row(&[route.path, route.title, access]);
    }
    Ok(())
}

fn resolve_route(ctx: &Context, path: &str) -> Result<()> {
    let config = ctx.config()?;
    let guard = config.route_guard();
    let session = open_store(&config.session).current();

    let route = Route::resolve(path);
    let access = guard.authorize(path, session.as_ref());

    if ctx.json {
        let (allowed, redirect) = match &access {
            Access::Allow => (true, None),
            Access::Redirect { to } => (false, Some(to.clone())),
        };
        return ctx.print_json(&json!({
            "route": RouteInfo::for_route(route, &guard),
            "allowed": allowed,
            "redirect": redirect,
        }));
    }

    ctx.output.header(route.title());
    ctx.output.kv("Path", route.path());
    if let Route::Feature(kind) = route {
        ctx.output.kv("Backend endpoint", kind.endpoint());
    }
    match access {
        Access::Allow => ctx.output.success("Access allowed"),
        Access::Redirect { to } => ctx.output.warning(&format!("Redirects to {}", to)),
    }
    Ok(())
}

/// Applies the route guard to the feature's page.
fn require_session(config: &GreenAyuConfig, kind: FeatureKind) -> Result<Session> {
    let store = open_store(&config.session);
    let session = store.current();

    match config.route_guard().authorize(kind.route_path(), session.as_ref()) {
        Access::Allow => session.ok_or(AppError::SignInRequired),
        Access::Redirect { to } => {
            debug!(feature = %kind, redirect = %to, "Feature requires a session");
            Err(AppError::SignInRequired)
        }
    }
}

/// Reads an image, guessing its MIME type from the extension.
///
/// Size and type are checked before the bytes are read.
async fn load_image(path: &Path) -> Result<ImageUpload> {
    let mime = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream");

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| AppError::InvalidInput(format!("Cannot read {}: {}", path.display(), e)))?;
    validate_image_meta(mime, metadata.len())?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::InvalidInput(format!("Cannot read {}: {}", path.display(), e)))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Ok(ImageUpload::new(file_name, mime, bytes))
}

async fn run_feature<F>(
    ctx: &Context,
    adapter: &FeatureAdapter<F>,
    input: &F::Input,
    render: fn(&Output, &F::Output),
) -> Result<()>
where
    F: Feature,
    F::Output: Serialize,
{
    let kind = F::KIND;
    info!(feature = %kind, endpoint = kind.endpoint(), "Submitting");
    let result = adapter.submit(input).await?;

    if ctx.json {
        return ctx.print_json(&result);
    }
    ctx.output.header(kind.label());
    render(&ctx.output, &result);
    Ok(())
}

fn render_identify(out: &Output, r: &IdentifyResult) {
    out.kv("Plant", &r.plant);
    out.kv("Category", &r.category);
    out.meter("Category confidence", r.category_confidence);
    out.kv("Health", &r.health);
    out.meter("Health confidence", r.health_confidence);
    out.meter("Confidence", r.confidence);
    if r.healthy {
        out.success(&r.recommendation);
    } else {
        out.warning(&r.recommendation);
    }
}

fn render_fertilizer(out: &Output, r: &FertilizerResult) {
    out.kv("Plant", &r.plant);
    out.kv("Recommended fertilizer", &r.recommended_fertilizer);
    out.kv("Soil & crop", &r.soil_and_crop());
    out.kv("NPK", &r.npk());
    out.kv(
        "Climate",
        &format!(
            "{}°C, {}% humidity, {}% moisture",
            r.inputs.temperature, r.inputs.humidity, r.inputs.moisture
        ),
    );
    out.info(&r.note);
}

fn render_yield(out: &Output, r: &YieldResult) {
    out.kv("Plant", &r.plant);
    out.kv("Estimated yield", &format!("{} tons / {}", r.yield_text, r.unit));
    out.info(&r.note);
}

fn render_shelf_life(out: &Output, r: &ShelfLifeResult) {
    out.kv("Plant", &r.plant);
    out.kv("Part", r.plant_type.label());
    out.kv("Storage", r.storage_type.label());
    out.kv("Shelf life", &r.shelf_life_text);
    out.kv(
        "Spoilage risk",
        &format!("{} ({:.2})", r.risk_level, r.risk_score),
    );
    out.kv("Thermal range", &r.temp_range);
    out.info(&r.note);
}

fn render_parts(out: &Output, r: &PartsResult) {
    out.kv("Selected part", &r.selected_part);
    out.kv("Detected part", &r.detected_part);
    out.meter("Confidence", r.confidence);
    if r.matches_selection() {
        out.success("Detected part matches the selection");
    } else {
        out.warning("Detected part differs from the selection");
    }
    out.kv("Quality", r.quality.as_deref().unwrap_or(GRADING_PENDING));
    out.kv("Defects", r.defects.as_deref().unwrap_or(GRADING_PENDING));
    out.kv("Purity", r.purity.as_deref().unwrap_or(GRADING_PENDING));
    out.info(&r.note);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::toml_config::SessionConfig;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> GreenAyuConfig {
        GreenAyuConfig {
            session: SessionConfig {
                path: dir.path().join("session.json"),
            },
            ..GreenAyuConfig::default()
        }
    }

    #[tokio::test]
    async fn feature_requires_session() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let err = require_session(&config, FeatureKind::Yield).unwrap_err();
        assert!(matches!(err, AppError::SignInRequired));

        open_store(&config.session)
            .login("demo@agricultor.lk", "Demo@123")
            .await
            .unwrap();

        let session = require_session(&config, FeatureKind::Yield).unwrap();
        assert_eq!(session.name, "Demo User");
    }

    #[tokio::test]
    async fn load_image_guesses_type() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaf.PNG");
        std::fs::write(&path, b"png-bytes").unwrap();

        let upload = load_image(&path).await.unwrap();

        assert_eq!(upload.file_name, "leaf.PNG");
        assert_eq!(upload.mime_type, "image/png");
        assert_eq!(upload.bytes, b"png-bytes");
    }

    #[tokio::test]
    async fn load_image_rejects_unsupported_type() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let err = load_image(&path).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported file type. Please upload JPG, PNG, or WEBP."
        );
    }

    #[tokio::test]
    async fn load_image_missing_file() {
        let err = load_image(Path::new("/definitely/not/here.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
