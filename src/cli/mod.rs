//! CLI module for GreenAyu
//!
//! Provides command-line interface parsing and handling for the `greenayu`
//! binary. Uses clap for argument parsing and owo-colors for colored
//! terminal output.

pub mod commands;
pub mod init;
pub mod output;

use clap::{Args, Parser, Subcommand};
use greenayu_core::auth::{DEMO_EMAIL, DEMO_PASSWORD};
use greenayu_core::feature::fertilizer::FertilizerInput;
use greenayu_core::feature::options::{
    CropType, PlantPart, Region, SoilType, StorageType, Weather, YieldCrop,
};
use greenayu_core::feature::shelf_life::ShelfLifeInput;
use greenayu_core::feature::yield_forecast::YieldInput;
use std::path::PathBuf;

/// GreenAyu - medicinal plant diagnostics
///
/// Sign in with the demo account, then identify plants, get fertilizer
/// advice, forecast yields, predict shelf life and grade plant parts against
/// a GreenAyu inference backend.
#[derive(Parser, Debug)]
#[command(
    name = "greenayu",
    author = "GreenAyu Team <dev@greenayu.lk>",
    version,
    about = "GreenAyu - medicinal plant diagnostics client",
    after_help = "EXAMPLES:\n    \
                  greenayu init                           # Write greenayu.toml\n    \
                  greenayu login                          # Sign in with the demo account\n    \
                  greenayu identify leaf.jpg --plant Iramusu\n    \
                  greenayu shelf-life --storage ambient --damage-level 0.3\n    \
                  greenayu serve                          # Host the web frontend"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "greenayu.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write greenayu.toml, .env.example and .gitignore
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Inference backend base URL
        #[arg(long, default_value = "http://127.0.0.1:8000")]
        backend_url: String,

        /// Keep the requested page across the sign-in redirect
        #[arg(long)]
        preserve_destination: bool,
    },

    /// Show configuration information
    Config {
        /// Only validate the configuration file
        #[arg(long)]
        validate: bool,
    },

    /// Sign in (defaults to the demo account)
    Login {
        #[arg(long, default_value = DEMO_EMAIL)]
        email: String,

        #[arg(long, default_value = DEMO_PASSWORD)]
        password: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in identity
    Whoami,

    /// Resolve a page path through the route guard, or list all routes
    Route {
        /// Page path such as /features/yield
        path: Option<String>,
    },

    /// Identify a plant and check its health from a photo
    Identify {
        /// JPG, PNG or WEBP photo
        image: PathBuf,

        /// Plant name shown next to the detected category
        #[arg(long)]
        plant: Option<String>,
    },

    /// Recommend a fertilizer from soil and climate readings
    Fertilizer(FertilizerArgs),

    /// Forecast harvest yield
    #[command(name = "yield")]
    Yield(YieldArgs),

    /// Predict shelf life and spoilage risk
    ShelfLife(ShelfLifeArgs),

    /// Detect which plant part a photo shows
    Parts {
        /// JPG, PNG or WEBP photo
        image: PathBuf,

        /// Part the specimen is supposed to be
        #[arg(long, default_value = "leaf")]
        part: PlantPart,
    },

    /// Host the built web frontend
    Serve {
        /// Override [server] host
        #[arg(long)]
        host: Option<String>,

        /// Override [server] port
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Fertilizer form fields; unset fields keep their defaults.
#[derive(Args, Debug, Default)]
pub struct FertilizerArgs {
    /// Label shown with the result
    #[arg(long)]
    pub plant: Option<String>,

    /// Air temperature, °C [default: 35]
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Relative humidity, % [default: 58]
    #[arg(long)]
    pub humidity: Option<f64>,

    /// Soil moisture, % [default: 35]
    #[arg(long)]
    pub moisture: Option<f64>,

    /// Nitrogen [default: 4]
    #[arg(long)]
    pub nitrogen: Option<f64>,

    /// Phosphorous [default: 16]
    #[arg(long)]
    pub phosphorous: Option<f64>,

    /// Potassium [default: 14]
    #[arg(long)]
    pub potassium: Option<f64>,

    /// Black, Red, Clayey, Sandy or Loamy [default: Black]
    #[arg(long)]
    pub soil: Option<SoilType>,

    /// Iramusu, Pawatta, Ruk_aguna or SuduHandun [default: Iramusu]
    #[arg(long)]
    pub crop: Option<CropType>,
}

impl FertilizerArgs {
    pub fn into_input(self) -> FertilizerInput {
        let defaults = FertilizerInput::default();
        FertilizerInput {
            plant: self.plant,
            temperature: self.temperature.unwrap_or(defaults.temperature),
            humidity: self.humidity.unwrap_or(defaults.humidity),
            moisture: self.moisture.unwrap_or(defaults.moisture),
            nitrogen: self.nitrogen.unwrap_or(defaults.nitrogen),
            phosphorous: self.phosphorous.unwrap_or(defaults.phosphorous),
            potassium: self.potassium.unwrap_or(defaults.potassium),
            soil_type: self.soil.unwrap_or(defaults.soil_type),
            crop_type: self.crop.unwrap_or(defaults.crop_type),
        }
    }
}

/// Yield form fields; unset fields keep their defaults.
#[derive(Args, Debug, Default)]
pub struct YieldArgs {
    #[arg(long)]
    pub plant: Option<String>,

    /// West, East, North, South or Central [default: West]
    #[arg(long)]
    pub region: Option<Region>,

    /// [default: Sandy]
    #[arg(long)]
    pub soil: Option<SoilType>,

    /// [default: Cotton]
    #[arg(long)]
    pub crop: Option<YieldCrop>,

    /// [default: 897.07]
    #[arg(long)]
    pub rainfall_mm: Option<f64>,

    /// [default: 27.6]
    #[arg(long)]
    pub temperature: Option<f64>,

    /// [default: false]
    #[arg(long)]
    pub fertilizer_used: Option<bool>,

    /// [default: true]
    #[arg(long)]
    pub irrigation_used: Option<bool>,

    /// Sunny, Cloudy or Rainy [default: Cloudy]
    #[arg(long)]
    pub weather: Option<Weather>,

    /// [default: 122]
    #[arg(long)]
    pub days_to_harvest: Option<u32>,
}

impl YieldArgs {
    pub fn into_input(self) -> YieldInput {
        let defaults = YieldInput::default();
        YieldInput {
            plant: self.plant,
            region: self.region.unwrap_or(defaults.region),
            soil_type: self.soil.unwrap_or(defaults.soil_type),
            crop: self.crop.unwrap_or(defaults.crop),
            rainfall_mm: self.rainfall_mm.unwrap_or(defaults.rainfall_mm),
            temperature_celsius: self.temperature.unwrap_or(defaults.temperature_celsius),
            fertilizer_used: self.fertilizer_used.unwrap_or(defaults.fertilizer_used),
            irrigation_used: self.irrigation_used.unwrap_or(defaults.irrigation_used),
            weather: self.weather.unwrap_or(defaults.weather),
            days_to_harvest: self.days_to_harvest.unwrap_or(defaults.days_to_harvest),
        }
    }
}

/// Shelf-life form fields.
///
/// `--storage` applies its temperature/humidity preset first; explicit
/// `--temperature` and `--humidity` win over the preset.
#[derive(Args, Debug, Default)]
pub struct ShelfLifeArgs {
    #[arg(long)]
    pub plant: Option<String>,

    /// leaf, root, flower, stem or seed [default: leaf]
    #[arg(long)]
    pub part: Option<PlantPart>,

    /// refrigerated, ambient or exposed [default: refrigerated]
    #[arg(long)]
    pub storage: Option<StorageType>,

    /// °C
    #[arg(long)]
    pub temperature: Option<f64>,

    /// %
    #[arg(long)]
    pub humidity: Option<f64>,

    /// [default: 18]
    #[arg(long)]
    pub respiration_rate: Option<f64>,

    /// 0..1 [default: 0.85]
    #[arg(long)]
    pub ethylene_sensitivity: Option<f64>,

    /// % [default: 92]
    #[arg(long)]
    pub water_content: Option<f64>,

    /// 0..1 [default: 0.1]
    #[arg(long)]
    pub damage_level: Option<f64>,

    /// 0..1 [default: 0.2]
    #[arg(long)]
    pub microbial_risk: Option<f64>,
}

impl ShelfLifeArgs {
    pub fn into_input(self) -> ShelfLifeInput {
        let mut input = ShelfLifeInput {
            plant: self.plant,
            ..ShelfLifeInput::default()
        };
        if let Some(part) = self.part {
            input.plant_type = part;
        }
        if let Some(storage) = self.storage {
            input.apply_storage_preset(storage);
        }
        if let Some(v) = self.temperature {
            input.temperature_c = v;
        }
        if let Some(v) = self.humidity {
            input.humidity_percent = v;
        }
        if let Some(v) = self.respiration_rate {
            input.respiration_rate = v;
        }
        if let Some(v) = self.ethylene_sensitivity {
            input.ethylene_sensitivity = v;
        }
        if let Some(v) = self.water_content {
            input.water_content = v;
        }
        if let Some(v) = self.damage_level {
            input.damage_level = v;
        }
        if let Some(v) = self.microbial_risk {
            input.microbial_risk = v;
        }
        input
    }
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["greenayu", "whoami", "--json", "--no-color"]).unwrap();
        assert!(cli.json);
        assert!(cli.no_color);
        assert!(matches!(cli.command, Commands::Whoami));
    }

    #[test]
    fn test_login_defaults_to_demo_account() {
        let cli = Cli::try_parse_from(["greenayu", "login"]).unwrap();
        match cli.command {
            Commands::Login { email, password } => {
                assert_eq!(email, DEMO_EMAIL);
                assert_eq!(password, DEMO_PASSWORD);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_fertilizer_args_merge_with_defaults() {
        let cli = Cli::try_parse_from([
            "greenayu", "fertilizer", "--nitrogen", "10", "--soil", "red", "--crop", "Sudu Handun",
        ])
        .unwrap();
        let Commands::Fertilizer(args) = cli.command else {
            panic!("expected fertilizer");
        };

        let input = args.into_input();
        assert_eq!(input.nitrogen, 10.0);
        assert_eq!(input.soil_type, SoilType::Red);
        assert_eq!(input.crop_type, CropType::SuduHandun);
        assert_eq!(input.potassium, FertilizerInput::default().potassium);
    }

    #[test]
    fn test_yield_subcommand_name() {
        let cli = Cli::try_parse_from(["greenayu", "yield", "--days-to-harvest", "90"]).unwrap();
        let Commands::Yield(args) = cli.command else {
            panic!("expected yield");
        };
        assert_eq!(args.into_input().days_to_harvest, 90);
    }

    #[test]
    fn test_shelf_life_preset_then_override() {
        let args = ShelfLifeArgs {
            storage: Some(StorageType::Ambient),
            humidity: Some(40.0),
            ..ShelfLifeArgs::default()
        };

        let input = args.into_input();
        assert_eq!(input.storage_type, StorageType::Ambient);
        assert_eq!(input.temperature_c, 24.0);
        assert_eq!(input.humidity_percent, 40.0);
    }

    #[test]
    fn test_unknown_option_value_is_rejected() {
        let result = Cli::try_parse_from(["greenayu", "parts", "leaf.jpg", "--part", "bark"]);
        assert!(result.is_err());
    }
}
