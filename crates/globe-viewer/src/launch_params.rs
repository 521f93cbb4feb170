//! Launch parameter parsing for the viewer.
//!
//! On native, parameters are parsed from command-line arguments using clap.
//! On WASM, defaults are used (CLI argument parsing is not available).

use std::fmt;

use bevy::prelude::*;
use globe_nav::{NavigatorSettings, SettingsError};

/// Default API origin.
const DEFAULT_API_URL: &str = portfolio_api::DEFAULT_BASE_URL;
/// Default equirectangular globe texture, relative to the asset folder.
const DEFAULT_TEXTURE: &str = "land_ocean_ice_cloud_2048.jpg";

/// Launch parameters for the viewer.
#[derive(Resource, Debug, Clone)]
pub struct LaunchParams {
    /// Origin of the portfolio API.
    pub api_url: String,
    /// Asset path of the globe texture.
    pub texture: String,
    /// Navigator tuning.
    pub settings: NavigatorSettings,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            texture: DEFAULT_TEXTURE.to_string(),
            settings: NavigatorSettings::default(),
        }
    }
}

/// Failure to build launch parameters.
#[derive(Debug)]
pub enum LaunchError {
    /// The settings file could not be read.
    Read { path: String, message: String },
    /// The settings file is not valid JSON for [`NavigatorSettings`].
    Parse { path: String, message: String },
    /// The settings were read but describe an unusable globe.
    Invalid(SettingsError),
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::Read { path, message } => {
                write!(f, "failed to read settings file {path}: {message}")
            }
            LaunchError::Parse { path, message } => {
                write!(f, "failed to parse settings file {path}: {message}")
            }
            LaunchError::Invalid(e) => write!(f, "invalid settings: {e}"),
        }
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LaunchError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

/// Parse navigator settings from JSON and check them.
///
/// Fields missing from the JSON keep their defaults.
pub fn parse_settings(path: &str, json: &str) -> Result<NavigatorSettings, LaunchError> {
    let settings: NavigatorSettings =
        serde_json::from_str(json).map_err(|e| LaunchError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })?;
    settings.validate().map_err(LaunchError::Invalid)?;
    Ok(settings)
}

#[cfg(not(target_family = "wasm"))]
mod native {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    #[command(about = "Interactive 3D globe of portfolio locations")]
    struct CliArgs {
        /// Origin of the portfolio API.
        #[arg(long, default_value = DEFAULT_API_URL)]
        api_url: String,

        /// Globe texture, relative to the asset folder.
        #[arg(long, default_value = DEFAULT_TEXTURE)]
        texture: String,

        /// JSON file overriding navigator settings.
        #[arg(long)]
        settings: Option<String>,
    }

    pub fn parse() -> Result<LaunchParams, LaunchError> {
        let args = CliArgs::parse();
        let settings = match args.settings {
            Some(path) => {
                let json = std::fs::read_to_string(&path).map_err(|e| LaunchError::Read {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                let settings = parse_settings(&path, &json)?;
                tracing::info!(path, "loaded navigator settings");
                settings
            }
            None => NavigatorSettings::default(),
        };
        Ok(LaunchParams {
            api_url: args.api_url,
            texture: args.texture,
            settings,
        })
    }
}

/// Parse launch parameters from CLI args (native) or use defaults (WASM).
pub fn parse() -> Result<LaunchParams, LaunchError> {
    #[cfg(not(target_family = "wasm"))]
    {
        native::parse()
    }
    #[cfg(target_family = "wasm")]
    {
        Ok(LaunchParams::default())
    }
}
