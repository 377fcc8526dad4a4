//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{num::NonZeroU32, path::PathBuf, str::FromStr};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::domain::types::{OutputFormat, RenderEngine};

mod cli;

pub use cli::{
    CliArgs, Command, GenerateArgs, LaunchArgs, RequestArgs, SettingsOverrides, TargetSpec,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "blendline";
const DEFAULT_OUTPUT_FILE_NAME: &str = "render";

#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub render: RenderSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

/// Defaults applied to every request unless overridden per invocation.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub executable: Option<PathBuf>,
    pub output_directory: Option<PathBuf>,
    pub format: OutputFormat,
    pub output_file_name: String,
    pub video_codec: Option<String>,
    pub fps: Option<NonZeroU32>,
    pub engine: Option<RenderEngine>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("BLENDLINE").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    match &cli.command {
        Command::Generate(args) => raw.apply_overrides(&args.request.overrides),
        Command::Launch(args) => raw.apply_overrides(&args.request.overrides),
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    render: RawRenderSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawRenderSettings {
    executable: Option<PathBuf>,
    output_directory: Option<PathBuf>,
    format: Option<OutputFormat>,
    output_file_name: Option<String>,
    video_codec: Option<String>,
    fps: Option<u32>,
    engine: Option<RenderEngine>,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &SettingsOverrides) {
        if let Some(path) = overrides.executable.as_ref() {
            self.render.executable = Some(path.clone());
        }
        if let Some(dir) = overrides.output_directory.as_ref() {
            self.render.output_directory = Some(dir.clone());
        }
        if let Some(format) = overrides.format {
            self.render.format = Some(format);
        }
        if let Some(name) = overrides.output_file_name.as_ref() {
            self.render.output_file_name = Some(name.clone());
        }
        if let Some(codec) = overrides.video_codec.as_ref() {
            self.render.video_codec = Some(codec.clone());
        }
        if let Some(fps) = overrides.fps {
            self.render.fps = Some(fps.get());
        }
        if let Some(engine) = overrides.engine {
            self.render.engine = Some(engine);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings { logging, render } = raw;

        let logging = build_logging_settings(logging)?;
        let render = build_render_settings(render)?;

        Ok(Self { logging, render })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_render_settings(render: RawRenderSettings) -> Result<RenderSettings, LoadError> {
    let executable = render.executable.filter(|path| !path.as_os_str().is_empty());
    let output_directory = render
        .output_directory
        .filter(|path| !path.as_os_str().is_empty());

    let format = render.format.unwrap_or(OutputFormat::Png);
    let output_file_name = render
        .output_file_name
        .unwrap_or_else(|| DEFAULT_OUTPUT_FILE_NAME.to_string());

    let video_codec = render.video_codec.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    });

    let fps = match render.fps {
        Some(value) => Some(
            NonZeroU32::new(value)
                .ok_or_else(|| LoadError::invalid("render.fps", "must be greater than zero"))?,
        ),
        None => None,
    };

    Ok(RenderSettings {
        executable,
        output_directory,
        format,
        output_file_name,
        video_codec,
        fps,
        engine: render.engine,
    })
}
