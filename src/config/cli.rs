use std::num::NonZeroU32;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

use crate::domain::request::{FrameRange, TargetRange};
use crate::domain::types::{OutputFormat, RenderEngine};

/// Command-line arguments for the blendline binary.
#[derive(Debug, Parser)]
#[command(
    name = "blendline",
    version,
    about = "Build and launch Blender batch-render command lines"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "BLENDLINE_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the synthesized render commands.
    Generate(GenerateArgs),
    /// Synthesize the commands and run them in a new terminal window.
    Launch(LaunchArgs),
}

#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Emit the command list as a JSON array instead of plain lines.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct LaunchArgs {
    #[command(flatten)]
    pub request: RequestArgs,
}

/// Request fields shared by `generate` and `launch`.
#[derive(Debug, Args, Clone)]
pub struct RequestArgs {
    /// Path to the .blend document to render.
    #[arg(value_name = "BLEND_FILE", value_hint = ValueHint::FilePath)]
    pub document: PathBuf,

    /// Render a named scene (NAME:START:END); repeatable, order preserved.
    #[arg(long = "scene", value_name = "NAME:START:END")]
    pub scenes: Vec<TargetSpec>,

    /// Render through a named camera (NAME:START:END); repeatable, order
    /// preserved. Mutually exclusive with --scene.
    #[arg(
        long = "camera",
        value_name = "NAME:START:END",
        conflicts_with = "scenes"
    )]
    pub cameras: Vec<TargetSpec>,

    /// Frame to render for whole-file image output.
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub frame: u32,

    /// First frame of the animation range for whole-file video output.
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub start: u32,

    /// Last frame of the animation range for whole-file video output.
    #[arg(long, value_name = "N", default_value_t = 250)]
    pub end: u32,

    #[command(flatten)]
    pub overrides: SettingsOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct SettingsOverrides {
    /// Override the Blender executable path.
    #[arg(long = "blender", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub executable: Option<PathBuf>,

    /// Override the render output directory (defaults to the document's
    /// own folder).
    #[arg(long = "output-dir", value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub output_directory: Option<PathBuf>,

    /// Override the output format.
    #[arg(long = "format", value_name = "FORMAT", value_enum)]
    pub format: Option<OutputFormat>,

    /// Override the base name for video output files.
    #[arg(long = "output-name", value_name = "NAME")]
    pub output_file_name: Option<String>,

    /// Override the video codec handed to the renderer (e.g. libx264).
    #[arg(long = "video-codec", value_name = "CODEC")]
    pub video_codec: Option<String>,

    /// Override the frames-per-second for video output.
    #[arg(long = "fps", value_name = "FPS")]
    pub fps: Option<NonZeroU32>,

    /// Force a render engine instead of the document default.
    #[arg(long = "engine", value_name = "ENGINE", value_enum)]
    pub engine: Option<RenderEngine>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

/// One `--scene`/`--camera` occurrence, written as `NAME:START:END`.
/// The name may itself contain `:`; the last two fields are the frame
/// bounds. Frame-range invariants are checked during synthesis, not
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    pub name: String,
    pub start: u32,
    pub end: u32,
}

impl TargetSpec {
    pub fn to_target(&self) -> TargetRange {
        TargetRange {
            name: self.name.clone(),
            frames: FrameRange::new(self.start, self.end),
        }
    }
}

impl FromStr for TargetSpec {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut fields = value.rsplitn(3, ':');
        let (Some(end), Some(start), Some(name)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(format!("expected NAME:START:END, got `{value}`"));
        };
        let start = start
            .parse::<u32>()
            .map_err(|_| format!("start frame `{start}` is not a number"))?;
        let end = end
            .parse::<u32>()
            .map_err(|_| format!("end frame `{end}` is not a number"))?;
        Ok(Self {
            name: name.to_string(),
            start,
            end,
        })
    }
}
