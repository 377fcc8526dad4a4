//! Shared domain enumerations aligned with the renderer's CLI tokens.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output container passed to the renderer's `-F` flag.
///
/// Image formats produce one file per frame; video formats mux a whole
/// frame range into a single file, which changes flag selection during
/// command synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutputFormat {
    Png,
    Jpeg,
    Exr,
    Tiff,
    Bmp,
    AviJpeg,
    Ffmpeg,
    H264,
    Mpeg,
    Ogv,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Exr => "EXR",
            OutputFormat::Tiff => "TIFF",
            OutputFormat::Bmp => "BMP",
            OutputFormat::AviJpeg => "AVI_JPEG",
            OutputFormat::Ffmpeg => "FFMPEG",
            OutputFormat::H264 => "H264",
            OutputFormat::Mpeg => "MPEG",
            OutputFormat::Ogv => "OGV",
        }
    }

    pub fn is_video(self) -> bool {
        matches!(
            self,
            OutputFormat::AviJpeg
                | OutputFormat::Ffmpeg
                | OutputFormat::H264
                | OutputFormat::Mpeg
                | OutputFormat::Ogv
        )
    }
}

/// Render backend passed to the renderer's `-E` flag when the engine
/// override is enabled; absent, the document's own default applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenderEngine {
    Cycles,
    Eevee,
    Workbench,
}

impl RenderEngine {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderEngine::Cycles => "CYCLES",
            RenderEngine::Eevee => "EEVEE",
            RenderEngine::Workbench => "WORKBENCH",
        }
    }
}
