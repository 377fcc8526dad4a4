//! Immutable render-request model consumed by command synthesis.
//!
//! A request is assembled fresh from CLI input right before each
//! synthesis call and never persisted; the synthesizer treats it as
//! plain data and re-runs from scratch after any change.

use std::num::NonZeroU32;

use crate::domain::types::{OutputFormat, RenderEngine};

/// Inclusive frame span for an animation render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    pub start: u32,
    pub end: u32,
}

impl FrameRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// One named scene or camera with its own frame span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRange {
    pub name: String,
    pub frames: FrameRange,
}

/// What the renderer is pointed at: the whole document, a list of named
/// scenes, or a list of named cameras.
///
/// Modeled as a sum type so "scene list and camera list both enabled"
/// cannot be expressed; each list keeps its input order, and each entry
/// yields its own command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderPlan {
    Whole {
        /// Frame rendered when the output format is an image.
        single_frame: u32,
        /// Range rendered when the output format is a video.
        animation: FrameRange,
    },
    Scenes(Vec<TargetRange>),
    Cameras(Vec<TargetRange>),
}

/// Output configuration shared by every target of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Base name for the muxed output file; required for video formats.
    pub file_name: Option<String>,
    /// Render output directory; the document-relative marker `//` is
    /// used when absent.
    pub directory: Option<String>,
    pub video_codec: Option<String>,
    pub fps: Option<NonZeroU32>,
    /// Engine override; `None` defers to the document's own default.
    pub engine: Option<RenderEngine>,
}

/// Everything command synthesis needs: paths, plan, and shared output
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub executable: String,
    pub document: String,
    pub plan: RenderPlan,
    pub output: OutputConfig,
}
