//! Command synthesis: maps a render request onto batch-render command
//! lines for the Blender executable.
//!
//! This is a pure function over immutable input. Validation is
//! fail-fast (the first violation wins) and a failed request exposes no
//! partial command list. One command string is produced per target, in
//! target input order; `Whole` plans produce exactly one.

use crate::domain::error::{TargetKind, ValidationError};
use crate::domain::request::{FrameRange, OutputConfig, RenderPlan, RenderRequest, TargetRange};

/// Frame-number placeholder expanded by the renderer in `-o` templates.
const FRAME_PLACEHOLDER: &str = "####";
/// Output prefix the renderer resolves relative to the opened document.
const DOCUMENT_RELATIVE: &str = "//";

/// Synthesize one shell-ready command line per render target.
pub fn synthesize(request: &RenderRequest) -> Result<Vec<String>, ValidationError> {
    if request.executable.trim().is_empty() {
        return Err(ValidationError::missing_path("executable"));
    }
    if request.document.trim().is_empty() {
        return Err(ValidationError::missing_path("document"));
    }

    let parts = SharedParts::from_request(request);

    match &request.plan {
        RenderPlan::Whole {
            single_frame,
            animation,
        } => whole_command(&request.output, &parts, *single_frame, *animation).map(|cmd| vec![cmd]),
        RenderPlan::Scenes(targets) => {
            target_commands(&request.output, &parts, TargetKind::Scene, targets)
        }
        RenderPlan::Cameras(targets) => {
            target_commands(&request.output, &parts, TargetKind::Camera, targets)
        }
    }
}

/// Path pieces that are identical across every command of a request.
struct SharedParts {
    executable: String,
    document: String,
    /// Quoted output directory with a trailing separator, or the
    /// document-relative marker.
    directory: String,
}

impl SharedParts {
    fn from_request(request: &RenderRequest) -> Self {
        let directory = request
            .output
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|dir| !dir.is_empty())
            .map(normalize_directory)
            .unwrap_or_else(|| DOCUMENT_RELATIVE.to_string());

        Self {
            executable: quote_if_spaced(request.executable.trim()),
            document: quote_if_spaced(request.document.trim()),
            directory,
        }
    }
}

fn whole_command(
    output: &OutputConfig,
    parts: &SharedParts,
    single_frame: u32,
    animation: FrameRange,
) -> Result<String, ValidationError> {
    let base = format!("{} -b {}", parts.executable, parts.document);

    let (output_arg, frame_args) = if output.format.is_video() {
        let file_name = video_file_name(output)?;
        if animation.start < 1 {
            return Err(ValidationError::invalid_frame(format!(
                "global start frame must be at least 1, got {}",
                animation.start
            )));
        }
        if animation.end < animation.start {
            return Err(ValidationError::invalid_frame(format!(
                "global end frame {} precedes start frame {}",
                animation.end, animation.start
            )));
        }
        (
            format!("-o {}{file_name}", parts.directory),
            animation_args(animation),
        )
    } else {
        if single_frame < 1 {
            return Err(ValidationError::invalid_frame(format!(
                "single frame number must be at least 1, got {single_frame}"
            )));
        }
        (
            format!("-o {}render_{FRAME_PLACEHOLDER}", parts.directory),
            format!("-f {single_frame}"),
        )
    };

    Ok(assemble(&base, &output_arg, output, &frame_args))
}

fn target_commands(
    output: &OutputConfig,
    parts: &SharedParts,
    kind: TargetKind,
    targets: &[TargetRange],
) -> Result<Vec<String>, ValidationError> {
    if targets.is_empty() {
        return Err(ValidationError::EmptyTargetList);
    }
    for target in targets {
        validate_target(kind, target)?;
    }

    let video_name = if output.format.is_video() {
        Some(video_file_name(output)?)
    } else {
        None
    };

    let selector = match kind {
        TargetKind::Scene => "-S",
        TargetKind::Camera => "-c",
    };

    let commands = targets
        .iter()
        .map(|target| {
            let base = format!(
                "{} -b {} {selector} {}",
                parts.executable, parts.document, target.name
            );
            let output_arg = match &video_name {
                Some(name) => format!("-o {}{name}_{}", parts.directory, target.name),
                None => format!(
                    "-o {}render_{}_{FRAME_PLACEHOLDER}",
                    parts.directory, target.name
                ),
            };
            assemble(&base, &output_arg, output, &animation_args(target.frames))
        })
        .collect();

    Ok(commands)
}

fn validate_target(kind: TargetKind, target: &TargetRange) -> Result<(), ValidationError> {
    if target.name.trim().is_empty() {
        return Err(ValidationError::invalid_target(
            kind,
            &target.name,
            format!(
                "name must not be empty (entry with start frame {})",
                target.frames.start
            ),
        ));
    }
    if target.frames.start < 1 {
        return Err(ValidationError::invalid_target(
            kind,
            &target.name,
            format!("start frame must be at least 1, got {}", target.frames.start),
        ));
    }
    if target.frames.end < target.frames.start {
        return Err(ValidationError::invalid_target(
            kind,
            &target.name,
            format!(
                "end frame {} precedes start frame {}",
                target.frames.end, target.frames.start
            ),
        ));
    }
    Ok(())
}

fn video_file_name(output: &OutputConfig) -> Result<String, ValidationError> {
    output
        .file_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or(ValidationError::MissingName)
}

fn animation_args(frames: FrameRange) -> String {
    format!("-s {} -e {} -a", frames.start, frames.end)
}

/// Join the command pieces, appending the video-only and engine-override
/// suffixes, and trim any trailing whitespace.
fn assemble(base: &str, output_arg: &str, output: &OutputConfig, frame_args: &str) -> String {
    let mut command = format!(
        "{base} {output_arg} -F {} {frame_args}",
        output.format.as_str()
    );

    if output.format.is_video() {
        if let Some(codec) = output.video_codec.as_deref().filter(|c| !c.trim().is_empty()) {
            command.push_str(&format!(" -vcodec {codec}"));
        }
        if let Some(fps) = output.fps {
            command.push_str(&format!(" -fps {fps}"));
        }
    }

    if let Some(engine) = output.engine {
        command.push_str(&format!(" -E {}", engine.as_str()));
    }

    command.trim().to_string()
}

/// Wrap a path segment in double quotes when it contains a space, so the
/// resulting line survives shell word-splitting; space-free segments
/// stay bare.
fn quote_if_spaced(segment: &str) -> String {
    if segment.contains(' ') {
        format!("\"{segment}\"")
    } else {
        segment.to_string()
    }
}

/// Guarantee a trailing path separator so the stem lands inside the
/// directory, then apply the quoting rule to the directory as a unit.
fn normalize_directory(dir: &str) -> String {
    let mut normalized = dir.to_string();
    if !normalized.ends_with('/') && !normalized.ends_with('\\') {
        normalized.push(std::path::MAIN_SEPARATOR);
    }
    quote_if_spaced(&normalized)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;
    use crate::domain::types::{OutputFormat, RenderEngine};

    fn output(format: OutputFormat) -> OutputConfig {
        OutputConfig {
            format,
            file_name: Some("render".to_string()),
            directory: None,
            video_codec: None,
            fps: None,
            engine: None,
        }
    }

    fn whole_image_request() -> RenderRequest {
        RenderRequest {
            executable: "/opt/blender".to_string(),
            document: "/tmp/a.blend".to_string(),
            plan: RenderPlan::Whole {
                single_frame: 10,
                animation: FrameRange::new(1, 250),
            },
            output: output(OutputFormat::Png),
        }
    }

    fn target(name: &str, start: u32, end: u32) -> TargetRange {
        TargetRange {
            name: name.to_string(),
            frames: FrameRange::new(start, end),
        }
    }

    #[test]
    fn whole_image_produces_single_frame_command() {
        let commands = synthesize(&whole_image_request()).expect("valid request");
        assert_eq!(
            commands,
            vec!["/opt/blender -b /tmp/a.blend -o //render_#### -F PNG -f 10".to_string()]
        );
    }

    #[test]
    fn whole_video_uses_global_range_and_plain_stem() {
        let mut request = whole_image_request();
        request.output = OutputConfig {
            file_name: Some("final".to_string()),
            fps: NonZeroU32::new(30),
            ..output(OutputFormat::Ffmpeg)
        };
        request.plan = RenderPlan::Whole {
            single_frame: 1,
            animation: FrameRange::new(5, 90),
        };

        let commands = synthesize(&request).expect("valid request");
        assert_eq!(
            commands,
            vec![
                "/opt/blender -b /tmp/a.blend -o //final -F FFMPEG -s 5 -e 90 -a -fps 30"
                    .to_string()
            ]
        );
    }

    #[test]
    fn scene_list_video_matches_flag_grammar() {
        let mut request = whole_image_request();
        request.plan = RenderPlan::Scenes(vec![target("Intro", 1, 50)]);
        request.output = OutputConfig {
            file_name: Some("out".to_string()),
            fps: NonZeroU32::new(24),
            ..output(OutputFormat::Ffmpeg)
        };

        let commands = synthesize(&request).expect("valid request");
        assert_eq!(commands.len(), 1);
        assert_eq!(
            commands[0],
            "/opt/blender -b /tmp/a.blend -S Intro -o //out_Intro -F FFMPEG -s 1 -e 50 -a -fps 24"
        );
    }

    #[test]
    fn scene_list_emits_one_command_per_scene_in_order() {
        let mut request = whole_image_request();
        request.plan = RenderPlan::Scenes(vec![
            target("Intro", 1, 50),
            target("Middle", 51, 100),
            target("Outro", 101, 120),
        ]);

        let commands = synthesize(&request).expect("valid request");
        assert_eq!(commands.len(), 3);
        for (command, name) in commands.iter().zip(["Intro", "Middle", "Outro"]) {
            assert!(command.contains(&format!("-S {name}")));
            assert!(command.contains(&format!("-o //render_{name}_####")));
            assert!(!command.contains("-c "));
        }
        assert!(commands[1].contains("-s 51 -e 100 -a"));
    }

    #[test]
    fn camera_list_uses_camera_selector_only() {
        let mut request = whole_image_request();
        request.plan = RenderPlan::Cameras(vec![target("CamA", 1, 10), target("CamB", 11, 20)]);

        let commands = synthesize(&request).expect("valid request");
        assert_eq!(commands.len(), 2);
        for command in &commands {
            assert!(command.contains("-c Cam"));
            assert!(!command.contains("-S "));
        }
    }

    #[test]
    fn spaced_path_segments_are_quoted_exactly_once() {
        let mut request = whole_image_request();
        request.executable = "/opt/my blender/blender".to_string();

        let commands = synthesize(&request).expect("valid request");
        assert!(commands[0].starts_with("\"/opt/my blender/blender\" -b /tmp/a.blend"));
        assert_eq!(commands[0].matches('"').count(), 2);
    }

    #[test]
    fn custom_directory_gets_trailing_separator_and_quoting() {
        let mut request = whole_image_request();
        request.output.directory = Some("/tmp/out dir".to_string());

        let commands = synthesize(&request).expect("valid request");
        assert!(commands[0].contains("-o \"/tmp/out dir/\"render_####"));

        request.output.directory = Some("/tmp/renders/".to_string());
        let commands = synthesize(&request).expect("valid request");
        assert!(commands[0].contains("-o /tmp/renders/render_####"));
    }

    #[test]
    fn engine_override_is_appended_last() {
        let mut request = whole_image_request();
        request.output.engine = Some(RenderEngine::Cycles);

        let commands = synthesize(&request).expect("valid request");
        assert!(commands[0].ends_with("-f 10 -E CYCLES"));
    }

    #[test]
    fn codec_and_fps_are_video_only() {
        let mut request = whole_image_request();
        request.output.video_codec = Some("libx264".to_string());
        request.output.fps = NonZeroU32::new(24);

        let commands = synthesize(&request).expect("valid request");
        assert!(!commands[0].contains("-vcodec"));
        assert!(!commands[0].contains("-fps"));

        request.output.format = OutputFormat::H264;
        request.plan = RenderPlan::Whole {
            single_frame: 1,
            animation: FrameRange::new(1, 100),
        };
        let commands = synthesize(&request).expect("valid request");
        assert!(commands[0].contains("-vcodec libx264 -fps 24"));
    }

    #[test]
    fn synthesis_is_idempotent() {
        let request = whole_image_request();
        assert_eq!(
            synthesize(&request).expect("first"),
            synthesize(&request).expect("second")
        );
    }

    #[test]
    fn missing_paths_fail_first() {
        let mut request = whole_image_request();
        request.executable = "  ".to_string();
        assert_eq!(
            synthesize(&request),
            Err(ValidationError::missing_path("executable"))
        );

        let mut request = whole_image_request();
        request.document = String::new();
        assert_eq!(
            synthesize(&request),
            Err(ValidationError::missing_path("document"))
        );
    }

    #[test]
    fn zero_single_frame_is_rejected() {
        let mut request = whole_image_request();
        request.plan = RenderPlan::Whole {
            single_frame: 0,
            animation: FrameRange::new(1, 250),
        };
        assert!(matches!(
            synthesize(&request),
            Err(ValidationError::InvalidFrame { .. })
        ));
    }

    #[test]
    fn whole_video_requires_name_before_range_checks() {
        let mut request = whole_image_request();
        request.output = OutputConfig {
            file_name: None,
            ..output(OutputFormat::Mpeg)
        };
        request.plan = RenderPlan::Whole {
            single_frame: 1,
            animation: FrameRange::new(10, 5),
        };
        assert_eq!(synthesize(&request), Err(ValidationError::MissingName));

        request.output.file_name = Some("clip".to_string());
        assert!(matches!(
            synthesize(&request),
            Err(ValidationError::InvalidFrame { .. })
        ));
    }

    #[test]
    fn empty_target_list_is_rejected_with_no_commands() {
        let mut request = whole_image_request();
        request.plan = RenderPlan::Scenes(Vec::new());
        assert_eq!(synthesize(&request), Err(ValidationError::EmptyTargetList));
    }

    #[test]
    fn one_invalid_target_fails_the_whole_list() {
        let mut request = whole_image_request();
        request.plan = RenderPlan::Cameras(vec![
            target("CamA", 1, 10),
            target("CamB", 9, 2),
            target("CamC", 11, 20),
        ]);

        let error = synthesize(&request).expect_err("invalid range");
        match error {
            ValidationError::InvalidTarget { kind, name, .. } => {
                assert_eq!(kind, TargetKind::Camera);
                assert_eq!(name, "CamB");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unnamed_target_reports_its_start_frame() {
        let mut request = whole_image_request();
        request.plan = RenderPlan::Scenes(vec![target("", 7, 30)]);

        let error = synthesize(&request).expect_err("unnamed target");
        assert!(error.to_string().contains("start frame 7"));
    }

    #[test]
    fn list_video_without_name_is_rejected_after_target_checks() {
        let mut request = whole_image_request();
        request.plan = RenderPlan::Scenes(vec![target("Intro", 1, 50)]);
        request.output = OutputConfig {
            file_name: Some("   ".to_string()),
            ..output(OutputFormat::Ogv)
        };
        assert_eq!(synthesize(&request), Err(ValidationError::MissingName));
    }
}
