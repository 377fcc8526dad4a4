use std::process;

use blendline::{
    application::{command::synthesize, error::AppError},
    config::{self, CliArgs, Command, RequestArgs, Settings, TargetSpec},
    domain::request::{FrameRange, OutputConfig, RenderPlan, RenderRequest},
    infra::{
        telemetry,
        terminal::{SystemTerminal, TerminalLauncher},
    },
};
use clap::Parser;
use tracing::{dispatcher, error, info};

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
    } else {
        eprintln!("{error}");
    }
}

fn run() -> Result<(), AppError> {
    let cli = CliArgs::parse();
    let settings = config::load(&cli)?;
    telemetry::init(&settings.logging)?;

    match &cli.command {
        Command::Generate(args) => {
            let request = build_request(&args.request, &settings);
            let commands = synthesize(&request)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&commands)?);
            } else {
                println!("{}", commands.join("\n\n"));
            }
        }
        Command::Launch(args) => {
            let request = build_request(&args.request, &settings);
            let commands = synthesize(&request)?;
            info!(
                count = commands.len(),
                "synthesized render commands; opening terminal"
            );
            SystemTerminal.launch_detached(&commands)?;
        }
    }

    Ok(())
}

/// Assemble the immutable render request from per-invocation arguments
/// layered over the loaded settings defaults.
fn build_request(args: &RequestArgs, settings: &Settings) -> RenderRequest {
    let plan = if !args.cameras.is_empty() {
        RenderPlan::Cameras(args.cameras.iter().map(TargetSpec::to_target).collect())
    } else if !args.scenes.is_empty() {
        RenderPlan::Scenes(args.scenes.iter().map(TargetSpec::to_target).collect())
    } else {
        RenderPlan::Whole {
            single_frame: args.frame,
            animation: FrameRange::new(args.start, args.end),
        }
    };

    let render = &settings.render;
    RenderRequest {
        executable: render
            .executable
            .as_ref()
            .map(|path| path.to_string_lossy().into_owned())
            .unwrap_or_default(),
        document: args.document.to_string_lossy().into_owned(),
        plan,
        output: OutputConfig {
            format: render.format,
            file_name: Some(render.output_file_name.clone()),
            directory: render
                .output_directory
                .as_ref()
                .map(|path| path.to_string_lossy().into_owned()),
            video_codec: render.video_codec.clone(),
            fps: render.fps,
            engine: render.engine,
        },
    }
}
