use std::path::Path;

use anyhow::{Context, Result};
use handpilot_config::AppConfig;
use handpilot_core::{ActionDispatcher, GestureEngine, InputSink};
use handpilot_runtime::{ControlInput, FrameClock, FrameLoop, JsonLinesSource, LandmarkSource, TracingSink};
use tokio::io::BufReader;
use tracing::{error, info, warn};

use crate::cli::RunArgs;

pub async fn run(mut config: AppConfig, args: RunArgs) -> Result<()> {
    if let Some(controller) = args.controller {
        config.controller = controller.into();
    }
    if let Some(selection) = args.selection {
        config.keyboard.selection_method = selection.into();
    }

    let engine = GestureEngine::new(config.gesture.clone(), config.controller, config.screen_size())
        .with_selection_method(config.keyboard.selection_method)
        .with_toggles(config.toggles.into());
    let dispatcher = ActionDispatcher::new(input_sink(args.dry_run)?, config.gesture.preview_capacity);
    let clock = if args.replay_clock {
        FrameClock::recorded()
    } else {
        FrameClock::wall()
    };

    let mut frame_loop = FrameLoop::new(engine, dispatcher, clock).with_pacing(args.pace);
    if !args.no_controls {
        match ControlInput::new() {
            Ok(controls) => frame_loop = frame_loop.with_controls(controls),
            Err(e) => warn!(error = %e, "operator keys unavailable"),
        }
    }

    let mut source = open_source(&args.input).await?;
    info!(
        controller = config.controller.name(),
        selection = config.keyboard.selection_method.name(),
        "handpilot starting"
    );

    let summary = match frame_loop.run(source.as_mut()).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, source = source.name(), "frame loop aborted");
            return Err(e).context("landmark processing failed");
        }
    };
    info!(
        frames = summary.frames,
        events = summary.events,
        preview = %frame_loop.dispatcher().preview().text(),
        "done"
    );
    Ok(())
}

async fn open_source(input: &str) -> Result<Box<dyn LandmarkSource>> {
    if input == "-" {
        return Ok(Box::new(JsonLinesSource::new(BufReader::new(tokio::io::stdin()), "stdin")));
    }
    let path = Path::new(input);
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("failed to open landmark stream {}", path.display()))?;
    Ok(Box::new(JsonLinesSource::new(BufReader::new(file), input)))
}

#[cfg(feature = "os-input")]
fn input_sink(dry_run: bool) -> Result<Box<dyn InputSink>> {
    if dry_run {
        return Ok(Box::new(TracingSink::new()));
    }
    let sink = handpilot_runtime::sink::EnigoSink::new().context("failed to open OS input")?;
    Ok(Box::new(sink))
}

#[cfg(not(feature = "os-input"))]
fn input_sink(dry_run: bool) -> Result<Box<dyn InputSink>> {
    if !dry_run {
        warn!("built without the os-input feature; input actions are only logged");
    }
    Ok(Box::new(TracingSink::new()))
}
