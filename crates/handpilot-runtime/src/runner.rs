//! The frame loop

use std::io;

use handpilot_core::{ActionDispatcher, FrameOutput, GestureEngine, InputSink, LandmarkFrame, ManualControl};
use thiserror::Error;
use tracing::{debug, info};

use crate::clock::FrameClock;
use crate::controls::ControlInput;
use crate::source::{LandmarkSource, SourceError};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Terminal control input failed: {0}")]
    Controls(#[from] io::Error),
}

/// Why and after how much work a run ended
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub events: u64,
    /// Operator pressed quit
    pub quit: bool,
    /// Interrupted by a signal
    pub interrupted: bool,
}

/// Pulls frames from a source, runs them through the engine and dispatches the result.
pub struct FrameLoop<S: InputSink> {
    engine: GestureEngine,
    dispatcher: ActionDispatcher<S>,
    clock: FrameClock,
    controls: Option<ControlInput>,
    pace: bool,
}

impl<S: InputSink> FrameLoop<S> {
    pub fn new(engine: GestureEngine, dispatcher: ActionDispatcher<S>, clock: FrameClock) -> Self {
        Self {
            engine,
            dispatcher,
            clock,
            controls: None,
            pace: false,
        }
    }

    pub fn with_controls(mut self, controls: ControlInput) -> Self {
        self.controls = Some(controls);
        self
    }

    /// Sleep so frames are processed no faster than their clock says
    pub fn with_pacing(mut self, pace: bool) -> Self {
        self.pace = pace;
        self
    }

    pub fn engine(&self) -> &GestureEngine {
        &self.engine
    }

    pub fn dispatcher(&self) -> &ActionDispatcher<S> {
        &self.dispatcher
    }

    /// Run until the source ends, the operator quits or the process is interrupted.
    ///
    /// A held drag is always released before returning, including on error.
    pub async fn run(&mut self, source: &mut dyn LandmarkSource) -> Result<RunSummary, RuntimeError> {
        info!(
            source = source.name(),
            controller = self.engine.controller().name(),
            "frame loop started"
        );
        let result = self.run_frames(source).await;

        let cleanup = self.engine.shutdown(self.clock.now());
        self.dispatcher.dispatch_all(&cleanup);

        if let Ok(summary) = &result {
            info!(
                frames = summary.frames,
                events = summary.events,
                quit = summary.quit,
                interrupted = summary.interrupted,
                "frame loop finished"
            );
        }
        result
    }

    async fn run_frames(&mut self, source: &mut dyn LandmarkSource) -> Result<RunSummary, RuntimeError> {
        let mut summary = RunSummary::default();
        let started = tokio::time::Instant::now();
        let interrupt = tokio::signal::ctrl_c();
        tokio::pin!(interrupt);

        loop {
            let next = tokio::select! {
                _ = &mut interrupt => {
                    info!("interrupt received");
                    summary.interrupted = true;
                    break;
                }
                control = next_control(&mut self.controls) => {
                    match control {
                        Some(Ok(control)) => {
                            if self.apply(control) {
                                summary.quit = true;
                                break;
                            }
                        }
                        Some(Err(e)) => return Err(e.into()),
                        None => {
                            debug!("terminal input closed");
                            self.controls = None;
                        }
                    }
                    continue;
                }
                next = source.next_frame() => next?,
            };
            let Some(frame) = next else {
                info!("landmark stream ended");
                break;
            };

            let output = self.step(&frame);
            summary.frames += 1;
            summary.events += output.events.len() as u64;

            if self.pace {
                tokio::time::sleep_until(started + self.clock.now()).await;
            }
        }

        Ok(summary)
    }

    /// Process and dispatch one frame
    pub fn step(&mut self, frame: &LandmarkFrame) -> FrameOutput {
        let now = self.clock.stamp(frame);
        let output = self.engine.process(frame, now);
        self.dispatcher.dispatch(&output);
        if !output.events.is_empty() {
            debug!(preview = %self.dispatcher.preview().text(), "preview");
        }
        output
    }

    /// Apply an operator command; returns true when it asks to quit
    pub fn apply(&mut self, control: ManualControl) -> bool {
        match control {
            ManualControl::Quit => {
                info!("quit requested");
                true
            }
            ManualControl::ClearText => {
                self.dispatcher.clear_preview();
                false
            }
            other => {
                let events = self.engine.apply(other, self.clock.now());
                self.dispatcher.dispatch_all(&events);
                false
            }
        }
    }
}

/// Pending forever when there is no terminal to read from
async fn next_control(controls: &mut Option<ControlInput>) -> Option<io::Result<ManualControl>> {
    match controls {
        Some(controls) => controls.next().await,
        None => std::future::pending().await,
    }
}
