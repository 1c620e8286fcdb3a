//! Interactive Physics Simulations
//!
//! Headless host for the spring, whirligig, jelly and flywheel demos. Each demo runs
//! on its own scheduler thread; this loop plays the part of the render thread, feeding
//! scripted panel messages and reading back render models once per frame.

mod app;
mod ui;
mod view;

use anyhow::{bail, Context, Result};
use app::{App, HostApp, Message};
use sim_physics::{Flywheel, Jelly, Spring1D, Whirligig};
use std::str::FromStr;
use std::thread;
use std::time::{Duration, Instant};

const FRAME_TIME: Duration = Duration::from_micros(16_667);
const DEFAULT_SECONDS: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Spring,
    Whirligig,
    Jelly,
    Flywheel,
    All,
}

impl FromStr for Selection {
    type Err = anyhow::Error;

    fn from_str(name: &str) -> Result<Self> {
        Ok(match name {
            "spring" => Self::Spring,
            "whirligig" => Self::Whirligig,
            "jelly" => Self::Jelly,
            "flywheel" => Self::Flywheel,
            "all" => Self::All,
            other => bail!("unknown simulation '{other}' (spring|whirligig|jelly|flywheel|all)"),
        })
    }
}

impl Selection {
    fn apps(self) -> Result<Vec<Box<dyn HostApp>>> {
        let mut apps: Vec<Box<dyn HostApp>> = Vec::new();
        if matches!(self, Self::Spring | Self::All) {
            apps.push(Box::new(App::<Spring1D>::new(Default::default())?));
        }
        if matches!(self, Self::Whirligig | Self::All) {
            apps.push(Box::new(App::<Whirligig>::new(Default::default())?));
        }
        if matches!(self, Self::Jelly | Self::All) {
            apps.push(Box::new(App::<Jelly>::new(Default::default())?));
        }
        if matches!(self, Self::Flywheel | Self::All) {
            apps.push(Box::new(App::<Flywheel>::new(Default::default())?));
        }
        Ok(apps)
    }
}

/// Scripted panel activity at fixed fractions of the run.
fn script(frame: u32, frames: u32) -> Option<Cue> {
    let at = |fraction: f32| (frames as f32 * fraction) as u32;
    match frame {
        0 => Some(Cue::Send(Message::Start)),
        f if f == at(0.2) => Some(Cue::Send(Message::Skip)),
        f if f == at(0.4) => Some(Cue::Distort),
        f if f == at(0.55) => Some(Cue::Tweak),
        f if f == at(0.8) => Some(Cue::Send(Message::Restart)),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
enum Cue {
    Send(Message),
    Distort,
    Tweak,
}

fn run(selection: Selection, seconds: f32) -> Result<()> {
    let mut apps = selection.apps()?;
    let frames = (seconds / FRAME_TIME.as_secs_f32()).ceil().max(1.0) as u32;
    log::info!("Running {selection:?} for {seconds} s ({frames} frames)");

    let started = Instant::now();
    let mut last_report = Instant::now();
    for frame in 0..frames {
        let frame_start = Instant::now();

        if let Some(cue) = script(frame, frames) {
            for app in apps.iter_mut() {
                let message = match cue {
                    Cue::Send(message) => message,
                    Cue::Distort if app.name() == "jelly" => Message::Distort,
                    Cue::Distort => continue,
                    Cue::Tweak => app.tweak_panel(),
                };
                app.writer().push(message)?;
            }
        }

        let mut uploaded = 0;
        for app in apps.iter_mut() {
            app.update()
                .with_context(|| format!("{} app failed", app.name()))?;
            uploaded += app.render()?;
        }
        log::trace!("frame {frame}: {uploaded} bytes of render data");

        if last_report.elapsed() >= Duration::from_secs(1) {
            report(&apps)?;
            last_report = Instant::now();
        }

        if let Some(rest) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    for app in apps.iter_mut() {
        app.writer().push(Message::Stop)?;
        app.update()?;
    }
    report(&apps)?;
    log::info!("✓ Finished after {:.2} s", started.elapsed().as_secs_f32());
    Ok(())
}

fn report(apps: &[Box<dyn HostApp>]) -> Result<()> {
    for app in apps {
        let state = if app.is_running() { "running" } else { "paused" };
        log::info!("  {:<9} [{state}] {}", app.name(), app.summary()?);
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let selection = match args.next() {
        Some(name) => name.parse()?,
        None => Selection::All,
    };
    let seconds = match args.next() {
        Some(value) => value
            .parse::<f32>()
            .with_context(|| format!("invalid duration '{value}'"))?,
        None => DEFAULT_SECONDS,
    };
    if !(seconds.is_finite() && seconds > 0.0) {
        bail!("duration must be a positive number of seconds, got {seconds}");
    }

    log::info!("Starting physics simulations...");
    run(selection, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selection() {
        assert_eq!("jelly".parse::<Selection>().unwrap(), Selection::Jelly);
        assert!("blackhole".parse::<Selection>().is_err());
    }

    #[test]
    fn script_starts_first_and_restarts_late() {
        assert!(matches!(script(0, 100), Some(Cue::Send(Message::Start))));
        assert!(matches!(script(80, 100), Some(Cue::Send(Message::Restart))));
        assert!(script(81, 100).is_none());
    }
}
