//! Per-demo host apps
//!
//! An app owns one scheduler, the panel state and the render model the step callback
//! writes into. Once per frame it drains its message queue and turns every message
//! into scheduler calls.

use crate::ui::{FlywheelPanel, JellyPanel, SpringPanel, WhirligigPanel};
use crate::view::{FlywheelView, JellyView, SpringView, WhirligigView};
use anyhow::{anyhow, Result};
use sim_physics::{Flywheel, ForcingFunction, Jelly, Simulatable, Spring1D, Whirligig};
use sim_scheduler::{message_queue, MessageReader, MessageWriter, RunParams, Scheduler};
use std::sync::{Arc, Mutex};

/// Commands a control panel sends to its app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Start,
    Stop,
    /// Stop, reset with the panel parameters, clear plots and start again
    Restart,
    /// Push panel parameters into the live body; steps once if paused
    Apply,
    /// Fast-forward by the panel's skip count
    Skip,
    /// Jelly only: random velocity kick
    Distort,
    /// Jelly only: move the control frame to the panel pose
    UpdateFrame,
}

/// Glue between a body, its panel and its render model.
pub trait Demo: Simulatable + Sized {
    type Panel: Copy + Send + 'static;
    type View: Send + 'static;

    const NAME: &'static str;

    fn create(panel: &Self::Panel) -> Self;
    fn view(panel: &Self::Panel) -> Self::View;
    fn run_params(panel: &Self::Panel) -> RunParams;

    /// Parameter transaction, leaves the kinematic state alone.
    fn apply(&mut self, panel: &Self::Panel);
    /// Parameter transaction plus initial conditions.
    fn reset(&mut self, panel: &Self::Panel);

    fn record(&self, view: &mut Self::View);
    /// Empties the plots, picking up the panel's current history bounds.
    fn clear(view: &mut Self::View, panel: &Self::Panel);
    fn summary(view: &Self::View) -> String;
    /// Packs the render model for upload and returns the byte count.
    fn render(view: &mut Self::View) -> usize;

    /// A scripted panel edit, standing in for a user dragging a slider.
    fn tweak(panel: &mut Self::Panel) -> Message;

    /// Returns false when the body has no such stimulus.
    fn distort(&mut self) -> bool {
        false
    }

    fn update_frame(&mut self, _panel: &Self::Panel) -> bool {
        false
    }
}

impl Demo for Spring1D {
    type Panel = SpringPanel;
    type View = SpringView;

    const NAME: &'static str = "spring";

    fn create(_panel: &SpringPanel) -> Self {
        Spring1D::default()
    }

    fn view(panel: &SpringPanel) -> SpringView {
        SpringView::new(panel.history_length)
    }

    fn run_params(panel: &SpringPanel) -> RunParams {
        panel.run
    }

    fn apply(&mut self, panel: &SpringPanel) {
        panel.params().apply_to(self);
    }

    fn reset(&mut self, panel: &SpringPanel) {
        panel.params().reset(self);
    }

    fn record(&self, view: &mut SpringView) {
        view.record(self);
    }

    fn clear(view: &mut SpringView, panel: &SpringPanel) {
        view.clear(panel.history_length);
    }

    fn summary(view: &SpringView) -> String {
        view.summary()
    }

    fn render(view: &mut SpringView) -> usize {
        view.vertex_bytes().len()
    }

    fn tweak(panel: &mut SpringPanel) -> Message {
        panel.field_force.select(3);
        *panel.field_force.selected_mut() = ForcingFunction::sine(0.5, 2.0, 0.0);
        log::info!(
            "spring field force set to {}",
            panel.field_force.selected().label()
        );
        Message::Apply
    }
}

impl Demo for Whirligig {
    type Panel = WhirligigPanel;
    type View = WhirligigView;

    const NAME: &'static str = "whirligig";

    fn create(_panel: &WhirligigPanel) -> Self {
        Whirligig::default()
    }

    fn view(panel: &WhirligigPanel) -> WhirligigView {
        WhirligigView::new(panel.trajectory_length)
    }

    fn run_params(panel: &WhirligigPanel) -> RunParams {
        panel.run
    }

    fn apply(&mut self, panel: &WhirligigPanel) {
        panel.params().apply_to(self);
    }

    fn reset(&mut self, panel: &WhirligigPanel) {
        panel.params().reset(self);
    }

    fn record(&self, view: &mut WhirligigView) {
        view.record(self);
    }

    fn clear(view: &mut WhirligigView, panel: &WhirligigPanel) {
        view.clear(panel.trajectory_length);
    }

    fn summary(view: &WhirligigView) -> String {
        view.summary()
    }

    fn render(view: &mut WhirligigView) -> usize {
        view.trajectory_bytes().len() + bytemuck::bytes_of(&view.diagonal).len()
    }

    fn tweak(panel: &mut WhirligigPanel) -> Message {
        panel.params.cube_density *= 2.0;
        Message::Apply
    }
}

impl Demo for Jelly {
    type Panel = JellyPanel;
    type View = JellyView;

    const NAME: &'static str = "jelly";

    fn create(_panel: &JellyPanel) -> Self {
        Jelly::new()
    }

    fn view(_panel: &JellyPanel) -> JellyView {
        JellyView::new()
    }

    fn run_params(panel: &JellyPanel) -> RunParams {
        panel.run
    }

    fn apply(&mut self, panel: &JellyPanel) {
        panel.params.apply_to(self);
    }

    fn reset(&mut self, panel: &JellyPanel) {
        panel.params.reset(self);
    }

    fn record(&self, view: &mut JellyView) {
        view.record(self);
    }

    // the lattice snapshot has no history to clear
    fn clear(_view: &mut JellyView, _panel: &JellyPanel) {}

    fn summary(view: &JellyView) -> String {
        view.summary()
    }

    fn render(view: &mut JellyView) -> usize {
        view.point_bytes().len() + view.frame_bytes().len()
    }

    fn tweak(panel: &mut JellyPanel) -> Message {
        panel.params.frame_position.x += 0.5;
        panel.params.frame_orientation.z += 15.0;
        Message::UpdateFrame
    }

    fn distort(&mut self) -> bool {
        Jelly::distort(self);
        true
    }

    fn update_frame(&mut self, panel: &JellyPanel) -> bool {
        panel.params.apply_frame(self);
        true
    }
}

impl Demo for Flywheel {
    type Panel = FlywheelPanel;
    type View = FlywheelView;

    const NAME: &'static str = "flywheel";

    fn create(_panel: &FlywheelPanel) -> Self {
        Flywheel::new()
    }

    fn view(panel: &FlywheelPanel) -> FlywheelView {
        FlywheelView::new(panel.history_length)
    }

    fn run_params(panel: &FlywheelPanel) -> RunParams {
        panel.run
    }

    fn apply(&mut self, panel: &FlywheelPanel) {
        panel.params.apply_to(self);
    }

    fn reset(&mut self, panel: &FlywheelPanel) {
        panel.params.reset(self);
    }

    fn record(&self, view: &mut FlywheelView) {
        view.record(self);
    }

    fn clear(view: &mut FlywheelView, panel: &FlywheelPanel) {
        view.clear(panel.history_length);
    }

    fn summary(view: &FlywheelView) -> String {
        view.summary()
    }

    fn render(view: &mut FlywheelView) -> usize {
        view.vertex_bytes().len()
    }

    fn tweak(panel: &mut FlywheelPanel) -> Message {
        panel.params.standard_deviation = 0.01;
        Message::Apply
    }
}

pub struct App<D: Demo> {
    pub panel: D::Panel,
    scheduler: Scheduler<D>,
    view: Arc<Mutex<D::View>>,
    messages: MessageReader<Message>,
    writer: MessageWriter<Message>,
}

impl<D: Demo> App<D> {
    /// Builds the body, hands it to a stopped scheduler and resets it with `panel`.
    pub fn new(panel: D::Panel) -> Result<Self> {
        let view = Arc::new(Mutex::new(D::view(&panel)));
        let sink = Arc::clone(&view);
        let scheduler = Scheduler::new(
            D::create(&panel),
            D::run_params(&panel).dt,
            move |body: &D| {
                if let Ok(mut view) = sink.lock() {
                    body.record(&mut view);
                }
            },
        )?;
        scheduler.apply(move |body| body.reset(&panel))?;

        let (messages, writer) = message_queue();
        log::info!("✓ {} app initialized", D::NAME);
        Ok(Self {
            panel,
            scheduler,
            view,
            messages,
            writer,
        })
    }

    /// A sending end for the panel.
    pub fn writer(&self) -> MessageWriter<Message> {
        self.writer.clone()
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Handles every message queued since the last frame.
    pub fn update(&mut self) -> Result<()> {
        let pending: Vec<_> = self.messages.drain().collect();
        for message in pending {
            self.handle_message(message)?;
        }
        Ok(())
    }

    pub fn handle_message(&mut self, message: Message) -> Result<()> {
        log::debug!("{}: {message:?}", D::NAME);
        let panel = self.panel;
        let run = D::run_params(&panel);

        match message {
            Message::Start => self.scheduler.start()?,
            Message::Stop => self.scheduler.stop()?,
            Message::Restart => {
                self.scheduler.stop()?;
                self.scheduler.apply(move |body| body.reset(&panel))?;
                self.scheduler.set_dt(run.dt)?;
                self.clear_view()?;
                self.scheduler.start()?;
            }
            Message::Apply => {
                let paused = !self.scheduler.is_running();
                self.scheduler.apply(move |body| {
                    body.apply(&panel);
                    if paused {
                        body.update(run.dt);
                    }
                })?;
                self.scheduler.set_dt(run.dt)?;
                self.clear_view()?;
            }
            Message::Skip => self.scheduler.set_skip_frames(run.skip_frames)?,
            Message::Distort => {
                if !self.scheduler.apply(|body| body.distort())? {
                    log::warn!("{} has no distort stimulus", D::NAME);
                }
            }
            Message::UpdateFrame => {
                if !self.scheduler.apply(move |body| body.update_frame(&panel))? {
                    log::warn!("{} has no control frame", D::NAME);
                }
            }
        }
        Ok(())
    }

    /// Reads the render model under its lock.
    pub fn with_view<R>(&self, read: impl FnOnce(&mut D::View) -> R) -> Result<R> {
        let mut view = self
            .view
            .lock()
            .map_err(|_| anyhow!("{} view lock poisoned", D::NAME))?;
        Ok(read(&mut view))
    }

    pub fn summary(&self) -> Result<String> {
        self.with_view(|view| D::summary(view))
    }

    fn clear_view(&self) -> Result<()> {
        self.with_view(|view| D::clear(view, &self.panel))
    }
}

/// Object-safe face of an [`App`], so the host can drive a mixed set of demos.
pub trait HostApp {
    fn name(&self) -> &'static str;
    fn writer(&self) -> MessageWriter<Message>;
    fn update(&mut self) -> Result<()>;
    fn summary(&self) -> Result<String>;
    fn is_running(&self) -> bool;
    /// Packs the render model as the renderer would, returning the byte count.
    fn render(&mut self) -> Result<usize>;
    /// Nudges the panel the way a user would and returns the message that submits it.
    fn tweak_panel(&mut self) -> Message;
}

impl<D: Demo> HostApp for App<D> {
    fn name(&self) -> &'static str {
        D::NAME
    }

    fn writer(&self) -> MessageWriter<Message> {
        App::writer(self)
    }

    fn update(&mut self) -> Result<()> {
        App::update(self)
    }

    fn summary(&self) -> Result<String> {
        App::summary(self)
    }

    fn is_running(&self) -> bool {
        App::is_running(self)
    }

    fn render(&mut self) -> Result<usize> {
        self.with_view(D::render)
    }

    fn tweak_panel(&mut self) -> Message {
        D::tweak(&mut self.panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spring_app() -> App<Spring1D> {
        App::new(SpringPanel::default()).unwrap()
    }

    #[test]
    fn construction_resets_and_reports_once() {
        let app = spring_app();
        let samples = app.with_view(|view| view.history.len()).unwrap();
        assert_eq!(samples, 1);
        assert!(!app.is_running());
    }

    #[test]
    fn apply_while_paused_steps_once_and_clears_plots() {
        let mut app = spring_app();
        app.writer().push(Message::Apply).unwrap();
        app.update().unwrap();

        assert!(!app.is_running());
        // the step happened inside the apply, before the plots were cleared
        assert_eq!(app.with_view(|view| view.history.len()).unwrap(), 0);
        app.writer().push(Message::Apply).unwrap();
        app.update().unwrap();
        let t = app.scheduler.apply(|spring| spring.t()).unwrap();
        assert!((t - 0.02).abs() < 1e-6);
    }

    #[test]
    fn apply_picks_up_new_trajectory_length() {
        let mut app = App::<Whirligig>::new(WhirligigPanel::default()).unwrap();
        assert_eq!(app.with_view(|view| view.trajectory.capacity()).unwrap(), 5000);

        app.panel.trajectory_length = 3;
        app.handle_message(Message::Apply).unwrap();
        assert_eq!(app.with_view(|view| view.trajectory.capacity()).unwrap(), 3);

        for _ in 0..5 {
            app.scheduler.apply(|whirligig| whirligig.update(0.01)).unwrap();
        }
        assert_eq!(app.with_view(|view| view.trajectory.len()).unwrap(), 3);
    }

    #[test]
    fn restart_picks_up_new_history_length() {
        let mut app = App::<Flywheel>::new(FlywheelPanel::default()).unwrap();
        app.panel.history_length = 2;
        app.handle_message(Message::Restart).unwrap();
        app.handle_message(Message::Stop).unwrap();
        assert_eq!(app.with_view(|view| view.history.capacity()).unwrap(), 2);
        assert!(app.with_view(|view| view.history.len()).unwrap() <= 2);
    }

    #[test]
    fn spring_tweak_edits_the_selected_template() {
        let mut panel = SpringPanel::default();
        assert_eq!(Spring1D::tweak(&mut panel), Message::Apply);
        assert_eq!(
            panel.params().field_force_function,
            ForcingFunction::sine(0.5, 2.0, 0.0)
        );
    }

    #[test]
    fn restart_rewinds_time_and_runs() {
        let mut app = spring_app();
        app.handle_message(Message::Start).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(30));
        app.handle_message(Message::Restart).unwrap();
        assert!(app.is_running());
        app.handle_message(Message::Stop).unwrap();
        let t = app.scheduler.apply(|spring| spring.t()).unwrap();
        assert!(t < 0.5, "t = {t}");
    }

    #[test]
    fn distort_reaches_jelly_only() {
        let mut jelly = App::<Jelly>::new(JellyPanel::default()).unwrap();
        jelly.handle_message(Message::Distort).unwrap();
        let moving = jelly
            .scheduler
            .apply(|jelly| jelly.control_point_velocities().iter().all(|v| v.length() > 0.0))
            .unwrap();
        assert!(moving);

        let mut spring = spring_app();
        spring.handle_message(Message::Distort).unwrap();
    }

    #[test]
    fn frame_update_moves_frame_corners() {
        let mut app = App::<Jelly>::new(JellyPanel::default()).unwrap();
        let message = app.tweak_panel();
        assert_eq!(message, Message::UpdateFrame);
        app.handle_message(message).unwrap();
        let frame_x = app.scheduler.apply(|jelly| jelly.frame().position.x).unwrap();
        assert_eq!(frame_x, 0.5);
    }
}
