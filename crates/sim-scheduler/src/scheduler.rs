//! Fixed-step simulation worker
//!
//! The worker thread owns the body and the step callback. Every external request
//! arrives as a [`Command`] and is handled between steps, so a mutation never
//! overlaps an `update()` and the callback always sees a consistent state.
//!
//! Each iteration advances the body by the configured period, reports it through the
//! callback, then waits out the rest of the period while still listening for
//! commands. Pending skip frames bypass the wait.

use crate::error::{SchedulerError, SchedulerResult};
use crate::params::period_from_secs;
use sim_physics::Simulatable;
use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

type Callback<S> = Box<dyn FnMut(&S) + Send>;
type Job<S> = Box<dyn FnOnce(&mut S, &mut dyn FnMut(&S)) + Send>;

enum Command<S> {
    Start,
    Stop(Sender<()>),
    Apply(Job<S>),
    SetPeriod(Duration),
    Skip(u32),
    Shutdown,
}

/// Runs one [`Simulatable`] body on a dedicated thread.
///
/// Dropping the scheduler stops the worker and joins it.
pub struct Scheduler<S: Simulatable> {
    commands: Sender<Command<S>>,
    worker: Option<JoinHandle<()>>,
    running: bool,
    period: Duration,
}

impl<S: Simulatable> Scheduler<S> {
    /// Moves `state` onto a new, idle worker that steps it every `dt` seconds once
    /// started and reports every step and every [`Scheduler::apply`] through `callback`.
    ///
    /// The callback runs on the worker and must not call back into this scheduler.
    pub fn new<C>(state: S, dt: f32, callback: C) -> SchedulerResult<Self>
    where
        C: FnMut(&S) + Send + 'static,
    {
        let period = period_from_secs(dt)?;
        let (commands, receiver) = mpsc::channel();

        let worker = Worker {
            state,
            callback: Box::new(callback),
            commands: receiver,
            period,
            running: false,
            skip_frames: 0,
        };
        let handle = thread::Builder::new()
            .name("simulation".into())
            .spawn(move || worker.run())?;

        log::debug!("simulation worker spawned (dt {dt} s)");
        Ok(Self {
            commands,
            worker: Some(handle),
            running: false,
            period,
        })
    }

    /// Starts stepping. Does nothing if already running.
    pub fn start(&mut self) -> SchedulerResult<()> {
        if self.running {
            return Ok(());
        }
        self.send(Command::Start)?;
        self.running = true;
        log::debug!("simulation started");
        Ok(())
    }

    /// Stops stepping and waits until the in-flight step and its callback are done.
    /// Does nothing if not running.
    pub fn stop(&mut self) -> SchedulerResult<()> {
        if !self.running {
            return Ok(());
        }
        self.running = false;
        let (ack, acked) = mpsc::channel();
        self.send(Command::Stop(ack))?;
        acked.recv().map_err(|_| SchedulerError::WorkerTerminated)?;
        log::debug!("simulation stopped");
        Ok(())
    }

    /// Runs `mutator` against the live state, then the callback once with the result,
    /// and returns what `mutator` returned. Works whether running or not and never
    /// starts the worker.
    pub fn apply<F, R>(&self, mutator: F) -> SchedulerResult<R>
    where
        F: FnOnce(&mut S) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply, replied) = mpsc::sync_channel(1);
        self.send(Command::Apply(Box::new(move |state, callback| {
            let result = mutator(state);
            callback(state);
            let _ = reply.send(result);
        })))?;
        replied.recv().map_err(|_| SchedulerError::WorkerTerminated)
    }

    /// Changes the step period from the next iteration on.
    pub fn set_dt(&mut self, dt: f32) -> SchedulerResult<()> {
        let period = period_from_secs(dt)?;
        if period == self.period {
            return Ok(());
        }
        self.send(Command::SetPeriod(period))?;
        self.period = period;
        log::debug!("simulation dt set to {dt} s");
        Ok(())
    }

    /// Adds `frames` to the pending fast-forward count. The count only grows from here;
    /// the worker consumes it one step at a time, without pacing.
    pub fn set_skip_frames(&self, frames: u32) -> SchedulerResult<()> {
        if frames == 0 {
            return Ok(());
        }
        self.send(Command::Skip(frames))?;
        log::debug!("skipping {frames} frames");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current step period, seconds.
    pub fn dt(&self) -> f32 {
        self.period.as_secs_f32()
    }

    fn send(&self, command: Command<S>) -> SchedulerResult<()> {
        self.commands
            .send(command)
            .map_err(|_| SchedulerError::WorkerTerminated)
    }
}

impl<S: Simulatable> Drop for Scheduler<S> {
    fn drop(&mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("simulation worker panicked");
            }
        }
    }
}

struct Worker<S> {
    state: S,
    callback: Callback<S>,
    commands: Receiver<Command<S>>,
    period: Duration,
    running: bool,
    skip_frames: u32,
}

impl<S: Simulatable> Worker<S> {
    fn run(mut self) {
        while self.next_iteration().is_continue() {}
        log::debug!("simulation worker exiting");
    }

    fn next_iteration(&mut self) -> ControlFlow<()> {
        if !self.running {
            // idle: nothing to do until a command arrives
            return match self.commands.recv() {
                Ok(command) => self.handle(command),
                Err(_) => ControlFlow::Break(()),
            };
        }

        let started = Instant::now();
        let period = self.period;
        self.state.update(period.as_secs_f32());
        (self.callback)(&self.state);

        loop {
            match self.commands.try_recv() {
                Ok(command) => self.handle(command)?,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return ControlFlow::Break(()),
            }
        }

        if !self.running {
            return ControlFlow::Continue(());
        }
        if self.skip_frames > 0 {
            self.skip_frames -= 1;
            return ControlFlow::Continue(());
        }

        let elapsed = started.elapsed();
        if elapsed > period {
            log::warn!(
                "simulation running late by {:.3} ms",
                (elapsed - period).as_secs_f64() * 1e3
            );
            return ControlFlow::Continue(());
        }
        self.pace_until(started + period)
    }

    // Sleeps until `deadline`, handling commands as they arrive. Stopping or a skip
    // request ends the wait early.
    fn pace_until(&mut self, deadline: Instant) -> ControlFlow<()> {
        loop {
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                return ControlFlow::Continue(());
            };
            match self.commands.recv_timeout(remaining) {
                Ok(command) => {
                    self.handle(command)?;
                    if !self.running || self.skip_frames > 0 {
                        return ControlFlow::Continue(());
                    }
                }
                Err(RecvTimeoutError::Timeout) => return ControlFlow::Continue(()),
                Err(RecvTimeoutError::Disconnected) => return ControlFlow::Break(()),
            }
        }
    }

    fn handle(&mut self, command: Command<S>) -> ControlFlow<()> {
        match command {
            Command::Start => self.running = true,
            Command::Stop(ack) => {
                self.running = false;
                let _ = ack.send(());
            }
            Command::Apply(job) => job(&mut self.state, &mut *self.callback),
            Command::SetPeriod(period) => self.period = period,
            Command::Skip(frames) => self.skip_frames = self.skip_frames.saturating_add(frames),
            Command::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }
}
