//! Timer engine for the Pomodoro timer.
//!
//! This module provides the core timer functionality:
//! - The one-second tick loop (`tokio::time::interval` inside `select!`)
//! - Work → Break → Work transitions across the configured cycles
//! - Alarm playback and notices at interval boundaries
//! - Pause/continue, stop, reset and start controls received as commands
//!
//! The engine is the only owner of [`TimerState`]. The window talks to it
//! through a [`TimerHandle`], so controls and ticks are applied one at a time
//! on the same loop.

use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::error::TimerError;
use crate::sound::{SoundPlayer, SoundSource};
use crate::surface::{DisplaySurface, DisplayUpdate, Notice};
use crate::types::{TimerConfig, TimerState, Transition};

/// Length of one tick.
pub const TICK: Duration = Duration::from_secs(1);

// ============================================================================
// TimerCommand / TimerHandle
// ============================================================================

/// Controls sent to the engine loop.
#[derive(Debug)]
pub enum TimerCommand {
    /// Start counting down from the current position
    Start,
    /// Toggle between running and paused
    PauseOrContinue,
    /// Halt and rewind the current interval
    Stop,
    /// Restore the initial state and start over
    Reset,
    /// Reply with a copy of the current state
    Snapshot(oneshot::Sender<TimerState>),
    /// End the loop
    Shutdown,
}

/// Cloneable sender side of the engine's command channel.
///
/// Every method returns immediately; the effect is applied on the engine
/// loop before its next tick.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    tx: mpsc::UnboundedSender<TimerCommand>,
}

impl TimerHandle {
    /// Creates a handle and the receiver to pass to [`TimerEngine::new`].
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TimerCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, command: TimerCommand) -> Result<(), TimerError> {
        self.tx.send(command).map_err(|_| TimerError::EngineGone)
    }

    /// Starts counting down from the current position.
    ///
    /// Ignored, with a warning in the log, while a run is in progress.
    pub fn start(&self) -> Result<(), TimerError> {
        self.send(TimerCommand::Start)
    }

    /// Pauses a running timer or continues a paused one.
    pub fn pause_or_continue(&self) -> Result<(), TimerError> {
        self.send(TimerCommand::PauseOrContinue)
    }

    /// Halts the countdown and rewinds the current interval.
    pub fn stop(&self) -> Result<(), TimerError> {
        self.send(TimerCommand::Stop)
    }

    /// Starts over from cycle 1 with a fresh work interval.
    pub fn reset(&self) -> Result<(), TimerError> {
        self.send(TimerCommand::Reset)
    }

    /// Ends the engine loop; later calls return `TimerError::EngineGone`.
    pub fn shutdown(&self) -> Result<(), TimerError> {
        self.send(TimerCommand::Shutdown)
    }

    /// Returns a copy of the engine's current state.
    pub async fn snapshot(&self) -> Result<TimerState, TimerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(TimerCommand::Snapshot(reply_tx))?;
        reply_rx.await.map_err(|_| TimerError::EngineGone)
    }

    /// Returns true once the engine loop has exited.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that owns the timer state and drives the countdown.
pub struct TimerEngine {
    /// Current timer state
    state: TimerState,
    /// Incoming controls
    commands: mpsc::UnboundedReceiver<TimerCommand>,
    /// Where time and notices are shown
    surface: Box<dyn DisplaySurface>,
    /// Alarm player, absent when audio is unavailable or disabled
    alarm: Option<Box<dyn SoundPlayer>>,
    /// Sound played at interval boundaries
    alarm_source: SoundSource,
}

impl TimerEngine {
    /// Creates an idle engine without an alarm.
    pub fn new(
        config: TimerConfig,
        commands: mpsc::UnboundedReceiver<TimerCommand>,
        surface: Box<dyn DisplaySurface>,
    ) -> Self {
        Self {
            state: TimerState::new(config),
            commands,
            surface,
            alarm: None,
            alarm_source: SoundSource::beep(),
        }
    }

    /// Plays `source` through `player` at every interval boundary.
    pub fn with_alarm(mut self, player: Box<dyn SoundPlayer>, source: SoundSource) -> Self {
        self.alarm = Some(player);
        self.alarm_source = source;
        self
    }

    /// Runs the tick loop until shutdown.
    ///
    /// The timer is started on entry. The loop ends on
    /// [`TimerCommand::Shutdown`], or once every handle is dropped and the
    /// timer is no longer ticking or has just completed its last cycle.
    /// Returns the final state.
    pub async fn run(mut self) -> TimerState {
        let mut ticker = interval_at(Instant::now() + TICK, TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        if let Err(e) = self.start() {
            debug!("Timer already running on entry: {}", e);
        }

        let mut commands_open = true;
        loop {
            if !commands_open && !self.state.is_ticking() {
                debug!("No controls left and timer idle, leaving loop");
                break;
            }

            tokio::select! {
                command = self.commands.recv(), if commands_open => match command {
                    Some(TimerCommand::Shutdown) => {
                        info!("Shutdown requested");
                        break;
                    }
                    Some(command) => {
                        if self.handle_command(command) {
                            ticker.reset();
                        }
                    }
                    None => commands_open = false,
                },
                _ = ticker.tick(), if self.state.is_ticking() => {
                    let completed = self.tick() == Some(Transition::AllCyclesComplete);
                    if completed && !commands_open {
                        debug!("Run complete with no controls left, leaving loop");
                        break;
                    }
                }
            }
        }

        info!(
            status = self.state.status.as_str(),
            cycle = self.state.current_cycle,
            "Timer loop finished"
        );
        self.state
    }

    /// Applies one command.
    ///
    /// Returns true if the next tick should be a full second away.
    fn handle_command(&mut self, command: TimerCommand) -> bool {
        let was_ticking = self.state.is_ticking();

        match command {
            TimerCommand::Start => {
                if let Err(e) = self.start() {
                    warn!("Ignoring start: {}", e);
                }
            }
            TimerCommand::PauseOrContinue => {
                self.pause_or_continue();
            }
            TimerCommand::Stop => {
                self.stop();
            }
            TimerCommand::Reset => {
                self.reset();
                return true;
            }
            TimerCommand::Snapshot(reply) => {
                let _ = reply.send(self.state.clone());
            }
            TimerCommand::Shutdown => {}
        }

        !was_ticking && self.state.is_ticking()
    }

    /// Starts counting down from the current position.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::AlreadyRunning` if a run is in progress; the
    /// state is left untouched.
    pub fn start(&mut self) -> Result<(), TimerError> {
        if !self.state.start() {
            return Err(TimerError::AlreadyRunning);
        }

        info!(
            mode = self.state.mode.as_str(),
            cycle = self.state.current_cycle,
            "Timer started"
        );
        self.render();
        Ok(())
    }

    /// Toggles between running and paused.
    ///
    /// Returns false, changing nothing, if no run is in progress.
    pub fn pause_or_continue(&mut self) -> bool {
        if !self.state.toggle_pause() {
            debug!("Pause/continue ignored, timer not running");
            return false;
        }

        info!(paused = self.state.is_paused(), "Pause toggled");
        self.render();
        true
    }

    /// Halts the countdown and rewinds the current interval.
    ///
    /// Returns false, changing nothing, if no run is in progress.
    pub fn stop(&mut self) -> bool {
        if !self.state.stop() {
            debug!("Stop ignored, timer not running");
            return false;
        }

        info!(mode = self.state.mode.as_str(), "Timer stopped");
        self.render();
        true
    }

    /// Restores the initial state and starts a new run.
    pub fn reset(&mut self) {
        self.state.reset();
        info!("Timer reset");
        self.render();
    }

    /// Counts down one second.
    ///
    /// Renders the decrement, and when the interval runs out plays the alarm,
    /// switches interval, announces it and renders again. Returns the
    /// transition, if any. Does nothing unless the timer is running.
    pub fn tick(&mut self) -> Option<Transition> {
        if !self.state.is_ticking() {
            return None;
        }

        let finished = self.state.tick();
        self.render();
        if !finished {
            return None;
        }

        self.play_alarm();

        let transition = self.state.advance_interval();
        info!(
            ?transition,
            mode = self.state.mode.as_str(),
            cycle = self.state.current_cycle,
            "Interval finished"
        );
        self.announce(Notice::from(transition));
        self.render();
        Some(transition)
    }

    /// Returns a reference to the current timer state.
    pub fn get_state(&self) -> &TimerState {
        &self.state
    }

    /// Returns a mutable reference to the timer state (for testing).
    #[cfg(test)]
    pub fn get_state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }

    fn render(&self) {
        let update = DisplayUpdate::from_state(&self.state);
        if let Err(e) = self.surface.render(&update) {
            if e.is_disconnected() {
                debug!("Display update dropped: {}", e);
            } else {
                warn!("Display update failed: {}", e);
            }
        }
    }

    fn announce(&self, notice: Notice) {
        if let Err(e) = self.surface.announce(&notice) {
            warn!("Failed to show notice '{}': {}", notice.message(), e);
        }
    }

    fn play_alarm(&self) {
        let Some(player) = &self.alarm else {
            debug!("No alarm player, skipping alarm");
            return;
        };

        if let Err(e) = player.play(&self.alarm_source) {
            warn!(
                source = %self.alarm_source.name(),
                "Alarm playback failed: {} ({})",
                e,
                e.suggestion()
            );
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::sound::MockSoundPlayer;
    use crate::surface::MockSurface;
    use crate::types::{TimerMode, TimerStatus};

    struct Fixture {
        engine: TimerEngine,
        handle: TimerHandle,
        surface: Arc<MockSurface>,
        alarm: Arc<MockSoundPlayer>,
    }

    fn fixture(work: u32, brk: u32, cycles: u32) -> Fixture {
        fixture_with_config(TimerConfig::from_seconds(work, brk, cycles).unwrap())
    }

    fn fixture_with_config(config: TimerConfig) -> Fixture {
        let (handle, rx) = TimerHandle::channel();
        let surface = Arc::new(MockSurface::new());
        let alarm = Arc::new(MockSoundPlayer::new());
        let engine = TimerEngine::new(config, rx, Box::new(Arc::clone(&surface)))
            .with_alarm(Box::new(Arc::clone(&alarm)), SoundSource::file("alarm.wav"));
        Fixture {
            engine,
            handle,
            surface,
            alarm,
        }
    }

    // ------------------------------------------------------------------------
    // Synchronous control Tests
    // ------------------------------------------------------------------------

    mod control_tests {
        use super::*;

        #[test]
        fn test_new_engine_is_idle() {
            let f = fixture(2, 1, 2);
            let state = f.engine.get_state();
            assert_eq!(state.status, TimerStatus::Idle);
            assert_eq!(state.time_left_seconds, 2);
            assert!(f.surface.updates().is_empty());
        }

        #[test]
        fn test_start_renders() {
            let mut f = fixture(90, 30, 2);
            f.engine.start().unwrap();

            assert_eq!(f.engine.get_state().status, TimerStatus::Running);
            let update = f.surface.last_update().unwrap();
            assert_eq!(update.formatted_time, "01:30");
            assert_eq!(update.status_text, "Cycle 1/2 - Work Time");
        }

        #[test]
        fn test_start_already_running() {
            let mut f = fixture(2, 1, 2);
            f.engine.start().unwrap();
            f.engine.tick();
            let before = f.engine.get_state().clone();

            assert_eq!(f.engine.start(), Err(TimerError::AlreadyRunning));
            assert_eq!(f.engine.get_state(), &before);
        }

        #[test]
        fn test_start_while_paused_is_rejected() {
            let mut f = fixture(2, 1, 2);
            f.engine.start().unwrap();
            f.engine.pause_or_continue();
            assert_eq!(f.engine.start(), Err(TimerError::AlreadyRunning));
            assert!(f.engine.get_state().is_paused());
        }

        #[test]
        fn test_pause_or_continue_twice() {
            let mut f = fixture(5, 1, 1);
            f.engine.start().unwrap();
            f.engine.tick();

            assert!(f.engine.pause_or_continue());
            assert!(f.engine.get_state().is_paused());
            assert_eq!(
                f.surface.last_update().unwrap().status_text,
                "Cycle 1/1 - Work Time (Paused)"
            );

            assert!(f.engine.pause_or_continue());
            assert!(!f.engine.get_state().is_paused());
            assert_eq!(f.engine.get_state().time_left_seconds, 4);
        }

        #[test]
        fn test_pause_or_continue_ignored_when_idle() {
            let mut f = fixture(5, 1, 1);
            assert!(!f.engine.pause_or_continue());
            assert!(f.surface.updates().is_empty());
        }

        #[test]
        fn test_paused_engine_does_not_tick() {
            let mut f = fixture(5, 1, 1);
            f.engine.start().unwrap();
            f.engine.pause_or_continue();
            f.surface.clear();

            assert_eq!(f.engine.tick(), None);
            assert_eq!(f.engine.get_state().time_left_seconds, 5);
            assert!(f.surface.updates().is_empty());
        }

        #[test]
        fn test_stop_rewinds_break() {
            let mut f = fixture(2, 3, 2);
            f.engine.start().unwrap();
            f.engine.tick();
            f.engine.tick();
            f.engine.tick();
            assert_eq!(f.engine.get_state().mode, TimerMode::Break);
            assert_eq!(f.engine.get_state().time_left_seconds, 2);

            f.engine.stop();
            let state = f.engine.get_state();
            assert_eq!(state.status, TimerStatus::Stopped);
            assert_eq!(state.mode, TimerMode::Break);
            assert_eq!(state.time_left_seconds, 3);
            assert_eq!(state.current_cycle, 1);
            assert_eq!(f.surface.last_update().unwrap().formatted_time, "00:03");
        }

        #[test]
        fn test_stop_twice_same_state() {
            let mut f = fixture(4, 1, 1);
            f.engine.start().unwrap();
            f.engine.tick();
            assert!(f.engine.stop());
            let once = f.engine.get_state().clone();
            f.surface.clear();

            assert!(!f.engine.stop());
            assert_eq!(f.engine.get_state(), &once);
            assert!(f.surface.updates().is_empty());
        }

        #[test]
        fn test_stop_after_completion_keeps_completed() {
            let mut f = fixture(1, 1, 1);
            f.engine.start().unwrap();
            f.engine.tick();
            f.surface.clear();

            assert!(!f.engine.stop());
            assert_eq!(f.engine.get_state().status, TimerStatus::Completed);
            assert!(f.surface.updates().is_empty());
        }

        #[test]
        fn test_reset_mid_break() {
            let mut f = fixture(2, 5, 3);
            f.engine.start().unwrap();
            f.engine.tick();
            f.engine.tick();
            f.engine.tick();
            f.engine.pause_or_continue();

            f.engine.reset();
            let state = f.engine.get_state();
            assert_eq!(state.status, TimerStatus::Running);
            assert_eq!(state.mode, TimerMode::Work);
            assert_eq!(state.current_cycle, 1);
            assert_eq!(state.time_left_seconds, 2);
        }
    }

    // ------------------------------------------------------------------------
    // Tick and transition Tests
    // ------------------------------------------------------------------------

    mod tick_tests {
        use super::*;

        #[test]
        fn test_every_decrement_is_rendered() {
            let mut f = fixture(3, 1, 1);
            f.engine.start().unwrap();
            f.engine.tick();
            f.engine.tick();

            assert_eq!(f.surface.rendered_times(), vec!["00:03", "00:02", "00:01"]);
        }

        #[test]
        fn test_two_cycle_sequence() {
            let mut f = fixture(2, 1, 2);
            f.engine.start().unwrap();

            assert_eq!(f.engine.tick(), None);
            assert_eq!(
                f.engine.tick(),
                Some(Transition::BreakStarted { completed_cycle: 1 })
            );
            assert_eq!(f.engine.get_state().mode, TimerMode::Break);
            assert_eq!(f.engine.get_state().time_left_seconds, 1);
            assert_eq!(f.engine.get_state().current_cycle, 1);

            assert_eq!(f.engine.tick(), Some(Transition::WorkResumed { cycle: 2 }));
            assert_eq!(f.engine.get_state().mode, TimerMode::Work);
            assert_eq!(f.engine.get_state().time_left_seconds, 2);
            assert_eq!(f.engine.get_state().current_cycle, 2);

            assert_eq!(f.engine.tick(), None);
            assert_eq!(f.engine.tick(), Some(Transition::AllCyclesComplete));
            let state = f.engine.get_state();
            assert_eq!(state.status, TimerStatus::Completed);
            assert_eq!(state.mode, TimerMode::Work);
            assert_eq!(state.time_left_seconds, 2);
            assert_eq!(state.current_cycle, 1);

            assert_eq!(
                f.surface.notices(),
                vec![
                    Notice::BreakTime { completed_cycle: 1 },
                    Notice::BackToWork,
                    Notice::AllComplete,
                ]
            );
            assert_eq!(f.alarm.play_count(), 3);
            assert_eq!(f.alarm.get_play_calls()[0], SoundSource::file("alarm.wav"));
        }

        #[test]
        fn test_zero_is_rendered_before_switch() {
            let mut f = fixture(1, 2, 2);
            f.engine.start().unwrap();
            f.engine.tick();

            assert_eq!(f.surface.rendered_times(), vec!["00:01", "00:00", "00:02"]);
            let last = f.surface.last_update().unwrap();
            assert_eq!(last.mode, TimerMode::Break);
            assert_eq!(last.status_text, "Cycle 1/2 - Break Time");
        }

        #[test]
        fn test_completed_engine_stops_ticking() {
            let mut f = fixture(1, 1, 1);
            f.engine.start().unwrap();
            assert_eq!(f.engine.tick(), Some(Transition::AllCyclesComplete));
            assert_eq!(f.engine.tick(), None);
            assert_eq!(f.surface.last_update().unwrap().status_text, "All cycles complete!");
        }

        #[test]
        fn test_restart_on_complete_keeps_running() {
            let config = TimerConfig::from_seconds(1, 1, 1)
                .unwrap()
                .with_restart_on_complete(true);
            let mut f = fixture_with_config(config);
            f.engine.start().unwrap();

            assert_eq!(f.engine.tick(), Some(Transition::AllCyclesComplete));
            assert_eq!(f.engine.get_state().status, TimerStatus::Running);
            assert_eq!(f.engine.tick(), Some(Transition::AllCyclesComplete));
        }

        #[test]
        fn test_alarm_failure_does_not_stop_timer() {
            let mut f = fixture(1, 1, 2);
            f.alarm.set_should_fail(true);
            f.engine.start().unwrap();

            assert_eq!(
                f.engine.tick(),
                Some(Transition::BreakStarted { completed_cycle: 1 })
            );
            assert_eq!(f.engine.tick(), Some(Transition::WorkResumed { cycle: 2 }));
            assert_eq!(f.alarm.play_count(), 2);
        }

        #[test]
        fn test_surface_failure_does_not_stop_timer() {
            let mut f = fixture(2, 1, 1);
            f.surface.set_should_fail(true);
            f.engine.start().unwrap();
            f.engine.tick();
            assert_eq!(f.engine.get_state().time_left_seconds, 1);
        }

        #[test]
        fn test_no_alarm_player() {
            let (_handle, rx) = TimerHandle::channel();
            let surface = Arc::new(MockSurface::new());
            let mut engine = TimerEngine::new(
                TimerConfig::from_seconds(1, 1, 2).unwrap(),
                rx,
                Box::new(Arc::clone(&surface)),
            );
            engine.start().unwrap();
            assert!(engine.tick().is_some());
            assert_eq!(surface.notices().len(), 1);
        }

        #[test]
        fn test_cycle_bound_while_running() {
            let mut f = fixture(2, 2, 3);
            f.engine.start().unwrap();
            for _ in 0..40 {
                f.engine.tick();
                let state = f.engine.get_state();
                if state.is_running() {
                    assert!(state.current_cycle <= state.config.total_cycles);
                }
                if state.status == TimerStatus::Completed {
                    f.engine.reset();
                }
            }
        }

        #[test]
        fn test_get_state_mut() {
            let mut f = fixture(10, 1, 1);
            f.engine.start().unwrap();
            f.engine.get_state_mut().time_left_seconds = 1;
            assert_eq!(f.engine.tick(), Some(Transition::AllCyclesComplete));
        }
    }

    // ------------------------------------------------------------------------
    // Run loop Tests (paused tokio clock)
    // ------------------------------------------------------------------------

    mod run_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_run_ticks_once_per_second() {
            let f = fixture(10, 1, 1);
            let handle = f.handle.clone();

            let (_, snapshot) = tokio::join!(f.engine.run(), async move {
                tokio::time::sleep(Duration::from_millis(3500)).await;
                let snapshot = handle.snapshot().await.unwrap();
                handle.shutdown().unwrap();
                snapshot
            });

            assert_eq!(snapshot.time_left_seconds, 7);
            assert_eq!(
                f.surface.rendered_times(),
                vec!["00:10", "00:09", "00:08", "00:07"]
            );
        }

        #[tokio::test(start_paused = true)]
        async fn test_run_completes_when_handles_dropped() {
            let f = fixture(2, 1, 2);
            drop(f.handle);

            let state = f.engine.run().await;

            assert_eq!(state.status, TimerStatus::Completed);
            assert_eq!(state.mode, TimerMode::Work);
            assert_eq!(state.current_cycle, 1);
            assert_eq!(state.time_left_seconds, 2);
            assert_eq!(
                f.surface.rendered_times(),
                vec!["00:02", "00:01", "00:00", "00:01", "00:00", "00:02", "00:01", "00:00", "00:02"]
            );
            assert_eq!(f.alarm.play_count(), 3);
        }

        #[tokio::test(start_paused = true)]
        async fn test_restarting_run_ends_when_handles_dropped() {
            let config = TimerConfig::from_seconds(1, 1, 2)
                .unwrap()
                .with_restart_on_complete(true);
            let f = fixture_with_config(config);
            drop(f.handle);

            let state = f.engine.run().await;

            assert_eq!(state.status, TimerStatus::Running);
            assert_eq!(state.mode, TimerMode::Work);
            assert_eq!(state.current_cycle, 1);
            assert_eq!(
                f.surface.notices(),
                vec![
                    Notice::BreakTime { completed_cycle: 1 },
                    Notice::BackToWork,
                    Notice::AllComplete,
                ]
            );
        }

        #[tokio::test(start_paused = true)]
        async fn test_pause_suspends_ticking() {
            let f = fixture(10, 1, 1);
            let handle = f.handle.clone();

            let (_, (paused, resumed)) = tokio::join!(f.engine.run(), async move {
                tokio::time::sleep(Duration::from_millis(2500)).await;
                handle.pause_or_continue().unwrap();
                tokio::time::sleep(Duration::from_secs(5)).await;
                let paused = handle.snapshot().await.unwrap();

                handle.pause_or_continue().unwrap();
                tokio::time::sleep(Duration::from_millis(1500)).await;
                let resumed = handle.snapshot().await.unwrap();
                handle.shutdown().unwrap();
                (paused, resumed)
            });

            assert!(paused.is_paused());
            assert_eq!(paused.time_left_seconds, 8);
            assert_eq!(resumed.status, TimerStatus::Running);
            assert_eq!(resumed.time_left_seconds, 7);
        }

        #[tokio::test(start_paused = true)]
        async fn test_stop_then_start_resumes_interval() {
            let f = fixture(10, 1, 1);
            let handle = f.handle.clone();

            let (_, (stopped, restarted)) = tokio::join!(f.engine.run(), async move {
                tokio::time::sleep(Duration::from_millis(3500)).await;
                handle.stop().unwrap();
                tokio::time::sleep(Duration::from_secs(3)).await;
                let stopped = handle.snapshot().await.unwrap();

                handle.start().unwrap();
                tokio::time::sleep(Duration::from_millis(1500)).await;
                let restarted = handle.snapshot().await.unwrap();
                handle.shutdown().unwrap();
                (stopped, restarted)
            });

            assert_eq!(stopped.status, TimerStatus::Stopped);
            assert_eq!(stopped.time_left_seconds, 10);
            assert_eq!(restarted.status, TimerStatus::Running);
            assert_eq!(restarted.time_left_seconds, 9);
        }

        #[tokio::test(start_paused = true)]
        async fn test_reset_restarts_single_loop() {
            let f = fixture(3, 2, 2);
            let handle = f.handle.clone();

            let (_, (after_reset, later)) = tokio::join!(f.engine.run(), async move {
                // Into the break of cycle 1
                tokio::time::sleep(Duration::from_millis(4500)).await;
                handle.reset().unwrap();
                let after_reset = handle.snapshot().await.unwrap();

                tokio::time::sleep(Duration::from_millis(1500)).await;
                let later = handle.snapshot().await.unwrap();
                handle.shutdown().unwrap();
                (after_reset, later)
            });

            assert_eq!(after_reset.status, TimerStatus::Running);
            assert_eq!(after_reset.mode, TimerMode::Work);
            assert_eq!(after_reset.current_cycle, 1);
            assert_eq!(after_reset.time_left_seconds, 3);
            // One tick per second after the reset, never two
            assert_eq!(later.time_left_seconds, 2);
        }

        #[tokio::test(start_paused = true)]
        async fn test_start_while_running_is_ignored() {
            let f = fixture(10, 1, 1);
            let handle = f.handle.clone();

            let (_, snapshot) = tokio::join!(f.engine.run(), async move {
                tokio::time::sleep(Duration::from_millis(1500)).await;
                handle.start().unwrap();
                tokio::time::sleep(Duration::from_secs(1)).await;
                let snapshot = handle.snapshot().await.unwrap();
                handle.shutdown().unwrap();
                snapshot
            });

            assert_eq!(snapshot.status, TimerStatus::Running);
            assert_eq!(snapshot.time_left_seconds, 8);
        }

        #[tokio::test(start_paused = true)]
        async fn test_handle_reports_engine_gone() {
            let f = fixture(10, 1, 1);
            let handle = f.handle.clone();
            handle.shutdown().unwrap();

            let state = f.engine.run().await;
            assert_eq!(state.status, TimerStatus::Running);

            assert!(handle.is_closed());
            assert_eq!(handle.stop(), Err(TimerError::EngineGone));
            assert_eq!(handle.snapshot().await, Err(TimerError::EngineGone));
        }
    }
}
