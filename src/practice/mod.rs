//! Practice scheduler: a countdown followed by a tempo-driven carousel.
//!
//! The scheduler is a state machine over `Idle`, `Countdown` and
//! `Running`. The active timer lives inside the state variant that needs
//! it, so leaving a state drops (cancels) its timer and no two timers
//! can ever coexist.
//!
//! Time is injected: the host calls [`PracticeScheduler::poll`] from its
//! event loop with a monotonic millisecond timestamp and receives the
//! [`PracticeEvent`]s that became due. Each timer fires at most once per
//! poll, so a host resuming after a long pause sees one tick, not a burst.
//! Commands given a non-finite timestamp are ignored.

mod carousel;
mod config;
mod timer;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::Note;
use timer::IntervalTimer;

pub use carousel::{Carousel, CarouselSlot};
pub use config::{Bpm, DisplayFlags, PracticeConfig, SelectionMode, TempoPreset, DEFAULT_BPM, MAX_BPM, MIN_BPM};

/// Counts shown before the carousel starts moving.
pub const COUNTDOWN_FROM: u32 = 3;
/// Period of the countdown ticks.
pub const COUNTDOWN_PERIOD_MS: f64 = 1000.0;

/// Coarse scheduler state, as shown to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeState {
    Idle,
    Countdown,
    Running,
}

/// Something the host should react to (redraw, play a click, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PracticeEvent {
    /// The countdown shows this number
    CountdownTick(u32),
    /// The carousel was seeded and the beat timer started
    Started,
    /// The carousel moved one step; carries the new beat count
    Advanced(u64),
    /// The loop stopped; the carousel is kept
    Stopped,
    /// The loop stopped and the carousel was cleared
    Reset,
}

enum State {
    Idle,
    Countdown { timer: IntervalTimer, remaining: u32 },
    Running { timer: IntervalTimer },
}

pub struct PracticeScheduler {
    config: PracticeConfig,
    available: Vec<Note>,
    state: State,
    carousel: Carousel,
    beat_count: u64,
    rng: Box<dyn RngCore>,
    shut_down: bool,
}

impl PracticeScheduler {
    pub fn new(config: PracticeConfig, available: Vec<Note>) -> Self {
        Self::with_rng(config, available, StdRng::from_os_rng())
    }

    /// Use a caller-provided generator for random selection.
    pub fn with_rng<R: RngCore + 'static>(config: PracticeConfig, available: Vec<Note>, rng: R) -> Self {
        Self {
            config,
            available,
            state: State::Idle,
            carousel: Carousel::default(),
            beat_count: 0,
            rng: Box::new(rng),
            shut_down: false,
        }
    }

    // ── Queries ─────────────────────────────────────────────────────

    pub fn state(&self) -> PracticeState {
        match self.state {
            State::Idle => PracticeState::Idle,
            State::Countdown { .. } => PracticeState::Countdown,
            State::Running { .. } => PracticeState::Running,
        }
    }

    pub fn config(&self) -> &PracticeConfig {
        &self.config
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn beat_count(&self) -> u64 {
        self.beat_count
    }

    /// Remaining countdown number while counting down.
    pub fn countdown(&self) -> Option<u32> {
        match self.state {
            State::Countdown { remaining, .. } => Some(remaining),
            _ => None,
        }
    }

    pub fn available_notes(&self) -> &[Note] {
        &self.available
    }

    /// Beat period of the running loop, if any.
    pub fn beat_period_ms(&self) -> Option<f64> {
        match &self.state {
            State::Running { timer } => Some(timer.period_ms()),
            _ => None,
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    // ── Commands ────────────────────────────────────────────────────

    /// Begin the countdown.
    ///
    /// Fails with [`Error::NoNotesAvailable`] when there is nothing to
    /// practise; the scheduler then stays idle and no timer exists.
    /// Starting while already active does nothing.
    pub fn start(&mut self, now_ms: f64) -> Result<Vec<PracticeEvent>> {
        if self.shut_down {
            return Ok(Vec::new());
        }
        if !now_ms.is_finite() {
            log::warn!("practice start ignored: timestamp {now_ms} is not finite");
            return Ok(Vec::new());
        }
        if self.available.is_empty() {
            log::warn!("practice start refused: no notes available");
            return Err(Error::NoNotesAvailable);
        }
        if !matches!(self.state, State::Idle) {
            return Ok(Vec::new());
        }
        log::info!("practice countdown started at {} BPM", self.config.tempo.get());
        self.state = State::Countdown {
            timer: IntervalTimer::start(now_ms, COUNTDOWN_PERIOD_MS),
            remaining: COUNTDOWN_FROM,
        };
        Ok(vec![PracticeEvent::CountdownTick(COUNTDOWN_FROM)])
    }

    /// Fire the ticks that are due at `now_ms`, in order.
    pub fn poll(&mut self, now_ms: f64) -> Vec<PracticeEvent> {
        let mut events = Vec::new();
        if self.shut_down || !now_ms.is_finite() {
            return events;
        }
        loop {
            match &mut self.state {
                State::Idle => break,
                State::Countdown { timer, remaining } => {
                    let Some(due) = timer.fire(now_ms) else { break };
                    *remaining = remaining.saturating_sub(1);
                    if *remaining > 0 {
                        log::debug!("countdown {}", remaining);
                        events.push(PracticeEvent::CountdownTick(*remaining));
                    } else {
                        events.extend(self.begin_running(due));
                    }
                }
                State::Running { timer } => {
                    if timer.fire(now_ms).is_none() {
                        break;
                    }
                    events.extend(self.advance());
                }
            }
        }
        events
    }

    /// Stop the loop, keeping the carousel on screen.
    pub fn stop(&mut self) -> Option<PracticeEvent> {
        if matches!(self.state, State::Idle) {
            return None;
        }
        self.state = State::Idle;
        log::info!("practice stopped after {} beats", self.beat_count);
        Some(PracticeEvent::Stopped)
    }

    /// Stop the loop and clear the carousel.
    pub fn reset(&mut self) -> PracticeEvent {
        self.state = State::Idle;
        self.carousel.clear();
        self.beat_count = 0;
        log::debug!("practice reset");
        PracticeEvent::Reset
    }

    /// Change the tempo. A running loop restarts at once with the new
    /// period and a freshly seeded carousel.
    pub fn set_tempo(&mut self, tempo: Bpm, now_ms: f64) -> Vec<PracticeEvent> {
        if tempo == self.config.tempo || !now_ms.is_finite() {
            return Vec::new();
        }
        self.config.tempo = tempo;
        self.restart_if_running(now_ms)
    }

    /// Change the selection mode, restarting a running loop like
    /// [`set_tempo`](Self::set_tempo).
    pub fn set_selection_mode(&mut self, mode: SelectionMode, now_ms: f64) -> Vec<PracticeEvent> {
        if mode == self.config.selection_mode || !now_ms.is_finite() {
            return Vec::new();
        }
        self.config.selection_mode = mode;
        self.restart_if_running(now_ms)
    }

    pub fn set_display_flags(&mut self, display: DisplayFlags) {
        self.config.display = display;
    }

    /// Replace the notes the carousel draws from. An active loop stops
    /// when the new list is empty.
    pub fn set_available_notes(&mut self, notes: Vec<Note>) -> Option<PracticeEvent> {
        self.available = notes;
        if self.available.is_empty() {
            return self.stop();
        }
        None
    }

    /// Cancel everything for good. Later polls and starts do nothing.
    pub fn shutdown(&mut self) {
        self.state = State::Idle;
        self.shut_down = true;
        log::debug!("practice scheduler shut down");
    }

    // ── Transitions ─────────────────────────────────────────────────

    fn restart_if_running(&mut self, now_ms: f64) -> Vec<PracticeEvent> {
        if !matches!(self.state, State::Running { .. }) {
            return Vec::new();
        }
        let mut events: Vec<PracticeEvent> = self.stop().into_iter().collect();
        events.extend(self.begin_running(now_ms));
        events
    }

    /// Seed the carousel with three draws and start the beat timer at `at_ms`.
    fn begin_running(&mut self, at_ms: f64) -> Option<PracticeEvent> {
        let mode = self.config.selection_mode;
        let first = carousel::select_note(mode, &self.available, None, self.rng.as_mut());
        let second = carousel::select_note(mode, &self.available, first.as_ref(), self.rng.as_mut());
        let third = carousel::select_note(mode, &self.available, second.as_ref(), self.rng.as_mut());
        let (Some(previous), Some(current), Some(next)) = (first, second, third) else {
            self.state = State::Idle;
            return Some(PracticeEvent::Stopped);
        };

        self.carousel = Carousel::seeded(previous, current, next);
        self.beat_count = 0;
        self.state = State::Running {
            timer: IntervalTimer::start(at_ms, self.config.tempo.period_ms()),
        };
        log::info!("practice running at {} BPM", self.config.tempo.get());
        Some(PracticeEvent::Started)
    }

    fn advance(&mut self) -> Option<PracticeEvent> {
        let head = self.carousel.head();
        let fresh = carousel::select_note(
            self.config.selection_mode,
            &self.available,
            head.as_ref(),
            self.rng.as_mut(),
        )?;
        self.carousel.advance(fresh);
        self.beat_count += 1;
        log::debug!("beat {}: current {:?}", self.beat_count, self.carousel.current());
        Some(PracticeEvent::Advanced(self.beat_count))
    }
}
