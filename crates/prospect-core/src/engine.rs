//! Session engine (controller).
//!
//! A caller-driven state machine in the same shape as a wall-clock timer:
//! it owns no thread, and whoever hosts it calls `tick()` at
//! [`TICK_INTERVAL`](crate::clock::TICK_INTERVAL). [`SessionRunner`]
//! is the async host.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> ...
//!   ^________ reset (from any phase) ________|
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = SessionEngine::new(CategorySelection::default(), SessionRng::new(None));
//! engine.start();
//! // every 200 ms:
//! if let Some(Event::FindRecorded { find, .. }) = engine.tick() { /* ... */ }
//! ```
//!
//! [`SessionRunner`]: crate::runner::SessionRunner

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::CategorySelection;
use crate::clock::{Clock, SessionClock, SystemClock};
use crate::discovery::{decide, ProbabilityModel, StepCurve};
use crate::error::NotifyError;
use crate::events::Event;
use crate::generator::{generate_find, generate_miss, success_entry};
use crate::notifier::{dispatch, CallbackNotifier, Notifier};
use crate::rng::SessionRng;
use crate::state::{Find, SessionState, SessionStats};

/// Share of ticks that append a routine miss line.
pub const MISS_LOG_RATIO: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Running,
    Paused,
}

/// What `start()` does with accumulated state when resuming from Paused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumePolicy {
    /// Keep finds, log and counters across pause/resume.
    #[default]
    Preserve,
    /// Every `start()` begins a fresh session.
    ClearOnStart,
}

pub struct SessionEngine {
    phase: SessionPhase,
    clock: Arc<dyn Clock>,
    session_clock: SessionClock,
    state: SessionState,
    rng: SessionRng,
    model: Box<dyn ProbabilityModel>,
    selection: CategorySelection,
    resume_policy: ResumePolicy,
    notifiers: Vec<Box<dyn Notifier>>,
}

impl SessionEngine {
    /// Idle engine on the system clock with the production step curve.
    pub fn new(selection: CategorySelection, rng: SessionRng) -> Self {
        Self {
            phase: SessionPhase::Idle,
            clock: Arc::new(SystemClock),
            session_clock: SessionClock::new(),
            state: SessionState::new(),
            rng,
            model: Box::new(StepCurve),
            selection,
            resume_policy: ResumePolicy::default(),
            notifiers: Vec::new(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_model(mut self, model: impl ProbabilityModel + 'static) -> Self {
        self.model = Box::new(model);
        self
    }

    pub fn with_resume_policy(mut self, policy: ResumePolicy) -> Self {
        self.resume_policy = policy;
        self
    }

    /// Register a callback run once per find. An `Err` is logged and dropped.
    pub fn on_find<F>(&mut self, callback: F)
    where
        F: Fn(&Find) -> Result<(), NotifyError> + Send + 'static,
    {
        self.notifiers.push(Box::new(CallbackNotifier(callback)));
    }

    pub fn add_notifier(&mut self, notifier: impl Notifier + 'static) {
        self.notifiers.push(Box::new(notifier));
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn selection(&self) -> &CategorySelection {
        &self.selection
    }

    pub fn session_clock(&self) -> &SessionClock {
        &self.session_clock
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats::from_state(&self.state)
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            running: self.state.running,
            attempts_count: self.state.attempts_count,
            find_count: self.state.finds.len(),
            total_value: self.state.total_value,
            started_at: self.session_clock.started_at(),
            at: self.clock.now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        let resuming = match self.phase {
            SessionPhase::Running => return None,
            SessionPhase::Idle => {
                self.state.clear();
                false
            }
            SessionPhase::Paused => {
                if self.resume_policy == ResumePolicy::ClearOnStart {
                    self.state.clear();
                }
                self.resume_policy == ResumePolicy::Preserve
            }
        };

        let now = self.clock.now();
        self.session_clock.start(now);
        self.state.running = true;
        self.phase = SessionPhase::Running;
        tracing::debug!(resuming, attempts = self.state.attempts_count, "session started");

        Some(if resuming {
            Event::SessionResumed {
                attempts_count: self.state.attempts_count,
                at: now,
            }
        } else {
            Event::SessionStarted { at: now }
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        self.session_clock.pause();
        self.state.running = false;
        self.phase = SessionPhase::Paused;
        tracing::debug!(attempts = self.state.attempts_count, "session paused");
        Some(Event::SessionPaused {
            attempts_count: self.state.attempts_count,
            at: self.clock.now(),
        })
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.session_clock.pause();
        self.state = SessionState::new();
        self.phase = SessionPhase::Idle;
        tracing::debug!("session reset");
        Some(Event::SessionReset {
            at: self.clock.now(),
        })
    }

    /// Process one attempt. Returns `Some(Event::FindRecorded)` on success.
    ///
    /// No-op unless Running.
    pub fn tick(&mut self) -> Option<Event> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        let now = self.clock.now();
        self.state.attempts_count += 1;

        if self.rng.unit() < MISS_LOG_RATIO {
            let miss = generate_miss(&mut self.rng, now);
            self.state.push_log(miss);
        }

        let elapsed_ms = self.session_clock.elapsed_ms(now);
        let p = self.model.probability(elapsed_ms, self.state.attempts_count);
        if !decide(&mut self.rng, p) {
            return None;
        }

        let find = generate_find(&mut self.rng, &self.selection, now);
        let entry = success_entry(&find);
        self.state.record_find(find.clone(), entry);
        tracing::info!(
            attempt = self.state.attempts_count,
            category = find.category.id(),
            value = find.value_amount,
            "find recorded"
        );
        dispatch(&self.notifiers, &find);

        Some(Event::FindRecorded {
            find,
            total_value: self.state.total_value,
        })
    }
}

impl std::fmt::Debug for SessionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEngine")
            .field("phase", &self.phase)
            .field("session_clock", &self.session_clock)
            .field("attempts_count", &self.state.attempts_count)
            .field("finds", &self.state.finds.len())
            .field("selection", &self.selection)
            .field("resume_policy", &self.resume_policy)
            .finish_non_exhaustive()
    }
}
