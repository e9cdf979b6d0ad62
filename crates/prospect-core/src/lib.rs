//! # Prospect Core Library
//!
//! This library provides the simulation engine behind Prospect: a session
//! that produces synthetic attempt log lines every tick and, with a
//! probability that rises over elapsed session time, records a synthetic
//! "find". Nothing is queried and no value changes hands; every record is
//! generated locally.
//!
//! ## Architecture
//!
//! - **Session Engine**: A caller-driven state machine (`start`, `pause`,
//!   `reset`, `tick`) that folds each tick into the session state
//! - **Session Runner**: A tokio host that ticks the engine every 200 ms and
//!   cancels synchronously on pause
//! - **Discovery Model**: Step curve from elapsed minutes to per-tick probability
//! - **Entry Generator**: Synthetic descriptors, log entries and finds
//! - **Config**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: Core session state machine
//! - [`SessionRunner`]: Interval-driven async host
//! - [`SessionState`]: Counters, bounded log, finds and running total
//! - [`Config`]: Application configuration management

pub mod catalog;
pub mod clock;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod events;
pub mod generator;
pub mod notifier;
pub mod rng;
pub mod runner;
pub mod state;

pub use catalog::{catalog, Category, CategoryInfo, CategorySelection, DEFAULT_CATEGORIES};
pub use clock::{Clock, ManualClock, SessionClock, SystemClock, TICK_INTERVAL};
pub use config::Config;
pub use discovery::{ProbabilityModel, StepCurve};
pub use engine::{ResumePolicy, SessionEngine, SessionPhase};
pub use error::{ConfigError, CoreError, NotifyError};
pub use events::Event;
pub use notifier::{CallbackNotifier, LogNotifier, Notifier};
pub use rng::SessionRng;
pub use runner::SessionRunner;
pub use state::{Find, LogEntry, SessionState, SessionStats, LOG_CAPACITY};
