//! Async host for [`SessionEngine`].
//!
//! Arms a tokio interval at [`TICK_INTERVAL`] while the session runs.
//! Ticks and control calls take the same lock, and every tick checks the
//! arming generation it was spawned with, so once `pause()` or `reset()`
//! returns no tick can touch the state again.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::clock::TICK_INTERVAL;
use crate::engine::SessionEngine;
use crate::events::Event;
use crate::state::{SessionState, SessionStats};

struct Shared {
    engine: SessionEngine,
    generation: u64,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct SessionRunner {
    shared: Arc<Mutex<Shared>>,
    task: Option<JoinHandle<()>>,
    events: mpsc::UnboundedSender<Event>,
}

impl SessionRunner {
    /// Wrap `engine`; every event it produces is forwarded to the receiver.
    pub fn new(engine: SessionEngine) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (events, rx) = mpsc::unbounded_channel();
        let runner = Self {
            shared: Arc::new(Mutex::new(Shared {
                engine,
                generation: 0,
            })),
            task: None,
            events,
        };
        (runner, rx)
    }

    /// Start or resume. Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        let generation = {
            let mut shared = lock(&self.shared);
            let Some(event) = shared.engine.start() else {
                return;
            };
            shared.generation += 1;
            let _ = self.events.send(event);
            shared.generation
        };
        self.task = Some(tokio::spawn(tick_loop(
            self.shared.clone(),
            self.events.clone(),
            generation,
        )));
    }

    pub fn pause(&mut self) {
        self.disarm(|engine| engine.pause());
    }

    pub fn reset(&mut self) {
        self.disarm(|engine| engine.reset());
    }

    fn disarm(&mut self, command: impl FnOnce(&mut SessionEngine) -> Option<Event>) {
        {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            if let Some(event) = command(&mut shared.engine) {
                let _ = self.events.send(event);
            }
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        lock(&self.shared).engine.is_running()
    }

    /// Consistent copy of the state; never observes a half-applied tick.
    pub fn snapshot(&self) -> SessionState {
        lock(&self.shared).engine.state().clone()
    }

    pub fn stats(&self) -> SessionStats {
        lock(&self.shared).engine.stats()
    }

    /// Run `f` against the engine under the lock.
    pub fn with_engine<R>(&self, f: impl FnOnce(&SessionEngine) -> R) -> R {
        f(&lock(&self.shared).engine)
    }
}

impl Drop for SessionRunner {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn tick_loop(
    shared: Arc<Mutex<Shared>>,
    events: mpsc::UnboundedSender<Event>,
    generation: u64,
) {
    let mut ticker = interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let event = {
            let mut shared = lock(&shared);
            if shared.generation != generation || !shared.engine.is_running() {
                return;
            }
            shared.engine.tick()
        };
        if let Some(event) = event {
            let _ = events.send(event);
        }
    }
}
