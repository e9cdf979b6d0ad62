//! Alert sinks invoked once per find.
//!
//! A notifier failing, or panicking, is logged and dropped. It never
//! reaches the caller and never touches session state.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::NotifyError;
use crate::state::Find;

pub trait Notifier: Send {
    fn notify(&self, find: &Find) -> Result<(), NotifyError>;
}

/// Host callback registered through `on_find`.
///
/// Callbacks report failure with `Err`. Release builds abort on panic, so a
/// panicking callback is only survivable in debug builds.
pub struct CallbackNotifier<F>(pub F);

impl<F> Notifier for CallbackNotifier<F>
where
    F: Fn(&Find) -> Result<(), NotifyError> + Send,
{
    fn notify(&self, find: &Find) -> Result<(), NotifyError> {
        (self.0)(find)
    }
}

/// Writes the alert text to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, find: &Find) -> Result<(), NotifyError> {
        tracing::info!(category = find.category.id(), "{}", find.alert_text());
        Ok(())
    }
}

/// Invoke every notifier, isolating failures.
pub(crate) fn dispatch(notifiers: &[Box<dyn Notifier>], find: &Find) {
    for notifier in notifiers {
        let outcome = catch_unwind(AssertUnwindSafe(|| notifier.notify(find)))
            .unwrap_or(Err(NotifyError::Panicked));
        if let Err(err) = outcome {
            tracing::warn!(find_id = %find.id, error = %err, "notifier failed; ignoring");
        }
    }
}
