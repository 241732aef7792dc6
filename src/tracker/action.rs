//! Registered actions: a trigger bound to the callback it fires.

use super::config::ProgressCallback;
use crate::trigger::Trigger;

use std::fmt;
use std::sync::Arc;

pub(crate) struct RegisteredAction {
    pub(crate) trigger: Trigger,
    pub(crate) callback: Arc<ProgressCallback>,
    /// Once-actions are dropped from the registry the moment they fire.
    pub(crate) recurring: bool,
}

impl RegisteredAction {
    pub(crate) fn new(trigger: Trigger, callback: ProgressCallback, recurring: bool) -> Self {
        Self {
            trigger,
            callback: Arc::new(callback),
            recurring,
        }
    }
}

impl fmt::Debug for RegisteredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredAction")
            .field("trigger", &self.trigger)
            .field("recurring", &self.recurring)
            .finish()
    }
}
