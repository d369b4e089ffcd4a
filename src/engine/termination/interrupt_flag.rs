use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::TerminationCondition;

/// A [`TerminationCondition`] backed by a shared atomic flag, set from
/// another thread (e.g. a signal handler or a portfolio driver) to ask the
/// engine to return control cooperatively.
#[derive(Clone, Debug, Default)]
pub struct InterruptFlag {
    flag: Arc<AtomicBool>,
}

impl InterruptFlag {
    pub fn new() -> InterruptFlag {
        InterruptFlag::default()
    }

    /// The handle through which the flag is raised; cheap to clone and send
    /// across threads.
    pub fn get_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    pub fn interrupt(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

impl TerminationCondition for InterruptFlag {
    fn should_stop(&mut self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
