//! A [`TerminationCondition`] is polled by the engine during potentially
//! expensive scans. It indicates when the scan should be abandoned early,
//! even though no conclusion has been reached yet.

mod indefinite;
mod interrupt_flag;

pub use indefinite::Indefinite;
pub use interrupt_flag::InterruptFlag;

/// A condition deciding when an ongoing scan should be abandoned.
pub trait TerminationCondition {
    /// Returns `true` when the engine should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }
}
