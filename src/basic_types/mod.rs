mod clause_reference;
mod constraint_operation_error;

pub use clause_reference::ClauseReference;
pub use constraint_operation_error::ConstraintOperationError;
