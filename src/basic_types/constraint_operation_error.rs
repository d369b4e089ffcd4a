use thiserror::Error;

/// Failures of clause-database operations that are expected outcomes rather
/// than defects, e.g. adding a clause that is falsified at the root.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    #[error("adding the clause failed because it is infeasible at the root")]
    InfeasibleClause,
    #[error("the operation failed because the database is in an infeasible state")]
    InfeasibleState,
}
