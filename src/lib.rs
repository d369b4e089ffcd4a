//! Detection and algebraic simplification of XOR (parity) constraints that
//! are hidden in a CNF clause database as families of ordinary clauses.
//!
//! The entry point is [`XorFinder`], which scans a [`ClauseDatabase`] for
//! clause families encoding parity constraints, combines the found
//! constraints pairwise by Gaussian-elimination style merging, and exports
//! any constraint reduced to one or two variables back into the database as
//! unit or binary clauses.

pub mod asserts;
pub mod basic_types;
pub mod containers;
pub mod engine;

pub use crate::basic_types::ConstraintOperationError;
pub use crate::engine::sat::ClauseDatabase;
pub use crate::engine::termination::TerminationCondition;
pub use crate::engine::variables::Literal;
pub use crate::engine::variables::PropositionalVariable;
pub use crate::engine::xor::Xor;
pub use crate::engine::xor::XorFinder;
