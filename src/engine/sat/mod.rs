mod assignments;
mod clause;
mod clause_allocator;
mod clause_database;

pub use assignments::Assignments;
pub use clause::Clause;
pub use clause_allocator::ClauseAllocator;
pub use clause_database::ClauseDatabase;
