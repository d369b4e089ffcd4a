pub mod sat;
pub mod termination;
pub mod variables;
pub mod xor;
