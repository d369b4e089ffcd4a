mod xor_constraint;
mod xor_finder;

pub use xor_constraint::Xor;
pub use xor_finder::XorFinder;
pub use xor_finder::XorFinderStatistics;
