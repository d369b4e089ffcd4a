mod literal;
mod propositional_variable;

pub use literal::Literal;
pub use propositional_variable::PropositionalVariable;
pub use propositional_variable::PropositionalVariableGeneratorIterator;
