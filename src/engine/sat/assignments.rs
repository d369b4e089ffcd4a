use crate::containers::KeyedVec;
use crate::engine::variables::Literal;
use crate::engine::variables::PropositionalVariable;
use crate::engine::variables::PropositionalVariableGeneratorIterator;
use crate::xor_assert_simple;

/// Root-level truth assignments of the propositional variables.
///
/// This subsystem only ever observes and produces facts that hold at the
/// root of the search, so there is no trail and no decision levels here;
/// the capability is injected into the exporter so it can be exercised with
/// a plain database in tests.
#[derive(Clone, Debug, Default)]
pub struct Assignments {
    truth_values: KeyedVec<PropositionalVariable, Option<bool>>,
}

impl Assignments {
    pub fn grow(&mut self) -> PropositionalVariable {
        self.truth_values.push(None)
    }

    pub fn num_variables(&self) -> u32 {
        self.truth_values.len() as u32
    }

    /// Iterate the user variables; index zero is the reserved true variable.
    pub fn get_variables(&self) -> PropositionalVariableGeneratorIterator {
        PropositionalVariableGeneratorIterator::new(1, self.num_variables())
    }

    pub fn get_truth_value(&self, variable: PropositionalVariable) -> Option<bool> {
        self.truth_values[variable]
    }

    pub fn is_variable_assigned(&self, variable: PropositionalVariable) -> bool {
        self.truth_values[variable].is_some()
    }

    pub fn is_literal_assigned_true(&self, literal: Literal) -> bool {
        self.get_truth_value(literal.get_variable()) == Some(literal.is_positive())
    }

    pub fn is_literal_assigned_false(&self, literal: Literal) -> bool {
        self.get_truth_value(literal.get_variable()) == Some(literal.is_negative())
    }

    pub fn is_literal_unassigned(&self, literal: Literal) -> bool {
        !self.is_variable_assigned(literal.get_variable())
    }

    /// Fix a variable at the root. The variable must be unassigned; checking
    /// against a conflicting prior assignment is the caller's job.
    pub fn assign(&mut self, variable: PropositionalVariable, truth_value: bool) {
        xor_assert_simple!(
            !self.is_variable_assigned(variable),
            "assigning an already assigned variable"
        );
        self.truth_values[variable] = Some(truth_value);
    }
}
