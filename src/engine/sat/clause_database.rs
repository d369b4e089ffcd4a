use log::debug;

use crate::basic_types::ClauseReference;
use crate::basic_types::ConstraintOperationError;
use crate::containers::KeyedVec;
use crate::engine::sat::Assignments;
use crate::engine::sat::Clause;
use crate::engine::sat::ClauseAllocator;
use crate::engine::variables::Literal;
use crate::engine::variables::PropositionalVariable;
use crate::xor_assert_simple;

/// The clause store of one solving instance: the clause arena, the root
/// truth assignments, and a variable-to-clause occurrence index.
///
/// The occurrence index is only valid after [`rebuild_occurrence_index`] has
/// been called and is kept up to date incrementally while clauses are
/// appended; consumers that rely on it must invoke the rebuild step first.
///
/// [`rebuild_occurrence_index`]: ClauseDatabase::rebuild_occurrence_index
#[derive(Default, Debug)]
pub struct ClauseDatabase {
    allocator: ClauseAllocator,
    assignments: Assignments,
    occurrence_lists: KeyedVec<PropositionalVariable, Vec<ClauseReference>>,
    occurrence_index_valid: bool,
    is_infeasible: bool,
}

/// Outcome of root-level clause preprocessing.
enum PreprocessedClause {
    /// The clause is true at the root and carries no information.
    Satisfied,
    /// The literals that remain after removing falsified and duplicate ones.
    Remaining(Vec<Literal>),
}

impl ClauseDatabase {
    /// Create a database with `num_variables` user variables, numbered from
    /// one. Index zero is reserved.
    pub fn with_variables(num_variables: u32) -> ClauseDatabase {
        let mut database = ClauseDatabase::default();
        let _ = database.assignments.grow();
        for _ in 0..num_variables {
            let _ = database.new_variable();
        }
        database
    }

    pub fn new_variable(&mut self) -> PropositionalVariable {
        let variable = self.assignments.grow();
        self.occurrence_lists.accomodate(variable, Vec::new());
        variable
    }

    pub fn get_assignments(&self) -> &Assignments {
        &self.assignments
    }

    /// Whether a root-level contradiction has been derived.
    pub fn is_infeasible(&self) -> bool {
        self.is_infeasible
    }

    pub fn get_clause(&self, clause_reference: ClauseReference) -> &Clause {
        &self.allocator[clause_reference]
    }

    /// Iterate the references of all live clauses.
    pub fn iter_clause_references(&self) -> impl Iterator<Item = ClauseReference> + '_ {
        self.allocator.iter_live_references()
    }

    /// Append a clause given by the user.
    pub fn add_clause(
        &mut self,
        literals: Vec<Literal>,
    ) -> Result<(), ConstraintOperationError> {
        self.add_preprocessed(literals, false)
    }

    /// Append a clause derived by the engine; it is tagged so that derived
    /// clauses can be told apart from given ones.
    pub fn add_derived_clause(
        &mut self,
        literals: Vec<Literal>,
    ) -> Result<(), ConstraintOperationError> {
        self.add_preprocessed(literals, true)
    }

    /// Query and assign root truth values; the capability the truth exporter
    /// is given. Fails when the variable is already fixed to the opposite
    /// value.
    pub fn assign_unit(
        &mut self,
        variable: PropositionalVariable,
        truth_value: bool,
    ) -> Result<(), ConstraintOperationError> {
        match self.assignments.get_truth_value(variable) {
            Some(existing) if existing == truth_value => Ok(()),
            Some(_) => {
                self.is_infeasible = true;
                Err(ConstraintOperationError::InfeasibleClause)
            }
            None => {
                self.assignments.assign(variable, truth_value);
                Ok(())
            }
        }
    }

    /// The preparatory indexing step: (re)build the variable-to-clause
    /// occurrence lists from the live clauses.
    pub fn rebuild_occurrence_index(&mut self) {
        for variable in self.assignments.get_variables() {
            self.occurrence_lists[variable].clear();
        }

        for clause_reference in self.allocator.iter_live_references() {
            for &literal in self.allocator[clause_reference].get_literal_slice() {
                self.occurrence_lists[literal.get_variable()].push(clause_reference);
            }
        }

        self.occurrence_index_valid = true;
    }

    pub fn is_occurrence_index_valid(&self) -> bool {
        self.occurrence_index_valid
    }

    /// The live clauses mentioning `variable`, in either polarity.
    pub fn get_clauses_containing(&self, variable: PropositionalVariable) -> &[ClauseReference] {
        xor_assert_simple!(
            self.occurrence_index_valid,
            "occurrence index queried before the setup step"
        );
        &self.occurrence_lists[variable]
    }

    fn add_preprocessed(
        &mut self,
        literals: Vec<Literal>,
        is_derived: bool,
    ) -> Result<(), ConstraintOperationError> {
        if self.is_infeasible {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        let literals = match self.preprocess_clause(literals) {
            PreprocessedClause::Satisfied => return Ok(()),
            PreprocessedClause::Remaining(literals) => literals,
        };

        match literals.len() {
            0 => {
                debug!("clause falsified at the root, database is infeasible");
                self.is_infeasible = true;
                Err(ConstraintOperationError::InfeasibleClause)
            }
            1 => self.assign_unit(literals[0].get_variable(), literals[0].is_positive()),
            _ => {
                let clause_reference = self.allocator.create_clause(literals, is_derived);
                if self.occurrence_index_valid {
                    for &literal in self.allocator[clause_reference].get_literal_slice() {
                        self.occurrence_lists[literal.get_variable()].push(clause_reference);
                    }
                }
                Ok(())
            }
        }
    }

    /// Root-level clause preprocessing: remove falsified and duplicate
    /// literals, and detect clauses that are true at the root (either
    /// because a literal is assigned true or because the clause contains a
    /// variable in both polarities).
    fn preprocess_clause(&self, mut literals: Vec<Literal>) -> PreprocessedClause {
        if literals
            .iter()
            .any(|&literal| self.assignments.is_literal_assigned_true(literal))
        {
            return PreprocessedClause::Satisfied;
        }
        literals.retain(|&literal| self.assignments.is_literal_unassigned(literal));

        literals.sort_unstable_by_key(|literal| literal.to_u32());
        literals.dedup();

        // Duplicates are gone and the literals are sorted, so both
        // polarities of a variable would sit next to each other.
        let is_tautology = literals
            .windows(2)
            .any(|pair| pair[0].get_variable() == pair[1].get_variable());
        if is_tautology {
            return PreprocessedClause::Satisfied;
        }

        PreprocessedClause::Remaining(literals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(code: i32) -> Literal {
        Literal::new(
            PropositionalVariable::new(code.unsigned_abs()),
            code > 0,
        )
    }

    #[test]
    fn unit_clauses_become_root_assignments() {
        let mut database = ClauseDatabase::with_variables(5);
        database.add_clause(vec![literal(-3)]).expect("feasible");

        let variable = PropositionalVariable::new(3);
        assert_eq!(database.get_assignments().get_truth_value(variable), Some(false));
        assert_eq!(database.iter_clause_references().count(), 0);
    }

    #[test]
    fn conflicting_units_make_the_database_infeasible() {
        let mut database = ClauseDatabase::with_variables(5);
        database.add_clause(vec![literal(3)]).expect("feasible");

        let result = database.add_clause(vec![literal(-3)]);
        assert_eq!(result, Err(ConstraintOperationError::InfeasibleClause));
        assert!(database.is_infeasible());
    }

    #[test]
    fn tautologies_and_satisfied_clauses_are_dropped() {
        let mut database = ClauseDatabase::with_variables(5);
        database
            .add_clause(vec![literal(1), literal(-1), literal(2)])
            .expect("tautology is fine");
        database.add_clause(vec![literal(4)]).expect("feasible");
        database
            .add_clause(vec![literal(4), literal(5)])
            .expect("satisfied at the root");

        assert_eq!(database.iter_clause_references().count(), 0);
    }

    #[test]
    fn falsified_literals_are_removed_on_append() {
        let mut database = ClauseDatabase::with_variables(5);
        database.add_clause(vec![literal(-4)]).expect("feasible");
        database
            .add_clause(vec![literal(4), literal(1), literal(2)])
            .expect("feasible");

        let reference = database.iter_clause_references().next().expect("one clause");
        assert_eq!(database.get_clause(reference).len(), 2);
    }

    #[test]
    fn occurrence_index_lists_clauses_per_variable() {
        let mut database = ClauseDatabase::with_variables(5);
        database
            .add_clause(vec![literal(1), literal(2), literal(3)])
            .expect("feasible");
        database
            .add_clause(vec![literal(-1), literal(4)])
            .expect("feasible");

        database.rebuild_occurrence_index();

        assert_eq!(
            database
                .get_clauses_containing(PropositionalVariable::new(1))
                .len(),
            2
        );
        assert_eq!(
            database
                .get_clauses_containing(PropositionalVariable::new(4))
                .len(),
            1
        );

        // Appending while the index is valid keeps it up to date.
        database
            .add_derived_clause(vec![literal(4), literal(5)])
            .expect("feasible");
        assert_eq!(
            database
                .get_clauses_containing(PropositionalVariable::new(4))
                .len(),
            2
        );
    }
}
