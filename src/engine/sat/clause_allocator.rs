use crate::basic_types::ClauseReference;
use crate::engine::sat::Clause;
use crate::engine::variables::Literal;
use crate::xor_assert_moderate;

/// Arena owning all clauses, addressed through [`ClauseReference`] handles.
///
/// Clause ids go from one; the vector is indexed with `id - 1`. Deleting a
/// clause only tombstones its slot, the reference is recycled for the next
/// allocation.
#[derive(Default, Debug)]
pub struct ClauseAllocator {
    allocated_clauses: Vec<Clause>,
    deleted_clause_references: Vec<ClauseReference>,
}

impl ClauseAllocator {
    pub fn create_clause(&mut self, literals: Vec<Literal>, is_derived: bool) -> ClauseReference {
        if let Some(clause_reference) = self.deleted_clause_references.pop() {
            self.allocated_clauses[clause_reference.get_id() as usize - 1] =
                Clause::new(literals, is_derived);

            clause_reference
        } else {
            let clause_reference = ClauseReference::new(self.allocated_clauses.len() as u32 + 1);
            self.allocated_clauses.push(Clause::new(literals, is_derived));

            clause_reference
        }
    }

    pub fn get_clause(&self, clause_reference: ClauseReference) -> &Clause {
        &self.allocated_clauses[clause_reference.get_id() as usize - 1]
    }

    fn get_mutable_clause(&mut self, clause_reference: ClauseReference) -> &mut Clause {
        &mut self.allocated_clauses[clause_reference.get_id() as usize - 1]
    }

    pub fn delete_clause(&mut self, clause_reference: ClauseReference) {
        xor_assert_moderate!(
            !self.get_clause(clause_reference).is_deleted(),
            "cannot delete an already deleted clause"
        );

        self.get_mutable_clause(clause_reference).mark_deleted();
        self.deleted_clause_references.push(clause_reference);
    }

    /// Iterate over the references of all live (non-deleted) clauses.
    pub fn iter_live_references(&self) -> impl Iterator<Item = ClauseReference> + '_ {
        (1..=self.allocated_clauses.len() as u32)
            .map(ClauseReference::new)
            .filter(|reference| !self.get_clause(*reference).is_deleted())
    }
}

impl std::ops::Index<ClauseReference> for ClauseAllocator {
    type Output = Clause;
    fn index(&self, clause_reference: ClauseReference) -> &Clause {
        self.get_clause(clause_reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::variables::PropositionalVariable;

    fn literals(codes: &[(u32, bool)]) -> Vec<Literal> {
        codes
            .iter()
            .map(|&(index, positive)| Literal::new(PropositionalVariable::new(index), positive))
            .collect()
    }

    #[test]
    fn clause_ids_start_from_one() {
        let mut allocator = ClauseAllocator::default();
        let reference = allocator.create_clause(literals(&[(1, true), (2, false)]), false);
        assert_eq!(reference.get_id(), 1);
    }

    #[test]
    fn deleted_references_are_recycled() {
        let mut allocator = ClauseAllocator::default();
        let first = allocator.create_clause(literals(&[(1, true), (2, false)]), false);
        let _second = allocator.create_clause(literals(&[(2, true), (3, true)]), false);

        allocator.delete_clause(first);
        assert!(allocator[first].is_deleted());
        assert_eq!(allocator.iter_live_references().count(), 1);

        let reused = allocator.create_clause(literals(&[(4, true), (5, true)]), true);
        assert_eq!(reused, first);
        assert!(!allocator[reused].is_deleted());
        assert!(allocator[reused].is_derived());
    }
}
