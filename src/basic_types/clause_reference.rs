use crate::xor_assert_moderate;

/// Opaque index handle to a clause owned by the clause allocator.
///
/// Clause ids start from one; id zero is reserved as the null value and is
/// never allocated. Handles stay valid when clauses are deleted (the slot is
/// tombstoned, not freed), so external collaborators can hold on to them
/// without risking dangling references.
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
pub struct ClauseReference {
    id: u32,
}

impl ClauseReference {
    pub(crate) fn new(id: u32) -> ClauseReference {
        xor_assert_moderate!(id != 0, "clause id zero is the reserved null value");
        ClauseReference { id }
    }

    pub(crate) fn get_id(&self) -> u32 {
        self.id
    }
}

impl std::fmt::Debug for ClauseReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ClauseReference({})", self.id)
    }
}
