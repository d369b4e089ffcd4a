use itertools::Itertools;

use crate::engine::variables::Literal;
use crate::xor_assert_moderate;
use crate::xor_assert_simple;

/// A disjunction of literals over distinct variables, tagged with whether it
/// was given by the user or derived by the engine.
#[derive(Clone)]
pub struct Clause {
    literals: Vec<Literal>,
    is_derived: bool,
    is_deleted: bool,
}

impl Clause {
    pub(crate) fn new(literals: Vec<Literal>, is_derived: bool) -> Clause {
        xor_assert_simple!(literals.len() >= 2);

        Clause {
            literals,
            is_derived,
            is_deleted: false,
        }
    }

    pub fn len(&self) -> u32 {
        self.literals.len() as u32
    }

    /// Whether this clause was derived by the engine rather than given.
    pub fn is_derived(&self) -> bool {
        self.is_derived
    }

    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    pub fn get_literal_slice(&self) -> &[Literal] {
        &self.literals
    }

    pub(crate) fn mark_deleted(&mut self) {
        xor_assert_moderate!(!self.is_deleted);
        self.is_deleted = true;
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.literals.iter().format(" \\/ "))
    }
}

impl std::fmt::Debug for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{self}[derived:{}, deleted:{}]",
            self.is_derived, self.is_deleted
        )
    }
}
