use itertools::Itertools;

use crate::engine::variables::PropositionalVariable;
use crate::xor_assert_moderate;

/// A parity constraint: the exclusive-or of the truth values of `variables`
/// equals `rhs`.
///
/// The variable set is sorted and duplicate-free; a variable appearing an
/// even number of times cancels out (x XOR x = 0) and is removed during
/// normalization. An empty variable set is a trivial fact: satisfiable when
/// `rhs` is false, a contradiction when `rhs` is true.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Xor {
    variables: Vec<PropositionalVariable>,
    rhs: bool,
}

impl Xor {
    /// Create a constraint from an arbitrary list of variables, normalizing
    /// it into canonical form.
    pub fn new(mut variables: Vec<PropositionalVariable>, rhs: bool) -> Xor {
        variables.sort_unstable();

        // Pairs of equal variables self-cancel; an odd occurrence count
        // leaves a single copy behind.
        let mut cancelled = Vec::with_capacity(variables.len());
        let mut iter = variables.into_iter().peekable();
        while let Some(variable) = iter.next() {
            let mut count = 1_usize;
            while iter.peek() == Some(&variable) {
                let _ = iter.next();
                count += 1;
            }
            if count % 2 == 1 {
                cancelled.push(variable);
            }
        }

        Xor {
            variables: cancelled,
            rhs,
        }
    }

    /// Construct from variables already known to be sorted and distinct.
    pub(crate) fn from_canonical(variables: Vec<PropositionalVariable>, rhs: bool) -> Xor {
        xor_assert_moderate!(variables.windows(2).all(|pair| pair[0] < pair[1]));
        Xor { variables, rhs }
    }

    pub fn get_variables(&self) -> &[PropositionalVariable] {
        &self.variables
    }

    pub fn get_rhs(&self) -> bool {
        self.rhs
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Whether the two constraints share at least one variable, i.e. can be
    /// combined by elimination.
    pub fn is_connected_to(&self, other: &Xor) -> bool {
        // Both sides are sorted, so a single merge walk suffices.
        let mut left = self.variables.iter().peekable();
        let mut right = other.variables.iter().peekable();
        while let (Some(&a), Some(&b)) = (left.peek(), right.peek()) {
            match a.cmp(b) {
                std::cmp::Ordering::Less => {
                    let _ = left.next();
                }
                std::cmp::Ordering::Greater => {
                    let _ = right.next();
                }
                std::cmp::Ordering::Equal => return true,
            }
        }
        false
    }

    /// Combine two constraints: the variable sets are merged by symmetric
    /// difference (shared variables cancel) and the right-hand sides by
    /// boolean XOR.
    pub fn merge(&self, other: &Xor) -> Xor {
        let mut merged = Vec::with_capacity(self.len() + other.len());
        let mut left = self.variables.iter().peekable();
        let mut right = other.variables.iter().peekable();

        loop {
            match (left.peek(), right.peek()) {
                (Some(&&a), Some(&&b)) => match a.cmp(&b) {
                    std::cmp::Ordering::Less => {
                        merged.push(a);
                        let _ = left.next();
                    }
                    std::cmp::Ordering::Greater => {
                        merged.push(b);
                        let _ = right.next();
                    }
                    std::cmp::Ordering::Equal => {
                        let _ = left.next();
                        let _ = right.next();
                    }
                },
                (Some(&&a), None) => {
                    merged.push(a);
                    let _ = left.next();
                }
                (None, Some(&&b)) => {
                    merged.push(b);
                    let _ = right.next();
                }
                (None, None) => break,
            }
        }

        Xor::from_canonical(merged, self.rhs ^ other.rhs)
    }
}

impl std::fmt::Display for Xor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} = {}",
            self.variables.iter().format(" + "),
            self.rhs as u32
        )
    }
}

impl std::fmt::Debug for Xor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Xor({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(index: u32) -> PropositionalVariable {
        PropositionalVariable::new(index)
    }

    fn xor(variables: &[u32], rhs: bool) -> Xor {
        Xor::new(variables.iter().copied().map(var).collect(), rhs)
    }

    #[test]
    fn normalization_sorts_and_cancels_even_occurrences() {
        let constraint = Xor::new(vec![var(3), var(1), var(3), var(2)], true);
        assert_eq!(constraint.get_variables(), &[var(1), var(2)]);
        assert!(constraint.get_rhs());

        let trivial = Xor::new(vec![var(1), var(1)], false);
        assert!(trivial.is_empty());
    }

    #[test]
    fn merge_is_symmetric_difference_with_rhs_xor() {
        let a = xor(&[1, 2, 3], true);
        let b = xor(&[1, 4, 5, 6], false);

        let merged = a.merge(&b);
        assert_eq!(merged, xor(&[2, 3, 4, 5, 6], true));
        assert_eq!(merged, b.merge(&a));
    }

    #[test]
    fn merging_identical_sets_yields_the_empty_constraint() {
        let a = xor(&[1, 2], false);
        let b = xor(&[1, 2], true);

        assert_eq!(a.merge(&a), xor(&[], false));
        assert_eq!(a.merge(&b), xor(&[], true));
    }

    #[test]
    fn connectivity_requires_a_shared_variable() {
        let a = xor(&[1, 2, 3], false);
        let b = xor(&[3, 4], true);
        let c = xor(&[5, 6], true);

        assert!(a.is_connected_to(&b));
        assert!(!a.is_connected_to(&c));
    }
}
