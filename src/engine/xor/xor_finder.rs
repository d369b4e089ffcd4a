use fnv::FnvHashMap;
use fnv::FnvHashSet;
use log::debug;
use log::trace;

use crate::basic_types::ClauseReference;
use crate::engine::sat::ClauseDatabase;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::Literal;
use crate::engine::variables::PropositionalVariable;
use crate::engine::xor::Xor;
use crate::xor_assert_moderate;
use crate::xor_assert_simple;

/// Discovers parity constraints hidden in the clause database as complete
/// clause families, combines them pairwise by variable elimination, and
/// exports constraints reduced to one or two variables back into the
/// database as unit and binary facts.
///
/// The intended calling sequence per invocation is [`find_xors`], then
/// [`clean_up_xors`], then alternating rounds of [`xor_together_xors`] and
/// [`add_new_truths_from_xors`] until no further progress is made
/// ([`simplify`] drives those rounds).
///
/// [`find_xors`]: XorFinder::find_xors
/// [`clean_up_xors`]: XorFinder::clean_up_xors
/// [`xor_together_xors`]: XorFinder::xor_together_xors
/// [`add_new_truths_from_xors`]: XorFinder::add_new_truths_from_xors
/// [`simplify`]: XorFinder::simplify
#[derive(Default, Debug)]
pub struct XorFinder {
    xors: Vec<Xor>,
    statistics: XorFinderStatistics,
    found_new_truths: bool,
}

/// Counters over the lifetime of one [`XorFinder`].
#[derive(Default, Debug, Clone, Copy)]
pub struct XorFinderStatistics {
    pub num_xors_found: u64,
    pub num_eliminations: u64,
    pub num_exported_truths: u64,
}

impl XorFinder {
    pub fn new() -> XorFinder {
        XorFinder::default()
    }

    /// The live constraint collection.
    pub fn get_xors(&self) -> &[Xor] {
        &self.xors
    }

    /// Replace the live constraint collection, e.g. to seed constraints
    /// known from elsewhere.
    pub fn set_xors(&mut self, xors: Vec<Xor>) {
        self.xors = xors;
    }

    pub fn get_statistics(&self) -> XorFinderStatistics {
        self.statistics
    }

    /// Whether the last call to [`XorFinder::add_new_truths_from_xors`]
    /// exported at least one new fact; a further elimination round can then
    /// make progress.
    pub fn has_new_truths(&self) -> bool {
        self.found_new_truths
    }

    /// Scan the clause database for complete parity families and populate
    /// the constraint collection. The database itself is not modified; its
    /// occurrence index must have been prepared beforehand.
    ///
    /// The termination condition is polled at scan-loop boundaries; when it
    /// triggers, the scan aborts with an empty collection and `false` is
    /// returned. Returns `true` when the scan ran to completion.
    pub fn find_xors(
        &mut self,
        database: &ClauseDatabase,
        termination: &mut impl TerminationCondition,
    ) -> bool {
        xor_assert_simple!(
            database.is_occurrence_index_valid(),
            "find_xors requires the occurrence index to be prepared"
        );

        self.xors.clear();

        let groups = match self.group_clause_families(database, termination) {
            Some(groups) => groups,
            None => {
                debug!("xor scan interrupted while grouping clause families");
                return false;
            }
        };

        for (variables, group) in groups {
            if termination.should_stop() {
                debug!("xor scan interrupted while checking candidate families");
                self.xors.clear();
                return false;
            }

            self.detect_xor_in_family(database, variables, &group);
        }

        self.statistics.num_xors_found += self.xors.len() as u64;
        debug!("xor scan found {} parity constraints", self.xors.len());

        true
    }

    /// Drop every constraint that shares no variable with any other
    /// retained constraint: an isolated constraint cannot take part in
    /// elimination and carries no combinable information. Idempotent.
    pub fn clean_up_xors(&mut self) {
        let mut occurrences: FnvHashMap<PropositionalVariable, u32> = FnvHashMap::default();
        for xor in &self.xors {
            for &variable in xor.get_variables() {
                *occurrences.entry(variable).or_insert(0) += 1;
            }
        }

        let before = self.xors.len();
        self.xors.retain(|xor| {
            xor.is_empty()
                || xor
                    .get_variables()
                    .iter()
                    .any(|variable| occurrences[variable] >= 2)
        });

        trace!(
            "connectivity filter dropped {} isolated xors",
            before - self.xors.len()
        );
    }

    /// The elimination fixed point: while some variable occurs in exactly
    /// two live constraints, replace the pair with their merge (symmetric
    /// difference of the variable sets, XOR of the right-hand sides).
    ///
    /// A merge producing the empty variable set with a false right-hand
    /// side is a tautology and vanishes; with a true right-hand side it is
    /// a contradiction, which is retained for
    /// [`XorFinder::add_new_truths_from_xors`] to report.
    pub fn xor_together_xors(&mut self) {
        // Slots instead of a plain vec so that merging does not invalidate
        // the indices held by the occurrence map; consumed slots are None.
        let mut slots: Vec<Option<Xor>> =
            std::mem::take(&mut self.xors).into_iter().map(Some).collect();

        let mut occurrences: FnvHashMap<PropositionalVariable, Vec<usize>> = FnvHashMap::default();
        for (index, slot) in slots.iter().enumerate() {
            let xor = slot.as_ref().expect("all slots start populated");
            for &variable in xor.get_variables() {
                occurrences.entry(variable).or_default().push(index);
            }
        }

        // Work queue of candidate variables; the exactly-two condition is
        // re-checked on pop since earlier merges may have invalidated it.
        let mut queue: Vec<PropositionalVariable> = occurrences
            .iter()
            .filter(|(_, indices)| indices.len() == 2)
            .map(|(&variable, _)| variable)
            .collect();

        while let Some(variable) = queue.pop() {
            let indices = match occurrences.get_mut(&variable) {
                Some(indices) => indices,
                None => continue,
            };
            indices.retain(|&index| slots[index].is_some());
            if indices.len() != 2 {
                continue;
            }

            let (first, second) = (indices[0], indices[1]);
            xor_assert_moderate!(first != second);

            let a = slots[first].take().expect("live slot");
            let b = slots[second].take().expect("live slot");
            let merged = a.merge(&b);
            self.statistics.num_eliminations += 1;
            trace!("eliminated {variable}: ({a}) + ({b}) -> ({merged})");

            // Occurrence counts only change for variables of the two
            // consumed constraints; any of them may now sit in exactly two
            // live constraints.
            let affected: Vec<PropositionalVariable> = a
                .get_variables()
                .iter()
                .chain(b.get_variables())
                .copied()
                .filter(|&affected_variable| affected_variable != variable)
                .collect();

            if merged.is_empty() {
                if merged.get_rhs() {
                    // Two constraints forcing opposite parities over the
                    // same variable set; keep the falsified constraint so
                    // the exporter reports the contradiction.
                    slots.push(Some(merged));
                } else {
                    trace!("merge cancelled out completely, dropping both sides");
                }
            } else {
                let merged_index = slots.len();
                for &merged_variable in merged.get_variables() {
                    occurrences
                        .entry(merged_variable)
                        .or_default()
                        .push(merged_index);
                }
                slots.push(Some(merged));
            }

            for affected_variable in affected {
                let indices = occurrences
                    .get_mut(&affected_variable)
                    .expect("variable occurred in a consumed constraint");
                indices.retain(|&index| slots[index].is_some());
                if indices.len() == 2 {
                    queue.push(affected_variable);
                }
            }
        }

        self.xors = slots.into_iter().flatten().collect();
    }

    /// Drain every constraint reduced to at most two variables into the
    /// clause database: size one becomes a root assignment, size two the
    /// pair of binary clauses encoding the parity relation, appended as
    /// derived clauses.
    ///
    /// Returns `false` exactly when a contradiction was detected, either an
    /// empty constraint with a true right-hand side or a derived fact
    /// clashing with an existing root assignment. Facts appended before the
    /// contradiction remain in the database.
    pub fn add_new_truths_from_xors(&mut self, database: &mut ClauseDatabase) -> bool {
        self.found_new_truths = false;

        let mut index = 0;
        while index < self.xors.len() {
            if self.xors[index].len() > 2 {
                index += 1;
                continue;
            }

            let xor = self.xors.swap_remove(index);
            if !self.export_truth(database, &xor) {
                debug!("exporting ({xor}) made the database inconsistent");
                return false;
            }
        }

        true
    }

    /// Convenience driver: alternate elimination and export rounds until a
    /// contradiction surfaces or no further progress is possible.
    pub fn simplify(&mut self, database: &mut ClauseDatabase) -> bool {
        loop {
            self.xor_together_xors();
            if !self.add_new_truths_from_xors(database) {
                return false;
            }
            if self.xors.is_empty() || !self.has_new_truths() {
                return true;
            }
        }
    }

    fn export_truth(&mut self, database: &mut ClauseDatabase, xor: &Xor) -> bool {
        match *xor.get_variables() {
            [] => {
                // A true right-hand side over no variables asserts 0 = 1.
                !xor.get_rhs()
            }
            [variable] => {
                let already_fixed = database.get_assignments().is_variable_assigned(variable);
                if database.assign_unit(variable, xor.get_rhs()).is_err() {
                    return false;
                }
                // Re-deriving a fact the root already knows is not progress
                // and must not trigger another elimination round.
                if !already_fixed {
                    self.statistics.num_exported_truths += 1;
                    self.found_new_truths = true;
                }
                true
            }
            [x, y] => {
                // x XOR y = 1 is (x \/ y) /\ (~x \/ ~y); with a false
                // right-hand side the polarities of y flip (equivalence).
                let rhs = xor.get_rhs();
                let clauses = [
                    vec![Literal::new(x, true), Literal::new(y, rhs)],
                    vec![Literal::new(x, false), Literal::new(y, !rhs)],
                ];
                for literals in clauses {
                    if database.add_derived_clause(literals).is_err() {
                        return false;
                    }
                }
                self.statistics.num_exported_truths += 1;
                self.found_new_truths = true;
                true
            }
            _ => unreachable!("only constraints of size <= 2 are exported"),
        }
    }

    /// Partition the eligible clauses (size at least three, not deleted) by
    /// their underlying variable set, polarity stripped. Grouping is exact:
    /// a clause joins a family only when its variable set equals the family
    /// key, never by subset or superset.
    ///
    /// Returns `None` when interrupted.
    fn group_clause_families(
        &self,
        database: &ClauseDatabase,
        termination: &mut impl TerminationCondition,
    ) -> Option<FnvHashMap<Vec<PropositionalVariable>, Vec<ClauseReference>>> {
        let mut groups: FnvHashMap<Vec<PropositionalVariable>, Vec<ClauseReference>> =
            FnvHashMap::default();

        for variable in database.get_assignments().get_variables() {
            if termination.should_stop() {
                return None;
            }

            for &clause_reference in database.get_clauses_containing(variable) {
                let clause = database.get_clause(clause_reference);
                if clause.len() < 3 {
                    continue;
                }

                // Each clause occurs in the lists of all its variables;
                // only group it from its smallest one.
                let smallest = clause
                    .get_literal_slice()
                    .iter()
                    .map(|literal| literal.get_variable())
                    .min()
                    .expect("clauses are non-empty");
                if smallest != variable {
                    continue;
                }

                let mut key: Vec<PropositionalVariable> = clause
                    .get_literal_slice()
                    .iter()
                    .map(|literal| literal.get_variable())
                    .collect();
                key.sort_unstable();

                groups.entry(key).or_default().push(clause_reference);
            }
        }

        Some(groups)
    }

    /// Check one candidate family for complete parity classes and emit a
    /// constraint per complete class.
    ///
    /// A clause whose number of negative literals is even belongs to the
    /// class encoding rhs = true, an odd one to rhs = false. A class is
    /// complete exactly when all 2^(k-1) distinct sign patterns of its
    /// parity are present; duplicates are collapsed, partial classes emit
    /// nothing. The two classes over one variable set are independent and
    /// may both emit.
    fn detect_xor_in_family(
        &mut self,
        database: &ClauseDatabase,
        variables: Vec<PropositionalVariable>,
        group: &[ClauseReference],
    ) {
        let num_variables = variables.len();
        if num_variables >= usize::BITS as usize {
            return;
        }

        let class_size: usize = 1 << (num_variables - 1);
        if group.len() < class_size {
            return;
        }

        // Sign patterns seen per negation-count parity, as bitmasks over
        // the sorted variable set.
        let mut seen_patterns: [FnvHashSet<u64>; 2] =
            [FnvHashSet::default(), FnvHashSet::default()];

        for &clause_reference in group {
            let clause = database.get_clause(clause_reference);
            let mut pattern: u64 = 0;
            for literal in clause.get_literal_slice() {
                let position = variables
                    .binary_search(&literal.get_variable())
                    .expect("grouping is exact on the variable set");
                if literal.is_negative() {
                    pattern |= 1 << position;
                }
            }

            let parity = (pattern.count_ones() % 2) as usize;
            let _ = seen_patterns[parity].insert(pattern);
        }

        // There are exactly 2^(k-1) patterns of either parity, so a class
        // is complete exactly when that many distinct patterns showed up.
        for (parity, patterns) in seen_patterns.iter().enumerate() {
            if patterns.len() == class_size {
                let xor = Xor::from_canonical(variables.clone(), parity == 0);
                trace!("found ({xor}) encoded over {} clauses", group.len());
                self.xors.push(xor);
            }
        }
    }
}
