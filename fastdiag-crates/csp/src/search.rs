use fastdiag_core::containers::HashSet;
use fastdiag_core::containers::StorageKey;
use log::trace;

use crate::constraints::Clause;
use crate::constraints::Evaluation;
use crate::KnowledgeBase;
use crate::VariableId;

/// Decides whether some assignment of the variables of `knowledge_base` satisfies every clause
/// of `clauses`.
///
/// The search branches on the variables which occur in `clauses`, in the order in which they were
/// created, and tries the values of a domain in ascending order. A branch is abandoned as soon as
/// one of the clauses cannot be satisfied within the current bounds of its variables.
pub(crate) fn is_satisfiable(knowledge_base: &KnowledgeBase, clauses: &[&Clause]) -> bool {
    let relevant: HashSet<VariableId> = clauses
        .iter()
        .flat_map(|clause| clause.variables())
        .collect();

    let mut search = Search {
        knowledge_base,
        clauses,
        branching_order: knowledge_base
            .variables()
            .filter(|variable| relevant.contains(variable))
            .collect(),
        bounds: knowledge_base
            .variables()
            .map(|variable| {
                let domain = knowledge_base.variable(variable).domain();
                (
                    domain.lower_bound().unwrap_or_default() as i64,
                    domain.upper_bound().unwrap_or_default() as i64,
                )
            })
            .collect(),
        num_decisions: 0,
    };

    let satisfiable = search.solve(0);
    trace!(
        "Searched {} clauses over {} variables with {} decisions: {}",
        clauses.len(),
        search.branching_order.len(),
        search.num_decisions,
        if satisfiable { "satisfiable" } else { "unsatisfiable" }
    );
    satisfiable
}

#[derive(Debug)]
struct Search<'a> {
    knowledge_base: &'a KnowledgeBase,
    clauses: &'a [&'a Clause],
    branching_order: Vec<VariableId>,
    /// The bounds `(lower, upper)` of every variable, indexed by variable.
    bounds: Vec<(i64, i64)>,
    num_decisions: u64,
}

impl Search<'_> {
    fn solve(&mut self, depth: usize) -> bool {
        let mut decided = true;
        for clause in self.clauses {
            match clause.evaluate(|variable| self.bounds[variable.index()]) {
                Evaluation::Falsified => return false,
                Evaluation::Undecided => decided = false,
                Evaluation::Satisfied => {}
            }
        }
        if decided || depth == self.branching_order.len() {
            return decided;
        }

        let knowledge_base = self.knowledge_base;
        let variable = self.branching_order[depth];
        let previous = self.bounds[variable.index()];
        for value in knowledge_base.variable(variable).domain().values() {
            self.num_decisions += 1;
            self.bounds[variable.index()] = (value as i64, value as i64);

            if self.solve(depth + 1) {
                self.bounds[variable.index()] = previous;
                return true;
            }
        }
        self.bounds[variable.index()] = previous;

        false
    }
}
