use crate::{
    clause_db::{
        ClauseDb,
        ClauseId,
    },
    trail::{
        Reason,
        Trail,
    },
    Literal,
    Variable,
};
use bounded::BoundedBitmap;

/// Computes first-UIP conflict clauses by resolving backwards along the
/// trail from a conflicting clause.
///
/// # Note
///
/// Stamps ("seen" marks) are tracked in a bitmap together with an explicit
/// reset list of the variables stamped during the current call, so that
/// clearing them after an analysis never has to scan the whole bitmap.
#[derive(Debug, Clone)]
pub struct Analyzer {
    stamped: BoundedBitmap<Variable, bool>,
    reset_list: Vec<Variable>,
}

/// The result of a successful conflict analysis.
pub struct Analysis {
    /// The learned clause, with the asserting (first-UIP) literal first.
    pub learned: Vec<Literal>,
    /// The decision level to backtrack to before asserting the learned
    /// clause's first literal.
    pub backtrack_level: u32,
}

impl Analyzer {
    /// Creates a new analyzer for the given number of variables.
    pub fn new(num_variables: usize) -> Self {
        Self {
            stamped: BoundedBitmap::with_len(num_variables),
            reset_list: Vec::new(),
        }
    }

    fn stamp(&mut self, variable: Variable) -> bool {
        let was_stamped = self.stamped.get(variable).expect("in bounds");
        if !was_stamped {
            self.stamped.set(variable, true).expect("in bounds");
            self.reset_list.push(variable);
        }
        was_stamped
    }

    fn clear_stamps(&mut self) {
        for variable in self.reset_list.drain(..) {
            self.stamped.set(variable, false).expect("in bounds");
        }
    }

    /// Analyzes the conflict rooted at `conflict`, producing a learned
    /// clause asserting its first-UIP literal and the level to backtrack to.
    ///
    /// # Panics
    ///
    /// If called at decision level `0`: a conflict at level `0` means the
    /// instance is unsatisfiable and there is nothing left to learn.
    pub fn analyze(
        &mut self,
        conflict: ClauseId,
        trail: &Trail,
        clauses: &ClauseDb,
    ) -> Analysis {
        let current_level = trail.decision_level();
        assert!(current_level > 0, "cannot analyze a conflict at level 0");

        let mut learned = Vec::new();
        let mut count_at_current_level = 0usize;
        let mut resolving = clauses
            .resolve(conflict)
            .expect("conflict clause id must resolve")
            .into_iter()
            .collect::<Vec<_>>();
        let mut trail_index = trail.assigned().len();
        let mut uip_literal;

        loop {
            for &literal in &resolving {
                let variable = literal.variable();
                if self.stamp(variable) {
                    continue
                }
                let level = trail.level_of(variable);
                if level == current_level {
                    count_at_current_level += 1;
                } else if level > 0 {
                    learned.push(literal);
                }
                // Level-0 literals are permanently falsified facts: they
                // need not appear in the learned clause.
            }

            loop {
                trail_index -= 1;
                uip_literal = trail.assigned()[trail_index];
                if self.stamped.get(uip_literal.variable()).expect("in bounds") {
                    break
                }
            }
            let variable = uip_literal.variable();
            count_at_current_level -= 1;
            if count_at_current_level == 0 {
                break
            }
            resolving = match trail.reason_of(variable) {
                Reason::Propagated(clause_id) => clauses
                    .resolve(clause_id)
                    .expect("reason clause id must resolve")
                    .into_iter()
                    .filter(|literal| literal.variable() != variable)
                    .collect(),
                Reason::Decision | Reason::Unit => {
                    unreachable!("a stamped non-UIP literal always has a propagation reason")
                }
            };
        }

        learned.push(!uip_literal);
        let asserting_index = learned.len() - 1;
        learned.swap(0, asserting_index);

        let backtrack_level = learned[1..]
            .iter()
            .map(|literal| trail.level_of(literal.variable()))
            .max()
            .unwrap_or(0);

        self.clear_stamps();
        Analysis {
            learned,
            backtrack_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clause_db::Clause,
        Sign,
    };

    fn lit(index: usize, sign: Sign) -> Literal {
        Variable::from_index(index).unwrap().into_literal(sign)
    }

    #[test]
    fn learns_a_clause_that_excludes_the_conflicting_trail() {
        // (¬x0 ∨ x1), (¬x1 ∨ x2), (¬x1 ∨ ¬x2) — deciding x0 true conflicts.
        let mut db = ClauseDb::default();
        db.push(Clause::new(vec![lit(0, Sign::NEG), lit(1, Sign::POS)]).unwrap())
            .unwrap();
        db.push(Clause::new(vec![lit(1, Sign::NEG), lit(2, Sign::POS)]).unwrap())
            .unwrap();
        let conflict = db
            .push(Clause::new(vec![lit(1, Sign::NEG), lit(2, Sign::NEG)]).unwrap())
            .unwrap();

        let mut trail = Trail::new(3);
        trail.new_decision_level();
        trail.assign(lit(0, Sign::POS), Reason::Decision);
        crate::propagate::propagate(&mut trail, &db).unwrap_err();

        let mut analyzer = Analyzer::new(3);
        let analysis = analyzer.analyze(conflict, &trail, &db);
        // x1 alone conflicts via (¬x1 ∨ x2) and (¬x1 ∨ ¬x2), independent of x0.
        assert_eq!(analysis.learned, vec![lit(1, Sign::NEG)]);
        assert_eq!(analysis.backtrack_level, 0);
    }
}
