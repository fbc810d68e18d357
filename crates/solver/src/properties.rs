//! Property-based tests over the public `Solver` API.
//!
//! The per-variable invariants (reason-clause consistency, level
//! monotonicity, learned-clause assertion) are exercised by the unit tests
//! inside `trail`, `propagate`, and `analyze` themselves, closer to where
//! they can be checked directly against internal state. This module covers
//! the properties observable only from `solve()`'s black-box behavior.

use crate::{
    Literal,
    Solver,
    SolveResult,
};
use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

/// A small CNF instance: `num_vars` variables, each clause 1-3 literals.
fn small_cnf() -> impl Strategy<Value = (usize, Vec<Vec<i32>>)> {
    (1usize..=8).prop_flat_map(|num_vars| {
        let literal = (1..=num_vars as i32).prop_flat_map(|var| {
            prop_oneof![Just(var), Just(-var)]
        });
        let clause = prop_vec(literal, 1..=3);
        let clauses = prop_vec(clause, 0..=12);
        clauses.prop_map(move |clauses| (num_vars, clauses))
    })
}

fn build(num_vars: usize, clauses: &[Vec<i32>]) -> Solver {
    let mut solver = Solver::with_num_vars(num_vars).unwrap();
    for clause in clauses {
        solver
            .add_clause(clause.iter().copied().map(Literal::from))
            .unwrap();
    }
    solver
}

fn satisfies(assignment: &[bool], clause: &[i32]) -> bool {
    clause.iter().any(|&lit| {
        let var = (lit.unsigned_abs() - 1) as usize;
        assignment[var] == (lit > 0)
    })
}

fn brute_force_sat(num_vars: usize, clauses: &[Vec<i32>]) -> bool {
    (0u32..(1u32 << num_vars)).any(|bits| {
        let assignment: Vec<bool> = (0..num_vars).map(|i| (bits >> i) & 1 == 1).collect();
        clauses.iter().all(|clause| satisfies(&assignment, clause))
    })
}

proptest! {
    /// P1: every original clause is satisfied by the returned model.
    #[test]
    fn p1_model_satisfies_every_clause((num_vars, clauses) in small_cnf()) {
        let mut solver = build(num_vars, &clauses);
        if let SolveResult::Sat(sat) = solver.solve() {
            for clause in &clauses {
                let satisfied = clause.iter().any(|&raw| {
                    let literal = Literal::from(raw);
                    sat.model().value_of(literal.variable()) == literal.sign()
                });
                prop_assert!(satisfied);
            }
        }
    }

    /// P5: solve() agrees with brute-force enumeration on small instances.
    #[test]
    fn p5_agrees_with_brute_force((num_vars, clauses) in small_cnf()) {
        let mut solver = build(num_vars, &clauses);
        let is_sat = solver.solve().is_sat();
        prop_assert_eq!(is_sat, brute_force_sat(num_vars, &clauses));
    }

    /// P6: solving the same instance twice yields the same result and the
    /// same witness (model values compared directly, since the decision
    /// policy is deterministic).
    #[test]
    fn p6_solve_is_deterministic((num_vars, clauses) in small_cnf()) {
        let mut first = build(num_vars, &clauses);
        let mut second = build(num_vars, &clauses);
        let a = first.solve();
        let b = second.solve();
        prop_assert_eq!(a.is_sat(), b.is_sat());
        if let (SolveResult::Sat(a), SolveResult::Sat(b)) = (a, b) {
            for index in 0..num_vars {
                let variable = crate::Variable::from_index(index).unwrap();
                prop_assert_eq!(a.model().value_of(variable), b.model().value_of(variable));
            }
        }
    }
}
