#![deny(unsafe_code)]
#![allow(clippy::len_without_is_empty)]

mod analyze;
pub mod clause_db;
mod decider;
mod error;
mod literal;
mod model;
mod propagate;
mod sanitizer;
mod trail;

#[cfg(test)]
mod properties;

use crate::{
    analyze::Analyzer,
    clause_db::{
        Clause,
        ClauseDb,
        UnitClause,
    },
    decider::Decider,
    sanitizer::{
        ClauseSanitizer,
        SanitizedLiterals,
    },
    trail::{
        Reason,
        Trail,
    },
};
pub use crate::{
    clause_db::{
        ClauseError,
        ClauseId,
    },
    error::Error,
    literal::{
        Literal,
        Sign,
        Variable,
    },
    model::Model,
};
use core::fmt;
use core::fmt::Display;
use model::LastModel;

/// The satisfiable or unsatisfiable solution to a SAT instance.
#[derive(Debug)]
pub enum SolveResult<'a> {
    /// The instance is unsatisfiable.
    Unsat,
    /// The instance is satisfiable with the given satisfying assignment.
    Sat(SatResult<'a>),
}

impl<'a> SolveResult<'a> {
    fn sat(model: &'a Model) -> Self {
        Self::Sat(SatResult { model })
    }

    /// Returns `true` if the instance was determined to be satisfiable.
    pub fn is_sat(&self) -> bool {
        matches!(self, SolveResult::Sat(_))
    }

    /// Returns `true` if the instance was determined to be unsatisfiable.
    pub fn is_unsat(&self) -> bool {
        !self.is_sat()
    }
}

/// The satisfiable solution of a solved SAT instance.
#[derive(Debug)]
pub struct SatResult<'a> {
    model: &'a Model,
}

impl<'a> Display for SatResult<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.model.fmt(f)
    }
}

impl<'a> SatResult<'a> {
    /// The satisfying assignment of the satisfiable solution.
    pub fn model(&self) -> &'a Model {
        self.model
    }
}

/// A CDCL SAT solver kernel.
///
/// Built from a fixed number of Boolean variables and an incrementally
/// grown set of clauses over them ([`Solver::add_clause`]); call
/// [`Solver::solve`] once all clauses have been added.
#[derive(Debug, Clone)]
pub struct Solver {
    num_variables: usize,
    clauses: ClauseDb,
    trail: Trail,
    decider: Decider,
    analyzer: Analyzer,
    sanitizer: ClauseSanitizer,
    last_model: LastModel,
    encountered_empty_clause: bool,
    num_decisions: usize,
    num_learned: usize,
}

impl Solver {
    /// Creates a solver with exactly `num_variables` Boolean variables,
    /// numbered `0..num_variables`.
    ///
    /// # Errors
    ///
    /// If `num_variables` exceeds [`Variable::MAX_LEN`].
    pub fn with_num_vars(num_variables: usize) -> Result<Self, Error> {
        if num_variables > Variable::MAX_LEN {
            return Err(Error::TooManyVariables {
                requested: num_variables,
                max: Variable::MAX_LEN,
            })
        }
        Ok(Self {
            num_variables,
            clauses: ClauseDb::default(),
            trail: Trail::new(num_variables),
            decider: Decider::new(num_variables),
            analyzer: Analyzer::new(num_variables),
            sanitizer: ClauseSanitizer::default(),
            last_model: LastModel::default(),
            encountered_empty_clause: false,
            num_decisions: 0,
            num_learned: 0,
        })
    }

    /// Returns the number of variables the solver was created with.
    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// Returns the number of branching decisions made by the most recent
    /// (or in-progress) call to [`Solver::solve`].
    pub fn num_decisions(&self) -> usize {
        self.num_decisions
    }

    /// Returns the number of clauses learned via conflict analysis by the
    /// most recent (or in-progress) call to [`Solver::solve`].
    pub fn num_learned_clauses(&self) -> usize {
        self.num_learned
    }

    /// Adds a clause over the solver's variables.
    ///
    /// Duplicate and tautological clauses are silently dropped. A unit
    /// clause is recorded as a fixed fact instead of being stored in the
    /// clause database. An empty clause (or a set of unit facts that
    /// conflict) makes the instance permanently unsatisfiable.
    ///
    /// # Errors
    ///
    /// If any literal refers to a variable index `>= self.num_variables()`.
    pub fn add_clause<I>(&mut self, literals: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Literal>,
    {
        let literals: Vec<Literal> = literals.into_iter().collect();
        for &literal in &literals {
            let variable = literal.variable();
            if variable.into_index() >= self.num_variables {
                return Err(Error::out_of_bounds(variable, self.num_variables))
            }
        }
        match self.sanitizer.sanitize(literals) {
            SanitizedLiterals::Literals(literals) => {
                let clause = Clause::new(literals)?;
                if let Err(UnitClause { literal }) = self.clauses.push(clause) {
                    self.add_unit_fact(literal);
                }
            }
            SanitizedLiterals::UnitClause(literal) => self.add_unit_fact(literal),
            SanitizedLiterals::TautologicalClause => (),
            SanitizedLiterals::EmptyClause => {
                self.encountered_empty_clause = true;
            }
        }
        Ok(())
    }

    /// Records `literal` as a fixed fact, or notices it conflicts with an
    /// already-recorded fact.
    fn add_unit_fact(&mut self, literal: Literal) {
        match self.trail.status_of(literal) {
            Some(true) => (),
            Some(false) => self.encountered_empty_clause = true,
            None => self.trail.assign(literal, Reason::Unit),
        }
    }

    /// Solves the instance built up so far via [`Solver::add_clause`].
    pub fn solve(&mut self) -> SolveResult {
        if self.encountered_empty_clause {
            return SolveResult::Unsat
        }
        if self.num_variables == 0 {
            self.last_model.update(0, &self.trail);
            return SolveResult::sat(self.last_model.get())
        }
        if propagate::propagate(&mut self.trail, &self.clauses).is_err() {
            return SolveResult::Unsat
        }
        loop {
            let next_variable = self.decider.next_unassigned(&self.trail);
            let variable = match next_variable {
                Some(variable) => variable,
                None => {
                    self.last_model.update(self.num_variables, &self.trail);
                    return SolveResult::sat(self.last_model.get())
                }
            };
            self.trail.new_decision_level();
            self.trail
                .assign(Literal::new(variable, Sign::POS), Reason::Decision);
            self.num_decisions += 1;
            if let Err(()) = self.propagate_until_fixpoint() {
                return SolveResult::Unsat
            }
        }
    }

    /// Propagates, backjumping and learning on every conflict, until either
    /// propagation reaches a fixpoint with no conflict (returns `Ok`) or a
    /// conflict at decision level `0` proves the instance unsatisfiable.
    fn propagate_until_fixpoint(&mut self) -> Result<(), ()> {
        loop {
            match propagate::propagate(&mut self.trail, &self.clauses) {
                Ok(()) => return Ok(()),
                Err(conflict) => {
                    if self.trail.decision_level() == 0 {
                        return Err(())
                    }
                    let analysis =
                        self.analyzer.analyze(conflict, &self.trail, &self.clauses);
                    {
                        let trail = &mut self.trail;
                        let decider = &mut self.decider;
                        trail.backtrack_to(analysis.backtrack_level, |variable| {
                            decider.notify_unassigned(variable)
                        });
                    }
                    let asserted = analysis.learned[0];
                    self.num_learned += 1;
                    let clause = Clause::new(analysis.learned)
                        .expect("a learned clause is never empty or self-conflicting");
                    match self.clauses.push(clause) {
                        Ok(id) => self.trail.assign(asserted, Reason::Propagated(id)),
                        Err(UnitClause { literal }) => {
                            self.trail.assign(literal, Reason::Unit)
                        }
                    }
                }
            }
        }
    }
}
