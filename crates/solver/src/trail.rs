use crate::{
    clause_db::ClauseId,
    Literal,
    Sign,
    Variable,
};
use bounded::BoundedArray;

/// Why a variable ended up with its current assignment.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Reason {
    /// The variable was assigned by a branching decision.
    Decision,
    /// The variable was forced by unit propagation on the given clause.
    Propagated(ClauseId),
    /// The variable was fixed by a unit clause of the original instance,
    /// before any decision was made.
    Unit,
}

/// The chronological record of assigned literals together with the
/// per-variable bookkeeping (current value, decision level, reason) needed
/// to backtrack and to run conflict analysis.
///
/// # Note
///
/// Mirrors the classic "trail" of a CDCL solver: assignments are pushed in
/// the order they are made and undone in LIFO order when backtracking,
/// which keeps backtracking itself a cheap truncation.
#[derive(Debug, Clone)]
pub struct Trail {
    /// Literals in the order they were assigned.
    assigned: Vec<Literal>,
    /// Current value of every variable, `None` if unassigned.
    values: BoundedArray<Variable, Option<Sign>>,
    /// Decision level at which every variable was assigned.
    levels: BoundedArray<Variable, u32>,
    /// Reason for every variable's assignment.
    reasons: BoundedArray<Variable, Option<Reason>>,
    /// Trail length at the start of every still-open decision level.
    limits: Vec<usize>,
}

impl Trail {
    /// Creates a new, empty trail for the given number of variables.
    pub fn new(num_variables: usize) -> Self {
        Self {
            assigned: Vec::new(),
            values: BoundedArray::with_len(num_variables, |_| None),
            levels: BoundedArray::with_len(num_variables, |_| 0),
            reasons: BoundedArray::with_len(num_variables, |_| None),
            limits: Vec::new(),
        }
    }

    /// Returns the number of literals currently on the trail.
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    /// Returns `true` if no literal has been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Returns the current decision level.
    ///
    /// Level `0` holds only facts that hold unconditionally (unit clauses
    /// and propagations from them).
    pub fn decision_level(&self) -> u32 {
        self.limits.len() as u32
    }

    /// Opens a new decision level.
    pub fn new_decision_level(&mut self) {
        self.limits.push(self.assigned.len());
    }

    /// Returns the value currently assigned to `variable`, if any.
    #[inline]
    pub fn value_of(&self, variable: Variable) -> Option<Sign> {
        self.values[variable]
    }

    /// Returns whether `literal` is satisfied (`Some(true)`), falsified
    /// (`Some(false)`) or unassigned (`None`) under the current trail.
    #[inline]
    pub fn status_of(&self, literal: Literal) -> Option<bool> {
        self.value_of(literal.variable())
            .map(|sign| sign == literal.sign())
    }

    /// Returns the decision level at which `variable` was assigned.
    ///
    /// # Panics
    ///
    /// If `variable` is currently unassigned.
    #[inline]
    pub fn level_of(&self, variable: Variable) -> u32 {
        debug_assert!(self.value_of(variable).is_some());
        self.levels[variable]
    }

    /// Returns the reason for `variable`'s current assignment.
    ///
    /// # Panics
    ///
    /// If `variable` is currently unassigned.
    #[inline]
    pub fn reason_of(&self, variable: Variable) -> Reason {
        self.reasons[variable].expect("variable has no assignment to reason about")
    }

    /// Assigns `literal` to `true`, recording `reason` for it.
    ///
    /// # Panics
    ///
    /// If the literal's variable is already assigned.
    pub fn assign(&mut self, literal: Literal, reason: Reason) {
        let variable = literal.variable();
        debug_assert!(
            self.value_of(variable).is_none(),
            "variable {:?} is already assigned",
            variable
        );
        self.values
            .update(variable, Some(literal.sign()))
            .expect("variable index out of bounds");
        self.levels
            .update(variable, self.decision_level())
            .expect("variable index out of bounds");
        self.reasons
            .update(variable, Some(reason))
            .expect("variable index out of bounds");
        self.assigned.push(literal);
    }

    /// Returns the literals assigned so far, in assignment order.
    pub fn assigned(&self) -> &[Literal] {
        &self.assigned
    }

    /// Returns the slice of literals assigned at the current decision level.
    pub fn assigned_at_current_level(&self) -> &[Literal] {
        let start = self.limits.last().copied().unwrap_or(0);
        &self.assigned[start..]
    }

    /// Undoes every assignment made at a decision level greater than
    /// `target_level`, invoking `on_unassign` for every unassigned variable.
    ///
    /// # Panics
    ///
    /// If `target_level` is greater than the current decision level.
    pub fn backtrack_to<F>(&mut self, target_level: u32, mut on_unassign: F)
    where
        F: FnMut(Variable),
    {
        assert!(target_level <= self.decision_level());
        let new_len = self.limits[target_level as usize..]
            .first()
            .copied()
            .unwrap_or_else(|| self.assigned.len());
        while self.assigned.len() > new_len {
            let literal = self.assigned.pop().expect("trail unexpectedly empty");
            let variable = literal.variable();
            self.values.update(variable, None).expect("in bounds");
            self.reasons.update(variable, None).expect("in bounds");
            on_unassign(variable);
        }
        self.limits.truncate(target_level as usize);
    }
}
