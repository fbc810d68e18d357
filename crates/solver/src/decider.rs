use crate::{
    trail::Trail,
    Variable,
};

/// Chooses the next variable to branch on.
///
/// Always picks the lowest-indexed unassigned variable and assumes it
/// `true`. This is a deliberately naive policy: no activity bumping, no
/// priority queue, just a forward-moving cursor over variable indices that
/// rewinds on backtracking.
#[derive(Debug, Default, Clone)]
pub struct Decider {
    num_variables: usize,
    cursor: usize,
}

impl Decider {
    /// Creates a decider for the given number of variables.
    pub fn new(num_variables: usize) -> Self {
        Self {
            num_variables,
            cursor: 0,
        }
    }

    /// Returns the lowest-indexed unassigned variable, if any.
    ///
    /// Advances the internal cursor past every variable found already
    /// assigned.
    pub fn next_unassigned(&mut self, trail: &Trail) -> Option<Variable> {
        while self.cursor < self.num_variables {
            let variable =
                Variable::from_index(self.cursor).expect("cursor stays within bounds");
            self.cursor += 1;
            if trail.value_of(variable).is_none() {
                return Some(variable)
            }
        }
        None
    }

    /// Informs the decider that `variable` was just unassigned by
    /// backtracking, so it is reconsidered on the next decision.
    pub fn notify_unassigned(&mut self, variable: Variable) {
        self.cursor = self.cursor.min(variable.into_index());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trail::Reason;
    use crate::Sign;

    #[test]
    fn picks_lowest_unassigned_first() {
        let mut trail = Trail::new(3);
        trail.new_decision_level();
        trail.assign(
            Variable::from_index(0).unwrap().into_literal(Sign::POS),
            Reason::Decision,
        );
        let mut decider = Decider::new(3);
        assert_eq!(decider.next_unassigned(&trail), Some(Variable::from_index(1).unwrap()));
    }

    #[test]
    fn notify_unassigned_rewinds_cursor() {
        let trail = Trail::new(3);
        let mut decider = Decider::new(3);
        assert_eq!(decider.next_unassigned(&trail), Some(Variable::from_index(0).unwrap()));
        assert_eq!(decider.next_unassigned(&trail), Some(Variable::from_index(1).unwrap()));
        decider.notify_unassigned(Variable::from_index(0).unwrap());
        assert_eq!(decider.next_unassigned(&trail), Some(Variable::from_index(0).unwrap()));
    }
}
