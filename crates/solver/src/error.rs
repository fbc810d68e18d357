use crate::{
    clause_db::ClauseError,
    Variable,
};

/// Errors that can occur while building up or solving a problem instance.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A clause failed sanitation for a reason other than being empty or
    /// tautological (both of which are handled, not rejected).
    #[error("invalid clause: {0}")]
    Clause(#[from] ClauseError),
    /// A literal referenced a variable index beyond the number of variables
    /// the solver was created with.
    #[error("literal refers to variable index {index} but only {num_variables} variables were registered")]
    VariableOutOfBounds {
        index: usize,
        num_variables: usize,
    },
    /// Too many variables were requested for a single solver instance.
    #[error("requested {requested} variables, which exceeds the maximum of {max}")]
    TooManyVariables { requested: usize, max: usize },
}

impl Error {
    pub(crate) fn out_of_bounds(variable: Variable, num_variables: usize) -> Self {
        Self::VariableOutOfBounds {
            index: variable.into_index(),
            num_variables,
        }
    }
}
