/// Errors that can occur while decoding a DIMACS CNF file into a [`solver::Solver`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A clause appeared before the `p cnf <vars> <clauses>` problem line.
    #[error("clause appeared before the problem line")]
    MissingProblemLine,
    /// The problem line was malformed or repeated.
    #[error("malformed or duplicate problem line")]
    BadProblemLine,
    /// The underlying token stream was malformed DIMACS syntax.
    #[error("malformed DIMACS input: {0}")]
    Syntax(String),
    /// A literal or variable count was rejected by the solver itself, e.g.
    /// an out-of-range variable index.
    #[error(transparent)]
    Solver(#[from] solver::Error),
}
