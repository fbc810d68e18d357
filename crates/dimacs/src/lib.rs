//! Decodes DIMACS CNF text into a ready-to-solve [`solver::Solver`].
//!
//! Parsing the clause grammar itself is delegated to `cnf-parser`; this
//! crate only supplies the glue that turns its callbacks into solver calls,
//! plus the Sudoku-specific `SIZE`/`MAP`/`FIXED` comment grammar in
//! [`sidecar`].

mod error;
mod sidecar;

pub use crate::{
    error::Error,
    sidecar::{
        FixedEntry,
        MapEntry,
        SidecarMetadata,
    },
};
use cnf_parser::Input as CnfInput;
use solver::{
    Literal,
    Solver,
};

/// Feeds `bytes` to `cnf_parser::Input` one at a time.
struct ByteInput<'a> {
    bytes: core::slice::Iter<'a, u8>,
}

impl<'a> ByteInput<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes: bytes.iter(),
        }
    }
}

impl<'a> CnfInput for ByteInput<'a> {
    fn next(&mut self) -> Option<u8> {
        self.bytes.next().copied()
    }
}

/// Turns `cnf_parser`'s problem-line and clause callbacks into calls against
/// a [`Solver`] under construction.
#[derive(Default)]
struct SolverBuilder {
    solver: Option<Solver>,
}

impl SolverBuilder {
    fn finalize(self) -> Result<Solver, Error> {
        self.solver.ok_or(Error::MissingProblemLine)
    }
}

impl cnf_parser::Output for SolverBuilder {
    type Error = Error;

    fn set_problem_line(
        &mut self,
        num_variables: usize,
        _num_clauses: usize,
    ) -> Result<(), Self::Error> {
        if self.solver.is_some() {
            return Err(Error::BadProblemLine)
        }
        self.solver = Some(Solver::with_num_vars(num_variables)?);
        Ok(())
    }

    fn clause<I>(&mut self, literals: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = i32>,
    {
        let solver = self.solver.as_mut().ok_or(Error::MissingProblemLine)?;
        solver.add_clause(literals.into_iter().map(Literal::from))?;
        Ok(())
    }
}

/// Decodes `text` (the full contents of a `.cnf` file) into a [`Solver`]
/// and whatever Sudoku sidecar metadata its comments carried.
///
/// Sidecar comments are scanned independently of the clause grammar, so
/// they may appear anywhere in the file, interleaved with clauses.
///
/// # Errors
///
/// If the problem line is missing, duplicated, or a clause references a
/// variable outside the declared range, or the clause grammar itself is
/// malformed.
pub fn parse_cnf(text: &str) -> Result<(Solver, SidecarMetadata), Error> {
    let metadata = SidecarMetadata::scan(text);
    let mut builder = SolverBuilder::default();
    let mut input = ByteInput::new(text.as_bytes());
    cnf_parser::parse_cnf(&mut input, &mut builder)
        .map_err(|err| Error::Syntax(format!("{:?}", err)))?;
    let solver = builder.finalize()?;
    Ok((solver, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_small_satisfiable_instance() {
        let text = "p cnf 2 3\n1 2 0\n-1 2 0\n1 -2 0\n";
        let (mut solver, metadata) = parse_cnf(text).unwrap();
        assert_eq!(solver.num_variables(), 2);
        assert!(metadata.size.is_none());
        assert!(solver.solve().is_sat());
    }

    #[test]
    fn decodes_an_unsatisfiable_instance() {
        let text = "p cnf 2 4\n1 2 0\n-1 2 0\n1 -2 0\n-1 -2 0\n";
        let (mut solver, _) = parse_cnf(text).unwrap();
        assert!(solver.solve().is_unsat());
    }

    #[test]
    fn recovers_sidecar_metadata_alongside_clauses() {
        let text = "c SIZE 2\nc MAP 1 0 0 1\np cnf 4 2\n1 2 0\nc FIXED 0 0 1\n-1 -2 0\n";
        let (_, metadata) = parse_cnf(text).unwrap();
        assert_eq!(metadata.size, Some(2));
        assert_eq!(metadata.map.len(), 1);
        assert_eq!(metadata.fixed.len(), 1);
    }

    #[test]
    fn clause_before_problem_line_is_rejected() {
        // The builder's own `clause` callback raises `MissingProblemLine`,
        // which `cnf-parser` surfaces wrapped in its own error type; only
        // the outcome (an error) is part of this crate's contract.
        let text = "1 2 0\np cnf 2 1\n";
        assert!(parse_cnf(text).is_err());
    }

    #[test]
    fn clause_referencing_out_of_range_variable_is_rejected() {
        let text = "p cnf 1 1\n1 2 0\n";
        assert!(parse_cnf(text).is_err());
    }

    #[test]
    fn input_with_no_problem_line_at_all_is_rejected() {
        let err = parse_cnf("c just a comment\n").unwrap_err();
        assert!(matches!(err, Error::MissingProblemLine));
    }
}
