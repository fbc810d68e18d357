//! Turns a solved CNF instance back into a Sudoku grid.
//!
//! The CNF encoding used by [`dimacs`] says nothing about rows, columns, or
//! digits on its own; that correspondence travels alongside the clauses as
//! `c MAP`/`c FIXED` comments (see [`dimacs::SidecarMetadata`]). Decoding a
//! grid is just replaying that correspondence against a solved
//! [`solver::Model`].

use dimacs::SidecarMetadata;
use solver::{
    Model,
    Sign,
    Variable,
};

/// Errors that can occur while decoding a grid from a model and its sidecar
/// metadata.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The CNF file carried no `c SIZE` directive.
    #[error("sidecar metadata has no SIZE directive")]
    MissingSize,
    /// A `c MAP` entry referenced a variable the solver never registered.
    #[error("MAP entry references variable {0} which is out of range")]
    VariableOutOfRange(u32),
    /// A `c MAP` entry placed a row or column outside the declared grid.
    #[error("MAP entry places cell ({row}, {col}) outside a {size}x{size} grid")]
    CellOutOfRange { row: usize, col: usize, size: usize },
    /// Two true `c MAP` entries assigned different digits to the same cell.
    #[error("cell ({row}, {col}) was assigned two different values by the model")]
    ConflictingCell { row: usize, col: usize },
}

/// A decoded Sudoku grid: `size` x `size` cells, each either a solved digit
/// or `None` if no `MAP` entry for that cell was ever assigned `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<usize>>,
    fixed: Vec<bool>,
}

impl Grid {
    /// The grid's side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The digit at `(row, col)`, if any variable mapped to it came out
    /// true in the model.
    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        self.cells[row * self.size + col]
    }

    /// Whether `(row, col)` was one of the puzzle's given clues rather than
    /// a digit the solver had to find.
    pub fn is_fixed(&self, row: usize, col: usize) -> bool {
        self.fixed[row * self.size + col]
    }

    /// Decodes a grid from a solved model and the CNF file's sidecar
    /// metadata.
    ///
    /// # Errors
    ///
    /// If the metadata has no `SIZE` directive, a `MAP`/`FIXED` entry
    /// references a cell or variable outside the declared bounds, or two
    /// true literals disagree on a cell's digit.
    pub fn decode(model: &Model, metadata: &SidecarMetadata) -> Result<Self, Error> {
        let size = metadata.size.ok_or(Error::MissingSize)?;
        let mut cells = vec![None; size * size];
        for entry in &metadata.map {
            if entry.row >= size || entry.col >= size {
                return Err(Error::CellOutOfRange {
                    row: entry.row,
                    col: entry.col,
                    size,
                })
            }
            let index = entry.variable.checked_sub(1).ok_or(Error::VariableOutOfRange(entry.variable))?;
            let variable = Variable::from_index(index as usize)
                .ok_or(Error::VariableOutOfRange(entry.variable))?;
            if model.value_of(variable) != Sign::POS {
                continue
            }
            let slot = &mut cells[entry.row * size + entry.col];
            match slot {
                Some(existing) if *existing != entry.value => {
                    return Err(Error::ConflictingCell {
                        row: entry.row,
                        col: entry.col,
                    })
                }
                _ => *slot = Some(entry.value),
            }
        }
        let mut fixed = vec![false; size * size];
        for entry in &metadata.fixed {
            if entry.row >= size || entry.col >= size {
                return Err(Error::CellOutOfRange {
                    row: entry.row,
                    col: entry.col,
                    size,
                })
            }
            fixed[entry.row * size + entry.col] = true;
        }
        Ok(Self { size, cells, fixed })
    }
}

impl core::fmt::Display for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                match self.get(row, col) {
                    Some(value) if self.is_fixed(row, col) => write!(f, "[{value}]")?,
                    Some(value) => write!(f, " {value} ")?,
                    None => write!(f, " . ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
