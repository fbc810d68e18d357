//! Sudoku bookkeeping travels alongside a CNF file as ordinary `c` comment
//! lines, in three forms:
//!
//! ```text
//! c SIZE <n>
//! c MAP <variable> <row> <col> <value>
//! c FIXED <row> <col> <value>
//! ```
//!
//! `SIZE` gives the grid's side length, `MAP` ties a solver variable to the
//! cell/value it stands for, and `FIXED` lists the clues already present in
//! the puzzle. None of this is meaningful to the solver itself; it exists so
//! a later pass can turn a satisfying model back into a grid.

use nom::{
    bytes::complete::tag,
    character::complete::{
        char,
        digit1,
        space1,
    },
    combinator::{
        map_res,
        opt,
        recognize,
    },
    sequence::{
        pair,
        preceded,
        tuple,
    },
    IResult,
};

/// One cell-to-variable correspondence recovered from a `c MAP` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapEntry {
    pub variable: u32,
    pub row: usize,
    pub col: usize,
    pub value: usize,
}

/// One fixed clue recovered from a `c FIXED` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedEntry {
    pub row: usize,
    pub col: usize,
    pub value: usize,
}

/// Everything recovered from a CNF file's sidecar comments.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SidecarMetadata {
    pub size: Option<usize>,
    pub map: Vec<MapEntry>,
    pub fixed: Vec<FixedEntry>,
}

impl SidecarMetadata {
    /// Scans every line of `text` for sidecar directives, ignoring all
    /// other lines (clauses, the problem line, and plain comments alike).
    pub fn scan(text: &str) -> Self {
        let mut metadata = Self::default();
        for line in text.lines() {
            match parse_directive(line.trim()) {
                Ok((_, Directive::Size(n))) => metadata.size = Some(n),
                Ok((_, Directive::Map(entry))) => metadata.map.push(entry),
                Ok((_, Directive::Fixed(entry))) => metadata.fixed.push(entry),
                Err(_) => (),
            }
        }
        metadata
    }
}

enum Directive {
    Size(usize),
    Map(MapEntry),
    Fixed(FixedEntry),
}

fn unsigned(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse)(input)
}

fn signed_u32(input: &str) -> IResult<&str, u32> {
    map_res(recognize(pair(opt(char('-')), digit1)), str::parse)(input)
}

fn comment_prefix(keyword: &'static str) -> impl Fn(&str) -> IResult<&str, &str> {
    move |input: &str| {
        let (input, _) = tuple((tag("c"), space1, tag(keyword), space1))(input)?;
        Ok((input, ""))
    }
}

fn size_directive(input: &str) -> IResult<&str, Directive> {
    let (input, _) = comment_prefix("SIZE")(input)?;
    let (input, size) = unsigned(input)?;
    Ok((input, Directive::Size(size)))
}

fn map_directive(input: &str) -> IResult<&str, Directive> {
    let (input, _) = comment_prefix("MAP")(input)?;
    let (input, variable) = signed_u32(input)?;
    let (input, _) = space1(input)?;
    let (input, row) = unsigned(input)?;
    let (input, _) = space1(input)?;
    let (input, col) = unsigned(input)?;
    let (input, _) = space1(input)?;
    let (input, value) = unsigned(input)?;
    Ok((
        input,
        Directive::Map(MapEntry {
            variable,
            row,
            col,
            value,
        }),
    ))
}

fn fixed_directive(input: &str) -> IResult<&str, Directive> {
    let (input, _) = comment_prefix("FIXED")(input)?;
    let (input, row) = unsigned(input)?;
    let (input, _) = space1(input)?;
    let (input, col) = unsigned(input)?;
    let (input, _) = space1(input)?;
    let (input, value) = unsigned(input)?;
    Ok((input, Directive::Fixed(FixedEntry { row, col, value })))
}

fn parse_directive(input: &str) -> IResult<&str, Directive> {
    size_directive(input)
        .or_else(|_| map_directive(input))
        .or_else(|_| fixed_directive(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_size_line() {
        let metadata = SidecarMetadata::scan("c SIZE 9\n");
        assert_eq!(metadata.size, Some(9));
    }

    #[test]
    fn parses_map_lines() {
        let metadata = SidecarMetadata::scan("c MAP 1 0 0 5\nc MAP 2 0 1 3\n");
        assert_eq!(
            metadata.map,
            vec![
                MapEntry {
                    variable: 1,
                    row: 0,
                    col: 0,
                    value: 5
                },
                MapEntry {
                    variable: 2,
                    row: 0,
                    col: 1,
                    value: 3
                },
            ]
        );
    }

    #[test]
    fn parses_fixed_lines() {
        let metadata = SidecarMetadata::scan("c FIXED 0 0 5\n");
        assert_eq!(
            metadata.fixed,
            vec![FixedEntry {
                row: 0,
                col: 0,
                value: 5
            }]
        );
    }

    #[test]
    fn ignores_unrelated_comments_and_clauses() {
        let metadata = SidecarMetadata::scan("c a random comment\np cnf 4 2\n1 2 0\n-1 -2 0\n");
        assert_eq!(metadata, SidecarMetadata::default());
    }

    #[test]
    fn mixed_directives_interleaved_with_clauses() {
        let text = "c SIZE 4\nc MAP 1 0 0 1\np cnf 16 10\n1 2 0\nc FIXED 0 0 1\n";
        let metadata = SidecarMetadata::scan(text);
        assert_eq!(metadata.size, Some(4));
        assert_eq!(metadata.map.len(), 1);
        assert_eq!(metadata.fixed.len(), 1);
    }
}
