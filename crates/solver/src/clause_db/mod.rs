mod clause;
mod clause_ref;
mod db;

pub use self::{
    clause::{
        Clause,
        Error as ClauseError,
    },
    clause_ref::ClauseRef,
    db::{
        ClauseDb,
        ClauseDbIter,
        ClauseId,
        UnitClause,
    },
};
