use crate::{
    clause_db::{
        ClauseDb,
        ClauseId,
        ClauseRef,
    },
    trail::{
        Reason,
        Trail,
    },
    Literal,
};

/// The outcome of examining a single clause against the current trail.
enum Status {
    /// At least one literal is already satisfied.
    Satisfied,
    /// Every literal is falsified: the clause is a conflict.
    Conflict,
    /// Every literal but one is falsified: the clause forces `Literal`.
    Unit(Literal),
    /// More than one literal is still unassigned.
    Unresolved,
}

fn classify(clause: ClauseRef, trail: &Trail) -> Status {
    let mut unassigned = None;
    let mut unassigned_count = 0usize;
    for literal in clause {
        match trail.status_of(literal) {
            Some(true) => return Status::Satisfied,
            Some(false) => continue,
            None => {
                unassigned_count += 1;
                unassigned = Some(literal);
            }
        }
    }
    match unassigned_count {
        0 => Status::Conflict,
        1 => Status::Unit(unassigned.expect("counted exactly one unassigned literal")),
        _ => Status::Unresolved,
    }
}

/// Propagates consequences of the current trail to a fixpoint.
///
/// This is a deliberately simple linear-scan propagator: on every round it
/// walks the entire clause database looking for clauses that became unit or
/// conflicting, rather than maintaining a watched-literal index. It is
/// algorithmically worse than watched literals but keeps the clause
/// database free of any per-clause propagation state.
///
/// # Errors
///
/// Returns the identifier of the first clause found to be in conflict with
/// the current trail.
pub fn propagate(trail: &mut Trail, clauses: &ClauseDb) -> Result<(), ClauseId> {
    let mut made_progress = true;
    while made_progress {
        made_progress = false;
        for (id, clause) in clauses {
            match classify(clause, trail) {
                Status::Satisfied | Status::Unresolved => continue,
                Status::Conflict => return Err(id),
                Status::Unit(literal) => {
                    trail.assign(literal, Reason::Propagated(id));
                    made_progress = true;
                }
            }
        }
    }
    Ok(())
}
