use anyhow::Context;
use solver::SolveResult;
use std::{
    fs,
    path::PathBuf,
};
use structopt::StructOpt;
use sudoku::Grid;

#[derive(StructOpt, Debug)]
#[structopt(name = "cdcl-solve", about = "Solve a DIMACS CNF file with a CDCL SAT solver.")]
struct Opt {
    /// Path to the input .cnf file.
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Decode the SIZE/MAP/FIXED sidecar comments into a Sudoku grid and
    /// print it alongside the raw model, instead of just the witness.
    #[structopt(long)]
    sudoku: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let text = fs::read_to_string(&opt.input)
        .with_context(|| format!("couldn't read {}", opt.input.display()))?;
    let (mut solver, metadata) = dimacs::parse_cnf(&text)
        .with_context(|| format!("couldn't decode {} as DIMACS CNF", opt.input.display()))?;

    log::info!(
        "parsed {} with {} variables",
        opt.input.display(),
        solver.num_variables()
    );
    log::info!("starting solve");

    match solver.solve() {
        SolveResult::Unsat => {
            log::info!("result: UNSAT");
            println!("UNSAT");
        }
        SolveResult::Sat(sat) => {
            log::info!("result: SAT");
            println!("SAT");
            println!("v {} 0", sat.model());
            if opt.sudoku {
                let grid = Grid::decode(sat.model(), &metadata)
                    .context("couldn't decode the model as a Sudoku grid")?;
                print!("{grid}");
            }
        }
    }
    log::debug!(
        "made {} decisions, learned {} clauses",
        solver.num_decisions(),
        solver.num_learned_clauses()
    );
    Ok(())
}
