//! Genetic Scheduler (GS, spec.md §4.3) — THE CORE optimizer. Chromosome
//! representation, candidate sets, fitness, selection, crossover, mutation
//! and the generation loop with progress reporting and cancellation.
//!
//! Grounded on the teacher's `scheduler` module (`mod.rs` orchestrates named
//! phases with a progress callback; `ilp_solver`/`optimizer` are replaced
//! wholesale by this module's generation loop per spec.md §9 "the rewrite
//! replaces ILP with a GA").

mod candidates;
mod chromosome;
mod engine;
mod fitness;
mod operators;

pub use candidates::{CandidateSets, DemandCandidates};
pub use chromosome::{Chromosome, Gene};
pub use engine::{run, CancelToken, GenerationUpdate, RunOutcome};
pub use fitness::evaluate;
