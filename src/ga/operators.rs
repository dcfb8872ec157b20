//! Selection, crossover and mutation operators (spec.md §4.3.5–§4.3.7).
//! Grounded on the teacher's `scheduler::optimizer`, which drives a similar
//! generate/perturb/re-score loop over sections; this module replaces its
//! local-search moves with the spec's four named mutation kinds.

use super::candidates::CandidateSets;
use super::chromosome::{Chromosome, Gene};
use rand::prelude::*;

/// Tournament selection (spec.md §4.3.5): draw `tournament_size` distinct
/// indices uniformly with replacement-free sampling within the draw, return
/// the index of the fittest.
pub fn tournament_select(fitness: &[f64], tournament_size: u32, rng: &mut impl Rng) -> usize {
    debug_assert!(!fitness.is_empty());
    let size = (tournament_size as usize).min(fitness.len()).max(1);
    (0..size)
        .map(|_| rng.gen_range(0..fitness.len()))
        .max_by(|&a, &b| fitness[a].partial_cmp(&fitness[b]).unwrap())
        .unwrap()
}

/// Single-point crossover (spec.md §4.3.6): pick a cut point uniformly in
/// `1..len`, splice `parent_a`'s prefix with `parent_b`'s suffix. Chromosomes
/// of length 0 or 1 have no valid cut point and are returned unchanged.
pub fn crossover(parent_a: &Chromosome, parent_b: &Chromosome, rng: &mut impl Rng) -> Chromosome {
    debug_assert_eq!(parent_a.len(), parent_b.len());
    let len = parent_a.len();
    if len < 2 {
        return parent_a.clone();
    }
    let cut = rng.gen_range(1..len);
    let mut child = Vec::with_capacity(len);
    child.extend_from_slice(&parent_a[..cut]);
    child.extend_from_slice(&parent_b[cut..]);
    child
}

/// One mutation kind (spec.md §4.3.7). `SwapTimes` needs a second gene
/// position and is handled separately in [`mutate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MutationKind {
    ChangeRoom,
    ChangeTime,
    ChangeTeacher,
    SwapTimes,
}

const MUTATION_KINDS: [MutationKind; 4] = [
    MutationKind::ChangeRoom,
    MutationKind::ChangeTime,
    MutationKind::ChangeTeacher,
    MutationKind::SwapTimes,
];

/// Mutate `chromosome` in place. `mutation_rate` is a per-child probability
/// (spec.md §4.3.7): the child as a whole is mutated with that probability,
/// and on success exactly one gene position is picked uniformly and mutated
/// with one of the four named kinds. A kind whose candidate set is empty for
/// that demand is a no-op.
pub fn mutate(
    chromosome: &mut Chromosome,
    candidates: &CandidateSets,
    mutation_rate: f64,
    rng: &mut impl Rng,
) {
    let len = chromosome.len();
    if len == 0 || !rng.gen_bool(mutation_rate) {
        return;
    }
    let i = rng.gen_range(0..len);
    let kind = MUTATION_KINDS[rng.gen_range(0..MUTATION_KINDS.len())];
    apply_mutation(chromosome, candidates, i, kind, rng);
}

fn apply_mutation(
    chromosome: &mut Chromosome,
    candidates: &CandidateSets,
    i: usize,
    kind: MutationKind,
    rng: &mut impl Rng,
) {
    match kind {
        MutationKind::ChangeRoom => {
            let rooms = &candidates.per_demand[i].rooms;
            if let Some(&room_id) = rooms.choose(rng) {
                chromosome[i].room_id = room_id;
            }
        }
        MutationKind::ChangeTeacher => {
            let teachers = &candidates.per_demand[i].teachers;
            if let Some(&teacher_id) = teachers.choose(rng) {
                chromosome[i].teacher_id = teacher_id;
            }
        }
        MutationKind::ChangeTime => {
            if let Some(&time_slot_id) = candidates.all_time_slots.choose(rng) {
                chromosome[i].time_slot_id = time_slot_id;
            }
        }
        MutationKind::SwapTimes => {
            let len = chromosome.len();
            if len < 2 {
                return;
            }
            let mut j = rng.gen_range(0..len);
            while j == i {
                j = rng.gen_range(0..len);
            }
            let tmp = chromosome[i].time_slot_id;
            chromosome[i].time_slot_id = chromosome[j].time_slot_id;
            chromosome[j].time_slot_id = tmp;
        }
    }
}

/// Build a random gene for one demand position, falling back to the
/// sentinel id when a candidate set is empty (spec.md §4.3.2, §4.3.4).
pub fn random_gene(candidates: &super::candidates::DemandCandidates, all_time_slots: &[crate::types::TimeSlotId], rng: &mut impl Rng) -> Gene {
    let teacher_id = candidates
        .teachers
        .choose(rng)
        .copied()
        .unwrap_or(crate::types::TeacherId::SENTINEL);
    let room_id = candidates
        .rooms
        .choose(rng)
        .copied()
        .unwrap_or(crate::types::RoomId::SENTINEL);
    let time_slot_id = all_time_slots
        .choose(rng)
        .copied()
        .unwrap_or(crate::types::TimeSlotId::SENTINEL);
    Gene {
        teacher_id,
        room_id,
        time_slot_id,
    }
}
