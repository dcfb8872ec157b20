use serde::{Deserialize, Serialize};

/// Toggleable hard-constraint categories (spec.md §4.3.9). Room
/// double-booking is intentionally absent here — it is always counted,
/// non-toggleable, because it is a physical infeasibility (spec.md §4.3.3,
/// §9 "Room double-booking toggled as teacher conflict").
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardConstraintFlags {
    pub teacher_conflict: bool,
    pub class_conflict: bool,
    pub room_type_match: bool,
}

impl Default for HardConstraintFlags {
    fn default() -> Self {
        Self {
            teacher_conflict: true,
            class_conflict: true,
            room_type_match: true,
        }
    }
}

/// Toggleable soft-constraint categories (spec.md §4.3.9).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftConstraintFlags {
    pub teacher_preference: bool,
    pub workload_distribution: bool,
}

impl Default for SoftConstraintFlags {
    fn default() -> Self {
        Self {
            teacher_preference: true,
            workload_distribution: true,
        }
    }
}

/// Parameters controlling one genetic-algorithm run (spec.md §4.3.9). The
/// wire format and defaults are fixed by spec.md §6.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GAParams {
    pub population_size: u32,
    pub generation_count: u32,
    pub elitism_count: u32,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub tournament_size: u32,
    pub hard_constraints: HardConstraintFlags,
    pub soft_constraints: SoftConstraintFlags,
}

impl Default for GAParams {
    fn default() -> Self {
        Self {
            population_size: 100,
            generation_count: 100,
            elitism_count: 5,
            crossover_rate: 0.8,
            mutation_rate: 0.2,
            tournament_size: 5,
            hard_constraints: HardConstraintFlags::default(),
            soft_constraints: SoftConstraintFlags::default(),
        }
    }
}

/// Validation errors for a `GAParams` value received over the wire
/// (spec.md §4.3.9 ranges), surfaced as `AppError::InvalidInput`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GAParamsError {
    #[error("populationSize must be in [10, 1000], got {0}")]
    PopulationSize(u32),
    #[error("generationCount must be in [10, 1000], got {0}")]
    GenerationCount(u32),
    #[error("elitismCount must be in [1, 50], got {0}")]
    ElitismCount(u32),
    #[error("crossoverRate must be in [0.0, 1.0], got {0}")]
    CrossoverRate(f64),
    #[error("mutationRate must be in [0.0, 1.0], got {0}")]
    MutationRate(f64),
    #[error("tournamentSize must be in [2, 50], got {0}")]
    TournamentSize(u32),
    #[error("elitismCount ({elitism}) must not exceed populationSize ({population})")]
    ElitismExceedsPopulation { elitism: u32, population: u32 },
}

impl GAParams {
    pub fn validate(&self) -> Result<(), GAParamsError> {
        if !(10..=1000).contains(&self.population_size) {
            return Err(GAParamsError::PopulationSize(self.population_size));
        }
        if !(10..=1000).contains(&self.generation_count) {
            return Err(GAParamsError::GenerationCount(self.generation_count));
        }
        if !(1..=50).contains(&self.elitism_count) {
            return Err(GAParamsError::ElitismCount(self.elitism_count));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(GAParamsError::CrossoverRate(self.crossover_rate));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GAParamsError::MutationRate(self.mutation_rate));
        }
        if !(2..=50).contains(&self.tournament_size) {
            return Err(GAParamsError::TournamentSize(self.tournament_size));
        }
        if self.elitism_count > self.population_size {
            return Err(GAParamsError::ElitismExceedsPopulation {
                elitism: self.elitism_count,
                population: self.population_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GAParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_population() {
        let mut params = GAParams::default();
        params.population_size = 5;
        assert_eq!(
            params.validate(),
            Err(GAParamsError::PopulationSize(5))
        );
    }

    #[test]
    fn rejects_elitism_exceeding_population() {
        let mut params = GAParams::default();
        params.population_size = 10;
        params.elitism_count = 20;
        assert!(matches!(
            params.validate(),
            Err(GAParamsError::ElitismExceedsPopulation { .. })
        ));
    }
}
