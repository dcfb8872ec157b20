//! Orchestrator (OR, spec.md §4.8): owns the per-schedule generation state
//! machine (`Idle -> Loading -> Running -> {Completed, Cancelled, Failed}`),
//! guards against starting a second run for a schedule that already has one
//! in flight, and wires the GA engine's progress callback to the Progress
//! Broker. Grounded on `iqrah-server`'s `AppState`-held `SessionMap`
//! pattern — an `Arc<RwLock<HashMap<..>>>` of per-entity task state,
//! generalized from chat sessions to schedule generation runs.

use crate::conflict;
use crate::demand;
use crate::error::AppError;
use crate::ga::{self, CancelToken, GenerationUpdate};
use crate::progress::{Event, ProgressBroker};
use crate::repository::ScheduleRepository;
use crate::resource_loader;
use crate::types::{ScheduleDetail, ScheduleDetailId, ScheduleId, ScheduleStatus};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Observable state of one schedule's generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Loading,
    Running,
    Completed,
    Cancelled,
    Failed,
}

struct ActiveRun {
    state: RunState,
    cancel: CancelToken,
}

/// Coordinates GA runs across schedules. One instance is shared (behind
/// `Arc`) across the whole process.
pub struct Orchestrator {
    repository: Arc<dyn ScheduleRepository>,
    broker: Arc<ProgressBroker>,
    active: RwLock<HashMap<ScheduleId, ActiveRun>>,
}

impl Orchestrator {
    pub fn new(repository: Arc<dyn ScheduleRepository>, broker: Arc<ProgressBroker>) -> Arc<Self> {
        Arc::new(Self {
            repository,
            broker,
            active: RwLock::new(HashMap::new()),
        })
    }

    pub async fn state_of(&self, schedule_id: ScheduleId) -> Option<RunState> {
        self.active.read().await.get(&schedule_id).map(|r| r.state)
    }

    /// Start a generation run for `schedule_id`. Fails with
    /// [`AppError::AlreadyRunning`] if one is already in flight (spec.md
    /// §4.8). The run executes on a spawned task; this function returns as
    /// soon as it has been accepted.
    pub async fn start(self: &Arc<Self>, schedule_id: ScheduleId) -> Result<(), AppError> {
        {
            let mut active = self.active.write().await;
            if let Some(run) = active.get(&schedule_id) {
                if matches!(run.state, RunState::Loading | RunState::Running) {
                    return Err(AppError::AlreadyRunning(schedule_id.0));
                }
            }
            active.insert(
                schedule_id,
                ActiveRun { state: RunState::Loading, cancel: CancelToken::new() },
            );
        }

        let orchestrator = Arc::clone(self);
        tokio::spawn(async move {
            orchestrator.run(schedule_id).await;
        });

        Ok(())
    }

    /// Request cancellation of schedule `schedule_id`'s in-flight run, if
    /// any. A no-op if no run is active.
    pub async fn cancel(&self, schedule_id: ScheduleId) {
        if let Some(run) = self.active.read().await.get(&schedule_id) {
            run.cancel.cancel();
        }
    }

    async fn run(self: Arc<Self>, schedule_id: ScheduleId) {
        let cancel = match self.active.read().await.get(&schedule_id) {
            Some(run) => run.cancel.clone(),
            None => return,
        };

        let outcome = self.try_run(schedule_id, &cancel).await;

        let final_state = match &outcome {
            Ok(run_outcome) if run_outcome.cancelled => RunState::Cancelled,
            Ok(_) => RunState::Completed,
            Err(_) => RunState::Failed,
        };

        match &outcome {
            Ok(run_outcome) if run_outcome.cancelled => {
                self.broker
                    .publish(schedule_id, Event::Failed { schedule_id, reason: "cancelled".to_string() })
                    .await;
            }
            Ok(run_outcome) => {
                self.broker
                    .publish(
                        schedule_id,
                        Event::Complete {
                            schedule_id,
                            fitness_score: run_outcome.best_fitness,
                            detail_count: run_outcome.best_chromosome.len(),
                        },
                    )
                    .await;
            }
            Err(err) => {
                self.broker
                    .publish(schedule_id, Event::Failed { schedule_id, reason: err.to_string() })
                    .await;
            }
        }

        if let Some(run) = self.active.write().await.get_mut(&schedule_id) {
            run.state = final_state;
        }
        self.broker.close(schedule_id).await;
    }

    async fn try_run(
        &self,
        schedule_id: ScheduleId,
        cancel: &CancelToken,
    ) -> Result<ga::RunOutcome, AppError> {
        let schedule = self.repository.get_schedule(schedule_id).await?;
        let raw = self.repository.load_resources().await?;
        let pool = resource_loader::load(&schedule.academic_year, &raw)?;
        let demands = demand::expand(&pool);

        if let Some(run) = self.active.write().await.get_mut(&schedule_id) {
            run.state = RunState::Running;
        }

        // Progress updates come from a synchronous FnMut callback inside the
        // generation loop; hand them to a forwarder task over an unbounded
        // channel so publication to the broker stays strictly in generation
        // order (spec.md §8 "currentGeneration strictly monotonic").
        let (progress_tx, mut progress_rx) = tokio::sync::mpsc::unbounded_channel::<GenerationUpdate>();
        let broker = Arc::clone(&self.broker);
        let sid = schedule_id;
        let total_generations = schedule.ga_params.generation_count;
        let forwarder = tokio::spawn(async move {
            let mut history = Vec::new();
            while let Some(update) = progress_rx.recv().await {
                history.push(update.best_fitness);
                broker
                    .publish(
                        sid,
                        Event::Progress {
                            schedule_id: sid,
                            current_generation: update.generation,
                            total_generations,
                            best_fitness: update.best_fitness,
                            fitness_history: history.clone(),
                        },
                    )
                    .await;
            }
        });

        let outcome = ga::run(&demands, &pool, &schedule.ga_params, cancel, move |update: GenerationUpdate| {
            let _ = progress_tx.send(update);
        })
        .await;
        let _ = forwarder.await;

        if !outcome.cancelled {
            let details: Vec<ScheduleDetail> = demands
                .iter()
                .zip(&outcome.best_chromosome)
                .enumerate()
                .map(|(i, (d, g))| ScheduleDetail {
                    id: ScheduleDetailId((i + 1) as i64),
                    schedule_id,
                    class_id: d.class_id,
                    subject_id: d.subject_id,
                    teacher_id: g.teacher_id,
                    room_id: g.room_id,
                    time_slot_id: g.time_slot_id,
                    is_manually_edited: false,
                    is_override: false,
                })
                .collect();

            let conflicts = conflict::detect(&details, &pool);
            self.repository.replace_details(schedule_id, details).await?;
            self.repository.replace_conflicts(schedule_id, conflicts).await?;

            let mut updated_schedule = schedule;
            updated_schedule.fitness_score = Some(outcome.best_fitness);
            updated_schedule.status = ScheduleStatus::Draft;
            updated_schedule.metadata.generations_run = outcome.generations_run;
            self.repository.update_schedule(updated_schedule).await?;
        }

        Ok(outcome)
    }
}
