//! CLI entry point. Grounded on the teacher's `main.rs` clap subcommand
//! layout (`Demo`/`Schedule`/`Validate`/`Report`), narrowed to this
//! system's two operating modes: `serve` the HTTP/WS API, or `demo` a GA
//! run against a small embedded resource set and print the result with
//! `colored`, exactly as the teacher's CLI prints its own run summaries.

use clap::{Parser, Subcommand};
use colored::Colorize;
use school_scheduler::api::{self, AppState};
use school_scheduler::config::AppConfig;
use school_scheduler::ga::{self, CancelToken};
use school_scheduler::orchestrator::Orchestrator;
use school_scheduler::progress::ProgressBroker;
use school_scheduler::repository::{InMemoryScheduleRepository, ScheduleRepository};
use school_scheduler::resource_loader::{self, RawResources};
use school_scheduler::types::*;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "school-scheduler", about = "Genetic-algorithm timetable generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP + WebSocket API.
    Serve,
    /// Run the GA once against a small embedded demo dataset and print the
    /// result.
    Demo {
        #[arg(long, default_value_t = 50)]
        generations: u32,
        #[arg(long, default_value_t = 30)]
        population: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(config.log_filter.clone()))
        .init();

    match Cli::parse().command {
        Command::Serve => serve(config).await,
        Command::Demo { generations, population } => demo(generations, population).await,
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let resources = demo_resources();
    let repository: Arc<dyn ScheduleRepository> = Arc::new(InMemoryScheduleRepository::new(resources));
    let broker = ProgressBroker::new();
    let orchestrator = Orchestrator::new(Arc::clone(&repository), Arc::clone(&broker));

    let state = AppState { repository, orchestrator, broker };
    let router = api::router(state);

    tracing::info!(bind_address = %config.bind_address, "starting school-scheduler");
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}

async fn demo(generations: u32, population: u32) -> anyhow::Result<()> {
    let raw = demo_resources();
    let pool = resource_loader::load("2025-2026", &raw)?;
    let demands = school_scheduler::demand::expand(&pool);

    println!("{}", format!("Loaded {} demand slots", demands.len()).bold());

    let params = GAParams { population_size: population, generation_count: generations, ..GAParams::default() };
    let cancel = CancelToken::new();
    let outcome = ga::run(&demands, &pool, &params, &cancel, |update| {
        println!(
            "  generation {:>4} best={:.1} avg={:.1}",
            update.generation, update.best_fitness, update.avg_fitness
        );
    })
    .await;

    println!(
        "{} after {} generations, fitness = {}",
        "Done".green().bold(),
        outcome.generations_run,
        format!("{:.1}", outcome.best_fitness).cyan()
    );
    Ok(())
}

/// A small, internally consistent resource set used by `demo` and by
/// `serve`'s bundled in-memory repository until a persistent
/// `ScheduleRepository` is wired in.
fn demo_resources() -> RawResources {
    RawResources {
        classes: vec![
            Class {
                id: ClassId(1),
                name: "X RPL 1".to_string(),
                grade_level: GradeLevel::new(10).unwrap(),
                department_id: DepartmentId(1),
                academic_year: "2025-2026".to_string(),
                is_active: true,
            },
            Class {
                id: ClassId(2),
                name: "X RPL 2".to_string(),
                grade_level: GradeLevel::new(10).unwrap(),
                department_id: DepartmentId(1),
                academic_year: "2025-2026".to_string(),
                is_active: true,
            },
        ],
        teachers: vec![
            Teacher { id: TeacherId(1), code: "T1".to_string(), name: "Budi".to_string(), is_active: true },
            Teacher { id: TeacherId(2), code: "T2".to_string(), name: "Sari".to_string(), is_active: true },
        ],
        subjects: vec![
            Subject {
                id: SubjectId(1),
                code: "MTK".to_string(),
                name: "Matematika".to_string(),
                grade_level: None,
                department_id: Some(DepartmentId(1)),
                room_type: RoomType::Theory,
                is_compulsory: true,
            },
            Subject {
                id: SubjectId(2),
                code: "PMG".to_string(),
                name: "Pemrograman".to_string(),
                grade_level: None,
                department_id: Some(DepartmentId(1)),
                room_type: RoomType::Practicum,
                is_compulsory: true,
            },
        ],
        rooms: vec![
            Room {
                id: RoomId(1),
                code: "R1".to_string(),
                name: "Theory Room 1".to_string(),
                room_type: RoomType::Theory,
                capacity: 36,
                is_active: true,
            },
            Room {
                id: RoomId(2),
                code: "LAB1".to_string(),
                name: "Programming Lab".to_string(),
                room_type: RoomType::Practicum,
                capacity: 30,
                is_active: true,
            },
        ],
        time_slots: (1..=5)
            .flat_map(|day| {
                (1..=8).map(move |slot| TimeSlot {
                    id: TimeSlotId((day - 1) * 8 + slot),
                    day_of_week: day as u8,
                    slot_number: slot as u8,
                    start_time: format!("{:02}:00", 6 + slot),
                    end_time: format!("{:02}:45", 6 + slot),
                })
            })
            .collect(),
        curricula: vec![
            Curriculum {
                id: CurriculumId(1),
                subject_id: SubjectId(1),
                department_id: DepartmentId(1),
                grade_level: 10,
                hours_per_week: 4,
                academic_year: "2025-2026".to_string(),
            },
            Curriculum {
                id: CurriculumId(2),
                subject_id: SubjectId(2),
                department_id: DepartmentId(1),
                grade_level: 10,
                hours_per_week: 6,
                academic_year: "2025-2026".to_string(),
            },
        ],
        teacher_subjects: vec![
            TeacherSubject { teacher_id: TeacherId(1), subject_id: SubjectId(1), academic_year: "2025-2026".to_string() },
            TeacherSubject { teacher_id: TeacherId(2), subject_id: SubjectId(2), academic_year: "2025-2026".to_string() },
        ],
        teacher_availability: vec![],
        room_departments: vec![],
    }
}
