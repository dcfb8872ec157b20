//! Automatic timetable generator for a vocational secondary school: a
//! genetic algorithm assigns class × subject × teacher × room × time slot
//! lessons against curriculum demand, with conflict detection, manual
//! editing, and conflict resolution around it.

pub mod api;
pub mod conflict;
pub mod config;
pub mod demand;
pub mod error;
pub mod ga;
pub mod orchestrator;
pub mod progress;
pub mod repository;
pub mod resolver;
pub mod resource_loader;
pub mod types;
