//! # Juggler Core Library
//!
//! Priority and cognitive-load engine behind the Juggler dashboard. All
//! operations are available through the standalone `juggler` CLI; this
//! crate holds the business logic it drives.
//!
//! ## Architecture
//!
//! - **Engine**: pure functions for the flow rating, the load aggregate with
//!   its tiers, and the pause advisor with its suggestion state machine
//! - **Store**: owns projects and tasks and recomputes every derived value
//!   after each mutation
//! - **Storage**: TOML configuration and the JSON session snapshot
//! - **Assistant**: goal decomposition and day planning, online or offline
//!
//! ## Key Components
//!
//! - [`Store`]: the single source of truth for a session
//! - [`calculate_flow_rating`], [`aggregate_load`], [`suggest_pause`]
//! - [`Config`]: application configuration management
//! - [`PlanningAssistant`]: trait for planning back ends

pub mod assistant;
pub mod clock;
pub mod demo;
pub mod engine;
pub mod error;
pub mod focus;
pub mod insights;
pub mod links;
pub mod model;
pub mod storage;
pub mod store;
pub mod templates;

pub use assistant::{
    ConfiguredAssistant, DecomposedTask, FallbackAssistant, GeminiAssistant, OfflineAssistant,
    PlanningAssistant, ScheduledTask,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{
    aggregate_load, calculate_flow_rating, suggest_pause, LoadHistory, LoadReport, LoadSample,
    LoadTier, PauseSuggestion, SuggestionState,
};
pub use error::{AssistantError, ConfigError, CoreError, FocusError, ValidationError};
pub use focus::{ActiveFocus, FocusSession, FocusTimer};
pub use insights::PlanItem;
pub use model::{
    NewProject, NewTask, Project, ProjectDna, ProjectId, ProjectPatch, ProjectStatus, Task,
    TaskId, TaskPatch,
};
pub use storage::{Config, SessionSnapshot};
pub use store::Store;
pub use templates::{builtin_templates, find_template, ProjectTemplate};
