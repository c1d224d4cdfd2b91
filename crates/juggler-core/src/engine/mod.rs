//! Priority & Load Engine.
//!
//! Three pure functions, run in this order after every mutation:
//!
//! 1. [`calculate_flow_rating`] per task
//! 2. [`aggregate_load`] over all tasks
//! 3. [`suggest_pause`] when the tier is RED
//!
//! None of them read a clock or mutate their inputs.

pub mod flow;
pub mod load;
pub mod pause;

pub use flow::{calculate_flow_rating, days_to_deadline};
pub use load::{
    aggregate_load, LoadHistory, LoadReport, LoadSample, LoadTier, METER_CAPACITY,
    RED_THRESHOLD, YELLOW_THRESHOLD,
};
pub use pause::{suggest_pause, PauseSuggestion, SuggestionState};
