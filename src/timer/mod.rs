pub mod controller;
pub mod state;

pub use controller::{TimerController, TimerSnapshot};
pub use state::{
    DurationInput, TickOutcome, TimerDurations, TimerPhase, TimerState, BREAK_MINUTES_RANGE,
    DEFAULT_BREAK_MINUTES, DEFAULT_FOCUS_MINUTES, FOCUS_MINUTES_RANGE,
};
