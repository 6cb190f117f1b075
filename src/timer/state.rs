use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const FOCUS_MINUTES_RANGE: RangeInclusive<u32> = 5..=90;
pub const BREAK_MINUTES_RANGE: RangeInclusive<u32> = 1..=30;
pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum TimerPhase {
    #[default]
    Focus,
    Break,
}

impl TimerPhase {
    pub fn flipped(self) -> Self {
        match self {
            TimerPhase::Focus => TimerPhase::Break,
            TimerPhase::Break => TimerPhase::Focus,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Focus => "Focus",
            TimerPhase::Break => "Break",
        }
    }
}

/// A duration field as the view collected it. `None` means the raw input
/// was not a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationInput(Option<f64>);

impl DurationInput {
    pub fn invalid() -> Self {
        Self(None)
    }

    /// Whole minutes clamped into `range`; non-numeric input yields `default`.
    fn resolve(self, range: RangeInclusive<u32>, default: u32) -> u32 {
        match self.0 {
            Some(value) if value.is_finite() => {
                let lo = f64::from(*range.start());
                let hi = f64::from(*range.end());
                value.trunc().clamp(lo, hi) as u32
            }
            _ => default,
        }
    }
}

impl From<f64> for DurationInput {
    fn from(value: f64) -> Self {
        Self(Some(value))
    }
}

impl From<i32> for DurationInput {
    fn from(value: i32) -> Self {
        Self(Some(f64::from(value)))
    }
}

impl From<u32> for DurationInput {
    fn from(value: u32) -> Self {
        Self(Some(f64::from(value)))
    }
}

impl From<i64> for DurationInput {
    fn from(value: i64) -> Self {
        Self(Some(value as f64))
    }
}

impl From<Option<f64>> for DurationInput {
    fn from(value: Option<f64>) -> Self {
        Self(value)
    }
}

impl From<&str> for DurationInput {
    fn from(raw: &str) -> Self {
        Self(raw.trim().parse::<f64>().ok())
    }
}

/// Configured phase lengths, always within their allowed ranges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerDurations {
    pub focus_minutes: u32,
    pub break_minutes: u32,
}

impl Default for TimerDurations {
    fn default() -> Self {
        Self {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

impl TimerDurations {
    pub fn from_inputs(focus: impl Into<DurationInput>, brk: impl Into<DurationInput>) -> Self {
        Self {
            focus_minutes: focus
                .into()
                .resolve(FOCUS_MINUTES_RANGE, DEFAULT_FOCUS_MINUTES),
            break_minutes: brk
                .into()
                .resolve(BREAK_MINUTES_RANGE, DEFAULT_BREAK_MINUTES),
        }
    }

    /// Re-applies the range limits, e.g. to values read from a settings file.
    pub fn clamped(self) -> Self {
        Self::from_inputs(self.focus_minutes, self.break_minutes)
    }

    pub fn seconds_for(&self, phase: TimerPhase) -> u32 {
        match phase {
            TimerPhase::Focus => self.focus_minutes.saturating_mul(60),
            TimerPhase::Break => self.break_minutes.saturating_mul(60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Counting,
    PhaseChanged(TimerPhase),
}

/// Volatile countdown state. Never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    phase: TimerPhase,
    remaining_seconds: u32,
    running: bool,
    durations: TimerDurations,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(TimerDurations::default())
    }
}

impl TimerState {
    /// Out-of-range durations are clamped like user input.
    pub fn new(durations: TimerDurations) -> Self {
        let durations = durations.clamped();
        Self {
            phase: TimerPhase::Focus,
            remaining_seconds: durations.seconds_for(TimerPhase::Focus),
            running: false,
            durations,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn durations(&self) -> TimerDurations {
        self.durations
    }

    pub(crate) fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Stores new durations and reloads the countdown for the current
    /// phase. Leaves `running` alone.
    pub fn configure(&mut self, focus: impl Into<DurationInput>, brk: impl Into<DurationInput>) {
        self.durations = TimerDurations::from_inputs(focus, brk);
        self.reset_remaining();
    }

    /// Reloads the countdown from the last configured durations.
    pub fn reset_remaining(&mut self) {
        self.remaining_seconds = self.durations.seconds_for(self.phase);
    }

    /// One second elapsed. Reaching zero switches phase and reloads the
    /// countdown for the new phase without stopping.
    pub fn tick(&mut self) -> TickOutcome {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return TickOutcome::Counting;
        }

        self.phase = self.phase.flipped();
        self.reset_remaining();
        TickOutcome::PhaseChanged(self.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_idle_focus() {
        let state = TimerState::default();
        assert_eq!(state.phase(), TimerPhase::Focus);
        assert_eq!(state.remaining_seconds(), 25 * 60);
        assert!(!state.is_running());
    }

    #[test]
    fn focus_minutes_clamp_to_bounds() {
        let mut state = TimerState::default();

        state.configure(3, 5);
        assert_eq!(state.durations().focus_minutes, 5);
        assert_eq!(state.remaining_seconds(), 5 * 60);

        state.configure(999, 5);
        assert_eq!(state.durations().focus_minutes, 90);
        assert_eq!(state.remaining_seconds(), 90 * 60);
    }

    #[test]
    fn new_clamps_zero_and_huge_durations() {
        let mut state = TimerState::new(TimerDurations {
            focus_minutes: 0,
            break_minutes: 0,
        });
        assert_eq!(state.durations().focus_minutes, 5);
        assert_eq!(state.remaining_seconds(), 5 * 60);

        state.remaining_seconds = 1;
        assert_eq!(state.tick(), TickOutcome::PhaseChanged(TimerPhase::Break));
        assert_eq!(state.remaining_seconds(), 60);

        let state = TimerState::new(TimerDurations {
            focus_minutes: u32::MAX,
            break_minutes: u32::MAX,
        });
        assert_eq!(state.remaining_seconds(), 90 * 60);
        assert_eq!(state.durations().break_minutes, 30);
    }

    #[test]
    fn break_minutes_clamp_to_bounds() {
        assert_eq!(TimerDurations::from_inputs(25, 0).break_minutes, 1);
        assert_eq!(TimerDurations::from_inputs(25, 45).break_minutes, 30);
        assert_eq!(TimerDurations::from_inputs(25, -4).break_minutes, 1);
    }

    #[test]
    fn non_numeric_input_uses_defaults() {
        let durations = TimerDurations::from_inputs("abc", "");
        assert_eq!(durations, TimerDurations::default());

        let durations = TimerDurations::from_inputs(DurationInput::invalid(), f64::NAN);
        assert_eq!(durations, TimerDurations::default());
    }

    #[test]
    fn numeric_strings_are_parsed_and_truncated() {
        let durations = TimerDurations::from_inputs(" 45 ", "7.9");
        assert_eq!(durations.focus_minutes, 45);
        assert_eq!(durations.break_minutes, 7);
    }

    #[test]
    fn configure_keeps_running_flag() {
        let mut state = TimerState::default();
        state.set_running(true);
        state.configure(30, 10);
        assert!(state.is_running());
        assert_eq!(state.remaining_seconds(), 30 * 60);
    }

    #[test]
    fn configure_during_break_loads_break_length() {
        let mut state = TimerState::default();
        state.phase = TimerPhase::Break;
        state.configure(30, 10);
        assert_eq!(state.remaining_seconds(), 10 * 60);
    }

    #[test]
    fn last_focus_second_flips_to_break() {
        let mut state = TimerState::default();
        state.configure(25, 7);
        state.set_running(true);
        state.remaining_seconds = 1;

        let outcome = state.tick();
        assert_eq!(outcome, TickOutcome::PhaseChanged(TimerPhase::Break));
        assert_eq!(state.phase(), TimerPhase::Break);
        assert_eq!(state.remaining_seconds(), 7 * 60);
        assert!(state.is_running());
    }

    #[test]
    fn last_break_second_flips_back_to_focus() {
        let mut state = TimerState::default();
        state.phase = TimerPhase::Break;
        state.remaining_seconds = 1;

        assert_eq!(state.tick(), TickOutcome::PhaseChanged(TimerPhase::Focus));
        assert_eq!(state.remaining_seconds(), 25 * 60);
    }

    #[test]
    fn tick_counts_down_within_phase() {
        let mut state = TimerState::default();
        assert_eq!(state.tick(), TickOutcome::Counting);
        assert_eq!(state.remaining_seconds(), 25 * 60 - 1);
        assert_eq!(state.phase(), TimerPhase::Focus);
    }

    #[test]
    fn remaining_stays_within_phase_length() {
        let mut state = TimerState::default();
        state.configure(5, 1);
        for _ in 0..2_000 {
            state.tick();
            let limit = state.durations().seconds_for(state.phase());
            assert!(state.remaining_seconds() <= limit);
            assert!(state.remaining_seconds() > 0);
        }
    }

    #[test]
    fn reset_restores_current_phase_length() {
        let mut state = TimerState::default();
        state.phase = TimerPhase::Break;
        state.remaining_seconds = 12;
        state.reset_remaining();
        assert_eq!(state.phase(), TimerPhase::Break);
        assert_eq!(state.remaining_seconds(), 5 * 60);
    }
}
