use serde::Deserialize;

/// Numeric policy knobs for timebox handling, read from the bot's
/// configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct Policy {
    /// Most recent records retained per (audience key, person) sequence
    pub keep_timeboxes: usize,
    /// Records older than this many seconds are dropped by the sweep
    pub keep_duration_seconds: i64,
    /// Print ceiling for list/mine replies in a channel
    pub max_print_channel: usize,
    /// Print ceiling for list/mine replies in private
    pub max_print_private: usize,
    pub default_duration_minutes: i64,
    /// Requested durations must be a multiple of this
    pub duration_multiple_minutes: i64,
    pub min_duration_minutes: i64,
    pub max_duration_minutes: i64,
    /// Accelerated-time developer mode: timebox minutes tick in seconds
    #[serde(default)]
    pub dev_mode: bool,
}

impl Policy {
    /// Seconds per timebox minute.
    pub fn completion_unit(&self) -> i64 {
        if self.dev_mode {
            1
        } else {
            60
        }
    }

    pub fn max_print(&self, private: bool) -> usize {
        if private {
            self.max_print_private
        } else {
            self.max_print_channel
        }
    }
}
