use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a timebox. The only transition is
/// Running → Completed, performed by the completion sweep; it is never
/// reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeboxState {
    Running,
    Completed,
}

/// One recorded work session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timebox {
    /// Channel (or sender nick, for private sessions) the session was
    /// created in; completion notices are routed here
    pub audience: String,
    /// Start time, seconds since the epoch
    pub start: i64,
    /// Requested length in minutes
    pub duration: i64,
    /// Free-text description of the work
    pub summary: String,
    pub state: TimeboxState,
}

impl Timebox {
    /// Absolute completion deadline given the configured time unit
    /// (60 s/minute normally, 1 s/minute in accelerated mode).
    pub fn deadline(&self, unit: i64) -> i64 {
        self.start + self.duration * unit
    }
}

/// Render a timebox the way every reply and notice shows one:
/// `<person> [<Day HH:MM UTC>] (<duration> min) <summary>`.
pub fn format_timebox(person: &str, timebox: &Timebox) -> String {
    format!(
        "{} [{}] ({} min) {}",
        person,
        format_start(timebox.start),
        timebox.duration,
        timebox.summary
    )
}

fn format_start(start: i64) -> String {
    match Utc.timestamp_opt(start, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%a %H:%M UTC").to_string(),
        _ => start.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(start: i64) -> Timebox {
        Timebox {
            audience: "#chan".to_string(),
            start,
            duration: 45,
            summary: "Review article".to_string(),
            state: TimeboxState::Running,
        }
    }

    #[test]
    fn formats_epoch_start() {
        // The epoch fell on a Thursday
        assert_eq!(
            format_timebox("alice", &sample(0)),
            "alice [Thu 00:00 UTC] (45 min) Review article"
        );
    }

    #[test]
    fn state_tags_serialize_lowercase() {
        let json = serde_json::to_string(&sample(0)).unwrap();
        assert!(json.contains("\"state\":\"running\""));
    }

    #[test]
    fn deadline_scales_with_unit() {
        let timebox = sample(1000);
        assert_eq!(timebox.deadline(60), 1000 + 45 * 60);
        assert_eq!(timebox.deadline(1), 1045);
    }
}
