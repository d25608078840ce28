use crate::{Policy, Timebox, TimeboxState};

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Audience key used for sessions created over private message.
pub const PRIVATE_AUDIENCE: &str = "private";

/// The whole persistent state: global completion aggregates plus the
/// audience-key → person → ordered-sequence map. This is the unit of
/// persistence; it is loaded once at startup and rewritten after every
/// processing cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Completed timeboxes, ever, across all audiences
    pub count: i64,
    /// Minutes those completions add up to
    pub minutes: i64,
    /// audience key → person → timeboxes in creation order
    pub timebox: HashMap<String, HashMap<String, Vec<Timebox>>>,
}

/// A completion found by the sweep, to be announced to its audience.
#[derive(Debug, Clone)]
pub struct Completion {
    pub audience: String,
    pub audience_key: String,
    pub person: String,
    pub timebox: Timebox,
}

#[derive(Debug, Error)]
pub enum BeginError {
    #[error("duration below the configured minimum of {min} minutes")]
    TooShort { min: i64 },
    #[error("duration above the configured maximum of {max} minutes")]
    TooLong { max: i64 },
    #[error("duration not a multiple of {step} minutes")]
    NotMultiple { step: i64 },
    #[error("another timebox is already running")]
    InProgress(Timebox),
}

#[derive(Debug, Error)]
pub enum CancelError {
    #[error("no running timebox")]
    NothingRunning,
}

#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("no timeboxes recorded")]
    NoTimeboxes,
    #[error("last timebox is still running")]
    StillRunning(Timebox),
}

/// The timebox state machine. Owns a [`Snapshot`] and the [`Policy`] that
/// governs it; every operation is keyed by (audience key, person).
pub struct Engine {
    policy: Policy,
    state: Snapshot,
}

impl Engine {
    pub fn new(policy: Policy, state: Snapshot) -> Self {
        Self { policy, state }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// The current state, for persistence.
    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    /// Global aggregates: (completed count, total minutes).
    pub fn totals(&self) -> (i64, i64) {
        (self.state.count, self.state.minutes)
    }

    fn sequence(&self, audience_key: &str, person: &str) -> Option<&Vec<Timebox>> {
        self.state.timebox.get(audience_key)?.get(person)
    }

    /// Start a new timebox. The duration is validated against the policy,
    /// and a key whose last record is still running rejects the new one;
    /// in either case nothing changes.
    pub fn begin(
        &mut self,
        audience_key: &str,
        person: &str,
        audience: &str,
        duration: i64,
        summary: &str,
        now: i64,
    ) -> Result<Timebox, BeginError> {
        if duration < self.policy.min_duration_minutes {
            return Err(BeginError::TooShort {
                min: self.policy.min_duration_minutes,
            });
        }
        if duration > self.policy.max_duration_minutes {
            return Err(BeginError::TooLong {
                max: self.policy.max_duration_minutes,
            });
        }
        let step = self.policy.duration_multiple_minutes;
        if step > 0 && duration % step != 0 {
            return Err(BeginError::NotMultiple { step });
        }

        if let Some(last) = self.sequence(audience_key, person).and_then(|seq| seq.last()) {
            if last.state == TimeboxState::Running {
                return Err(BeginError::InProgress(last.clone()));
            }
        }

        let timebox = Timebox {
            audience: audience.to_string(),
            start: now,
            duration,
            summary: summary.to_string(),
            state: TimeboxState::Running,
        };

        self.state
            .timebox
            .entry(audience_key.to_string())
            .or_default()
            .entry(person.to_string())
            .or_default()
            .push(timebox.clone());

        Ok(timebox)
    }

    /// Remove and return the running timebox at the end of the key's
    /// sequence. Cancelled sessions are discarded, not recorded.
    pub fn cancel(&mut self, audience_key: &str, person: &str) -> Result<Timebox, CancelError> {
        let seq = self
            .state
            .timebox
            .get_mut(audience_key)
            .and_then(|persons| persons.get_mut(person))
            .ok_or(CancelError::NothingRunning)?;

        match seq.pop() {
            Some(timebox) if timebox.state == TimeboxState::Running => Ok(timebox),
            Some(timebox) => {
                seq.push(timebox);
                Err(CancelError::NothingRunning)
            }
            None => Err(CancelError::NothingRunning),
        }
    }

    /// Remove and return the completed timebox at the end of the key's
    /// sequence. A running record refuses deletion; it has to be cancelled
    /// first.
    pub fn delete(&mut self, audience_key: &str, person: &str) -> Result<Timebox, DeleteError> {
        let seq = self
            .state
            .timebox
            .get_mut(audience_key)
            .and_then(|persons| persons.get_mut(person))
            .ok_or(DeleteError::NoTimeboxes)?;

        match seq.pop() {
            Some(timebox) if timebox.state == TimeboxState::Running => {
                let copy = timebox.clone();
                seq.push(timebox);
                Err(DeleteError::StillRunning(copy))
            }
            Some(timebox) => Ok(timebox),
            None => Err(DeleteError::NoTimeboxes),
        }
    }

    /// Every completed timebox in the audience, across all persons, most
    /// recent first.
    pub fn completed_in(&self, audience_key: &str) -> Vec<(&str, &Timebox)> {
        let mut completed = Vec::new();
        if let Some(persons) = self.state.timebox.get(audience_key) {
            for (person, seq) in persons {
                completed.extend(
                    seq.iter()
                        .filter(|t| t.state == TimeboxState::Completed)
                        .map(|t| (person.as_str(), t)),
                );
            }
        }
        completed.sort_by_key(|(_, t)| Reverse(t.start));
        completed
    }

    /// One person's completed timeboxes in the audience, most recent
    /// first. `None` means the person has no recorded sequence at all,
    /// as opposed to a sequence with nothing completed.
    pub fn completed_for(&self, audience_key: &str, person: &str) -> Option<Vec<&Timebox>> {
        let seq = self.sequence(audience_key, person)?;
        let mut completed: Vec<&Timebox> = seq
            .iter()
            .filter(|t| t.state == TimeboxState::Completed)
            .collect();
        completed.sort_by_key(|t| Reverse(t.start));
        Some(completed)
    }

    /// Every currently-running timebox in the audience, most recent first.
    /// Only the last element of a sequence can be running.
    pub fn running_in(&self, audience_key: &str) -> Vec<(&str, &Timebox)> {
        let mut running = Vec::new();
        if let Some(persons) = self.state.timebox.get(audience_key) {
            for (person, seq) in persons {
                if let Some(last) = seq.last() {
                    if last.state == TimeboxState::Running {
                        running.push((person.as_str(), last));
                    }
                }
            }
        }
        running.sort_by_key(|(_, t)| Reverse(t.start));
        running
    }

    /// Transition every running timebox whose deadline has passed to
    /// completed, updating the global aggregates, and return the notices
    /// to announce. Idempotent: a second sweep at the same instant finds
    /// nothing left to complete.
    pub fn sweep_completions(&mut self, now: i64) -> Vec<Completion> {
        let unit = self.policy.completion_unit();
        let mut completions = Vec::new();

        for (audience_key, persons) in &mut self.state.timebox {
            for (person, seq) in persons.iter_mut() {
                let Some(last) = seq.last_mut() else {
                    continue;
                };
                if last.state == TimeboxState::Running && last.deadline(unit) <= now {
                    last.state = TimeboxState::Completed;
                    self.state.count += 1;
                    self.state.minutes += last.duration;
                    completions.push(Completion {
                        audience: last.audience.clone(),
                        audience_key: audience_key.clone(),
                        person: person.clone(),
                        timebox: last.clone(),
                    });
                }
            }
        }

        completions
    }

    /// Bound retained history: drop records older than the retention
    /// window, truncate each sequence to the configured count, and prune
    /// empty sequences and audiences.
    pub fn sweep_retention(&mut self, now: i64) {
        let keep = self.policy.keep_timeboxes;
        let window = self.policy.keep_duration_seconds;

        for persons in self.state.timebox.values_mut() {
            for seq in persons.values_mut() {
                seq.retain(|t| now <= t.start + window);
                if seq.len() > keep {
                    seq.drain(..seq.len() - keep);
                }
            }
            persons.retain(|_, seq| !seq.is_empty());
        }
        self.state.timebox.retain(|_, persons| !persons.is_empty());
    }
}
