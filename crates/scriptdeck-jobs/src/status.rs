//! Job status state machine.
//!
//! ```text
//! NotStarted --start--> Running --success--> Finished
//! Running --error while orchestrating--> Failed
//! Running --cancellation observed--> Cancelled
//! ```
//!
//! All transitions out of Running are terminal. The process's own exit code
//! never selects Failed; only an orchestration error does.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum JobStatus {
    #[default]
    NotStarted,
    Running,
    Cancelled,
    Failed,
    Finished,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Cancelled | JobStatus::Failed | JobStatus::Finished
        )
    }

    pub fn can_transition_to(self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::NotStarted, JobStatus::Running)
                | (
                    JobStatus::Running,
                    JobStatus::Cancelled | JobStatus::Failed | JobStatus::Finished
                )
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::NotStarted => "not started",
            JobStatus::Running => "running",
            JobStatus::Cancelled => "cancelled",
            JobStatus::Failed => "failed",
            JobStatus::Finished => "finished",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_started() {
        assert_eq!(JobStatus::default(), JobStatus::NotStarted);
    }

    #[test]
    fn running_reaches_all_terminal_states() {
        for next in [JobStatus::Cancelled, JobStatus::Failed, JobStatus::Finished] {
            assert!(JobStatus::Running.can_transition_to(next));
            assert!(next.is_terminal());
        }
    }

    #[test]
    fn not_started_only_starts() {
        assert!(JobStatus::NotStarted.can_transition_to(JobStatus::Running));
        assert!(!JobStatus::NotStarted.can_transition_to(JobStatus::Finished));
        assert!(!JobStatus::NotStarted.can_transition_to(JobStatus::Cancelled));
    }

    #[test]
    fn terminal_states_are_final() {
        for from in [JobStatus::Cancelled, JobStatus::Failed, JobStatus::Finished] {
            for to in [
                JobStatus::NotStarted,
                JobStatus::Running,
                JobStatus::Cancelled,
                JobStatus::Failed,
                JobStatus::Finished,
            ] {
                assert!(!from.can_transition_to(to));
            }
        }
    }

    #[test]
    fn status_serializes_by_name() {
        let json = serde_json::to_string(&JobStatus::Running).unwrap();
        assert_eq!(json, "\"Running\"");
    }
}
