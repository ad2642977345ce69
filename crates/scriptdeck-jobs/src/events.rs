//! Per-job change notifications.
//!
//! A renderer subscribes once and receives every status transition and every
//! output append in order, without polling. How (or whether) the events are
//! marshaled onto a UI thread is the subscriber's concern.

use tokio::sync::broadcast;

use crate::status::JobStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    /// The job entered a new status.
    Status(JobStatus),
    /// The transcript grew; `elements` is the new element count, so a
    /// renderer can pull just the suffix it has not drawn yet.
    Output { elements: usize },
    /// Terminal status reached, elapsed time recorded, summary appended.
    Completed,
}

pub struct JobEvents {
    sender: broadcast::Sender<JobEvent>,
}

impl JobEvents {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: JobEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for JobEvents {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let events = JobEvents::default();
        let mut rx = events.subscribe();

        events.publish(JobEvent::Status(JobStatus::Running));

        let event = rx.recv().await.unwrap();
        assert_eq!(event, JobEvent::Status(JobStatus::Running));
    }

    #[tokio::test]
    async fn subscribers_see_transitions_in_order() {
        let events = JobEvents::default();
        let mut rx = events.subscribe();

        events.publish(JobEvent::Status(JobStatus::Running));
        events.publish(JobEvent::Output { elements: 1 });
        events.publish(JobEvent::Status(JobStatus::Finished));
        events.publish(JobEvent::Completed);

        assert_eq!(rx.recv().await.unwrap(), JobEvent::Status(JobStatus::Running));
        assert_eq!(rx.recv().await.unwrap(), JobEvent::Output { elements: 1 });
        assert_eq!(
            rx.recv().await.unwrap(),
            JobEvent::Status(JobStatus::Finished)
        );
        assert_eq!(rx.recv().await.unwrap(), JobEvent::Completed);
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let events = JobEvents::default();
        let mut rx1 = events.subscribe();
        let mut rx2 = events.subscribe();

        events.publish(JobEvent::Completed);

        assert_eq!(rx1.recv().await.unwrap(), JobEvent::Completed);
        assert_eq!(rx2.recv().await.unwrap(), JobEvent::Completed);
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let events = JobEvents::default();
        assert_eq!(events.publish(JobEvent::Completed), 0);
    }
}
