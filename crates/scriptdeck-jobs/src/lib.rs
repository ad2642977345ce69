pub mod events;
mod executor;
pub mod format;
pub mod job;
pub mod status;

pub use events::{JobEvent, JobEvents};
pub use job::{CommandSpec, Job};
pub use status::JobStatus;

pub use scriptdeck_common::{JobError, JobId};
