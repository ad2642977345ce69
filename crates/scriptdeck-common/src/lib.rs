pub mod errors;
pub mod id;

pub use errors::JobError;
pub use id::{new_id, JobId};

pub type Result<T> = std::result::Result<T, JobError>;
