pub mod model;
pub mod repo;
pub mod resolver;

pub use model::{evaluate_status, NewPosting, Posting, PostingStatus};
pub use repo::PostingsRepo;
pub use resolver::{ApiResolver, StatusResolver, TimestampResolver};
