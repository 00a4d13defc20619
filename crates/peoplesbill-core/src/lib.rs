pub mod clause;
pub mod cluster;
pub mod region;
pub mod schema;
pub mod stats;
pub mod submission;
pub mod text;

pub use clause::{Clause, ClauseValidation};
pub use cluster::Cluster;
pub use region::{ParseRegionError, Region};
pub use schema::bill;
pub use submission::Submission;
pub use text::normalize_text;
