pub mod criteria;
pub mod submission;
