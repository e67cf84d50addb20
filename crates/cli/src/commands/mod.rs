pub mod notify;
pub mod schedule;
pub mod status;
