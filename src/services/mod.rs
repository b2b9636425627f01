pub mod failure_reporter;

pub use failure_reporter::FailureReporter;
