//! Workflow integration tests against a mock analysis service.

mod error_recovery;
mod polling_workflow;
