//! Workflow entry points shared by the binary and tests

pub mod orchestration;
