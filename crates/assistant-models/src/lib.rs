//! Core data models for the AI assistant.
//!
//! This crate provides the fundamental data types shared by every
//! front-end and service crate: the command model, command results,
//! project metadata, and analysis reports.

pub mod command;
pub mod project;
pub mod report;

// Re-export main types
pub use command::{Command, CommandResult, CommandStatus, Verb};
pub use project::{ProjectConfig, ProjectMeta};
pub use report::{
    AnalysisReport, FileReport, HealthFlags, Issue, IssueKind, Language, Maturity, MaturityLevel,
};
