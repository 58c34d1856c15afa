//! Simple/Rich command classification.

use assistant_models::Verb;

/// Execution mode of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Local, synchronous, no network.
    Simple,
    /// Requires the provider gateway; runs asynchronously under a
    /// bounded wait.
    Rich,
}

/// Classifies a command by its verb alone.
///
/// Pure and total: every verb maps to exactly one mode. `unknown`
/// classifies as Simple — it is rejected locally without ever
/// reaching the gateway.
pub fn classify(verb: Verb) -> ExecutionMode {
    match verb {
        Verb::Chat | Verb::Generate => ExecutionMode::Rich,
        Verb::Help
        | Verb::ProjectList
        | Verb::ProjectCreate
        | Verb::ProjectSwitch
        | Verb::ProjectInfo
        | Verb::Analyze
        | Verb::AnalyzeProject
        | Verb::Unknown => ExecutionMode::Simple,
    }
}
