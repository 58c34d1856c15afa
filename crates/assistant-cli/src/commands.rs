//! Command execution for the CLI front-end.
//!
//! The classifier decides the execution path: Simple commands run
//! synchronously against the local store without starting an async
//! runtime; Rich commands build a current-thread runtime and go
//! through the provider gateway.

use std::path::Path;

use tracing::debug;

use assistant_core::{classify, Dispatcher, ExecutionMode};
use assistant_gateway::create_gateway;
use assistant_models::{Command, CommandResult};
use assistant_persistence::ProjectStore;

/// Executes one lowered command and returns its uniform result.
pub fn execute(command: &Command, state_dir: &Path, provider: &str) -> CommandResult {
    let dispatcher = Dispatcher::from_env();

    match classify(command.verb) {
        ExecutionMode::Simple => {
            debug!(verb = %command.verb, "Running simple command");
            let mut store = match ProjectStore::open(state_dir) {
                Ok(store) => store,
                Err(e) => return CommandResult::system_error(e.to_string()),
            };
            dispatcher.dispatch_simple(command, &mut store)
        }
        ExecutionMode::Rich => {
            debug!(verb = %command.verb, provider = provider, "Running rich command");
            let gateway = match create_gateway(provider) {
                Ok(gateway) => gateway,
                Err(e) => return CommandResult::system_error(e.to_string()),
            };
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    return CommandResult::system_error(format!(
                        "failed to start async runtime: {e}"
                    ))
                }
            };
            runtime.block_on(dispatcher.dispatch_rich(command, gateway.as_ref()))
        }
    }
}
