//! CLI output: error mapping from domain errors to stable CLI surface.

/// Map an error and its context chain to one line for CLI output.
pub fn map_error(e: &anyhow::Error) -> String {
    format!("{:#}", e)
}
