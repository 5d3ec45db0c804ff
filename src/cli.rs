//! CLI domain: parse, route, output, and presentation only.
//! No resolution logic here; the route table calls into the library.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat, RoleArg};
pub use route::RunContext;
