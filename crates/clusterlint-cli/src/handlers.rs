//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod machine_type;
mod validate;

pub use completions::handle_completions;
pub use machine_type::handle_machine_type;
pub use validate::handle_validate;
