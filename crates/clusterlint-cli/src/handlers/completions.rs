//! Shell completions command handler

use crate::cli::{CompletionsArgs, Shell};
use crate::error::Result;
use clap::CommandFactory;
use std::io::Write;

/// Handle the completions command
pub fn handle_completions(args: CompletionsArgs) -> Result<()> {
    write_completions(args.shell, &mut std::io::stdout())
}

/// Write the completion script for `shell` under the binary's own name
pub fn write_completions(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = crate::cli::Cli::command();
    clap_complete::generate(shell.to_clap_shell(), &mut cmd, env!("CARGO_BIN_NAME"), out);
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completions_cover_subcommands() {
        let mut buffer = Vec::new();
        write_completions(Shell::Bash, &mut buffer).unwrap();

        let script = String::from_utf8(buffer).unwrap();
        assert!(script.contains("clusterlint"));
        assert!(script.contains("machine-type"));
        assert!(script.contains("validate"));
    }

    #[test]
    fn test_every_shell_generates() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            let mut buffer = Vec::new();
            write_completions(shell, &mut buffer).unwrap();
            assert!(!buffer.is_empty());
        }
    }
}
