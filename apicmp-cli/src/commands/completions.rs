//! Shell completions command - Generate shell completion scripts

use std::io;

use clap::Command;
use clap_complete::{generate, shells};
use colored::Colorize;
use serde::Serialize;

use crate::output::{Output, OutputConfig, Outputter};

const BIN_NAME: &str = "apicmp";

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

impl std::fmt::Display for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shell::Bash => write!(f, "bash"),
            Shell::Zsh => write!(f, "zsh"),
            Shell::Fish => write!(f, "fish"),
            Shell::PowerShell => write!(f, "powershell"),
            Shell::Elvish => write!(f, "elvish"),
        }
    }
}

/// Instructions for installing completions
#[derive(Debug, Serialize)]
pub struct CompletionInstructions {
    pub shell: String,
    pub instructions: Vec<String>,
}

impl Outputter for CompletionInstructions {
    fn to_table(&self, _config: &OutputConfig) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{} completions for {}\n\n",
            BIN_NAME.cyan().bold(),
            self.shell.yellow()
        ));
        output.push_str(&format!("{}\n", "Installation:".cyan().bold()));
        for instruction in &self.instructions {
            output.push_str(&format!("  {}\n", instruction));
        }
        output
    }
}

fn get_instructions(shell: Shell) -> Vec<String> {
    let lines: &[&str] = match shell {
        Shell::Bash => &[
            "# Add to ~/.bashrc:",
            "eval \"$(apicmp completions bash)\"",
            "",
            "# Or save to a file:",
            "apicmp completions bash > ~/.local/share/bash-completion/completions/apicmp",
        ],
        Shell::Zsh => &[
            "# Save to a file in fpath:",
            "apicmp completions zsh > ~/.zfunc/_apicmp",
            "# Then add to ~/.zshrc before compinit:",
            "fpath=(~/.zfunc $fpath)",
        ],
        Shell::Fish => &[
            "# Save to fish completions directory:",
            "apicmp completions fish > ~/.config/fish/completions/apicmp.fish",
        ],
        Shell::PowerShell => &[
            "# Add to $PROFILE:",
            "Invoke-Expression (& apicmp completions powershell | Out-String)",
        ],
        Shell::Elvish => &[
            "# Add to ~/.elvish/rc.elv:",
            "eval (apicmp completions elvish | slurp)",
        ],
    };
    lines.iter().map(|line| line.to_string()).collect()
}

/// Generate completions for `cmd` and write them to stdout
pub fn generate_completions(shell: Shell, cmd: &mut Command) {
    let out = &mut io::stdout();
    match shell {
        Shell::Bash => generate(shells::Bash, cmd, BIN_NAME, out),
        Shell::Zsh => generate(shells::Zsh, cmd, BIN_NAME, out),
        Shell::Fish => generate(shells::Fish, cmd, BIN_NAME, out),
        Shell::PowerShell => generate(shells::PowerShell, cmd, BIN_NAME, out),
        Shell::Elvish => generate(shells::Elvish, cmd, BIN_NAME, out),
    }
}

/// Print installation instructions for `shell`
pub fn show_instructions(shell: Shell, config: OutputConfig) -> anyhow::Result<()> {
    let instructions = CompletionInstructions {
        shell: shell.to_string(),
        instructions: get_instructions(shell),
    };
    Output::with_config(instructions, config).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    #[test]
    fn test_shell_display() {
        assert_eq!(Shell::Bash.to_string(), "bash");
        assert_eq!(Shell::PowerShell.to_string(), "powershell");
    }

    #[test]
    fn test_get_instructions() {
        let bash = get_instructions(Shell::Bash);
        assert!(bash.iter().any(|i| i.contains("bashrc")));

        let fish = get_instructions(Shell::Fish);
        assert!(fish.iter().any(|i| i.ends_with("apicmp.fish")));
    }

    #[test]
    fn test_instructions_table() {
        let instructions = CompletionInstructions {
            shell: "zsh".to_string(),
            instructions: get_instructions(Shell::Zsh),
        };
        colored::control::set_override(false);
        let table = instructions.to_table(&OutputConfig::new(OutputFormat::Table));
        assert!(table.starts_with("apicmp completions for zsh"));
    }
}
