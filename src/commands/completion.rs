//! Completion command - Generate shell completion setup instructions

use anyhow::Result;
use clap_complete::Shell;

/// Setup snippet for dynamic completion in the given shell
pub fn completion_instructions(shell: &str) -> Result<&'static str> {
    // Validate shell type
    let _ = shell.parse::<Shell>().map_err(|_| {
        anyhow::anyhow!("Invalid shell: {shell}. Supported shells: bash, zsh, fish")
    })?;

    let instructions = match shell {
        "bash" => {
            r"# dex shell completion setup for Bash
# Add this to your ~/.bashrc:
source <(COMPLETE=bash dex)
"
        }
        "zsh" => {
            r"# dex shell completion setup for Zsh
# Add this to your ~/.zshrc:
source <(COMPLETE=zsh dex)
"
        }
        "fish" => {
            r"# dex shell completion setup for Fish
# Add this to your ~/.config/fish/config.fish:
source (COMPLETE=fish dex | psub)
"
        }
        _ => {
            anyhow::bail!("Unsupported shell: {shell}");
        }
    };

    Ok(instructions)
}

/// Print shell completion setup instructions
pub fn cmd_completion(shell: &str) -> Result<()> {
    print!("{}", completion_instructions(shell)?);
    Ok(())
}
