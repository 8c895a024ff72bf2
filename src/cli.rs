use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "svxdesk")]
#[command(version)]
#[command(about = "Operator console for SvxLink nodes: config patching and DTMF control", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read or patch the daemon configuration file
    #[command(subcommand)]
    Conf(ConfCommand),

    /// Send control codes to the daemon
    #[command(subcommand)]
    Dtmf(DtmfCommand),

    /// Manage saved control-code shortcuts
    #[command(subcommand)]
    Shortcut(ShortcutCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Conf Commands
// ============================================================================

#[derive(Subcommand)]
pub enum ConfCommand {
    /// Show the active value of a key
    Get {
        /// Key name (case-insensitive)
        key: String,

        /// Section to search (defaults to the control device section)
        #[arg(short, long)]
        section: Option<String>,
    },

    /// Update keys in place
    Set(ConfSetArgs),
}

#[derive(Parser)]
pub struct ConfSetArgs {
    /// Assignments to apply, e.g. CALLSIGN=CA2XYZ
    #[arg(value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,

    /// Enable a governed key (uncomment or insert it)
    #[arg(long, value_name = "KEY", conflicts_with = "disable")]
    pub enable: Vec<String>,

    /// Disable a governed key (comment it out)
    #[arg(long, value_name = "KEY")]
    pub disable: Vec<String>,

    /// Show the diff without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Do not restart the daemon after writing
    #[arg(long)]
    pub no_restart: bool,
}

// ============================================================================
// DTMF Commands
// ============================================================================

#[derive(Subcommand)]
pub enum DtmfCommand {
    /// Send a control code through the execution template
    Send {
        /// Control code, e.g. "*#" or "2#570916#"
        code: String,
    },

    /// Show control device and template status
    Status,

    /// List common control codes
    Codes,

    /// Show or change the execution template
    #[command(subcommand)]
    Template(TemplateCommand),
}

#[derive(Subcommand)]
pub enum TemplateCommand {
    /// Show the current template
    Show,

    /// Replace the template
    Set {
        /// Template with {DTMF_CODE} and {PTY_DEVICE} placeholders
        template: String,
    },

    /// Restore the default template
    Reset,
}

// ============================================================================
// Shortcut Commands
// ============================================================================

#[derive(Subcommand)]
pub enum ShortcutCommand {
    /// List saved shortcuts
    #[command(alias = "ls")]
    List,

    /// Save a new shortcut
    Add {
        /// Display name
        name: String,

        /// Control code
        code: String,
    },

    /// Remove a shortcut by id
    Rm {
        /// Shortcut id
        id: String,
    },

    /// Send a shortcut's code
    Run {
        /// Shortcut id or name
        id_or_name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_conf_set() {
        let cli = Cli::parse_from([
            "svxdesk",
            "-vv",
            "conf",
            "set",
            "CALLSIGN=CA2XYZ",
            "--enable",
            "DTMF_CTRL_PTY",
            "--dry-run",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Conf(ConfCommand::Set(args)) => {
                assert_eq!(args.assignments, vec!["CALLSIGN=CA2XYZ"]);
                assert_eq!(args.enable, vec!["DTMF_CTRL_PTY"]);
                assert!(args.dry_run);
                assert!(!args.yes);
            }
            _ => panic!("expected conf set"),
        }
    }

    #[test]
    fn test_enable_and_disable_conflict() {
        let result = Cli::try_parse_from([
            "svxdesk",
            "conf",
            "set",
            "--enable",
            "DTMF_CTRL_PTY",
            "--disable",
            "DTMF_CTRL_PTY",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_dtmf_send_with_hash() {
        let cli = Cli::parse_from(["svxdesk", "dtmf", "send", "2#570916#"]);
        match cli.command {
            Command::Dtmf(DtmfCommand::Send { code }) => assert_eq!(code, "2#570916#"),
            _ => panic!("expected dtmf send"),
        }
    }
}
