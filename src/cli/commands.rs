use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gli", about = "Todo list for the terminal", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Add a task (markers: @YYYY/M/D due date, #tag, !priority)
    #[command(visible_alias = "a")]
    Add,
    /// Delete a task picked with the select command
    #[command(visible_alias = "d")]
    Delete,
    /// Show the task list
    #[command(visible_alias = "l")]
    List,
}

/// A clap error message without clap's own `error: ` lead-in or trailing
/// blank lines, so it can carry the program-name prefix instead.
pub fn usage_message(err: &clap::Error) -> String {
    let text = err.to_string();
    text.strip_prefix("error: ")
        .unwrap_or(&text)
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subcommands_and_aliases() {
        for (args, expected) in [
            (["gli", "add"], Commands::Add),
            (["gli", "a"], Commands::Add),
            (["gli", "delete"], Commands::Delete),
            (["gli", "d"], Commands::Delete),
            (["gli", "list"], Commands::List),
            (["gli", "l"], Commands::List),
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert_eq!(cli.command, expected);
        }
    }

    #[test]
    fn test_rejects_unknown_subcommand_and_flags() {
        assert!(Cli::try_parse_from(["gli", "edit"]).is_err());
        assert!(Cli::try_parse_from(["gli", "list", "--json"]).is_err());
        assert!(Cli::try_parse_from(["gli"]).is_err());
    }

    #[test]
    fn test_usage_message_drops_clap_prefix() {
        let err = match Cli::try_parse_from(["gli", "edit"]) {
            Ok(_) => panic!("unknown subcommand parsed"),
            Err(e) => e,
        };
        let msg = usage_message(&err);
        assert!(!msg.starts_with("error:"), "message: {}", msg);
        assert!(msg.contains("'edit'"), "message: {}", msg);
        assert!(!msg.ends_with('\n'));
    }
}
