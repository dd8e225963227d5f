use clap::{ArgAction, Parser, Subcommand};
use library_core::{BookId, DEFAULT_BASE_URL};

#[derive(Parser, Debug)]
#[command(name = "library")]
#[command(about = "Manage the books of a library backend")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the Books API
    #[arg(long, global = true, env = "LIBRARY_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Seconds to wait for each request before giving up
    #[arg(
        long,
        global = true,
        env = "LIBRARY_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every book
    List,

    /// Show a single book
    Show { id: BookId },

    /// Add a new book
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Edit a book; omitted fields keep their current value
    Edit {
        id: BookId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a book after confirmation
    Delete {
        id: BookId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Interactive session
    Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn edit_overrides_are_optional() {
        let cli = Cli::try_parse_from(["library", "edit", "3", "--title", "Emma"]).unwrap();
        match cli.command {
            Commands::Edit {
                id,
                title,
                author,
                description,
            } => {
                assert_eq!(id, 3);
                assert_eq!(title.as_deref(), Some("Emma"));
                assert!(author.is_none());
                assert!(description.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["library", "delete", "4", "--yes", "--timeout-secs", "2", "-vv"]).unwrap();
        assert_eq!(cli.timeout_secs, 2);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Delete { id: 4, yes: true }));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Cli::try_parse_from(["library", "list", "--timeout-secs", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(Cli::try_parse_from(["library", "list", "--timeout-secs", "1"]).is_ok());
    }
}
