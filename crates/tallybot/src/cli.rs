use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tallybot")]
#[command(author, version, about = "Telegram assistant that keeps running totals for three expense categories", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot with long polling (default)
    Run {
        /// Path to the SQLite ledger, overrides DATABASE_PATH
        #[arg(long)]
        database: Option<String>,
    },

    /// Apply pending schema migrations and exit
    Migrate {
        /// Path to the SQLite ledger, overrides DATABASE_PATH
        #[arg(long)]
        database: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["tallybot"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_migrate_with_database() {
        let cli = Cli::try_parse_from(["tallybot", "migrate", "--database", "/tmp/user.db"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Migrate {
                database: Some("/tmp/user.db".to_string())
            })
        );
    }
}
