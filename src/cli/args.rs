use crate::core::MergePolicy;
use crate::types::{AccountId, AccountType};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Manage student and instructor accounts of the attendance system
#[derive(Parser, Debug)]
#[command(name = "attendance-admin")]
#[command(
    about = "Manage student and instructor accounts of the attendance system",
    long_about = None
)]
pub struct CliArgs {
    /// Optional TOML configuration file
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, overrides config and environment
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Policy when only one of the two account collections loads
    #[arg(long = "merge-policy", value_name = "POLICY", global = true)]
    pub merge_policy: Option<MergePolicyArg>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all accounts, optionally filtered
    List {
        /// Case-insensitive text matched against ID number, name and type
        #[arg(long = "search", short = 's', value_name = "TEXT")]
        search: Option<String>,

        #[arg(long = "format", value_name = "FORMAT", default_value = "table")]
        format: OutputFormat,
    },

    /// Update an account's ID number and name
    Edit {
        #[command(flatten)]
        target: TargetArgs,

        #[arg(long = "id-number", value_name = "ID_NUMBER")]
        id_number: String,

        #[arg(long = "name", value_name = "NAME")]
        name: String,
    },

    /// Delete an account
    Delete {
        #[command(flatten)]
        target: TargetArgs,

        /// Skip the confirmation prompt
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

/// Which account a command acts on
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    #[arg(long = "kind", value_name = "KIND")]
    pub kind: KindArg,

    /// Server-assigned account id
    #[arg(long = "id", value_name = "ID")]
    pub id: String,
}

impl TargetArgs {
    pub fn account_id(&self) -> AccountId {
        AccountId::new(self.id.clone())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Student,
    Instructor,
}

impl From<KindArg> for AccountType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Student => AccountType::Student,
            KindArg::Instructor => AccountType::Instructor,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MergePolicyArg {
    AbortAll,
    BestEffort,
}

impl From<MergePolicyArg> for MergePolicy {
    fn from(policy: MergePolicyArg) -> Self {
        match policy {
            MergePolicyArg::AbortAll => MergePolicy::AbortAll,
            MergePolicyArg::BestEffort => MergePolicy::BestEffort,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
}

impl CliArgs {
    /// Default `tracing` filter directive for the `-v` count
    ///
    /// `RUST_LOG` still takes precedence when set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::defaults(&["program", "list"], None, OutputFormat::Table)]
    #[case::search(&["program", "list", "--search", "S1"], Some("S1"), OutputFormat::Table)]
    #[case::short_search_csv(
        &["program", "list", "-s", "ana", "--format", "csv"],
        Some("ana"),
        OutputFormat::Csv
    )]
    fn test_list_parsing(
        #[case] args: &[&str],
        #[case] expected_search: Option<&str>,
        #[case] expected_format: OutputFormat,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        match parsed.command {
            Command::List { search, format } => {
                assert_eq!(search.as_deref(), expected_search);
                assert_eq!(format, expected_format);
            }
            other => panic!("Expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_parsing() {
        let parsed = CliArgs::try_parse_from([
            "program", "edit", "--kind", "student", "--id", "65a1", "--id-number", "S1", "--name",
            "Jane Doe",
        ])
        .unwrap();

        match parsed.command {
            Command::Edit {
                target,
                id_number,
                name,
            } => {
                assert_eq!(AccountType::from(target.kind), AccountType::Student);
                assert_eq!(target.account_id(), AccountId::new("65a1"));
                assert_eq!(id_number, "S1");
                assert_eq!(name, "Jane Doe");
            }
            other => panic!("Expected edit, got {:?}", other),
        }
    }

    #[rstest]
    #[case::prompt(&["program", "delete", "--kind", "instructor", "--id", "I1"], false)]
    #[case::yes(&["program", "delete", "--kind", "instructor", "--id", "I1", "--yes"], true)]
    fn test_delete_parsing(#[case] args: &[&str], #[case] expected_yes: bool) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        match parsed.command {
            Command::Delete { target, yes } => {
                assert_eq!(target.kind, KindArg::Instructor);
                assert_eq!(yes, expected_yes);
            }
            other => panic!("Expected delete, got {:?}", other),
        }
    }

    #[rstest]
    #[case::none(&["program", "list"], None)]
    #[case::abort_all(
        &["program", "--merge-policy", "abort-all", "list"],
        Some(MergePolicy::AbortAll)
    )]
    #[case::best_effort_after_subcommand(
        &["program", "list", "--merge-policy", "best-effort"],
        Some(MergePolicy::BestEffort)
    )]
    fn test_merge_policy_flag(#[case] args: &[&str], #[case] expected: Option<MergePolicy>) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.merge_policy.map(MergePolicy::from), expected);
    }

    #[rstest]
    #[case::quiet(&["program", "list"], "warn")]
    #[case::info(&["program", "-v", "list"], "info")]
    #[case::debug(&["program", "-vv", "list"], "debug")]
    fn test_log_filter(#[case] args: &[&str], #[case] expected: &str) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.log_filter(), expected);
    }

    #[rstest]
    #[case::missing_command(&["program"])]
    #[case::invalid_kind(&["program", "delete", "--kind", "admin", "--id", "1"])]
    #[case::edit_missing_name(
        &["program", "edit", "--kind", "student", "--id", "1", "--id-number", "S1"]
    )]
    #[case::invalid_format(&["program", "list", "--format", "xml"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
