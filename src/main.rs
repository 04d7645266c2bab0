//! Attendance admin CLI
//!
//! Command-line front end for the admin accounts screen: list, edit and
//! delete student and instructor accounts on the attendance API.
//!
//! # Usage
//!
//! ```bash
//! ATTENDANCE_API_TOKEN=... attendance-admin list
//! attendance-admin list --search S1 --format csv > accounts.csv
//! attendance-admin edit --kind student --id 65a1 --id-number S1 --name "Jane Doe"
//! attendance-admin delete --kind instructor --id 65b2
//! attendance-admin --merge-policy best-effort -v list
//! ```
//!
//! Notices and logs go to stderr; table/CSV output goes to stdout.
//!
//! # Exit Codes
//!
//! - 0: Success (including a declined delete confirmation)
//! - 1: Error (bad configuration, failed request, validation failure)

use attendance_admin::api::{AccountsApi, HttpApiClient};
use attendance_admin::cli::{self, CliArgs, Command, OutputFormat, TargetArgs};
use attendance_admin::config::ClientConfig;
use attendance_admin::core::{AccountsScreen, Profile, Role, Session};
use attendance_admin::io::{render_table, write_accounts_csv};
use attendance_admin::types::{Account, AccountType, ClientError};
use std::io::{BufRead, Write};
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse_args();
    init_tracing(args.log_filter());

    // Single-threaded, cooperative: one screen, one event loop
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: Failed to create tokio runtime: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(args)) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: CliArgs) -> Result<(), ClientError> {
    let mut config = ClientConfig::load(args.config.as_deref())?;
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
    if let Some(policy) = args.merge_policy {
        config.merge_policy = policy.into();
    }
    let config = config.validated();

    let api: Arc<dyn AccountsApi> = Arc::new(HttpApiClient::from_config(&config)?);

    let mut session = Session::new();
    let admin_id = config
        .credentials
        .admin_id
        .clone()
        .unwrap_or_else(|| "admin".to_string());
    session.login(Role::Admin, Profile::new(admin_id, "Administrator"));

    let mut screen = AccountsScreen::new(api, &session, config.merge_policy)?;
    let outcome = run_command(&mut screen, args.command).await;

    for notice in screen.take_notices() {
        eprintln!("{}", notice);
    }
    screen.teardown();

    outcome
}

async fn run_command(screen: &mut AccountsScreen, command: Command) -> Result<(), ClientError> {
    match command {
        Command::List { search, format } => {
            // a partial best-effort load still prints what arrived
            let refreshed = screen.refresh().await;
            if refreshed.is_err() && !screen.has_loaded() {
                return refreshed;
            }
            if let Some(search) = search {
                screen.set_search(search);
            }

            let rows = screen.visible_accounts();
            let mut stdout = std::io::stdout().lock();
            match format {
                OutputFormat::Table => render_table(&rows, screen.empty_message(), &mut stdout)?,
                OutputFormat::Csv => write_accounts_csv(&rows, &mut stdout)?,
            }
            stdout.flush()?;
            refreshed
        }

        Command::Edit {
            target,
            id_number,
            name,
        } => {
            let account = load_target(screen, &target).await?;
            screen.begin_edit(&account);
            if let Some(draft) = screen.edit_draft_mut() {
                draft.id_number = id_number;
                draft.name = name;
            }
            screen.save_edit().await
        }

        Command::Delete { target, yes } => {
            let account = load_target(screen, &target).await?;
            screen.request_delete(&account);

            if !yes {
                let prompt = screen.delete_prompt().unwrap_or_default();
                if !confirm(&prompt)? {
                    screen.cancel_delete();
                    eprintln!("Cancelled");
                    return Ok(());
                }
            }
            screen.confirm_delete().await
        }
    }
}

/// Fetch the list and pick the row the command targets
async fn load_target(
    screen: &mut AccountsScreen,
    target: &TargetArgs,
) -> Result<Account, ClientError> {
    screen.refresh().await?;

    let kind = AccountType::from(target.kind);
    let id = target.account_id();
    screen
        .find(kind, &id)
        .cloned()
        .ok_or_else(|| {
            ClientError::validation(format!("No {} with id {}", kind.label().to_lowercase(), id))
        })
}

/// Ask a yes/no question on stderr, reading the answer from stdin
fn confirm(prompt: &str) -> Result<bool, ClientError> {
    eprint!("{} [y/N] ", prompt);
    std::io::stderr().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
