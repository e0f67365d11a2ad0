//! equippro - EquipPro dashboard tables in the terminal.
//!
//! Usage:
//!   equippro tickets                        # tickets on my equipment
//!   equippro tickets -f status=waiting      # only waiting tickets
//!   equippro clients -s lastName -s cin:desc --page 2
//!   equippro equipment --page-size 25
//!   equippro ticket 12 --close              # close a ticket
//!   equippro ticket 12 --delete --yes       # delete without prompting

mod error;
mod paths;
mod render;

use std::fs;
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clap::Subcommand;
use equippro_lib::EquipProClient;
use equippro_lib::auth::Session;
use equippro_lib::screen::Clients;
use equippro_lib::screen::Confirmation;
use equippro_lib::screen::Equipments;
use equippro_lib::screen::ListScreen;
use equippro_lib::screen::Loader;
use equippro_lib::screen::Notification;
use equippro_lib::screen::Outcome;
use equippro_lib::screen::OwnerTickets;
use equippro_lib::screen::TicketDetails;
use equippro_lib::table::BrowserConfig;
use equippro_lib::table::Command;
use equippro_lib::table::DEFAULT_PAGE_SIZE;
use equippro_lib::table::Direction;
use equippro_lib::table::SortState;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::error::CliError;

/// Browse EquipPro tickets, clients and equipment.
#[derive(Parser)]
#[command(name = "equippro", about = "EquipPro dashboard tables")]
struct Args {
    /// Base URL of the EquipPro API.
    #[arg(long, env = "EQUIPPRO_URL", default_value = "http://localhost:8080")]
    url: String,

    /// Bearer token (JWT) of the signed-in user.
    #[arg(long, env = "EQUIPPRO_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Read the bearer token from a file; takes precedence over --token.
    #[arg(long, value_name = "PATH")]
    token_file: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    view: View,
}

#[derive(Subcommand)]
enum View {
    /// Tickets raised on the signed-in client's equipment.
    Tickets(ListArgs),
    /// All clients.
    Clients(ListArgs),
    /// All equipment.
    Equipment(ListArgs),
    /// One ticket, optionally closing or deleting it.
    Ticket {
        id: i64,

        /// Close the ticket.
        #[arg(long, conflicts_with = "delete")]
        close: bool,

        /// Delete the ticket.
        #[arg(long)]
        delete: bool,

        /// Confirm the deletion.
        #[arg(short, long, requires = "delete")]
        yes: bool,
    },
}

#[derive(clap::Args)]
struct ListArgs {
    /// Column filter, repeatable.
    #[arg(short, long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// Sort column with optional direction, repeatable; the first is primary.
    #[arg(short, long = "sort", value_name = "KEY[:asc|desc]", value_parser = parse_sort)]
    sort: Vec<(String, Direction)>,

    /// Page to show, starting at 1.
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Rows per page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

impl ListArgs {
    /// Browser commands in application order: filters, then sort, then page.
    fn commands(&self) -> Vec<Command> {
        let mut commands: Vec<Command> = self
            .filters
            .iter()
            .map(|(key, value)| Command::apply_filter(key, value))
            .collect();

        if !self.sort.is_empty() {
            let sort = self
                .sort
                .iter()
                .fold(SortState::new(), |sort, (key, direction)| {
                    sort.then(key, *direction)
                });
            commands.push(Command::SetSort(sort));
        }

        commands.push(Command::SetPage(self.page.saturating_sub(1)));
        commands
    }
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if key.is_empty() {
        return Err("filter key is empty".to_string());
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_sort(s: &str) -> Result<(String, Direction), String> {
    match s.split_once(':') {
        None => Ok((s.to_string(), Direction::Asc)),
        Some((key, direction)) => {
            let direction = Direction::parse(direction)
                .ok_or_else(|| format!("unknown direction '{}': use asc or desc", direction))?;
            Ok((key.to_string(), direction))
        }
    }
}

fn init_logging(verbose: bool) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let Ok(file) = File::create(&path) else { return };

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = WriteLogger::init(level, Config::default(), file);
}

fn read_token(args: &Args) -> Result<String, CliError> {
    if let Some(path) = &args.token_file {
        return fs::read_to_string(path).map_err(|source| CliError::TokenFile {
            path: path.clone(),
            source,
        });
    }
    args.token.clone().ok_or(CliError::MissingToken)
}

async fn show_list<L: Loader>(loader: L, args: &ListArgs) -> Result<(), CliError> {
    let mut screen = ListScreen::new(loader, BrowserConfig::new(args.page_size));
    CliError::check(screen.refresh().await)?;
    for command in args.commands() {
        screen.dispatch(command);
    }
    print!("{}", render::page(screen.browser()));
    Ok(())
}

fn report(outcome: Outcome) -> Result<(), CliError> {
    if let Some(Notification::Success { title, text }) = CliError::check(outcome.notification)? {
        match text {
            Some(text) => println!("{}: {}", title, text),
            None => println!("{}", title),
        }
    }
    if let Some(route) = outcome.route {
        log::info!("next route: {}", route);
    }
    Ok(())
}

async fn run(args: Args) -> Result<(), CliError> {
    let session = Session::from_token(read_token(&args)?)?;
    log::info!("signed in as {}", session.subject());
    if session.is_expired() {
        log::warn!(
            "token for {} has expired; the API will likely reject it",
            session.subject()
        );
    }

    let client = EquipProClient::builder()
        .url(&args.url)
        .token_provider(session.clone())
        .timeout(Duration::from_secs(args.timeout))
        .build()?;

    match &args.view {
        View::Tickets(list) => show_list(OwnerTickets::new(client, session), list).await,
        View::Clients(list) => show_list(Clients::new(client), list).await,
        View::Equipment(list) => show_list(Equipments::new(client), list).await,
        View::Ticket {
            id,
            close,
            delete,
            yes,
        } => {
            let mut details = TicketDetails::load(client, *id).await?;
            if let Some(Notification::Error { title, text }) = details.take_notification() {
                eprintln!("{} {} (technicians unavailable)", title, text);
            }
            if *close {
                if !details.can_close() {
                    println!("Ticket {} is already closed", id);
                }
                report(details.close().await)?;
            } else if *delete {
                let confirmation = if *yes {
                    Confirmation::Confirmed
                } else {
                    Confirmation::Cancelled
                };
                if confirmation == Confirmation::Cancelled {
                    println!("Not deleted: pass --yes to confirm");
                }
                return report(details.delete(confirmation).await);
            }
            print!("{}", render::ticket(details.ticket()));
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args).await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        if e.is_unauthorized() {
            eprintln!("The token was rejected; sign in again and pass a fresh one.");
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("status=waiting"),
            Ok(("status".to_string(), "waiting".to_string()))
        );
        assert_eq!(
            parse_filter("comment=a=b"),
            Ok(("comment".to_string(), "a=b".to_string()))
        );
        assert!(parse_filter("status").is_err());
        assert!(parse_filter("=x").is_err());
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(parse_sort("cin"), Ok(("cin".to_string(), Direction::Asc)));
        assert_eq!(
            parse_sort("cin:DESC"),
            Ok(("cin".to_string(), Direction::Desc))
        );
        assert!(parse_sort("cin:sideways").is_err());
    }

    #[test]
    fn test_list_args_from_command_line() {
        let args = Args::try_parse_from([
            "equippro",
            "--token",
            "t",
            "clients",
            "-f",
            "lastName=am",
            "-s",
            "lastName",
            "-s",
            "cin:desc",
            "--page",
            "2",
        ])
        .unwrap();

        let View::Clients(list) = args.view else {
            panic!("expected clients view");
        };
        let commands = list.commands();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            &commands[0],
            Command::ApplyFilter { key, value } if key == "lastName" && value == "am"
        ));
        assert!(matches!(
            &commands[1],
            Command::SetSort(sort) if *sort == SortState::asc("lastName").then_desc("cin")
        ));
        assert!(matches!(commands[2], Command::SetPage(1)));
    }

    #[test]
    fn test_yes_requires_delete() {
        let result = Args::try_parse_from(["equippro", "ticket", "3", "--yes"]);
        assert!(result.is_err());
    }
}
