use clap::{Parser, Subcommand};
use dialoguer::{Input, Select};
use showfinder::{
    ClickTarget, DEFAULT_BASE_URL, DispatchEvent, Event, EventRouter, Page, ShowFinderError,
    TvMazeDirectory, episodes_for, render_shows, search_shows, write_document,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

/// Search TV shows by title and browse their episodes
#[derive(Debug, Parser)]
#[command(name = "showfinder", version, about)]
struct Cli {
    /// Root URL of the TVMaze compatible API
    #[arg(long, env = "SHOWFINDER_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Write the rendered page as HTML to this file after every action
    #[arg(short, long, value_name = "FILE", global = true)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search shows matching a title
    Search {
        /// Search term
        term: String,
    },
    /// List the episodes of a show
    Episodes {
        /// TVMaze show id, as printed by `search`
        show_id: u64,
    },
}

/// Sets up logging to stderr, honoring `RUST_LOG` when set
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "showfinder=warn",
        1 => "showfinder=info",
        _ => "showfinder=debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Converts summary markup into a single line of plain text for the terminal
fn plain_summary(summary: &str) -> String {
    nanohtml2text::html2text(summary)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Handles progress events and prints formatted output to stdout
fn handle_dispatch_event(event: DispatchEvent) {
    match event {
        DispatchEvent::Searching { term } => {
            println!("Searching for '{}'...", term);
        }
        DispatchEvent::ShowsRendered { count } => {
            if count == 0 {
                println!("No shows found.");
            } else {
                println!("Found {} show(s)\n", count);
            }
        }
        DispatchEvent::FetchingEpisodes { show_id } => {
            println!("Fetching episodes of show {}...", show_id);
        }
        DispatchEvent::EpisodesRendered { count, visible } => {
            if visible {
                println!("{} episode(s)\n", count);
            } else {
                println!("Episodes hidden.\n");
            }
        }
    }
}

fn print_shows(page: &Page) {
    for (index, entry) in page.show_list.entries().iter().enumerate() {
        println!("{}. {} [id {}]", index + 1, entry.name, entry.show_id);
        let summary = plain_summary(&entry.summary);
        if !summary.is_empty() {
            println!("   {}", summary);
        }
    }
}

fn print_episodes(page: &Page) {
    if !page.episodes_area.is_visible() {
        return;
    }
    for item in page.episodes_area.list().items() {
        println!("  - {}", item.text);
    }
    println!();
}

fn save_page(output: Option<&Path>, page: &Page) -> Result<(), ShowFinderError> {
    if let Some(path) = output {
        write_document(path, page)?;
    }
    Ok(())
}

/// One choice in the show menu
enum MenuChoice {
    Episodes(usize),
    NewSearch,
    Quit,
}

fn show_menu(page: &Page) -> Result<MenuChoice, dialoguer::Error> {
    let mut items: Vec<String> = page
        .show_list
        .entries()
        .iter()
        .map(|entry| format!("Episodes of {} [id {}]", entry.name, entry.show_id))
        .collect();
    let shows = items.len();
    items.push("New search".to_string());
    items.push("Quit".to_string());

    let selection = Select::new()
        .with_prompt("What next?")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(match selection {
        index if index < shows => MenuChoice::Episodes(index),
        index if index == shows => MenuChoice::NewSearch,
        _ => MenuChoice::Quit,
    })
}

/// Runs the interactive search session until the user quits
fn run_interactive(
    router: &EventRouter<TvMazeDirectory>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut page = Page::new();
    let mut pending = None;

    loop {
        let event = match pending.take() {
            Some(event) => event,
            None => {
                let term: String = Input::new()
                    .with_prompt("Search shows")
                    .with_initial_text(page.search_form.term())
                    .allow_empty(true)
                    .interact_text()?;
                Event::SearchSubmitted { term }
            }
        };

        let is_search = matches!(event, Event::SearchSubmitted { .. });
        match router.dispatch(&mut page, event, handle_dispatch_event) {
            Ok(_) => {
                if is_search {
                    print_shows(&page);
                } else {
                    print_episodes(&page);
                }
                save_page(output, &page)?;
            }
            Err(e) => {
                eprintln!("Error: {}\n", e);
            }
        }

        if page.show_list.is_empty() {
            continue;
        }

        match show_menu(&page)? {
            MenuChoice::Episodes(index) => {
                pending = Some(Event::Click {
                    target: ClickTarget::episodes_trigger(index),
                });
            }
            MenuChoice::NewSearch => {}
            MenuChoice::Quit => return Ok(()),
        }
    }
}

/// Prints the shows matching `term` and optionally writes them as a page
fn run_search(
    directory: &TvMazeDirectory,
    term: &str,
    output: Option<&Path>,
) -> Result<(), ShowFinderError> {
    let shows = search_shows(directory, term)?;

    let mut page = Page::new();
    page.search_form.set_term(term);
    render_shows(&mut page.show_list, &shows);

    if page.show_list.is_empty() {
        println!("No shows found.");
    }
    print_shows(&page);
    save_page(output, &page)
}

/// Prints the episode list of a single show
fn run_episodes(directory: &TvMazeDirectory, show_id: u64) -> Result<(), ShowFinderError> {
    for episode in episodes_for(directory, show_id)? {
        println!(
            "{} (season: {}, episode: {})",
            episode.name, episode.season, episode.number
        );
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let directory = TvMazeDirectory::with_base_url(cli.base_url);
    let output = cli.output.as_deref();

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Some(Command::Search { term }) => {
            run_search(&directory, &term, output).map_err(Into::into)
        }
        Some(Command::Episodes { show_id }) => {
            run_episodes(&directory, show_id).map_err(Into::into)
        }
        None => run_interactive(&EventRouter::new(directory), output),
    };

    if let Err(e) = result {
        eprintln!("\nError: {}", e);
        process::exit(1);
    }
}
