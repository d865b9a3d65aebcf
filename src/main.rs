//! univman binary entry point

use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use univman::{
    api::{ApiClient, CourseApi, UniversityApi},
    config::Config,
    models::{NewCourse, NewUniversity},
    tui::App,
};

#[derive(Parser)]
#[command(name = "univman")]
#[command(about = "Terminal client for managing universities and their courses")]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides UNIVMAN_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List universities and exit
    Universities,
    /// List courses and exit
    Courses,
    /// Add a university and exit
    AddUniversity {
        /// University name
        #[arg(long)]
        name: String,
    },
    /// Add a course and exit
    AddCourse {
        /// Course name
        #[arg(long)]
        name: String,
        /// Id of an existing university
        #[arg(long)]
        university_id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "univman=info");
    }

    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    config.validate()?;

    // Print-and-exit mode: log to stderr, no terminal takeover
    if let Some(command) = cli.command {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
        return handle_cli_command(command, &config).await;
    }

    // Log to a file in TUI mode to avoid interfering with the display
    let file_appender = tracing_appender::rolling::never(".", "univman.log");
    tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting univman TUI...");

    // Setup terminal for TUI mode
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config)?;
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match result {
        Ok(_) => {
            info!("univman exited successfully");
        }
        Err(e) => {
            error!("univman encountered an error: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Handle print-and-exit commands
async fn handle_cli_command(command: Commands, config: &Config) -> Result<()> {
    let api = ApiClient::new(config)?;

    match command {
        Commands::Universities => {
            let universities = api.list_universities().await?;
            if universities.is_empty() {
                println!("No universities found");
                return Ok(());
            }
            println!("{:<6} {}", "ID", "University Name");
            println!("{}", "-".repeat(40));
            for u in &universities {
                println!("{:<6} {}", u.id, u.name);
            }
            println!();
            println!("Total: {} universities", universities.len());
        }

        Commands::Courses => {
            let courses = api.list_courses().await?;
            if courses.is_empty() {
                println!("No courses found");
                return Ok(());
            }
            println!("{:<6} {:<30} {}", "ID", "Course Name", "University Name");
            println!("{}", "-".repeat(60));
            for c in &courses {
                println!("{:<6} {:<30} {}", c.id, c.name, c.university_name());
            }
            println!();
            println!("Total: {} courses", courses.len());
        }

        Commands::AddUniversity { name } => {
            let name = name.trim();
            if name.is_empty() {
                eprintln!("Error: university name is required");
                std::process::exit(1);
            }
            api.create_university(&NewUniversity {
                name: name.to_string(),
            })
            .await?;
            println!("University added successfully");
        }

        Commands::AddCourse {
            name,
            university_id,
        } => {
            let name = name.trim();
            if name.is_empty() {
                eprintln!("Error: course name is required");
                std::process::exit(1);
            }
            api.create_course(&NewCourse {
                name: name.to_string(),
                university_id,
            })
            .await?;
            println!("Course added successfully");
        }
    }

    Ok(())
}
