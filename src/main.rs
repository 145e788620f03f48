// Command-line entry point for Yukon.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use yukon_core::api::dto::{NotificationDto, ProjectDto, TreeNodeDto};
use yukon_core::application::ImpactSession;
use yukon_core::infrastructure::{ConfigDocument, JsonNotificationFeed, ProjectLayout};
use yukon_core::ports::tree_exporter::{TreeExporter, TreeFormat};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Project directory (holds yukon.toml and the yukon/ data folder)
    #[arg(short, long, global = true, default_value = ".")]
    project: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write an empty use-case document if none exists
    Init,
    /// Print the use cases and their methods
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Add a use case
    AddUseCase { name: Option<String> },
    /// Delete a use case by index
    RemoveUseCase { index: usize },
    /// Rename a use case
    RenameUseCase { index: usize, name: String },
    /// Add a method signature to a use case
    AddMethod {
        use_case: usize,
        signature: Option<String>,
    },
    /// Remove a method signature from a use case
    RemoveMethod { use_case: usize, index: usize },
    /// Replace a method signature
    SetMethod {
        use_case: usize,
        index: usize,
        signature: String,
    },
    /// List notifications from the analysis tool's feed
    Notifications {
        #[arg(long)]
        json: bool,
    },
    /// Show the call-graph path of one notification
    Trace {
        /// Notification index (as listed by `notifications`)
        #[arg(allow_negative_numbers = true)]
        index: isize,

        /// Output format (text, dot, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "yukon_core=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let layout = ProjectLayout::discover(&cli.project)
        .with_context(|| format!("Cannot read settings in {}", cli.project.display()))?;
    let document = ConfigDocument;
    let feed = JsonNotificationFeed;

    // Runs before the session opens so a strict missing-document policy
    // cannot block creating the document.
    if let Command::Init = cli.command {
        let path = layout.document_path().display().to_string();
        if ImpactSession::init(&document, &layout).context("Cannot write use-case document")? {
            println!("Created {}", path);
        } else {
            println!("Already initialized: {}", path);
        }
        return Ok(());
    }

    let mut session = ImpactSession::open(&document, &feed, layout)
        .context("Cannot load use-case document")?;

    match cli.command {
        Command::Init => unreachable!("handled before the session opens"),
        Command::Show { json } => print_project(&session, json)?,
        Command::AddUseCase { name } => {
            let index = session.create_use_case(name.as_deref())?;
            println!("Added use case {}", index);
        }
        Command::RemoveUseCase { index } => session.delete_use_case(index)?,
        Command::RenameUseCase { index, name } => session.rename_use_case(index, &name)?,
        Command::AddMethod { use_case, signature } => {
            let index = session.add_method(use_case, signature.as_deref())?;
            println!("Added method {} to use case {}", index, use_case);
        }
        Command::RemoveMethod { use_case, index } => session.remove_method(use_case, index)?,
        Command::SetMethod {
            use_case,
            index,
            signature,
        } => session.set_method(use_case, index, &signature)?,
        Command::Notifications { json } => {
            session.reload_notifications().context("Cannot read notification feed")?;
            print_notifications(&session, json)?;
        }
        Command::Trace {
            index,
            format,
            output,
        } => {
            session.reload_notifications().context("Cannot read notification feed")?;
            let Some(root) = session.select(index)? else {
                println!("Notification {} has no call-graph path", index);
                return Ok(());
            };

            if format.eq_ignore_ascii_case("json") {
                let rendered = serde_json::to_string_pretty(&TreeNodeDto::from(&root))?;
                match output {
                    Some(path) => {
                        std::fs::write(&path, rendered)
                            .with_context(|| format!("Cannot write {}", path.display()))?;
                        println!("Call-graph path written to {}", path.display());
                    }
                    None => println!("{}", rendered),
                }
                return Ok(());
            }

            let Some(tree_format) = TreeFormat::from_str(&format) else {
                bail!("Unknown format '{}' (expected text, dot or json)", format);
            };
            match output {
                Some(path) => {
                    TreeExporter::export(&root, tree_format, &path)?;
                    println!("Call-graph path written to {}", path.display());
                }
                None => println!("{}", TreeExporter::render(&root, tree_format)),
            }
        }
    }

    Ok(())
}

fn print_project(session: &ImpactSession<'_>, json: bool) -> Result<()> {
    let config = session.config();
    if json {
        println!("{}", serde_json::to_string_pretty(&ProjectDto::from(config))?);
        return Ok(());
    }

    println!("Project directory: {}", config.project_directory());
    if config.use_cases.is_empty() {
        println!("(no use cases)");
    }
    for (i, use_case) in config.use_cases.iter().enumerate() {
        println!("[{}] {}", i, use_case);
        for (j, method) in use_case.methods.iter().enumerate() {
            println!("    [{}] {}", j, method);
        }
    }
    Ok(())
}

fn print_notifications(session: &ImpactSession<'_>, json: bool) -> Result<()> {
    let store = session.notifications();
    if json {
        let dtos: Vec<NotificationDto> = store
            .iter()
            .enumerate()
            .map(|(i, n)| NotificationDto::new(i, n))
            .collect();
        println!("{}", serde_json::to_string_pretty(&dtos)?);
        return Ok(());
    }

    if store.is_empty() {
        println!("(no notifications)");
    }
    for (i, notification) in store.iter().enumerate() {
        println!("[{}] {}", i, notification.description());
    }
    Ok(())
}
