use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pilot_workspace::db::Database;
use pilot_workspace::workspace::{self, ProjectContext, SaveFileRequest, METADATA_DIR_NAME};

#[derive(Parser)]
#[command(name = "pilotws")]
#[command(about = "Inspect and snapshot the workspace of a generated project")]
struct Cli {
    /// Project root directory
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Name of the metadata directory under the root
    #[arg(long, default_value = METADATA_DIR_NAME)]
    metadata_dir: String,

    /// Database file (defaults to one inside the metadata directory)
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the workspace directory tree
    Tree,
    /// Show where a file would be saved
    Resolve {
        #[arg(short, long)]
        path: Option<String>,

        #[arg(short, long)]
        name: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a file into the workspace and record it
    Save {
        #[arg(short, long)]
        path: Option<String>,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        content: String,
    },
    /// Record the content of every workspace file for a development step
    Snapshot {
        #[arg(short, long)]
        step: String,
    },
    /// List recorded files
    Files,
    /// List the files captured at a development step
    Snapshots {
        #[arg(short, long)]
        step: String,
    },
}

/// Initialize tracing on stderr so stdout only carries command output
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "pilot_workspace=info,pilot_core=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Open the database given on the command line, or the project's own store
fn open_store(ctx: &ProjectContext, path: Option<PathBuf>) -> anyhow::Result<Database> {
    let Some(path) = path else {
        return workspace::open_database(ctx).with_context(|| {
            format!("Failed to open database at {}", ctx.database_path().display())
        });
    };

    let db = Database::open(path.clone())
        .with_context(|| format!("Failed to open database at {}", path.display()))?;
    db.migrate()?;
    Ok(db)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let root = std::fs::canonicalize(&cli.root)
        .with_context(|| format!("Project root {} not found", cli.root.display()))?;
    let ctx = ProjectContext::with_metadata_dir(root, cli.metadata_dir);

    match cli.command {
        Commands::Tree => {
            print!("{}", workspace::build_tree(&ctx)?);
        }
        Commands::Resolve { path, name, json } => {
            let location = workspace::resolve(&ctx, path.as_deref(), name.as_deref());
            if json {
                println!("{}", serde_json::to_string_pretty(&location)?);
            } else {
                println!("{}", location.relative_path);
                println!("{}", location.absolute_path);
            }
        }
        Commands::Save {
            path,
            name,
            content,
        } => {
            let db = open_store(&ctx, cli.db)?;
            let request = SaveFileRequest {
                name,
                path,
                content,
            };
            let location = workspace::save_file(&ctx, &db, &request)?;
            println!("{}", location.absolute_path);
        }
        Commands::Snapshot { step } => {
            let db = open_store(&ctx, cli.db)?;
            let summary = workspace::save_files_snapshot(&ctx, &db, &step)?;
            println!(
                "Step {}: {} files ({} new files, {} new snapshots)",
                summary.step.key, summary.files, summary.files_created, summary.snapshots_created
            );
        }
        Commands::Files => {
            let db = open_store(&ctx, cli.db)?;
            for file in db.get_files()? {
                println!("{}", file.relative_path());
            }
        }
        Commands::Snapshots { step } => {
            let db = open_store(&ctx, cli.db)?;
            if db.get_development_step(&step)?.is_none() {
                anyhow::bail!("No development step '{}'", step);
            }
            for entry in db.get_file_snapshots(&step)? {
                println!("{}\t{} bytes", entry.file.relative_path(), entry.snapshot.content.len());
            }
        }
    }

    Ok(())
}
