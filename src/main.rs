use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use prompt_builder_lib::{
    links, Action, AppState, Config, FieldKey, FileStore, Outcome, SnapshotId,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prompt-builder", version, about = "Compose structured prompts and manage saved snapshots")]
struct Cli {
    /// TOML config file (defaults to $PROMPT_BUILDER_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the snapshot archive
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List saved snapshots, newest first
    List,
    /// Print the composed text of a snapshot
    Show { id: SnapshotId },
    /// Print the prompt composed from the given sections without saving
    Compose {
        #[command(flatten)]
        sections: Sections,
    },
    /// Save the given sections as a new snapshot
    Save {
        #[command(flatten)]
        sections: Sections,
        /// Name to give the snapshot instead of Untitled<N>
        #[arg(long)]
        name: Option<String>,
    },
    Rename { id: SnapshotId, name: String },
    Delete { id: SnapshotId },
    /// Write the whole archive as JSON
    Export {
        /// Output path (defaults to prompt-builder-<timestamp>.json)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Merge snapshots from an exported JSON file
    Import { path: PathBuf },
    /// Print the chat-site URL for a snapshot's prompt
    Open { destination: String, id: SnapshotId },
}

#[derive(clap::Args)]
struct Sections {
    /// Section text as key=text, e.g. taskContext="Summarize this"
    #[arg(long = "set", value_parser = parse_pair)]
    texts: Vec<(FieldKey, String)>,

    /// Section label as key=label
    #[arg(long = "label", value_parser = parse_pair)]
    labels: Vec<(FieldKey, String)>,

    /// Sections to leave out of the output
    #[arg(long = "hide")]
    hidden: Vec<FieldKey>,
}

fn parse_pair(raw: &str) -> Result<(FieldKey, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {}", raw))?;
    let key = key.parse::<FieldKey>().map_err(|e| e.to_string())?;
    Ok((key, value.to_string()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }

    let store = FileStore::new(&config.storage.data_dir, &config.storage.key);
    let mut app = AppState::new(store, &config);
    let now = Instant::now();

    match cli.command {
        Command::List => {
            for snapshot in app.archive.iter() {
                println!("{}\t{}", snapshot.id, snapshot.name);
            }
        }
        Command::Show { id } => {
            let snapshot = app
                .archive
                .load(id)
                .with_context(|| format!("no snapshot with id {}", id))?;
            println!("{}", snapshot.composed_text);
        }
        Command::Compose { sections } => {
            apply_sections(&mut app, sections, now);
            println!("{}", app.output());
        }
        Command::Save { sections, name } => {
            apply_sections(&mut app, sections, now);
            if let Outcome::Saved(id) = app.dispatch(Action::SaveSnapshot, now) {
                if let Some(name) = name {
                    app.dispatch(Action::RenameSnapshot(id, name), now);
                }
                println!("{}", id);
            }
        }
        Command::Rename { id, name } => {
            app.dispatch(Action::RenameSnapshot(id, name), now);
        }
        Command::Delete { id } => {
            app.dispatch(Action::DeleteSnapshot(id), now);
        }
        Command::Export { out } => match app.dispatch(Action::ExportArchive, now) {
            Outcome::Exported { file_name, bytes } => {
                let path = out.unwrap_or_else(|| PathBuf::from(file_name));
                std::fs::write(&path, bytes)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("{}", path.display());
            }
            Outcome::Notice(message) => bail!(message),
            _ => {}
        },
        Command::Import { path } => {
            let bytes =
                std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            match app.dispatch(Action::ImportArchive(bytes), now) {
                Outcome::Imported(count) => println!("imported {} snapshots", count),
                Outcome::Notice(message) => bail!(message),
                _ => {}
            }
        }
        Command::Open { destination, id } => {
            let destination = links::find(&app.config.destinations, &destination)?;
            let snapshot = app
                .archive
                .load(id)
                .with_context(|| format!("no snapshot with id {}", id))?;
            println!("{}", destination.url_for(&snapshot.composed_text)?);
        }
    }

    Ok(())
}

fn apply_sections(app: &mut AppState<FileStore>, sections: Sections, now: Instant) {
    for (key, label) in sections.labels {
        app.dispatch(Action::SetLabel(key, label), now);
    }
    for (key, text) in sections.texts {
        app.dispatch(Action::SetText(key, text), now);
    }
    for key in sections.hidden {
        app.dispatch(Action::Hide(key), now);
    }
}
