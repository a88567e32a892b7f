use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};

use changekit::config::{load_config, Config};
use changekit::domain::{custom_map_from_pairs, validate_custom_map, Change};
use changekit::error::ChangekitError;
use changekit::store::{DiskStore, FileStore};
use changekit::ui;
use changekit::workspace::Workspace;

#[derive(Parser)]
#[command(
    name = "changekit",
    about = "Manage changelog fragments and semantic version bumps"
)]
struct Cli {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a new change fragment under the unreleased directory
    New {
        #[arg(short, long, help = "Kind label of the change")]
        kind: Option<String>,

        #[arg(short, long, help = "Body text of the change")]
        body: String,

        #[arg(long, help = "Component label of the change")]
        component: Option<String>,

        #[arg(short = 'j', long, help = "Project label or key")]
        project: Option<String>,

        #[arg(long, value_name = "KEY=VALUE", help = "Custom metadata values")]
        custom: Vec<String>,
    },

    /// Echo the latest release version number
    Latest {
        #[arg(short = 'r', long, help = "Remove the version prefix before echoing")]
        remove_prefix: bool,

        #[arg(long, help = "Exclude prereleases when determining the latest version")]
        skip_prereleases: bool,

        #[arg(short = 'j', long, default_value = "", help = "Project label or key")]
        project: String,
    },

    /// Echo the next version based on semantic versioning
    Next {
        /// Part to increment (major, minor, patch, auto) or an explicit version
        part: String,

        #[arg(short, long, help = "Prerelease labels joined with '.'")]
        prerelease: Vec<String>,

        #[arg(short, long, help = "Build metadata labels joined with '.'")]
        metadata: Vec<String>,

        #[arg(short = 'j', long, default_value = "", help = "Project label or key")]
        project: String,
    },

    /// Output the release notes for a range of versions
    Diff {
        /// Count, comparator expression, or start...end range
        range: String,

        #[arg(long, help = "Exclude prereleases from the range")]
        skip_prereleases: bool,

        #[arg(short = 'j', long, default_value = "", help = "Project label or key")]
        project: String,
    },

    /// List pending changes in rendering order
    Pending {
        #[arg(short = 'j', long, default_value = "", help = "Project label or key")]
        project: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let store = DiskStore::new();
    let workspace = Workspace::new(&config, &store);

    let result = match cli.command {
        Command::New {
            kind,
            body,
            component,
            project,
            custom,
        } => run_new(&config, &workspace, kind, body, component, project, &custom),
        Command::Latest {
            remove_prefix,
            skip_prereleases,
            project,
        } => run_latest(&config, &workspace, remove_prefix, skip_prereleases, &project),
        Command::Next {
            part,
            prerelease,
            metadata,
            project,
        } => run_next(&config, &workspace, &part, &prerelease, &metadata, &project),
        Command::Diff {
            range,
            skip_prereleases,
            project,
        } => run_diff(&config, &workspace, &store, &range, skip_prereleases, &project),
        Command::Pending { project } => run_pending(&config, &workspace, &project),
    };

    if let Err(e) = result {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn run_new(
    config: &Config,
    workspace: &Workspace<DiskStore>,
    kind: Option<String>,
    body: String,
    component: Option<String>,
    project: Option<String>,
    custom: &[String],
) -> changekit::Result<()> {
    let project_key = config.project_key(project.as_deref().unwrap_or(""))?;

    let kind = match kind {
        Some(kind) if config.kinds.is_empty() => {
            return Err(ChangekitError::config(format!(
                "kind provided but not supported: '{}'",
                kind
            )))
        }
        Some(kind) => {
            if !config.has_kind(&kind) {
                return Err(ChangekitError::KindNotFound(kind));
            }
            Some(kind)
        }
        None if config.kinds.is_empty() => None,
        None => return Err(ChangekitError::KindNotFound(String::new())),
    };

    let component = match component {
        Some(component) if config.components.is_empty() => {
            return Err(ChangekitError::config(format!(
                "component provided but not supported: '{}'",
                component
            )))
        }
        Some(component) => {
            if !config.components.contains(&component) {
                return Err(ChangekitError::config(format!(
                    "invalid component: '{}'",
                    component
                )));
            }
            Some(component)
        }
        None => None,
    };

    let custom = custom_map_from_pairs(custom)?;
    validate_custom_map(&config.custom, &custom)?;

    let change = Change::new(
        (!project_key.is_empty()).then_some(project_key),
        component,
        kind,
        body,
        custom,
        Utc::now(),
    );

    let path = workspace.save_change(&change)?;
    ui::display_success(&format!("Created fragment {}", path.display()));

    Ok(())
}

fn run_latest(
    config: &Config,
    workspace: &Workspace<DiskStore>,
    remove_prefix: bool,
    skip_prereleases: bool,
    project: &str,
) -> changekit::Result<()> {
    let project_key = config.project_key(project)?;
    let latest = workspace.latest_version(skip_prereleases, &project_key)?;

    let prefix = if remove_prefix {
        ""
    } else {
        config.version_prefix.as_str()
    };

    if project_key.is_empty() {
        println!("{}{}", prefix, latest);
    } else {
        println!(
            "{}{}{}{}",
            project_key, config.project_version_separator, prefix, latest
        );
    }

    Ok(())
}

fn run_next(
    config: &Config,
    workspace: &Workspace<DiskStore>,
    part: &str,
    prerelease: &[String],
    metadata: &[String],
    project: &str,
) -> changekit::Result<()> {
    let project_key = config.project_key(project)?;
    let next = workspace.next_version(&part.to_lowercase(), prerelease, metadata, &project_key)?;

    println!("{}{}", config.version_prefix, next);

    Ok(())
}

fn run_diff(
    config: &Config,
    workspace: &Workspace<DiskStore>,
    store: &DiskStore,
    range: &str,
    skip_prereleases: bool,
    project: &str,
) -> changekit::Result<()> {
    let project_key = config.project_key(project)?;
    let versions = workspace.versions_in_range(range, skip_prereleases, &project_key)?;

    let mut first = true;
    for version in &versions {
        if !first {
            println!();
        }
        first = false;

        let path = workspace.version_file_path(version, &project_key);
        print!("{}", store.read_to_string(&path)?);
    }

    Ok(())
}

fn run_pending(
    config: &Config,
    workspace: &Workspace<DiskStore>,
    project: &str,
) -> changekit::Result<()> {
    let project_key = config.project_key(project)?;
    let changes = workspace.ordered_changes(&[], &project_key)?;

    ui::display_pending_summary(&changes);

    Ok(())
}
