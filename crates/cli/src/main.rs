//! forma - edit, check and render form documents from the command line.
//!
//! Every subcommand loads a JSON document, does one thing and (for edits)
//! writes it back. Commands and queries use the same JSON shapes as the
//! `api` crate.

mod logging;

use anyhow::{bail, Context, Result};
use api::{execute_command, execute_query, Command, CommandResult, Query};
use clap::{Parser, Subcommand, ValueEnum};
use element::{ElementId, ElementKind, Settings};
use interchange::Document;
use render::{project, Capabilities};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use submission::{run_actions, validate_submission, DryRunClient};

/// forma - build forms and pages as JSON documents
#[derive(Parser)]
#[command(name = "forma", version)]
#[command(about = "Command-line interface for the forma form builder")]
struct Cli {
    /// Log debug output to stderr (overridden by FORMA_LOG / RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty document
    New {
        file: PathBuf,

        /// Document title
        #[arg(short, long)]
        title: Option<String>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print an outline of the document
    Show { file: PathBuf },

    /// Add an element with its kind's defaults
    Add {
        file: PathBuf,

        /// Element kind, e.g. `email`, `columns`, `rich-text`
        #[arg(value_parser = parse_kind)]
        kind: ElementKind,

        /// Container to append to (full element id)
        #[arg(short, long, value_parser = parse_id)]
        parent: Option<ElementId>,
    },

    /// Execute a JSON command and save the result
    Apply {
        file: PathBuf,

        /// Command JSON, or `@path` to read it from a file
        json: String,
    },

    /// Run a JSON query
    Query {
        file: PathBuf,

        /// Query JSON, or `@path` to read it from a file
        json: String,
    },

    /// Report invalid input names, widths and other document problems
    Validate { file: PathBuf },

    /// Print the render tree as JSON
    Render {
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = RenderMode::Live)]
        mode: RenderMode,
    },

    /// Validate submitted values and run the submission actions (dry run)
    Submit {
        file: PathBuf,

        /// JSON object of submitted values, or `@path`
        values: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RenderMode {
    /// Editing canvas with selection chrome
    Canvas,
    /// Submittable form (when the document is a form)
    Live,
    /// Plain output with no behaviour
    Static,
}

impl RenderMode {
    fn capabilities(self, settings: &Settings) -> Capabilities {
        match self {
            Self::Canvas => Capabilities::canvas(),
            Self::Live => Capabilities::live(settings),
            Self::Static => Capabilities::static_export(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::New { file, title, force } => new_document(&file, title, force),
        Commands::Show { file } => show(&file),
        Commands::Add { file, kind, parent } => add(&file, kind, parent),
        Commands::Apply { file, json } => apply(&file, &json),
        Commands::Query { file, json } => query(&file, &json),
        Commands::Validate { file } => validate(&file),
        Commands::Render { file, mode } => render_document(&file, mode),
        Commands::Submit { file, values } => submit(&file, &values),
    }
}

fn parse_kind(s: &str) -> Result<ElementKind, String> {
    s.parse().map_err(|_| {
        let kinds: Vec<_> = ElementKind::all().map(|k| k.to_string()).collect();
        format!("unknown element kind `{}` (expected one of: {})", s, kinds.join(", "))
    })
}

fn parse_id(s: &str) -> Result<ElementId, String> {
    ElementId::parse(s).ok_or_else(|| format!("`{}` is not a full element id", s))
}

fn load(file: &Path) -> Result<Document> {
    Document::load(file).with_context(|| format!("Failed to load {}", file.display()))
}

/// Read an inline JSON argument, or the file named by `@path`.
fn read_json_arg(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path)),
        None => Ok(arg.to_string()),
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn new_document(file: &Path, title: Option<String>, force: bool) -> Result<()> {
    if file.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", file.display());
    }

    let mut settings = Settings::default();
    if let Some(title) = title {
        settings.title = title;
    }
    Document::new(Vec::new(), settings)
        .save(file)
        .with_context(|| format!("Failed to write {}", file.display()))?;
    println!("Created {}", file.display());
    Ok(())
}

fn show(file: &Path) -> Result<()> {
    let doc = load(file)?;
    let tree = doc.tree()?;
    let rendered = project(&tree, &doc.settings, Capabilities::live(&doc.settings));

    println!("{} ({} elements)", rendered.title, tree.len());
    print!("{}", rendered.outline());
    Ok(())
}

/// Run one command against the document and save it if anything changed.
fn run_command(file: &Path, command: Command) -> Result<CommandResult> {
    let mut store = load(file)?.into_store()?;
    let result = execute_command(&mut store, command);

    match &result {
        CommandResult::Success { .. } => {
            Document::from_store(&store)
                .save(file)
                .with_context(|| format!("Failed to write {}", file.display()))?;
        }
        CommandResult::Ignored { reason } => tracing::info!("Nothing changed: {}", reason),
        CommandResult::Rejected { reason } => tracing::warn!("Command rejected: {}", reason),
    }
    Ok(result)
}

fn add(file: &Path, kind: ElementKind, parent: Option<ElementId>) -> Result<()> {
    let command = Command::AddElement {
        kind,
        parent,
        index: None,
        attributes: Default::default(),
    };
    match run_command(file, command)? {
        CommandResult::Rejected { reason } => bail!("Cannot add {}: {}", kind.display_name(), reason),
        result => {
            if let Some(id) = result.created_id() {
                println!("{}", id.to_uuid_string());
            }
            Ok(())
        }
    }
}

fn apply(file: &Path, json: &str) -> Result<()> {
    let json = read_json_arg(json)?;
    let command: Command = serde_json::from_str(&json).context("Invalid command JSON")?;
    let result = run_command(file, command)?;
    print_json(&result)?;
    if result.is_rejected() {
        bail!("Command was rejected; {} is unchanged", file.display());
    }
    Ok(())
}

fn query(file: &Path, json: &str) -> Result<()> {
    let json = read_json_arg(json)?;
    let query: Query = serde_json::from_str(&json).context("Invalid query JSON")?;
    let store = load(file)?.into_store()?;
    print_json(&execute_query(&store, query))
}

fn validate(file: &Path) -> Result<()> {
    let doc = load(file)?;
    let issues = doc.validate();
    if issues.is_empty() {
        println!("{}: ok", file.display());
        return Ok(());
    }

    for issue in &issues {
        println!("{}: {}", file.display(), issue);
    }
    bail!("{} problem(s) found", issues.len())
}

fn render_document(file: &Path, mode: RenderMode) -> Result<()> {
    let doc = load(file)?;
    let tree = doc.tree()?;
    print_json(&project(&tree, &doc.settings, mode.capabilities(&doc.settings)))
}

fn submit(file: &Path, values: &str) -> Result<()> {
    let doc = load(file)?;
    if !doc.settings.is_form() {
        bail!("{} is a page, not a form", file.display());
    }

    let values = read_json_arg(values)?;
    let values: Map<String, Value> =
        serde_json::from_str(&values).context("Submitted values must be a JSON object")?;

    let errors = validate_submission(&doc.tree()?, &values);
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("{}", error);
        }
        bail!("Submission is invalid");
    }

    let mut client = DryRunClient::default();
    let report = run_actions(&doc.settings, &Value::Object(values), &mut client);
    print_json(&report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_from_kebab_case() {
        assert_eq!(parse_kind("rich-text"), Ok(ElementKind::RichText));
        let err = parse_kind("slider").unwrap_err();
        assert!(err.contains("slider"));
        assert!(err.contains("email"));
    }

    #[test]
    fn ids_must_be_full_uuids() {
        let id = ElementId::from_u128(7);
        assert_eq!(parse_id(&id.to_uuid_string()), Ok(id));
        assert!(parse_id(&id.short()).is_err());
    }

    #[test]
    fn inline_json_is_passed_through() {
        assert_eq!(read_json_arg(r#"{"type":"get_tree"}"#).unwrap(), r#"{"type":"get_tree"}"#);
        assert!(read_json_arg("@/nonexistent/forma/command.json").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
