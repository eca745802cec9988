use crate::api::{load_api_document, ApiDocument};
use crate::config::{resolve_config, CrudgenConfig};
use crate::generator::{
    generate_project_with_options, help, resource_context, DryRunFs, Entrypoint, FileSystem,
    GenerateOptions, GenerationReport, LocalFs, ProjectReport, Target,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Command-line interface for crudgen
///
/// Scaffolds list/show/create/edit screens for the resources of an
/// OpenAPI document.
#[derive(Parser, Debug)]
#[command(name = "crudgen", version)]
#[command(about = "Generate CRUD front-end code from an OpenAPI document", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available crudgen commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate components, store modules and routes for API resources
    Generate {
        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        api: PathBuf,

        /// Directory the front-end sources are written to (default: .)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Front-end stack to generate for (default: quasar)
        #[arg(short, long, value_enum)]
        target: Option<Target>,

        /// Only generate these resources (name or title, repeatable)
        #[arg(short, long = "resource", value_name = "NAME")]
        resources: Vec<String>,

        /// API root the generated app calls (default: the document's first server)
        #[arg(long)]
        entrypoint: Option<String>,

        /// Overwrite shared files that already exist
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Show what would be written without touching the disk
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Path to crudgen.toml
        /// If not provided, will auto-detect alongside the API document
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the resources found in an OpenAPI document
    Resources {
        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        api: PathBuf,
    },
}

/// How a command ended when it did not hit a hard error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    /// Some resources or files failed; the rest were generated
    Incomplete,
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Success => ExitCode::SUCCESS,
            RunStatus::Incomplete => ExitCode::FAILURE,
        }
    }
}

/// Execute `cli`, writing user-facing output to `out`.
///
/// # Errors
///
/// Returns an error if:
/// - The API document cannot be loaded or parsed
/// - The configuration file is missing or invalid
/// - A `--resource` filter matches nothing
/// - The target's templates fail to compile
pub fn run(cli: &Cli, out: &mut dyn Write) -> anyhow::Result<RunStatus> {
    match &cli.command {
        Commands::Generate {
            api,
            output,
            target,
            resources,
            entrypoint,
            force,
            dry_run,
            config,
        } => {
            let doc = load_api_document(api)?;
            let file_config = resolve_config(config.as_deref(), api)?;
            let flags = CrudgenConfig {
                target: *target,
                output: output.clone(),
                entrypoint: entrypoint.clone(),
                resources: resources.clone(),
                force: force.then_some(true),
            };
            let options = flags.merged_over(file_config).into_options()?;

            if *dry_run {
                let mut fs = DryRunFs::new();
                let report = generate(&doc, &options, &mut fs)?;
                print_dry_run(out, &options, &report, &fs)?;
                Ok(status(&report))
            } else {
                let report = generate(&doc, &options, &mut LocalFs)?;
                print_summary(out, &report)?;
                Ok(status(&report))
            }
        }
        Commands::Resources { api } => {
            let doc = load_api_document(api)?;
            print_resources(out, &doc)?;
            Ok(RunStatus::Success)
        }
    }
}

fn generate(
    doc: &ApiDocument,
    options: &GenerateOptions,
    fs: &mut dyn FileSystem,
) -> anyhow::Result<ProjectReport> {
    generate_project_with_options(doc, options, fs).context("Generation failed")
}

fn status(report: &ProjectReport) -> RunStatus {
    if report.is_success() {
        RunStatus::Success
    } else {
        RunStatus::Incomplete
    }
}

fn print_summary(out: &mut dyn Write, report: &ProjectReport) -> anyhow::Result<()> {
    if let Some(shared) = report.shared.as_ref().filter(|s| !s.is_success()) {
        writeln!(
            out,
            "Shared files finished with {} failed file(s):",
            shared.failed.len()
        )?;
        for err in &shared.failed {
            writeln!(out, "  {err}")?;
        }
    }
    for outcome in &report.resources {
        if outcome.report.is_success() {
            writeln!(out, "{}", help::instructions(report.target, &outcome.context))?;
        } else {
            writeln!(
                out,
                "Generation of \"{}\" finished with {} failed file(s):",
                outcome.context.title,
                outcome.report.failed.len()
            )?;
            for err in &outcome.report.failed {
                writeln!(out, "  {err}")?;
            }
        }
    }
    for err in &report.failures {
        writeln!(out, "Skipped: {err}")?;
    }
    Ok(())
}

fn print_dry_run(
    out: &mut dyn Write,
    options: &GenerateOptions,
    report: &ProjectReport,
    fs: &DryRunFs,
) -> anyhow::Result<()> {
    writeln!(
        out,
        "Dry run: {} into {} (nothing was written)",
        report.target,
        options.output.display()
    )?;
    for dir in fs.dirs() {
        writeln!(out, "  mkdir     {}", dir.display())?;
    }
    if let Some(shared) = &report.shared {
        writeln!(out, "Shared files")?;
        print_report(out, shared)?;
    }
    for outcome in &report.resources {
        writeln!(out, "{} ({})", outcome.context.title, outcome.context.name)?;
        print_report(out, &outcome.report)?;
    }
    for err in &report.failures {
        writeln!(out, "Skipped: {err}")?;
    }
    Ok(())
}

fn print_report(out: &mut dyn Write, files: &GenerationReport) -> std::io::Result<()> {
    print_paths(out, "create", &files.created)?;
    print_paths(out, "overwrite", &files.overwritten)?;
    print_paths(out, "keep", &files.skipped)?;
    for err in &files.failed {
        writeln!(out, "  error     {err}")?;
    }
    Ok(())
}

fn print_paths(out: &mut dyn Write, action: &str, paths: &[PathBuf]) -> std::io::Result<()> {
    for path in paths {
        writeln!(out, "  {action:<9} {}", path.display())?;
    }
    Ok(())
}

fn print_resources(out: &mut dyn Write, doc: &ApiDocument) -> anyhow::Result<()> {
    writeln!(out, "{}: {} resource(s)", doc.title, doc.resources.len())?;
    let entrypoint = Entrypoint::default();
    for resource in &doc.resources {
        let ctx = resource_context(doc, resource, &entrypoint)?;
        writeln!(
            out,
            "  {:<20} {:<20} {} readable, {} writable, {} parameter(s)",
            ctx.name,
            resource.path,
            ctx.fields.len(),
            ctx.form_fields.len(),
            ctx.parameters.len()
        )?;
    }
    Ok(())
}

