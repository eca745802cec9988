use std::path::{Path, PathBuf};

use crate::api::{ApiDocument, ParameterSource, Resource};
use crate::generator::context::{build_context, Entrypoint, GenerationContext};
use crate::generator::error::GenerateError;
use crate::generator::fields::{build_fields, Parameter};
use crate::generator::fs::{DirOutcome, FileSystem, WriteOutcome};
use crate::generator::params::normalize_parameters;
use crate::generator::plan::{
    plan_generation, plan_shared, GenerationPlan, PathTokens, PlannedOp, Target, WritePolicy,
};
use crate::generator::templates::TemplateRegistry;

/// Knobs of one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Root of the front-end source tree
    pub output: PathBuf,
    pub target: Target,
    /// Only generate these resources (name or title); all when empty
    pub resources: Vec<String>,
    /// API root; taken from the document when not set
    pub entrypoint: Option<Entrypoint>,
    /// Overwrite every file, shared ones included
    pub force: bool,
}

/// Files touched while executing one plan.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub created: Vec<PathBuf>,
    pub overwritten: Vec<PathBuf>,
    /// Existing files left untouched
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<GenerateError>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, path: PathBuf, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Created => self.created.push(path),
            WriteOutcome::Overwritten => self.overwritten.push(path),
            WriteOutcome::Skipped => self.skipped.push(path),
        }
    }
}

/// Generation result of one resource.
#[derive(Debug)]
pub struct ResourceOutcome {
    pub context: GenerationContext,
    pub report: GenerationReport,
}

/// Generation result of a whole run.
#[derive(Debug)]
pub struct ProjectReport {
    pub target: Target,
    /// Run-wide files; `None` when no resource could be generated
    pub shared: Option<GenerationReport>,
    pub resources: Vec<ResourceOutcome>,
    /// Resources that could not be read from the API document
    pub failures: Vec<GenerateError>,
}

impl ProjectReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
            && self.shared.as_ref().map_or(true, GenerationReport::is_success)
            && self.resources.iter().all(|r| r.report.is_success())
    }

    pub fn failed_files(&self) -> usize {
        let shared = self.shared.as_ref().map_or(0, |s| s.failed.len());
        shared + self.resources.iter().map(|r| r.report.failed.len()).sum::<usize>()
    }
}

/// Execute a resolved plan against `fs`.
///
/// Best-effort: a failed directory, render or write is logged, recorded in
/// the report and the remaining operations still run.
pub fn execute_plan(
    plan: &GenerationPlan,
    registry: &TemplateRegistry,
    ctx: &GenerationContext,
    fs: &mut dyn FileSystem,
) -> GenerationReport {
    let mut report = GenerationReport::default();

    for op in &plan.ops {
        match op {
            PlannedOp::CreateDir {
                path,
                warn_if_exists,
            } => match fs.ensure_dir(path) {
                Ok(DirOutcome::Existed) if *warn_if_exists => {
                    tracing::warn!(
                        resource = %plan.resource,
                        path = %path.display(),
                        "directory already exists"
                    );
                }
                Ok(_) => {}
                Err(source) => {
                    let err = GenerateError::Io {
                        resource: plan.resource.clone(),
                        path: absolute(path),
                        source,
                    };
                    tracing::error!(resource = %plan.resource, path = %path.display(), error = %err, "failed to create directory");
                    report.failed.push(err);
                }
            },
            PlannedOp::Render {
                template,
                path,
                policy,
            } => {
                let contents = match registry.render(template, ctx) {
                    Ok(contents) => contents,
                    Err(source) => {
                        let err = GenerateError::Render {
                            resource: plan.resource.clone(),
                            template: (*template).to_string(),
                            path: absolute(path),
                            source,
                        };
                        tracing::error!(
                            resource = %plan.resource,
                            template,
                            path = %absolute(path).display(),
                            error = %err,
                            "failed to render template"
                        );
                        report.failed.push(err);
                        continue;
                    }
                };

                let overwrite = *policy == WritePolicy::Overwrite;
                match fs.write_file(path, &contents, overwrite) {
                    Ok(outcome) => {
                        match outcome {
                            WriteOutcome::Skipped => tracing::warn!(
                                resource = %plan.resource,
                                path = %path.display(),
                                "file already exists, keeping it"
                            ),
                            WriteOutcome::Created | WriteOutcome::Overwritten => tracing::info!(
                                resource = %plan.resource,
                                template,
                                path = %path.display(),
                                outcome = ?outcome,
                                "wrote file"
                            ),
                        }
                        report.record(path.clone(), outcome);
                    }
                    Err(source) => {
                        let err = GenerateError::Io {
                            resource: plan.resource.clone(),
                            path: absolute(path),
                            source,
                        };
                        tracing::error!(
                            resource = %plan.resource,
                            template,
                            path = %absolute(path).display(),
                            error = %err,
                            "failed to write file"
                        );
                        report.failed.push(err);
                    }
                }
            }
        }
    }

    report
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Normalize the parameters of `resource` and assemble its context.
pub fn resource_context(
    source: &dyn ParameterSource,
    resource: &Resource,
    entrypoint: &Entrypoint,
) -> Result<GenerationContext, GenerateError> {
    let raw = source
        .parameters(resource)
        .map_err(|source| GenerateError::Upstream {
            resource: resource.title.clone(),
            source,
        })?;
    let params = normalize_parameters(raw.iter().map(Parameter::from).collect());
    Ok(build_context(
        resource,
        &params,
        build_fields(&resource.readable_fields),
        build_fields(&resource.writable_fields),
        entrypoint.clone(),
    ))
}

/// Plan and execute the file tree of one resource.
pub fn generate_resource(
    source: &dyn ParameterSource,
    resource: &Resource,
    registry: &TemplateRegistry,
    options: &GenerateOptions,
    entrypoint: &Entrypoint,
    fs: &mut dyn FileSystem,
) -> Result<ResourceOutcome, GenerateError> {
    let context = resource_context(source, resource, entrypoint)?;
    let tokens = PathTokens::from_context(&context);
    let mut plan = plan_generation(options.target.plan(), &tokens, &context, &options.output);
    if options.force {
        plan = plan.force_overwrite();
    }
    tracing::debug!(
        resource = %context.title,
        operations = plan.ops.len(),
        omitted = plan.skipped.len(),
        "planned resource"
    );

    let report = execute_plan(&plan, registry, &context, fs);
    Ok(ResourceOutcome { context, report })
}

/// Plan and execute the run-wide files once, rendered with `context`.
pub fn generate_shared(
    registry: &TemplateRegistry,
    options: &GenerateOptions,
    context: &GenerationContext,
    fs: &mut dyn FileSystem,
) -> GenerationReport {
    let mut plan = plan_shared(options.target.plan(), context, &options.output);
    if options.force {
        plan = plan.force_overwrite();
    }
    tracing::debug!(operations = plan.ops.len(), "planned shared files");
    execute_plan(&plan, registry, context, fs)
}

/// Resolve `--resource` filters against the document; all resources when
/// no filter is given.
pub fn select_resources<'a>(
    doc: &'a ApiDocument,
    filters: &[String],
) -> Result<Vec<&'a Resource>, GenerateError> {
    if filters.is_empty() {
        return Ok(doc.resources.iter().collect());
    }
    filters
        .iter()
        .map(|key| {
            doc.resource(key)
                .ok_or_else(|| GenerateError::UnknownResource(key.clone()))
        })
        .collect()
}

/// Entrypoint of a run: the explicit one, else the document's, else the
/// default.
pub fn resolve_entrypoint(doc: &ApiDocument, explicit: Option<&Entrypoint>) -> Entrypoint {
    if let Some(entrypoint) = explicit {
        return entrypoint.clone();
    }
    match doc.entrypoint.as_deref().map(Entrypoint::resolve) {
        Some(Ok(entrypoint)) => entrypoint,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "ignoring unusable server URL in the API document");
            Entrypoint::default()
        }
        None => Entrypoint::default(),
    }
}

/// Generate every selected resource of `doc` into `options.output`.
///
/// Template and filter errors abort the run before anything is written. A
/// resource whose parameters cannot be read is reported and skipped; the
/// next one still runs. Shared files are written once, after the first
/// resource that could be generated.
pub fn generate_project_with_options(
    doc: &ApiDocument,
    options: &GenerateOptions,
    fs: &mut dyn FileSystem,
) -> Result<ProjectReport, GenerateError> {
    let registry = TemplateRegistry::for_target(options.target)?;
    let selected = select_resources(doc, &options.resources)?;
    let entrypoint = resolve_entrypoint(doc, options.entrypoint.as_ref());
    tracing::info!(
        target_stack = %registry.target(),
        resources = selected.len(),
        output = %options.output.display(),
        entrypoint = %entrypoint.url,
        "generating"
    );

    let mut project = ProjectReport {
        target: registry.target(),
        shared: None,
        resources: Vec::with_capacity(selected.len()),
        failures: Vec::new(),
    };
    for resource in selected {
        match generate_resource(doc, resource, &registry, options, &entrypoint, fs) {
            Ok(outcome) => {
                if project.shared.is_none() {
                    project.shared =
                        Some(generate_shared(&registry, options, &outcome.context, fs));
                }
                project.resources.push(outcome);
            }
            Err(err) => {
                tracing::error!(resource = %resource.title, error = %err, "skipping resource");
                project.failures.push(err);
            }
        }
    }
    Ok(project)
}
