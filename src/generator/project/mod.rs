mod generate;

pub use generate::{
    execute_plan, generate_project_with_options, generate_resource, generate_shared,
    resolve_entrypoint, resource_context, select_resources, GenerateOptions, GenerationReport,
    ProjectReport, ResourceOutcome,
};
