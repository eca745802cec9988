use super::context::GenerationContext;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Front-end stack a plan and its templates belong to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Quasar components with a Vuex store
    #[default]
    Quasar,
    /// Next.js pages
    #[serde(alias = "nextjs")]
    #[value(alias = "nextjs")]
    Next,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Quasar => "quasar",
            Target::Next => "next",
        }
    }

    /// The static file plan of this target.
    pub fn plan(&self) -> &'static FilePlan {
        match self {
            Target::Quasar => &QUASAR_PLAN,
            Target::Next => &NEXT_PLAN,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quasar" => Ok(Target::Quasar),
            "next" | "nextjs" => Ok(Target::Next),
            other => Err(anyhow::anyhow!(
                "unknown target `{other}` (expected `quasar` or `next`)"
            )),
        }
    }
}

/// When a file entry is part of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusion {
    Always,
    /// Only when the resource has at least one filter parameter
    HasParameters,
}

impl Inclusion {
    pub fn holds(&self, ctx: &GenerationContext) -> bool {
        match self {
            Inclusion::Always => true,
            Inclusion::HasParameters => !ctx.parameters.is_empty(),
        }
    }
}

/// What to do when the output file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Leave it alone; used for files shared by every resource
    KeepExisting,
    /// Replace it
    Overwrite,
}

/// One generated file: template id, output path pattern, inclusion and
/// write policy. Patterns may use `{lc}`, `{ucf}` and `{name}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileEntry {
    pub template: &'static str,
    pub path: &'static str,
    pub include: Inclusion,
    pub policy: WritePolicy,
}

/// One directory to create before any file is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry {
    pub path: &'static str,
    /// Log a warning when the directory is already there
    pub warn_if_exists: bool,
}

/// Static, ordered output table of one target.
///
/// The `shared_*` entries are written once per run; `dirs` and `files` are
/// written for every resource.
#[derive(Debug)]
pub struct FilePlan {
    pub shared_dirs: &'static [DirEntry],
    pub shared_files: &'static [FileEntry],
    pub dirs: &'static [DirEntry],
    pub files: &'static [FileEntry],
}

const fn dir(path: &'static str) -> DirEntry {
    DirEntry {
        path,
        warn_if_exists: false,
    }
}

const fn warn_dir(path: &'static str) -> DirEntry {
    DirEntry {
        path,
        warn_if_exists: true,
    }
}

const fn keep(template: &'static str, path: &'static str) -> FileEntry {
    FileEntry {
        template,
        path,
        include: Inclusion::Always,
        policy: WritePolicy::KeepExisting,
    }
}

const fn overwrite(template: &'static str, path: &'static str) -> FileEntry {
    FileEntry {
        template,
        path,
        include: Inclusion::Always,
        policy: WritePolicy::Overwrite,
    }
}

const fn with_parameters(entry: FileEntry) -> FileEntry {
    FileEntry {
        include: Inclusion::HasParameters,
        ..entry
    }
}

const QUASAR_NAMESPACE_INDEX: &str = "store/modules/foo/namespace.js";

static QUASAR_PLAN: FilePlan = FilePlan {
    shared_dirs: &[
        dir("config"),
        dir("error"),
        dir("router"),
        dir("utils"),
        dir("i18n"),
        dir("i18n/en-us"),
        warn_dir("components/common"),
    ],
    shared_files: &[
        keep("components/common/Breadcrumb.vue", "components/common/Breadcrumb.vue"),
        keep("error/SubmissionError.js", "error/SubmissionError.js"),
        keep("config/entrypoint.js", "config/entrypoint.js"),
        keep("utils/fetch.js", "utils/fetch.js"),
        keep("utils/dates.js", "utils/dates.js"),
        keep("utils/notify.js", "utils/notify.js"),
        keep("i18n/index.js", "i18n/en-us/index.js"),
    ],
    dirs: &[
        warn_dir("store/modules/{lc}"),
        warn_dir("store/modules/{lc}/create"),
        warn_dir("store/modules/{lc}/delete"),
        warn_dir("store/modules/{lc}/list"),
        warn_dir("store/modules/{lc}/show"),
        warn_dir("store/modules/{lc}/update"),
        warn_dir("components/{lc}"),
    ],
    files: &[
        overwrite("store/modules/foo/index.js", "store/modules/{lc}/index.js"),
        overwrite("store/modules/foo/create/actions.js", "store/modules/{lc}/create/actions.js"),
        overwrite("store/modules/foo/create/getters.js", "store/modules/{lc}/create/getters.js"),
        overwrite(QUASAR_NAMESPACE_INDEX, "store/modules/{lc}/create/index.js"),
        overwrite(
            "store/modules/foo/create/mutation_types.js",
            "store/modules/{lc}/create/mutation_types.js",
        ),
        overwrite("store/modules/foo/create/mutations.js", "store/modules/{lc}/create/mutations.js"),
        overwrite("store/modules/foo/create/state.js", "store/modules/{lc}/create/state.js"),
        overwrite("store/modules/foo/delete/actions.js", "store/modules/{lc}/delete/actions.js"),
        overwrite("store/modules/foo/delete/getters.js", "store/modules/{lc}/delete/getters.js"),
        overwrite(QUASAR_NAMESPACE_INDEX, "store/modules/{lc}/delete/index.js"),
        overwrite(
            "store/modules/foo/delete/mutation_types.js",
            "store/modules/{lc}/delete/mutation_types.js",
        ),
        overwrite("store/modules/foo/delete/mutations.js", "store/modules/{lc}/delete/mutations.js"),
        overwrite("store/modules/foo/delete/state.js", "store/modules/{lc}/delete/state.js"),
        overwrite("store/modules/foo/list/actions.js", "store/modules/{lc}/list/actions.js"),
        overwrite("store/modules/foo/list/getters.js", "store/modules/{lc}/list/getters.js"),
        overwrite(QUASAR_NAMESPACE_INDEX, "store/modules/{lc}/list/index.js"),
        overwrite(
            "store/modules/foo/list/mutation_types.js",
            "store/modules/{lc}/list/mutation_types.js",
        ),
        overwrite("store/modules/foo/list/mutations.js", "store/modules/{lc}/list/mutations.js"),
        overwrite("store/modules/foo/list/state.js", "store/modules/{lc}/list/state.js"),
        overwrite("store/modules/foo/show/actions.js", "store/modules/{lc}/show/actions.js"),
        overwrite("store/modules/foo/show/getters.js", "store/modules/{lc}/show/getters.js"),
        overwrite(QUASAR_NAMESPACE_INDEX, "store/modules/{lc}/show/index.js"),
        overwrite(
            "store/modules/foo/show/mutation_types.js",
            "store/modules/{lc}/show/mutation_types.js",
        ),
        overwrite("store/modules/foo/show/mutations.js", "store/modules/{lc}/show/mutations.js"),
        overwrite("store/modules/foo/show/state.js", "store/modules/{lc}/show/state.js"),
        overwrite("store/modules/foo/update/actions.js", "store/modules/{lc}/update/actions.js"),
        overwrite("store/modules/foo/update/getters.js", "store/modules/{lc}/update/getters.js"),
        overwrite(QUASAR_NAMESPACE_INDEX, "store/modules/{lc}/update/index.js"),
        overwrite(
            "store/modules/foo/update/mutation_types.js",
            "store/modules/{lc}/update/mutation_types.js",
        ),
        overwrite("store/modules/foo/update/mutations.js", "store/modules/{lc}/update/mutations.js"),
        overwrite("store/modules/foo/update/state.js", "store/modules/{lc}/update/state.js"),
        overwrite("components/foo/Create.vue", "components/{lc}/Create.vue"),
        with_parameters(overwrite("components/foo/Filter.vue", "components/{lc}/Filter.vue")),
        overwrite("components/foo/Form.vue", "components/{lc}/Form.vue"),
        overwrite("components/foo/List.vue", "components/{lc}/List.vue"),
        overwrite("components/foo/Update.vue", "components/{lc}/Update.vue"),
        overwrite("components/foo/Show.vue", "components/{lc}/Show.vue"),
        overwrite("router/foo.js", "router/{lc}.js"),
        overwrite("i18n/resource.js", "i18n/en-us/{lc}.js"),
    ],
};

static NEXT_PLAN: FilePlan = FilePlan {
    shared_dirs: &[dir("config"), dir("types"), dir("utils"), dir("components/common")],
    shared_files: &[
        keep("config/entrypoint.ts", "config/entrypoint.ts"),
        keep("utils/dataAccess.ts", "utils/dataAccess.ts"),
        keep("types/Collection.ts", "types/Collection.ts"),
        keep("components/common/ReferenceLinks.tsx", "components/common/ReferenceLinks.tsx"),
    ],
    dirs: &[
        warn_dir("components/{lc}"),
        warn_dir("pages/{name}"),
        warn_dir("pages/{name}/[id]"),
    ],
    files: &[
        overwrite("components/foo/List.tsx", "components/{lc}/List.tsx"),
        overwrite("components/foo/Show.tsx", "components/{lc}/Show.tsx"),
        overwrite("components/foo/Form.tsx", "components/{lc}/Form.tsx"),
        with_parameters(overwrite("components/foo/Filter.tsx", "components/{lc}/Filter.tsx")),
        overwrite("types/foo.ts", "types/{ucf}.ts"),
        overwrite("pages/foos/index.tsx", "pages/{name}/index.tsx"),
        overwrite("pages/foos/create.tsx", "pages/{name}/create.tsx"),
        overwrite("pages/foos/[id]/index.tsx", "pages/{name}/[id]/index.tsx"),
        overwrite("pages/foos/[id]/edit.tsx", "pages/{name}/[id]/edit.tsx"),
    ],
};

/// Values substituted into path patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTokens {
    pub lc: String,
    pub ucf: String,
    pub name: String,
}

impl PathTokens {
    pub fn from_context(ctx: &GenerationContext) -> Self {
        Self {
            lc: ctx.lc.clone(),
            ucf: ctx.ucf.clone(),
            name: ctx.name.clone(),
        }
    }

    pub fn substitute(&self, pattern: &str) -> String {
        pattern
            .replace("{lc}", &self.lc)
            .replace("{ucf}", &self.ucf)
            .replace("{name}", &self.name)
    }
}

/// One resolved step of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedOp {
    CreateDir {
        path: PathBuf,
        warn_if_exists: bool,
    },
    Render {
        template: &'static str,
        path: PathBuf,
        policy: WritePolicy,
    },
}

/// Directories and files of one resource, or of the shared part of a run,
/// resolved before any I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    /// Resource title, or [`SHARED_PLAN`] for the run-wide files
    pub resource: String,
    pub ops: Vec<PlannedOp>,
    /// Files left out because their inclusion predicate did not hold
    pub skipped: Vec<PathBuf>,
}

impl GenerationPlan {
    /// Upgrade every render to [`WritePolicy::Overwrite`].
    pub fn force_overwrite(mut self) -> Self {
        for op in &mut self.ops {
            if let PlannedOp::Render { policy, .. } = op {
                *policy = WritePolicy::Overwrite;
            }
        }
        self
    }

    pub fn dirs(&self) -> impl Iterator<Item = &Path> {
        self.ops.iter().filter_map(|op| match op {
            PlannedOp::CreateDir { path, .. } => Some(path.as_path()),
            PlannedOp::Render { .. } => None,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.ops.iter().filter_map(|op| match op {
            PlannedOp::Render { path, .. } => Some(path.as_path()),
            PlannedOp::CreateDir { .. } => None,
        })
    }
}

/// Label of the plan holding the run-wide files.
pub const SHARED_PLAN: &str = "shared";

/// Resolve the per-resource part of a file plan: directories first, then
/// files, in table order. Pure; nothing touches the disk.
pub fn plan_generation(
    plan: &FilePlan,
    tokens: &PathTokens,
    ctx: &GenerationContext,
    root: &Path,
) -> GenerationPlan {
    resolve_entries(&ctx.title, plan.dirs, plan.files, tokens, ctx, root)
}

/// Resolve the run-wide part of a file plan. The shared templates only
/// read run-wide context values (entrypoint, labels, API prefix), so any
/// resource's context renders them identically.
pub fn plan_shared(plan: &FilePlan, ctx: &GenerationContext, root: &Path) -> GenerationPlan {
    let tokens = PathTokens::from_context(ctx);
    resolve_entries(SHARED_PLAN, plan.shared_dirs, plan.shared_files, &tokens, ctx, root)
}

fn resolve_entries(
    label: &str,
    dirs: &[DirEntry],
    files: &[FileEntry],
    tokens: &PathTokens,
    ctx: &GenerationContext,
    root: &Path,
) -> GenerationPlan {
    let mut ops = Vec::with_capacity(dirs.len() + files.len());
    let mut skipped = Vec::new();

    for dir in dirs {
        ops.push(PlannedOp::CreateDir {
            path: root.join(tokens.substitute(dir.path)),
            warn_if_exists: dir.warn_if_exists,
        });
    }

    for file in files {
        let path = root.join(tokens.substitute(file.path));
        if !file.include.holds(ctx) {
            tracing::debug!(
                resource = label,
                template = file.template,
                path = %path.display(),
                "skipping file, inclusion condition not met"
            );
            skipped.push(path);
            continue;
        }
        ops.push(PlannedOp::Render {
            template: file.template,
            path,
            policy: file.policy,
        });
    }

    GenerationPlan {
        resource: label.to_string(),
        ops,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Resource;
    use crate::generator::context::{build_context, Entrypoint};
    use crate::generator::fields::Parameter;

    fn book(params: &[Parameter]) -> GenerationContext {
        let resource = Resource {
            title: "Book".to_string(),
            name: "books".to_string(),
            path: "/books".to_string(),
            ..Default::default()
        };
        build_context(&resource, params, vec![], vec![], Entrypoint::default())
    }

    fn planned(target: Target, ctx: &GenerationContext) -> GenerationPlan {
        plan_generation(target.plan(), &PathTokens::from_context(ctx), ctx, Path::new("out"))
    }

    #[test]
    fn test_filter_skipped_without_parameters() {
        let ctx = book(&[]);
        let plan = planned(Target::Quasar, &ctx);
        assert!(!plan.files().any(|p| p.ends_with("Filter.vue")));
        assert_eq!(plan.skipped, vec![PathBuf::from("out/components/book/Filter.vue")]);

        let ctx = book(&[Parameter::new("title")]);
        let plan = planned(Target::Quasar, &ctx);
        assert!(plan.files().any(|p| p == Path::new("out/components/book/Filter.vue")));
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn test_quasar_artifact_set() {
        let ctx = book(&[]);
        let plan = planned(Target::Quasar, &ctx);
        let shared = plan_shared(Target::Quasar.plan(), &ctx, Path::new("out"));
        assert_eq!(plan.dirs().count(), 7);
        // 31 store + 5 components + router + resource labels
        assert_eq!(plan.files().count(), 38);
        assert_eq!(shared.dirs().count(), 7);
        assert_eq!(shared.files().count(), 7);
        assert!(shared.files().any(|p| p == Path::new("out/utils/fetch.js")));
        for ns in ["create", "delete", "list", "show", "update"] {
            for file in ["actions", "getters", "index", "mutation_types", "mutations", "state"] {
                let expected = PathBuf::from(format!("out/store/modules/book/{ns}/{file}.js"));
                assert!(plan.files().any(|p| p == expected), "missing {}", expected.display());
            }
        }
        assert!(plan.files().any(|p| p == Path::new("out/router/book.js")));
        assert!(plan.files().any(|p| p == Path::new("out/i18n/en-us/book.js")));
    }

    #[test]
    fn test_directories_come_first() {
        let ctx = book(&[]);
        let plan = planned(Target::Next, &ctx);
        let first_render = plan
            .ops
            .iter()
            .position(|op| matches!(op, PlannedOp::Render { .. }))
            .unwrap();
        assert!(plan.ops[first_render..]
            .iter()
            .all(|op| matches!(op, PlannedOp::Render { .. })));
        assert!(plan.dirs().any(|p| p == Path::new("out/pages/books/[id]")));
        assert!(plan.files().any(|p| p == Path::new("out/types/Book.ts")));
    }

    #[test]
    fn test_shared_plan_is_resource_independent() {
        let review = build_context(
            &Resource {
                title: "Review".to_string(),
                name: "reviews".to_string(),
                path: "/reviews".to_string(),
                ..Default::default()
            },
            &[Parameter::new("rating")],
            vec![],
            vec![],
            Entrypoint::default(),
        );
        for target in [Target::Quasar, Target::Next] {
            let a = plan_shared(target.plan(), &book(&[]), Path::new("out"));
            let b = plan_shared(target.plan(), &review, Path::new("out"));
            assert_eq!(a, b);
            assert_eq!(a.resource, SHARED_PLAN);
            assert!(a.skipped.is_empty());

            let resource = planned(target, &review);
            for op in &a.ops {
                assert!(!resource.ops.contains(op), "{op:?} planned twice");
            }
        }
    }

    #[test]
    fn test_write_policies() {
        let ctx = book(&[]);
        let mut plan = planned(Target::Quasar, &ctx);
        plan.ops
            .extend(plan_shared(Target::Quasar.plan(), &ctx, Path::new("out")).ops);
        let policy_of = |suffix: &str| {
            plan.ops.iter().find_map(|op| match op {
                PlannedOp::Render { path, policy, .. } if path.ends_with(suffix) => Some(*policy),
                _ => None,
            })
        };
        assert_eq!(policy_of("common/Breadcrumb.vue"), Some(WritePolicy::KeepExisting));
        assert_eq!(policy_of("en-us/index.js"), Some(WritePolicy::KeepExisting));
        assert_eq!(policy_of("book/List.vue"), Some(WritePolicy::Overwrite));

        let forced = plan.clone().force_overwrite();
        assert!(forced.ops.iter().all(|op| match op {
            PlannedOp::Render { policy, .. } => *policy == WritePolicy::Overwrite,
            PlannedOp::CreateDir { .. } => true,
        }));
    }

    #[test]
    fn test_path_tokens() {
        let tokens = PathTokens {
            lc: "book".to_string(),
            ucf: "Book".to_string(),
            name: "books".to_string(),
        };
        assert_eq!(tokens.substitute("pages/{name}/[id]/edit.tsx"), "pages/books/[id]/edit.tsx");
        assert_eq!(tokens.substitute("types/{ucf}.ts"), "types/Book.ts");
        assert_eq!(tokens.substitute("router/{lc}.js"), "router/book.js");
    }

    #[test]
    fn test_target_parsing() {
        assert_eq!("quasar".parse::<Target>().unwrap(), Target::Quasar);
        assert_eq!("Next".parse::<Target>().unwrap(), Target::Next);
        assert!("angular".parse::<Target>().is_err());
    }
}
