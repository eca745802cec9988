use minijinja::syntax::SyntaxConfig;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};

use super::context::GenerationContext;
use super::error::GenerateError;
use super::plan::Target;
use super::switch::expand_switch_blocks;

/// Embed `templates/<target>/<id>` for every listed id.
macro_rules! embed_templates {
    ($target:literal, [$($id:literal),* $(,)?]) => {
        &[$(($id, include_str!(concat!("../../templates/", $target, "/", $id)))),*]
    };
}

static QUASAR_TEMPLATES: &[(&str, &str)] = embed_templates!(
    "quasar",
    [
        "components/common/Breadcrumb.vue",
        "components/foo/Create.vue",
        "components/foo/Filter.vue",
        "components/foo/Form.vue",
        "components/foo/List.vue",
        "components/foo/Show.vue",
        "components/foo/Update.vue",
        "config/entrypoint.js",
        "error/SubmissionError.js",
        "i18n/index.js",
        "i18n/resource.js",
        "router/foo.js",
        "store/modules/foo/index.js",
        "store/modules/foo/namespace.js",
        "store/modules/foo/create/actions.js",
        "store/modules/foo/create/getters.js",
        "store/modules/foo/create/mutation_types.js",
        "store/modules/foo/create/mutations.js",
        "store/modules/foo/create/state.js",
        "store/modules/foo/delete/actions.js",
        "store/modules/foo/delete/getters.js",
        "store/modules/foo/delete/mutation_types.js",
        "store/modules/foo/delete/mutations.js",
        "store/modules/foo/delete/state.js",
        "store/modules/foo/list/actions.js",
        "store/modules/foo/list/getters.js",
        "store/modules/foo/list/mutation_types.js",
        "store/modules/foo/list/mutations.js",
        "store/modules/foo/list/state.js",
        "store/modules/foo/show/actions.js",
        "store/modules/foo/show/getters.js",
        "store/modules/foo/show/mutation_types.js",
        "store/modules/foo/show/mutations.js",
        "store/modules/foo/show/state.js",
        "store/modules/foo/update/actions.js",
        "store/modules/foo/update/getters.js",
        "store/modules/foo/update/mutation_types.js",
        "store/modules/foo/update/mutations.js",
        "store/modules/foo/update/state.js",
        "utils/dates.js",
        "utils/fetch.js",
        "utils/notify.js",
    ]
);

static NEXT_TEMPLATES: &[(&str, &str)] = embed_templates!(
    "next",
    [
        "components/common/ReferenceLinks.tsx",
        "components/foo/Filter.tsx",
        "components/foo/Form.tsx",
        "components/foo/List.tsx",
        "components/foo/Show.tsx",
        "config/entrypoint.ts",
        "pages/foos/index.tsx",
        "pages/foos/create.tsx",
        "pages/foos/[id]/index.tsx",
        "pages/foos/[id]/edit.tsx",
        "types/Collection.ts",
        "types/foo.ts",
        "utils/dataAccess.ts",
    ]
);

/// Embedded `(id, source)` pairs of a target.
pub fn embedded_templates(target: Target) -> &'static [(&'static str, &'static str)] {
    match target {
        Target::Quasar => QUASAR_TEMPLATES,
        Target::Next => NEXT_TEMPLATES,
    }
}

/// Block tags stay Jinja-like; variables use `[[ ]]` so that Vue and JSX
/// `{{ }}` reach the output verbatim.
fn syntax() -> Result<SyntaxConfig, minijinja::Error> {
    SyntaxConfig::builder()
        .block_delimiters("{%", "%}")
        .variable_delimiters("[[", "]]")
        .comment_delimiters("{#", "#}")
        .build()
}

fn ucfirst(value: String) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => value,
    }
}

/// All templates of one target, compiled and ready to render.
#[derive(Debug)]
pub struct TemplateRegistry {
    target: Target,
    env: Environment<'static>,
}

impl TemplateRegistry {
    /// Build the registry from the embedded sources of `target`.
    pub fn for_target(target: Target) -> Result<Self, GenerateError> {
        Self::from_sources(target, embedded_templates(target).iter().copied())
    }

    /// Build a registry from arbitrary sources. Every source goes through
    /// switch expansion and is compiled up front, so syntax errors surface
    /// here and not halfway through a run.
    pub fn from_sources<'a>(
        target: Target,
        sources: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, GenerateError> {
        let mut env = Environment::new();
        env.set_syntax(syntax().map_err(|e| GenerateError::Template {
            template: "<syntax>".to_string(),
            source: e.into(),
        })?);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.add_filter("ucfirst", ucfirst);

        for (id, source) in sources {
            let expanded = expand_switch_blocks(source).map_err(|e| GenerateError::Template {
                template: id.to_string(),
                source: e.into(),
            })?;
            env.add_template_owned(id.to_string(), expanded)
                .map_err(|e| GenerateError::Template {
                    template: id.to_string(),
                    source: e.into(),
                })?;
            tracing::trace!(frontend = %target, template = id, "registered template");
        }

        Ok(Self { target, env })
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn contains(&self, id: &str) -> bool {
        self.env.get_template(id).is_ok()
    }

    /// Render template `id` with the resource context.
    pub fn render(&self, id: &str, ctx: &GenerationContext) -> Result<String, minijinja::Error> {
        self.env.get_template(id)?.render(ctx)
    }
}
