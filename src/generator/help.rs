use super::context::GenerationContext;
use super::plan::Target;

const QUASAR_COMPONENTS: [&str; 23] = [
    "QTable",
    "QTh",
    "QTr",
    "QTd",
    "QBreadcrumbs",
    "QBreadcrumbsEl",
    "QSpace",
    "QInput",
    "QForm",
    "QSelect",
    "QMarkupTable",
    "QDate",
    "QTime",
    "QCheckbox",
    "QPopupProxy",
    "QSpinner",
    "QInnerLoading",
    "QCard",
    "QCardSection",
    "QCardActions",
    "QExpansionItem",
    "QDialog",
    "QAvatar",
];

/// Snippet the user pastes into their app to wire in the generated resource.
pub fn instructions(target: Target, ctx: &GenerationContext) -> String {
    match target {
        Target::Quasar => quasar(ctx),
        Target::Next => next(ctx),
    }
}

fn quasar(ctx: &GenerationContext) -> String {
    let lc = &ctx.lc;
    let components: String = QUASAR_COMPONENTS
        .iter()
        .map(|c| format!("  '{c}',\n"))
        .collect();

    format!(
        r#"Code for the "{title}" resource type has been generated!
Paste the following definitions in your application configuration:

// Add to quasar.conf
// 1. in 'framework.components'
{components}
// 2. in 'framework.config', customize later
notify: {{
  position: 'top',
  multiLine: true,
  timeout: 0,
}},

// 3. in 'framework.directives'
  'ClosePopup'

// 4. in 'framework.plugins'
  'Notify'

// import routes
import {lc}Routes from './router/{lc}';

// Add routes to VueRouter
const router = new VueRouter({{
  // ...
  routes: [
    ...{lc}Routes,
  ]
}});

// Add the modules in the store
import {lc} from './store/modules/{lc}/';

export const store = new Vuex.Store({{
  // ...
  modules: {{
    {lc}
  }}
}});

// Merge the resource labels into the vue-i18n messages
import {lc}Labels from './i18n/en-us/{lc}';

messages['en-us'] = {{ ...messages['en-us'], ...{lc}Labels }};
"#,
        title = ctx.title,
    )
}

fn next(ctx: &GenerationContext) -> String {
    format!(
        r#"Code for the "{title}" resource type has been generated!
The pages are available at:

  /{name}               list
  /{name}/create        create
  /{name}/[id]          show
  /{name}/[id]/edit     edit

Make sure `config/entrypoint.ts` points at your API ({url}).
"#,
        title = ctx.title,
        name = ctx.name,
        url = ctx.entrypoint.url,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Resource;
    use crate::generator::context::{build_context, Entrypoint};

    fn ctx() -> GenerationContext {
        let resource = Resource {
            title: "Book".to_string(),
            name: "books".to_string(),
            ..Default::default()
        };
        build_context(&resource, &[], vec![], vec![], Entrypoint::default())
    }

    #[test]
    fn test_quasar_instructions() {
        let text = instructions(Target::Quasar, &ctx());
        assert!(text.starts_with("Code for the \"Book\" resource type has been generated!"));
        assert!(text.contains("import bookRoutes from './router/book';"));
        assert!(text.contains("import book from './store/modules/book/';"));
        assert!(text.contains("  'QInnerLoading',\n"));
    }

    #[test]
    fn test_next_instructions() {
        let text = instructions(Target::Next, &ctx());
        assert!(text.contains("/books/[id]/edit"));
        assert!(text.contains("http://localhost"));
    }
}
