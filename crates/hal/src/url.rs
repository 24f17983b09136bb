//! URL template resolution.
//!
//! Identifier values are substituted into `{placeholder}` templates by three
//! passes, tried in order. The first pass that changes the template wins; if
//! none does, the template is considered unresolved and no link is emitted.
//!
//! | Pass | Placeholder | Replacement |
//! |------|-------------|-------------|
//! | literal | `{postId}` for each id property | that property's value |
//! | alias | `{Message}`, `{message}`, `{message}` (snake), literal | all values joined by `,` |
//! | type name | same forms built from the short type name | all values joined by `,` |

use crate::case::{camel_to_snake, lower_first_camel, snake_to_pascal};
use crate::mapping::Mapping;
use crate::node::Fields;

/// Separator between identifier values substituted into a single placeholder.
pub const ID_SEPARATOR: &str = ",";

/// Identifier names and values of one resource, aligned by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identifiers {
    pub names: Vec<String>,
    pub values: Vec<String>,
}

impl Identifiers {
    /// Reads a resource's identifier values in mapping order.
    ///
    /// Each id property is looked up under its renamed field name first, then
    /// under its own name. Value objects are unwrapped to their first scalar.
    /// Properties that are absent or null are left out.
    pub fn collect(mapping: &Mapping, fields: &Fields) -> Self {
        let mut ids = Self::default();
        for property in mapping.id_properties() {
            let value = fields
                .get(mapping.property_name(property))
                .or_else(|| fields.get(property.as_str()))
                .and_then(|node| node.first_scalar())
                .and_then(|scalar| scalar.to_template_value());
            if let Some(value) = value {
                ids.names.push(property.clone());
                ids.values.push(value);
            }
        }
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Everything a pass may consult.
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    pub ids: &'a Identifiers,
    pub class_alias: Option<&'a str>,
    pub short_name: &'a str,
}

impl<'a> TemplateContext<'a> {
    pub fn new(mapping: &'a Mapping, ids: &'a Identifiers) -> Self {
        Self {
            ids,
            class_alias: mapping.class_alias(),
            short_name: mapping.short_name(),
        }
    }
}

/// A substitution pass. Returns `Some` only when the template changed.
pub type Strategy = fn(&str, &TemplateContext<'_>) -> Option<String>;

/// The passes in the order they are tried.
pub const STRATEGIES: [Strategy; 3] = [literal_pass, alias_pass, type_name_pass];

/// Resolves a template, returning `None` when no pass changed it.
///
/// ```
/// use helios_hal::mapping::Mapping;
/// use helios_hal::url::{Identifiers, TemplateContext, resolve};
///
/// let mapping = Mapping::new("Post", "/posts/{postId}", ["postId"]);
/// let ids = Identifiers { names: vec!["postId".into()], values: vec!["9".into()] };
/// let ctx = TemplateContext::new(&mapping, &ids);
/// assert_eq!(resolve("/posts/{postId}", &ctx).as_deref(), Some("/posts/9"));
/// assert_eq!(resolve("/posts", &ctx), None);
/// ```
pub fn resolve(template: &str, ctx: &TemplateContext<'_>) -> Option<String> {
    STRATEGIES.iter().find_map(|pass| pass(template, ctx))
}

fn changed(template: &str, output: String) -> Option<String> {
    (output != template).then_some(output)
}

/// Replaces `{name}` with its value for every identifier.
pub fn literal_pass(template: &str, ctx: &TemplateContext<'_>) -> Option<String> {
    let output = ctx
        .ids
        .names
        .iter()
        .zip(&ctx.ids.values)
        .fold(template.to_string(), |url, (name, value)| {
            url.replace(&format!("{{{}}}", name), value)
        });
    changed(template, output)
}

/// Replaces a placeholder built from the class alias with the joined values.
pub fn alias_pass(template: &str, ctx: &TemplateContext<'_>) -> Option<String> {
    ctx.class_alias
        .and_then(|alias| name_pass(alias, template, &ctx.ids.values))
}

/// Replaces a placeholder built from the short type name with the joined values.
pub fn type_name_pass(template: &str, ctx: &TemplateContext<'_>) -> Option<String> {
    name_pass(ctx.short_name, template, &ctx.ids.values)
}

/// Tries `{PascalCase}`, `{lowerCamel}`, `{snake_case}` and the literal form
/// of `name`, first match wins.
fn name_pass(name: &str, template: &str, values: &[String]) -> Option<String> {
    if name.is_empty() || values.is_empty() {
        return None;
    }
    let joined = values.join(ID_SEPARATOR);
    let snake = camel_to_snake(name);
    let forms = [
        snake_to_pascal(&snake),
        lower_first_camel(&snake),
        snake,
        name.to_string(),
    ];
    forms.iter().find_map(|form| {
        let output = template.replace(&format!("{{{}}}", form), &joined);
        changed(template, output)
    })
}
