//! # Script Templates
//!
//! Starter scripts offered when attaching a new script to a node.
//!
//! A template is source text with an optional header of `// meta-KEY: VALUE`
//! lines followed by a body containing placeholders:
//!
//! | Placeholder            | Replaced with                      |
//! |------------------------|------------------------------------|
//! | `_BINDINGS_NAMESPACE_` | path of the bindings crate         |
//! | `_CLASS_`              | name of the new script class       |
//! | `_BASE_`               | native class the script extends    |
//!
//! Recognised header keys are `description`, `name` and `default`.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{TemplateError, TemplateResult};

const META_PREFIX: &str = "// meta-";

const NAMESPACE_PLACEHOLDER: &str = "_BINDINGS_NAMESPACE_";
const CLASS_PLACEHOLDER: &str = "_CLASS_";
const BASE_PLACEHOLDER: &str = "_BASE_";

const BUILTIN_SOURCES: &[(&str, &str, &str)] = &[
    (
        "CharacterBody3D",
        "basic_movement",
        include_str!("../templates/CharacterBody3D/basic_movement.rs.tmpl"),
    ),
    ("Node", "empty", include_str!("../templates/Node/empty.rs.tmpl")),
];

/// Names substituted into a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateContext<'a> {
    /// Path of the bindings crate, e.g. `meridian`.
    pub bindings_namespace: &'a str,
    /// Name of the class being created.
    pub class_name: &'a str,
    /// Native class it extends.
    pub base_class: &'a str,
}

impl<'a> TemplateContext<'a> {
    /// Context using this crate as the bindings namespace.
    #[must_use]
    pub fn new(class_name: &'a str, base_class: &'a str) -> Self {
        Self {
            bindings_namespace: "meridian",
            class_name,
            base_class,
        }
    }
}

/// A parsed script template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTemplate {
    base_class: String,
    name: String,
    description: String,
    is_default: bool,
    body: String,
}

impl ScriptTemplate {
    /// Parses `source`, registered for `base_class` under `name`.
    ///
    /// A `// meta-name:` header overrides `name`. Header lines are removed
    /// from the body, as are blank lines directly after them.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MalformedHeader`] for a header line without
    /// a `:`, an unknown key, or a `default` value other than `true`/`false`.
    pub fn parse(base_class: &str, name: &str, source: &str) -> TemplateResult<Self> {
        let mut template = Self {
            base_class: base_class.to_owned(),
            name: name.to_owned(),
            description: String::new(),
            is_default: false,
            body: String::new(),
        };

        let mut lines = source.lines().enumerate().peekable();
        while let Some((index, line)) = lines.next_if(|(_, l)| l.starts_with(META_PREFIX)) {
            template.apply_header(index + 1, &line[META_PREFIX.len()..])?;
        }
        while lines.next_if(|(_, l)| l.trim().is_empty()).is_some() {}

        let body: Vec<&str> = lines.map(|(_, l)| l).collect();
        template.body = body.join("\n");
        if source.ends_with('\n') {
            template.body.push('\n');
        }
        Ok(template)
    }

    fn apply_header(&mut self, line: usize, entry: &str) -> TemplateResult<()> {
        let malformed = |reason: String| TemplateError::MalformedHeader { line, reason };

        let (key, value) = entry
            .split_once(':')
            .ok_or_else(|| malformed(format!("expected `meta-KEY: VALUE`, got `meta-{entry}`")))?;
        let value = value.trim();
        match key.trim() {
            "description" => self.description = value.to_owned(),
            "name" => self.name = value.to_owned(),
            "default" => {
                self.is_default = value
                    .parse()
                    .map_err(|_| malformed(format!("`default` must be true or false, got `{value}`")))?;
            }
            other => return Err(malformed(format!("unknown header key `{other}`"))),
        }
        Ok(())
    }

    /// Native class this template is offered for.
    #[must_use]
    pub fn base_class(&self) -> &str {
        &self.base_class
    }

    /// Template name, unique per base class.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registry key, `Base/name`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}/{}", self.base_class, self.name)
    }

    /// One-line summary shown in the picker.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Pre-selected for its base class?
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Template text without the header.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Substitutes the context into the body.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::EmptyClassName`] for an empty class name and
    /// [`TemplateError::InvalidIdentifier`] when a name is not an identifier
    /// (the namespace may be a `::` path).
    pub fn render(&self, ctx: &TemplateContext<'_>) -> TemplateResult<String> {
        if ctx.class_name.is_empty() {
            return Err(TemplateError::EmptyClassName);
        }
        check_identifier(ctx.class_name, "class")?;
        check_identifier(ctx.base_class, "base class")?;
        for segment in ctx.bindings_namespace.split("::") {
            if !is_identifier(segment) {
                return Err(TemplateError::InvalidIdentifier {
                    name: ctx.bindings_namespace.to_owned(),
                    role: "namespace",
                });
            }
        }

        let rendered = self
            .body
            .replace(NAMESPACE_PLACEHOLDER, ctx.bindings_namespace)
            .replace(CLASS_PLACEHOLDER, ctx.class_name)
            .replace(BASE_PLACEHOLDER, ctx.base_class);
        debug!(template = %self.key(), class = ctx.class_name, "rendered script template");
        Ok(rendered)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            name != "_" && chars.all(|c| c == '_' || c.is_alphanumeric())
        }
        _ => false,
    }
}

fn check_identifier(name: &str, role: &'static str) -> TemplateResult<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(TemplateError::InvalidIdentifier {
            name: name.to_owned(),
            role,
        })
    }
}

/// Templates keyed by `Base/name`.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, ScriptTemplate>,
}

impl TemplateRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template, returning the one it replaced.
    pub fn insert(&mut self, template: ScriptTemplate) -> Option<ScriptTemplate> {
        self.templates.insert(template.key(), template)
    }

    /// Looks up a template by `Base/name`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnknownTemplate`] if nothing is registered
    /// under `key`.
    pub fn get(&self, key: &str) -> TemplateResult<&ScriptTemplate> {
        self.templates
            .get(key)
            .ok_or_else(|| TemplateError::UnknownTemplate { key: key.to_owned() })
    }

    /// Templates offered for `base_class`, ordered by name.
    pub fn for_base<'a>(&'a self, base_class: &'a str) -> impl Iterator<Item = &'a ScriptTemplate> + 'a {
        self.templates.values().filter(move |t| t.base_class == base_class)
    }

    /// The template to pre-select for `base_class`: one marked default, else
    /// the first by name.
    #[must_use]
    pub fn default_for(&self, base_class: &str) -> Option<&ScriptTemplate> {
        let mut offered = self.templates.values().filter(|t| t.base_class == base_class);
        let first = offered.next()?;
        if first.is_default {
            return Some(first);
        }
        Some(offered.find(|t| t.is_default).unwrap_or(first))
    }

    /// All templates ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = &ScriptTemplate> {
        self.templates.values()
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true if no templates are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Registry of the templates shipped with the bindings.
///
/// # Errors
///
/// Propagates a header error from a shipped template.
pub fn builtin_templates() -> TemplateResult<TemplateRegistry> {
    let mut registry = TemplateRegistry::new();
    for (base, name, source) in BUILTIN_SOURCES {
        registry.insert(ScriptTemplate::parse(base, name, source)?);
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "// meta-description: Says hello\n// meta-default: true\n\nstruct _CLASS_; // extends _BASE_\n";

    #[test]
    fn test_parse_strips_header() {
        let t = ScriptTemplate::parse("Node", "hello", SAMPLE).unwrap();
        assert_eq!(t.description(), "Says hello");
        assert!(t.is_default());
        assert_eq!(t.body(), "struct _CLASS_; // extends _BASE_\n");
        assert_eq!(t.key(), "Node/hello");
    }

    #[test]
    fn test_parse_without_header() {
        let t = ScriptTemplate::parse("Node", "bare", "struct _CLASS_;").unwrap();
        assert_eq!(t.description(), "");
        assert!(!t.is_default());
        assert_eq!(t.body(), "struct _CLASS_;");
    }

    #[test]
    fn test_name_header_overrides() {
        let t = ScriptTemplate::parse("Node", "file_stem", "// meta-name: Pretty\nx").unwrap();
        assert_eq!(t.name(), "Pretty");
    }

    #[test]
    fn test_malformed_headers() {
        assert_eq!(
            ScriptTemplate::parse("Node", "x", "// meta-description Says hello\n"),
            Err(TemplateError::MalformedHeader {
                line: 1,
                reason: "expected `meta-KEY: VALUE`, got `meta-description Says hello`".into(),
            })
        );
        assert!(matches!(
            ScriptTemplate::parse("Node", "x", "// meta-description: ok\n// meta-default: yes\n"),
            Err(TemplateError::MalformedHeader { line: 2, .. })
        ));
        assert!(matches!(
            ScriptTemplate::parse("Node", "x", "// meta-color: red\n"),
            Err(TemplateError::MalformedHeader { line: 1, .. })
        ));
    }

    #[test]
    fn test_render_substitutes_every_placeholder() {
        let t = ScriptTemplate::parse("Node", "hello", SAMPLE).unwrap();
        let out = t.render(&TemplateContext::new("Greeter", "Node2D")).unwrap();
        assert_eq!(out, "struct Greeter; // extends Node2D\n");
    }

    #[test]
    fn test_render_rejects_bad_names() {
        let t = ScriptTemplate::parse("Node", "hello", SAMPLE).unwrap();
        assert_eq!(t.render(&TemplateContext::new("", "Node")), Err(TemplateError::EmptyClassName));
        assert_eq!(
            t.render(&TemplateContext::new("2Fast", "Node")),
            Err(TemplateError::InvalidIdentifier { name: "2Fast".into(), role: "class" })
        );
        assert!(t.render(&TemplateContext::new("_", "Node")).is_err());
        assert!(t.render(&TemplateContext::new("Ok", "Node 2D")).is_err());

        let mut ctx = TemplateContext::new("Ok", "Node");
        ctx.bindings_namespace = "my_game::bindings";
        assert!(t.render(&ctx).is_ok());
        ctx.bindings_namespace = "my_game::";
        assert!(matches!(
            t.render(&ctx),
            Err(TemplateError::InvalidIdentifier { role: "namespace", .. })
        ));
    }

    #[test]
    fn test_registry_defaults() {
        let mut registry = TemplateRegistry::new();
        registry.insert(ScriptTemplate::parse("Node", "b", "b").unwrap());
        registry.insert(ScriptTemplate::parse("Node", "a", "a").unwrap());
        assert_eq!(registry.default_for("Node").unwrap().name(), "a");

        registry.insert(ScriptTemplate::parse("Node", "b", "// meta-default: true\nb").unwrap());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.default_for("Node").unwrap().name(), "b");
        assert!(registry.default_for("Sprite2D").is_none());

        let chosen = {
            let base = String::from("Node");
            registry.default_for(&base)
        };
        assert_eq!(chosen.map(ScriptTemplate::name), Some("b"));
        assert_eq!(registry.for_base("Node").count(), 2);
        assert_eq!(
            registry.get("Node/c"),
            Err(TemplateError::UnknownTemplate { key: "Node/c".into() })
        );
    }
}
