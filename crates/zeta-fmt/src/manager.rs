//! Result formatter implementation using minijinja.

use crate::{
    builtin,
    engine::FormatEngine,
    error::{FormatError, Result},
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Formatter that renders tool payloads through `<tool>.j2` templates.
///
/// Templates are resolved from the override directory first (when one is
/// configured) and then from the built-in set compiled into the crate.
///
/// # Examples
///
/// ```
/// use zeta_fmt::{FormatEngine, ResultFormatter};
///
/// let formatter = ResultFormatter::builtin();
/// assert!(formatter.has_template("list_chains"));
/// assert!(!formatter.has_template("evm_deposit"));
/// ```
#[derive(Debug)]
pub struct ResultFormatter {
    /// Directory holding user-supplied templates, if any.
    pub templates_dir: Option<PathBuf>,
    /// Minijinja environment for template rendering.
    env: minijinja::Environment<'static>,
}

impl ResultFormatter {
    /// Creates a formatter that only knows the built-in templates.
    pub fn builtin() -> Self {
        let mut env = strict_environment();
        env.set_loader(|name| Ok(builtin::source(name).map(str::to_string)));
        Self {
            templates_dir: None,
            env,
        }
    }

    /// Creates a formatter whose templates in `templates_dir` take precedence
    /// over the built-in ones.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::TemplateDirectoryNotFound`] if the directory does
    /// not exist or is not a directory.
    pub fn with_overrides(templates_dir: PathBuf) -> Result<Self> {
        if !templates_dir.is_dir() {
            return Err(FormatError::TemplateDirectoryNotFound(templates_dir));
        }

        let from_disk = minijinja::path_loader(&templates_dir);
        let mut env = strict_environment();
        env.set_loader(move |name| match from_disk(name)? {
            Some(source) => Ok(Some(source)),
            None => Ok(builtin::source(name).map(str::to_string)),
        });

        Ok(Self {
            templates_dir: Some(templates_dir),
            env,
        })
    }

    fn load_template(&self, name: &str) -> Result<minijinja::Template<'_, '_>> {
        let template_name = format!("{name}.j2");
        self.env
            .get_template(&template_name)
            .map_err(|e| FormatError::TemplateNotFound(format!("{name}: {e}")))
    }
}

/// Templates must not reference fields the payload lacks; optional fields are
/// guarded with `is defined`.
fn strict_environment() -> minijinja::Environment<'static> {
    let mut env = minijinja::Environment::new();
    env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
    env
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FormatEngine for ResultFormatter {
    fn render<T: Serialize>(&self, template: &str, ctx: &T) -> Result<String> {
        let tmpl = self.load_template(template)?;
        tmpl.render(ctx)
            .map(|text| text.trim_end().to_string())
            .map_err(|e| FormatError::TemplateRenderError(format!("{template}: {e}")))
    }

    fn has_template(&self, template: &str) -> bool {
        self.load_template(template).is_ok()
    }

    fn list_templates(&self) -> Result<Vec<String>> {
        let mut templates: BTreeSet<String> = builtin::TEMPLATES
            .iter()
            .map(|(name, _)| (*name).to_string())
            .collect();

        if let Some(dir) = &self.templates_dir {
            let entries = std::fs::read_dir(dir).map_err(|source| FormatError::TemplateListError {
                path: dir.clone(),
                source,
            })?;

            for entry in entries {
                let entry = entry.map_err(|source| FormatError::TemplateListError {
                    path: dir.clone(),
                    source,
                })?;

                let path = entry.path();

                // Only include .j2 files
                if path.is_file()
                    && let Some(ext) = path.extension()
                    && ext == "j2"
                    && let Some(name) = path.file_stem()
                    && let Some(name_str) = name.to_str()
                {
                    templates.insert(name_str.to_string());
                }
            }
        }

        Ok(templates.into_iter().collect())
    }
}
