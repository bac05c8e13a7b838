//! Core formatting engine trait definition.

use crate::error::Result;
use serde::Serialize;

/// Trait for rendering tool results with a named template.
///
/// Implementations handle template lookup and rendering; callers decide what
/// to do when no template exists for a tool (usually: pass the raw payload
/// through).
pub trait FormatEngine {
    /// Renders the template `template` with the provided context.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The template does not exist
    /// - The template contains syntax errors
    /// - Rendering fails (e.g. a filter receives the wrong type)
    fn render<T: Serialize>(&self, template: &str, ctx: &T) -> Result<String>;

    /// Returns `true` if a template named `template` can be loaded.
    fn has_template(&self, template: &str) -> bool;

    /// Lists all available template names (without extensions), sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the override directory cannot be read.
    fn list_templates(&self) -> Result<Vec<String>>;
}
