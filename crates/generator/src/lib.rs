//! Flow client generation for Twirp services
//!
//! This crate renders a frozen [`ContextRegistry`] into one Flow-typed
//! JavaScript module per schema file, plus the shared `twirp.js` runtime
//! those modules import `sendTwirpRequest` from.

mod imports;
mod policy;
mod templates;
mod view;

pub use imports::{collect_imports, relative_module_path, Import};
pub use policy::{declared_type, from_json_expr, json_type_name, to_json_expr, MethodShape};
pub use view::{FieldView, FileView, MethodView, ModelView, ServiceView};

use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;
use twirp_flow_common::{
    ContextRegistry, FileContext, GeneratedFile, GeneratorError, GeneratorOptions, Result,
};

/// Name of the runtime module emitted alongside the clients
pub const RUNTIME_FILE: &str = "twirp.js";

/// Flow client generator
///
/// Produces, for every file in the registry:
/// - type declarations for each message and its wire shape
/// - `<Name>ToJSON` / `JSONTo<Name>` conversion functions
/// - a client class per service
///
/// followed by the `twirp.js` runtime.
pub struct ClientGenerator {
    options: GeneratorOptions,
    tera: Tera,
}

impl ClientGenerator {
    /// Create a new generator with the given options
    pub fn new(options: GeneratorOptions) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self { options, tera })
    }

    /// Render every file in the registry, then the runtime
    ///
    /// Output order follows registry order. Either every file renders or
    /// none is returned.
    pub fn generate(&self, registry: &ContextRegistry) -> Result<Vec<GeneratedFile>> {
        let mut files = Vec::with_capacity(registry.files().len() + 1);

        for file in registry.files() {
            files.push(self.render_file(file, registry)?);
        }
        files.push(self.render_runtime()?);

        tracing::info!(
            files = files.len(),
            version = %self.options.version,
            "Generated Flow clients"
        );

        Ok(files)
    }

    /// Render the client module for a single file
    pub fn render_file(
        &self,
        file: &FileContext,
        registry: &ContextRegistry,
    ) -> Result<GeneratedFile> {
        let view = FileView::build(file, registry, &self.options);
        let context = Self::create_context(&view);

        let content = self
            .tera
            .render(templates::CLIENT_TEMPLATE, &context)
            .map_err(|e| {
                GeneratorError::Generation(format!(
                    "Template error in {}: {:?}",
                    file.file_name, e
                ))
            })?;

        tracing::debug!(
            file = %file.file_name,
            models = view.models.len(),
            services = view.services.len(),
            imports = view.imports.len(),
            "Rendered client module"
        );

        Ok(GeneratedFile {
            name: file.file_name.clone(),
            content,
        })
    }

    /// Render the shared request runtime
    pub fn render_runtime(&self) -> Result<GeneratedFile> {
        let content = self
            .tera
            .render(templates::RUNTIME_TEMPLATE, &tera::Context::new())
            .map_err(|e| GeneratorError::Generation(format!("Template error: {}", e)))?;

        Ok(GeneratedFile {
            name: RUNTIME_FILE.to_string(),
            content,
        })
    }

    /// Render everything and write it below `output_dir`
    ///
    /// Nothing is written unless every file rendered. Filesystem failures
    /// surface as [`GeneratorError::Io`]. Returns the written paths in
    /// output order.
    pub fn generate_to_directory(
        &self,
        registry: &ContextRegistry,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let files = self.generate(registry)?;

        fs::create_dir_all(output_dir)?;

        let mut written = Vec::with_capacity(files.len());
        for file in files {
            let output_path = output_dir.join(&file.name);
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::write(&output_path, file.content)?;
            tracing::debug!(path = %output_path.display(), "Wrote file");
            written.push(output_path);
        }

        Ok(written)
    }

    fn create_context(view: &FileView) -> tera::Context {
        let mut context = tera::Context::new();
        context.insert("runtime_module", &view.runtime_module);
        context.insert("imports", &view.imports);
        context.insert("models", &view.models);
        context.insert("services", &view.services);
        context
    }
}

/// Generate clients for a registry (convenience function)
pub fn generate_clients(
    registry: &ContextRegistry,
    options: GeneratorOptions,
) -> Result<Vec<GeneratedFile>> {
    let generator = ClientGenerator::new(options)?;
    generator.generate(registry)
}
