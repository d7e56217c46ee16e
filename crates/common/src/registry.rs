//! Context registry
//!
//! Extraction runs in two phases. While schema files are walked, a
//! [`RegistryBuilder`] collects one [`FileContext`] per file; models and
//! services always land in the most recently begun file. [`RegistryBuilder::build`]
//! then freezes everything into a [`ContextRegistry`], whose name lookup is
//! only available once every file has been seen.

use crate::{GeneratorError, Model, Result, Service};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Models and services declared by one schema file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContext {
    /// Output file name (schema path with a `.js` extension)
    pub file_name: String,
    pub models: Vec<Model>,
    pub services: Vec<Service>,
}

impl FileContext {
    fn new(file_name: String) -> Self {
        Self {
            file_name,
            models: Vec::new(),
            services: Vec::new(),
        }
    }
}

/// Phase-one accumulator
#[derive(Debug)]
pub struct RegistryBuilder {
    files: Vec<FileContext>,
    models: HashMap<String, Model>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Create a builder pre-seeded with the Date primitive
    pub fn new() -> Self {
        let date = Model::date_primitive();
        let mut models = HashMap::new();
        models.insert(date.name.clone(), date);

        Self {
            files: Vec::new(),
            models,
        }
    }

    /// Start a new file; subsequent registrations belong to it
    pub fn begin_file(&mut self, file_name: impl Into<String>) {
        let file_name = file_name.into();
        tracing::debug!(file = %file_name, "begin file");
        self.files.push(FileContext::new(file_name));
    }

    /// Add a model to the current file and to the global lookup
    ///
    /// A later model with the same name replaces the earlier lookup entry.
    pub fn register_model(&mut self, model: Model) -> Result<()> {
        let current = self.current_file()?;
        current.models.push(model.clone());

        if let Some(previous) = self.models.insert(model.name.clone(), model) {
            tracing::debug!(
                model = %previous.name,
                file = %previous.file_name,
                "model name registered twice, keeping the latest"
            );
        }

        Ok(())
    }

    /// Add a service to the current file
    pub fn register_service(&mut self, service: Service) -> Result<()> {
        self.current_file()?.services.push(service);
        Ok(())
    }

    /// Freeze the collected files into a read-only registry
    pub fn build(self) -> ContextRegistry {
        ContextRegistry {
            files: self.files,
            models: self.models,
        }
    }

    fn current_file(&mut self) -> Result<&mut FileContext> {
        self.files.last_mut().ok_or_else(|| {
            GeneratorError::Generation("registration before any file was begun".to_string())
        })
    }
}

/// Phase-two view: all files plus the finalized name lookup
#[derive(Debug, Clone)]
pub struct ContextRegistry {
    files: Vec<FileContext>,
    models: HashMap<String, Model>,
}

impl ContextRegistry {
    /// Files in processing order
    pub fn files(&self) -> &[FileContext] {
        &self.files
    }

    /// Resolve a simple model name
    pub fn lookup(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    /// Pretty-printed JSON dump of every file, in processing order
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.files)?)
    }
}
