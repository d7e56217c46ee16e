//! Cross-file import resolution

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use twirp_flow_common::{ContextRegistry, FileContext, OUTPUT_EXTENSION};

/// One model imported from another generated module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Import {
    /// Module specifier relative to the importing file, e.g. `./hat`
    pub module_path: String,
    pub model_name: String,
}

/// Collect the models a file references but does not declare
///
/// Model field types and service request/response types are considered.
/// Primitives are never imported. The result is sorted by target file, then
/// by model name, so rendering the same registry always yields the same
/// import block.
pub fn collect_imports(file: &FileContext, registry: &ContextRegistry) -> Vec<Import> {
    let field_types = file
        .models
        .iter()
        .flat_map(|m| m.fields.iter())
        .map(|f| f.base_type());
    let method_types = file
        .services
        .iter()
        .flat_map(|s| s.methods.iter())
        .flat_map(|m| [m.input_type.as_str(), m.output_type.as_str()]);

    let mut by_file: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

    for type_name in field_types.chain(method_types) {
        let Some(model) = registry.lookup(type_name) else {
            continue;
        };
        if model.primitive || model.file_name == file.file_name {
            continue;
        }

        by_file
            .entry(model.file_name.as_str())
            .or_default()
            .insert(model.name.as_str());
    }

    by_file
        .into_iter()
        .flat_map(|(target_file, names)| {
            let module_path = relative_module_path(&file.file_name, target_file);
            names.into_iter().map(move |name| Import {
                module_path: module_path.clone(),
                model_name: name.to_string(),
            })
        })
        .collect()
}

/// Module specifier that `from_file` uses to import `to_file`
///
/// Both arguments are output paths relative to the output root.
pub fn relative_module_path(from_file: &str, to_file: &str) -> String {
    let target = to_file.strip_suffix(OUTPUT_EXTENSION).unwrap_or(to_file);

    let from_dirs: Vec<&str> = match from_file.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    let (target_dirs, target_name): (Vec<&str>, &str) = match target.rsplit_once('/') {
        Some((dir, name)) => (dir.split('/').collect(), name),
        None => (Vec::new(), target),
    };

    let common = from_dirs
        .iter()
        .zip(target_dirs.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from_dirs.len() - common];
    parts.extend_from_slice(&target_dirs[common..]);
    parts.push(target_name);

    let path = parts.join("/");
    if path.starts_with("..") {
        path
    } else {
        format!("./{}", path)
    }
}
