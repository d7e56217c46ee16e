//! Descriptor pool loading

use prost::Message;
use prost_reflect::DescriptorPool;
use prost_types::{FileDescriptorProto, FileDescriptorSet};
use std::fs;
use std::path::Path;
use twirp_flow_common::{ContextRegistry, GeneratorError, RegistryBuilder, Result};

/// Protobuf schema parser
///
/// Holds a descriptor pool together with the order in which the schema
/// files were supplied; extraction follows that order.
pub struct ProtobufParser {
    /// Descriptor pool for reflection
    pool: DescriptorPool,

    /// Schema file names in caller order
    file_names: Vec<String>,
}

impl ProtobufParser {
    /// Load a serialized FileDescriptorSet from disk
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = ProtobufParser::from_file("service.pb")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path.as_ref()).map_err(|e| {
            GeneratorError::Parse(format!(
                "Failed to read FileDescriptorSet file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_file_descriptor_set(&bytes)
    }

    /// Parse a serialized FileDescriptorSet
    pub fn from_file_descriptor_set(bytes: &[u8]) -> Result<Self> {
        let file_descriptor_set = FileDescriptorSet::decode(bytes).map_err(|e| {
            GeneratorError::Parse(format!("Failed to decode FileDescriptorSet: {}", e))
        })?;

        Self::from_file_descriptor_protos(file_descriptor_set.file)
    }

    /// Build from already-decoded file descriptors, e.g. a plugin request's
    /// `proto_file` list
    pub fn from_file_descriptor_protos(files: Vec<FileDescriptorProto>) -> Result<Self> {
        let file_names: Vec<String> = files.iter().map(|f| f.name().to_string()).collect();

        let pool = DescriptorPool::from_file_descriptor_set(FileDescriptorSet { file: files })
            .map_err(|e| {
                GeneratorError::Parse(format!("Failed to create DescriptorPool: {}", e))
            })?;

        tracing::debug!(files = file_names.len(), "loaded descriptor pool");

        Ok(Self { pool, file_names })
    }

    /// Run extraction over every file, in order
    pub fn parse(&self) -> Result<ContextRegistry> {
        let mut builder = RegistryBuilder::new();

        for name in &self.file_names {
            let file = self.pool.get_file_by_name(name).ok_or_else(|| {
                GeneratorError::Parse(format!("File {} missing from descriptor pool", name))
            })?;
            super::converter::extract_file(&file, &mut builder)?;
        }

        Ok(builder.build())
    }

    /// Schema file names in caller order
    pub fn file_names(&self) -> &[String] {
        &self.file_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_descriptor_set() {
        let file_descriptor_set = FileDescriptorSet { file: vec![] };
        let bytes = file_descriptor_set.encode_to_vec();

        let parser = ProtobufParser::from_file_descriptor_set(&bytes).unwrap();
        assert!(parser.file_names().is_empty());

        let registry = parser.parse().unwrap();
        assert!(registry.files().is_empty());
    }

    #[test]
    fn test_invalid_bytes_are_parse_errors() {
        let result = ProtobufParser::from_file_descriptor_set(&[0xff, 0xff, 0xff]);
        assert!(matches!(result, Err(GeneratorError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_parse_error() {
        let result = ProtobufParser::from_file("/nonexistent/descriptor.pb");
        assert!(matches!(result, Err(GeneratorError::Parse(_))));
    }
}
