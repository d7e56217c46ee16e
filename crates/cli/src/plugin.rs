//! protoc plugin protocol
//!
//! protoc writes an encoded `CodeGeneratorRequest` to the plugin's stdin and
//! reads an encoded `CodeGeneratorResponse` back from its stdout. Generation
//! failures travel inside the response; only transport failures are returned
//! as errors.

use anyhow::{Context, Result};
use prost::Message;
use prost_types::compiler::{code_generator_response, CodeGeneratorRequest, CodeGeneratorResponse};
use std::io::{Read, Write};
use twirp_flow_common::{GeneratedFile, GeneratorOptions};
use twirp_flow_generator::ClientGenerator;
use twirp_flow_parser::ProtobufParser;

/// Read and decode a request
pub fn read_request<R: Read>(mut reader: R) -> Result<CodeGeneratorRequest> {
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .context("Failed to read CodeGeneratorRequest")?;

    CodeGeneratorRequest::decode(buf.as_slice()).context("Failed to decode CodeGeneratorRequest")
}

/// Encode and write a response
pub fn write_response<W: Write>(mut writer: W, response: &CodeGeneratorResponse) -> Result<()> {
    writer
        .write_all(&response.encode_to_vec())
        .context("Failed to write CodeGeneratorResponse")?;
    writer.flush().context("Failed to flush CodeGeneratorResponse")
}

/// Run the whole pipeline for one request
///
/// On failure the response carries the error string and no files.
pub fn generate(request: CodeGeneratorRequest) -> CodeGeneratorResponse {
    let mut response = CodeGeneratorResponse {
        supported_features: Some(code_generator_response::Feature::Proto3Optional as u64),
        ..Default::default()
    };

    match run(request) {
        Ok(files) => {
            response.file = files.into_iter().map(response_file).collect();
        }
        Err(e) => {
            tracing::error!(error = %e, "Generation failed");
            response.error = Some(e.to_string());
        }
    }

    response
}

fn run(request: CodeGeneratorRequest) -> twirp_flow_common::Result<Vec<GeneratedFile>> {
    let options = GeneratorOptions::from_parameter(request.parameter.as_deref())?;
    tracing::debug!(
        version = %options.version,
        files = request.proto_file.len(),
        requested = request.file_to_generate.len(),
        "Plugin request"
    );

    let registry = ProtobufParser::from_file_descriptor_protos(request.proto_file)?.parse()?;
    ClientGenerator::new(options)?.generate(&registry)
}

fn response_file(file: GeneratedFile) -> code_generator_response::File {
    code_generator_response::File {
        name: Some(file.name),
        content: Some(file.content),
        ..Default::default()
    }
}
