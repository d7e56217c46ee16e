//! protoc-gen-twirp_flow
//!
//! Invoked by protoc without arguments, the binary speaks the plugin protocol
//! over stdin/stdout. The subcommands run the same pipeline over a serialized
//! FileDescriptorSet (`protoc --descriptor_set_out`) for local use.

mod plugin;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use twirp_flow_common::{ContextRegistry, GeneratorOptions, TwirpVersion};
use twirp_flow_generator::ClientGenerator;
use twirp_flow_parser::ProtobufParser;

#[derive(Parser)]
#[command(name = "protoc-gen-twirp_flow")]
#[command(version, about = "Generate Flow-typed Twirp JSON clients from protobuf schemas", long_about = None)]
#[command(after_help = "Without a subcommand the binary runs as a protoc plugin:\n  \
    protoc --twirp_flow_out=version=v6:./client service.proto")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a FileDescriptorSet and display the extracted models and services
    #[command(after_help = "EXAMPLES:\n  \
        # Summarize a descriptor set\n  \
        protoc-gen-twirp_flow parse --descriptor-set service.pb\n\n  \
        # Dump the extraction as JSON\n  \
        protoc-gen-twirp_flow parse --descriptor-set service.pb --json")]
    Parse {
        /// Path to the serialized FileDescriptorSet
        #[arg(short, long)]
        descriptor_set: PathBuf,

        /// Print the extracted files as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate Flow clients from a FileDescriptorSet
    #[command(after_help = "EXAMPLES:\n  \
        protoc --include_imports --descriptor_set_out=service.pb service.proto\n  \
        protoc-gen-twirp_flow generate \\\n    \
        --descriptor-set service.pb \\\n    \
        --twirp-version v6 \\\n    \
        --output ./client")]
    Generate {
        /// Path to the serialized FileDescriptorSet
        #[arg(short, long)]
        descriptor_set: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Twirp protocol version the clients target (v5 or v6)
        #[arg(long, default_value = "v5")]
        twirp_version: TwirpVersion,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        None => plugin_command(),
        Some(Commands::Parse {
            descriptor_set,
            json,
        }) => parse_command(&descriptor_set, json, cli.verbose),
        Some(Commands::Generate {
            descriptor_set,
            output,
            twirp_version,
        }) => generate_command(&descriptor_set, &output, twirp_version),
    }
}

/// Log to stderr; stdout carries the plugin response
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn plugin_command() -> Result<()> {
    let request = plugin::read_request(io::stdin().lock())?;
    let response = plugin::generate(request);
    plugin::write_response(io::stdout().lock(), &response)
}

fn load_registry(descriptor_set: &Path) -> Result<ContextRegistry> {
    eprintln!(
        "{} Parsing descriptor set: {}",
        "→".cyan(),
        descriptor_set.display()
    );

    let parser =
        ProtobufParser::from_file(descriptor_set).context("Failed to load FileDescriptorSet")?;
    parser
        .parse()
        .context("Failed to extract models and services")
}

fn parse_command(descriptor_set: &Path, json: bool, verbose: bool) -> Result<()> {
    let registry = load_registry(descriptor_set)?;

    if json {
        let rendered = registry.to_json().context("Failed to serialize extracted files")?;
        println!("{}", rendered);
        return Ok(());
    }

    eprintln!("\n{}", "✓ Parse successful!".green().bold());
    println!("\n{}", "Files:".bold());

    for file in registry.files() {
        let models: Vec<_> = file.models.iter().filter(|m| !m.primitive).collect();
        println!(
            "  • {} ({} models, {} services)",
            file.file_name.cyan(),
            models.len(),
            file.services.len()
        );

        if !verbose {
            continue;
        }

        for model in models {
            println!("    type {} ({} fields)", model.name.yellow(), model.fields.len());
            for field in &model.fields {
                println!("      {}: {}", field.name, field.ty);
            }
        }
        for service in &file.services {
            println!("    service {}", service.qualified_name().yellow());
            for method in &service.methods {
                println!(
                    "      {}({}) -> {}",
                    method.path, method.input_type, method.output_type
                );
            }
        }
    }

    Ok(())
}

fn generate_command(descriptor_set: &Path, output: &Path, version: TwirpVersion) -> Result<()> {
    let registry = load_registry(descriptor_set)?;

    eprintln!(
        "{} Generating Flow clients for Twirp {}...",
        "→".cyan(),
        version.to_string().yellow()
    );

    let generator = ClientGenerator::new(GeneratorOptions { version })
        .context("Failed to initialize generator")?;
    let written = generator
        .generate_to_directory(&registry, output)
        .context("Failed to generate clients")?;

    eprintln!("\n{}", "✓ Generation complete!".green().bold());
    eprintln!("\n{}", "Generated files:".bold());
    for path in &written {
        eprintln!("  {}", path.display());
    }

    Ok(())
}
