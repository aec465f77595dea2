use clap::{Parser, Subcommand, ValueEnum};
use edgemap::document::{load_json, load_schema};
use edgemap::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Which topic grammar to validate against.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TopicKind {
    Topic,
    Tag,
    Filter,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a topic, tag or topic filter
    Topic {
        #[arg(value_enum)]
        kind: TopicKind,
        value: String,
    },
    /// Print the flattened property list of a JSON Schema
    Flatten {
        schema_path: String,
        /// Only print top-level properties that a mapping can target
        #[arg(long)]
        mappable: bool,
        /// Maximum nesting level to descend into
        #[arg(long, default_value_t = 32)]
        max_depth: usize,
    },
    /// Infer JSON Schemas from a list of `{topic, payload}` samples
    Infer { samples_path: String },
    /// Annotate a JSON Schema with examples taken from a sample payload
    Examples {
        schema_path: String,
        sample_path: String,
    },
    /// Check the formatted string fields of a document and print localized errors
    Check {
        schema_path: String,
        document_path: String,
    },
    /// Apply mapping instructions to a payload
    Map {
        instructions_path: String,
        payload_path: String,
        /// Destination schema; instructions targeting read-only properties are dropped
        #[arg(long)]
        target: Option<String>,
    },
}

/// Topic validation and schema mapping tools for edge gateway configuration
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    init_logger();
    let cli = Cli::parse();

    match cli.command {
        Command::Topic { kind, value } => run_topic(kind, &value),
        Command::Flatten {
            schema_path,
            mappable,
            max_depth,
        } => run_flatten(&schema_path, mappable, max_depth),
        Command::Infer { samples_path } => run_infer(&samples_path),
        Command::Examples {
            schema_path,
            sample_path,
        } => run_examples(&schema_path, &sample_path),
        Command::Check {
            schema_path,
            document_path,
        } => run_check(&schema_path, &document_path),
        Command::Map {
            instructions_path,
            payload_path,
            target,
        } => run_map(&instructions_path, &payload_path, target.as_deref()),
    }
}

fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn run_topic(kind: TopicKind, value: &str) {
    let result = match kind {
        TopicKind::Topic => validate_topic(value),
        TopicKind::Tag => validate_tag(value),
        TopicKind::Filter => validate_topic_filter(value),
    };
    match result {
        Ok(()) => println!("valid"),
        Err(violation) => {
            println!("{} ({})", violation, violation.message_key());
            std::process::exit(1);
        }
    }
}

fn run_flatten(schema_path: &str, mappable: bool, max_depth: usize) {
    let schema = load_schema(schema_path).unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let flattener = Flattener::builder().max_depth(max_depth).build();
    let properties = flattener.flatten(&schema);
    info!(count = properties.len(), "Flattened schema");

    if mappable {
        print_json(&mappable_targets(&properties));
    } else {
        print_json(&properties);
    }
}

fn run_infer(samples_path: &str) {
    let samples: Vec<TopicSample> =
        load_json(samples_path).unwrap_or_else(|e| exit_with_error(&e.to_string()));
    print_json(&payload_to_schema(Some(samples.as_slice())));
}

fn run_examples(schema_path: &str, sample_path: &str) {
    let schema = load_schema(schema_path).unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let sample: Value = load_json(sample_path).unwrap_or_else(|e| exit_with_error(&e.to_string()));
    print_json(&reducer_schema_examples(&schema, &sample));
}

fn run_check(schema_path: &str, document_path: &str) {
    let schema = load_schema(schema_path).unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let document: Value =
        load_json(document_path).unwrap_or_else(|e| exit_with_error(&e.to_string()));

    let registry = FormatRegistry::default();
    let errors = registry.localize(registry.check(&schema, &document));
    print_json(&errors);
    if !errors.is_empty() {
        std::process::exit(1);
    }
}

fn run_map(instructions_path: &str, payload_path: &str, target: Option<&str>) {
    let instructions: InstructionList =
        load_json(instructions_path).unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let payload: Value =
        load_json(payload_path).unwrap_or_else(|e| exit_with_error(&e.to_string()));

    let instructions = match target {
        Some(target_path) => {
            let schema =
                load_schema(target_path).unwrap_or_else(|e| exit_with_error(&e.to_string()));
            let properties = get_property_list_from(&schema);
            filter_read_only_instructions(Some(instructions.as_slice()), &properties)
        }
        None => instructions.into_vec(),
    };

    let transformer = Transformer::new(&instructions)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid instructions: {}", e)));
    let output = transformer
        .apply(&payload)
        .unwrap_or_else(|e| exit_with_error(&format!("Mapping failed: {}", e)));
    print_json(&output);
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => exit_with_error(&format!("Failed to serialize output: {}", e)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
