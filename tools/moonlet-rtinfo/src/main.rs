///
/// moonlet-rtinfo - Runtime registry diagnostics
///
/// Builds a runtime context with the demonstration registrations and
/// reports what its registries discover:
/// - moonlet-rtinfo helpers: helper symbols and invocation shapes
/// - moonlet-rtinfo libraries: installed library names
/// - moonlet-rtinfo builtins: built-in functions and their signatures
/// - moonlet-rtinfo type <name>: resolve a host type
/// - moonlet-rtinfo convert <literal> <type>: coerce a literal
///

mod demo;
mod literal;
mod report;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use miette::{Diagnostic, IntoDiagnostic};
use thiserror::Error;
use tracing::Level;

use moonlet_runtime::{RuntimeConfig, RuntimeContext};

use crate::report::{BuiltinRow, ConversionRow, HelperRow, LibraryRow, TypeRow};

#[derive(Parser)]
#[command(name = "moonlet-rtinfo")]
#[command(author, version, about = "Inspect the moonlet runtime registries", long_about = None)]
struct Cli {
    /// Runtime configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List helper symbols and their invocation shapes
    Helpers,

    /// List installed libraries
    Libraries,

    /// List built-in global functions
    Builtins,

    /// Resolve a host type by qualified name
    Type {
        /// Qualified type name, e.g. geometry::Point
        name: String,
    },

    /// Coerce a literal to a host type
    Convert {
        /// nil, true, false, a number or any other text
        literal: String,

        /// Qualified target type name
        target: String,
    },
}

#[derive(Debug, Error, Diagnostic)]
enum RtinfoError {
    #[error("unknown host type '{name}'")]
    #[diagnostic(
        code(moonlet::rtinfo::unknown_type),
        help("primitive types and types of registered host modules resolve")
    )]
    UnknownType { name: String },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => RuntimeConfig::load(path).into_diagnostic()?,
        None => RuntimeConfig::default(),
    };
    let ctx = demo::builder().config(config).build().into_diagnostic()?;

    match cli.command {
        Commands::Helpers => {
            let rows: Vec<HelperRow> = ctx.helpers().iter().map(HelperRow::from).collect();
            report::emit(&rows, cli.json)
        }
        Commands::Libraries => {
            let rows: Vec<LibraryRow> = ctx
                .libraries()
                .names()
                .filter_map(|name| ctx.library(name).map(|lib| LibraryRow::new(name, lib.as_ref())))
                .collect();
            report::emit(&rows, cli.json)
        }
        Commands::Builtins => {
            let rows: Vec<BuiltinRow> = ctx.builtins().iter().map(BuiltinRow::from).collect();
            report::emit(&rows, cli.json)
        }
        Commands::Type { name } => {
            let row = resolve_type(&ctx, &name)?;
            report::emit(&[row], cli.json)
        }
        Commands::Convert { literal, target } => {
            let target_type = ctx
                .host_type(&target)
                .ok_or(RtinfoError::UnknownType { name: target })?;
            let value = literal::parse_literal(&literal);
            let converted = ctx.convert(value, &target_type)?;
            report::emit(&[ConversionRow::new(&literal, &target_type, &converted)], cli.json)
        }
    }
}

fn resolve_type(ctx: &RuntimeContext, name: &str) -> Result<TypeRow, RtinfoError> {
    let builtin = ctx.types().defaults().any(|ty| ty.name() == name);
    ctx.host_type(name)
        .map(|ty| TypeRow::new(&ty, builtin))
        .ok_or_else(|| RtinfoError::UnknownType {
            name: name.to_string(),
        })
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .init();
}
