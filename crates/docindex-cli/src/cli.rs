//! Command-line definition

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use docindex_symbol::SymbolKind;
use std::path::PathBuf;

/// Parsed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub(crate) snapshot: PathBuf,
    pub(crate) json: bool,
    pub(crate) request: Request,
}

/// One query against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Request {
    Packages,
    Lookup { package: String, name: String },
    Prefix { package: String, prefix: String },
    Kind(SymbolKind),
    Nested { package: String, enclosing: String },
    Enclosing { package: String, name: String },
    Members { package: String },
    Search { prefix: String },
    Stats,
}

fn package_arg() -> Arg {
    Arg::new("package")
        .required(true)
        .help("Dotted package path, e.g. primavera.map")
}

fn name_arg(help: &'static str) -> Arg {
    Arg::new("name").required(true).help(help)
}

pub(crate) fn command() -> Command {
    Command::new("docindex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Query a documentation index snapshot")
        .subcommand_required(true)
        .arg(
            Arg::new("snapshot")
                .long("snapshot")
                .short('s')
                .global(true)
                .default_value("root.js")
                .value_parser(value_parser!(PathBuf))
                .help("Snapshot file (JSON or `const root = {...}` script)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .subcommand(Command::new("packages").about("List declared packages in declaration order"))
        .subcommand(
            Command::new("lookup")
                .about("Exact lookup by package and name")
                .arg(package_arg())
                .arg(name_arg("Symbol name, e.g. IntMap.IntComparator")),
        )
        .subcommand(
            Command::new("prefix")
                .about("Top-level symbols of a package starting with a prefix")
                .arg(package_arg())
                .arg(Arg::new("prefix").default_value("").help("Name prefix (case-sensitive)")),
        )
        .subcommand(
            Command::new("kind")
                .about("All symbols of one kind")
                .arg(
                    Arg::new("kind")
                        .required(true)
                        .value_parser(value_parser!(SymbolKind))
                        .help("Interface, Class or Functional"),
                ),
        )
        .subcommand(
            Command::new("nested")
                .about("Direct nested symbols of an enclosing symbol")
                .arg(package_arg())
                .arg(name_arg("Enclosing symbol name")),
        )
        .subcommand(
            Command::new("enclosing")
                .about("Enclosing symbol of a nested name")
                .arg(package_arg())
                .arg(name_arg("Nested symbol name")),
        )
        .subcommand(
            Command::new("members")
                .about("Every symbol of a package, nested ones included")
                .arg(package_arg()),
        )
        .subcommand(
            Command::new("search")
                .about("Search simple names across all packages")
                .arg(Arg::new("prefix").required(true).help("Simple name prefix")),
        )
        .subcommand(Command::new("stats").about("Summary counts"))
}

fn string(args: &ArgMatches, id: &str) -> Result<String> {
    args.get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing argument <{id}>"))
}

impl Invocation {
    pub(crate) fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let (name, args) = matches.subcommand().context("no subcommand given")?;

        let request = match name {
            "packages" => Request::Packages,
            "lookup" => Request::Lookup {
                package: string(args, "package")?,
                name: string(args, "name")?,
            },
            "prefix" => Request::Prefix {
                package: string(args, "package")?,
                prefix: string(args, "prefix")?,
            },
            "kind" => Request::Kind(
                *args
                    .get_one::<SymbolKind>("kind")
                    .context("missing argument <kind>")?,
            ),
            "nested" => Request::Nested {
                package: string(args, "package")?,
                enclosing: string(args, "name")?,
            },
            "enclosing" => Request::Enclosing {
                package: string(args, "package")?,
                name: string(args, "name")?,
            },
            "members" => Request::Members {
                package: string(args, "package")?,
            },
            "search" => Request::Search {
                prefix: string(args, "prefix")?,
            },
            "stats" => Request::Stats,
            other => anyhow::bail!("unknown subcommand: {other}"),
        };

        let snapshot = args
            .get_one::<PathBuf>("snapshot")
            .cloned()
            .context("missing --snapshot")?;

        Ok(Self {
            snapshot,
            json: args.get_flag("json"),
            request,
        })
    }
}
