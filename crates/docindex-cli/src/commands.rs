//! Request execution and rendering

use crate::cli::Request;
use docindex_symbol::{Catalog, QueryMiss, SymbolRecord};
use serde::Serialize;
use std::fmt::Write as _;

/// Result of one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Rendered answer
    Output(String),

    /// Expected miss, rendered as a message
    Miss(String),
}

pub(crate) fn execute(
    catalog: &Catalog,
    request: &Request,
    json: bool,
) -> Result<Outcome, serde_json::Error> {
    let query = catalog.query();

    let output = match request {
        Request::Packages => {
            let packages: Vec<&str> = query.list_packages().map(|p| p.as_str()).collect();
            if json {
                to_json(&packages)?
            } else {
                lines(packages)
            }
        }
        Request::Lookup { package, name } => {
            match query.lookup_exact(package, name) {
                Ok(record) => render_one(record, json)?,
                Err(miss) => return Ok(miss_outcome(&miss)),
            }
        }
        Request::Enclosing { package, name } => {
            match query.resolve_enclosing(package, name) {
                Ok(record) => render_one(record, json)?,
                Err(miss) => return Ok(miss_outcome(&miss)),
            }
        }
        Request::Prefix { package, prefix } => {
            render_many(query.find_by_prefix(package, prefix), json)?
        }
        Request::Kind(kind) => render_many(query.find_by_kind(*kind), json)?,
        Request::Nested { package, enclosing } => {
            render_many(query.list_nested(package, enclosing), json)?
        }
        Request::Members { package } => render_many(query.list_members(package), json)?,
        Request::Search { prefix } => render_many(query.search(prefix), json)?,
        Request::Stats => {
            let stats = catalog.stats();
            if json {
                to_json(&stats)?
            } else {
                let mut out = String::new();
                let _ = writeln!(out, "symbols:            {}", stats.symbols);
                let _ = writeln!(out, "nested:             {}", stats.nested);
                let _ = writeln!(out, "orphaned:           {}", stats.orphaned);
                let _ = writeln!(out, "declared packages:  {}", stats.declared_packages);
                let _ = writeln!(out, "indexed packages:   {}", stats.indexed_packages);
                for (kind, count) in &stats.per_kind {
                    let label = format!("{}:", kind.as_str().to_lowercase());
                    let _ = writeln!(out, "{label:<20}{count}");
                }
                out
            }
        }
    };

    Ok(Outcome::Output(output))
}

fn miss_outcome(miss: &QueryMiss) -> Outcome {
    tracing::debug!("Query miss: {}", miss);
    Outcome::Miss(miss.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

fn lines<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items.into_iter().fold(String::new(), |mut out, item| {
        out.push_str(item);
        out.push('\n');
        out
    })
}

fn render_line(record: &SymbolRecord) -> String {
    format!("{:<11}{}", record.kind.as_str(), record.qualified_name())
}

fn render_one(record: &SymbolRecord, json: bool) -> Result<String, serde_json::Error> {
    if json {
        to_json(record)
    } else {
        Ok(format!("{}\n", render_line(record)))
    }
}

fn render_many<'a>(
    records: impl Iterator<Item = &'a SymbolRecord>,
    json: bool,
) -> Result<String, serde_json::Error> {
    if json {
        let records: Vec<&SymbolRecord> = records.collect();
        to_json(&records)
    } else {
        Ok(records.fold(String::new(), |mut out, record| {
            out.push_str(&render_line(record));
            out.push('\n');
            out
        }))
    }
}
