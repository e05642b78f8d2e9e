//! Process environment as a lookup source

use std::env;
use std::ffi::OsString;

use placeholder_domain::LookupTable;
use tracing::{debug, trace};

/// Snapshots the current process environment.
///
/// Variables whose name or value is not valid UTF-8 are skipped.
#[must_use]
pub fn environment_lookup() -> LookupTable {
    let table = environment_lookup_from(env::vars_os());
    debug!(entries = table.len(), "loaded process environment");
    table
}

/// Builds a lookup table from `(name, value)` pairs of OS strings.
#[must_use]
pub fn environment_lookup_from<I, K, V>(vars: I) -> LookupTable
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<OsString>,
    V: Into<OsString>,
{
    let mut table = LookupTable::new();
    for (name, value) in vars {
        match (name.into().into_string(), value.into().into_string()) {
            (Ok(name), Ok(value)) => table.insert(name, value),
            (Ok(name), Err(_)) => trace!(%name, "skipping variable with non UTF-8 value"),
            (Err(_), _) => trace!("skipping variable with non UTF-8 name"),
        }
    }
    table
}
