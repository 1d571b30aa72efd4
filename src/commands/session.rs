//! Session command implementation
//!
//! Replays the load requests of one page in order, printing one bundle URI
//! per request that still has something to deliver.

use std::collections::HashSet;

use console::Style;
use tracing::debug;

use crate::cli::SessionArgs;
use crate::commands::Context;
use crate::error::Result;
use crate::resolver::DependencyInput;

pub fn run(context: &Context, args: SessionArgs) -> Result<()> {
    let jammer = context.jammer();
    let mut loaded: HashSet<String> = args
        .loaded
        .iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    let dim = Style::new().dim();

    for request in args.requests {
        let bundle =
            jammer.resolve_unloaded(&args.extension, &DependencyInput::from(request), &mut loaded)?;
        match bundle.uri() {
            Some(uri) => println!("{uri}"),
            None => println!("{}", dim.apply_to("(already loaded)")),
        }
    }

    let mut delivered: Vec<&str> = loaded.iter().map(String::as_str).collect();
    delivered.sort_unstable();
    debug!(loaded = %delivered.join(","), "session complete");
    Ok(())
}
