//! Resolve command implementation

use console::Style;

use crate::bundle::BundleSummary;
use crate::cli::ResolveArgs;
use crate::commands::Context;
use crate::error::{Result, io_error};

pub fn run(context: &Context, args: ResolveArgs) -> Result<()> {
    let request = args.target.to_request()?;
    let bundle = context.jammer().resolve(&request)?;
    let summary = bundle.summary()?;

    if args.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| io_error(format!("Failed to serialize bundle summary: {e}")))?;
        println!("{json}");
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &BundleSummary) {
    let label = Style::new().bold();
    let dim = Style::new().dim();

    if summary.modules.is_empty() {
        println!("{}", dim.apply_to("No modules resolved"));
        return;
    }

    let content_type = summary
        .content_type
        .map_or_else(|| "unknown".to_string(), |ct| ct.to_string());
    println!("{} {}", label.apply_to("Type:"), content_type);
    println!("{} {}", label.apply_to("Modules:"), summary.modules.join(", "));
    if let Some(checksum) = &summary.checksum {
        println!("{} {}", label.apply_to("Checksum:"), checksum);
    }
    if let Some(uri) = &summary.uri {
        println!("{} {}", label.apply_to("URI:"), Style::new().cyan().apply_to(uri));
    }
    if let Some(last_modified) = summary.last_modified {
        println!("{} {}", label.apply_to("Last modified:"), last_modified);
    }
    println!("{} {} bytes", label.apply_to("Size:"), summary.byte_size);

    if summary.unbundled_uris.len() > 1 {
        println!("{}", label.apply_to("Unbundled:"));
        for uri in &summary.unbundled_uris {
            println!("  {}", dim.apply_to(uri));
        }
    }
}
