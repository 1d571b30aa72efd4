//! Version command implementation

use console::Style;

use crate::domain::ContentType;
use crate::error::Result;

/// Print the jammer version and the content types it can bundle
pub fn run() -> Result<()> {
    let label = Style::new().bold();
    println!("jammer {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("{}", label.apply_to("Content types:"));
    for content_type in ContentType::ALL {
        println!(
            "  {:<11} {:<6} {}",
            content_type.to_string(),
            content_type.file_extension(),
            content_type.mime_type()
        );
    }
    println!();
    println!("{}", label.apply_to("Build info:"));
    println!("  Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!(
        "  Profile: {}",
        if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        }
    );

    Ok(())
}
