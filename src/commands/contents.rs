//! Contents command implementation

use std::io::Write;

use tracing::debug;

use crate::cli::ContentsArgs;
use crate::commands::Context;
use crate::error::{Result, io_error};
use crate::hash;

pub fn run(context: &Context, args: ContentsArgs) -> Result<()> {
    let request = args.target.to_request()?;
    let bundle = context.jammer().resolve(&request)?;
    let contents = bundle.contents()?;
    debug!(
        checksum = bundle.checksum().unwrap_or_default(),
        digest = %hash::hash_contents(contents.as_bytes()),
        "bundle contents"
    );

    match args.output {
        Some(path) => std::fs::write(&path, contents)
            .map_err(|e| crate::file_error_context!(path.display(), e)),
        None => std::io::stdout()
            .lock()
            .write_all(contents.as_bytes())
            .map_err(|e| io_error(format!("Failed to write contents: {e}"))),
    }
}
