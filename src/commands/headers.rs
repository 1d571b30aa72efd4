//! Headers command implementation

use chrono::Utc;
use console::Style;

use crate::cli::HeadersArgs;
use crate::commands::Context;
use crate::delivery::{Header, cache_headers, compress_body};
use crate::error::Result;

pub fn run(context: &Context, args: HeadersArgs) -> Result<()> {
    let request = args.target.to_request()?;
    let bundle = context.jammer().resolve(&request)?;

    let path = bundle
        .uri()
        .map(ToString::to_string)
        .or_else(|| args.target.path.clone())
        .unwrap_or_default();

    let mut headers: Vec<Header> = cache_headers(
        &context.env,
        &path,
        bundle.last_modified()?,
        bundle.checksum(),
        args.policy,
        args.force,
        Utc::now(),
    );

    if let Some(accept_encoding) = &args.accept_encoding {
        let body = compress_body(
            &context.env,
            bundle.contents()?.as_bytes(),
            Some(&path),
            false,
            accept_encoding,
        )?;
        for header in body.headers {
            if !headers.contains(&header) {
                headers.push(header);
            }
        }
        headers.push(("Content-Length", body.body.len().to_string()));
    }

    let name = Style::new().bold();
    for (header, value) in headers {
        println!("{}: {}", name.apply_to(header), value);
    }
    Ok(())
}
