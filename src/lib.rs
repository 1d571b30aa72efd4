//! Jammer - bundle resolution for versioned front-end modules
//!
//! Resolves a request for named, versioned script, stylesheet or markup
//! modules into a [`Bundle`](bundle::Bundle): an ordered, de-duplicated
//! module list with a stable checksum, a long-lived cache-busting URI and
//! the concatenated module sources.
//!
//! ```no_run
//! use jammer::config::Environment;
//! use jammer::domain::ContentType;
//! use jammer::manifest::StaticManifest;
//! use jammer::primer::FsPrimer;
//! use jammer::resolver::{BundleRequest, Jammer};
//!
//! # fn main() -> jammer::error::Result<()> {
//! let manifest = StaticManifest::load("manifest.yaml".as_ref())?;
//! let primer = FsPrimer::new("static");
//! let env = Environment::default();
//! let jammer = Jammer::new(&manifest, &primer, &env);
//!
//! let bundle = jammer.resolve(&BundleRequest::for_dependencies(ContentType::Script, "app"))?;
//! println!("{:?}", bundle.uri());
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod cli;
pub mod commands;
pub mod config;
pub mod delivery;
pub mod domain;
pub mod error;
pub mod hash;
pub mod logging;
pub mod manifest;
pub mod primer;
pub mod resolver;

#[cfg(test)]
mod test_fixtures;
