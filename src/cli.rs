//! CLI definitions using clap derive API

use std::path::PathBuf;

use clap::builder::{BoolishValueParser, Styles, styling::AnsiColor};
use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::ConfigOverrides;
use crate::delivery::CachePolicy;

/// Jammer - bundle resolver for versioned front-end modules
#[derive(Parser, Debug)]
#[command(
    name = "jammer",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Resolve versioned script, stylesheet and markup modules into cacheable bundles",
    long_about = "Jammer resolves requested modules against a manifest into a single ordered \
                  bundle with a stable checksum, a long-lived cache-busting URI and the \
                  concatenated module sources.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  jammer resolve --deps app,util --type js\n    \
                  jammer resolve --path /jam/1700000500/app+v2.0,util+v1.0.js\n    \
                  jammer contents --deps 'site.*' --type css\n    \
                  jammer headers --path /jam/1700000500/app+v2.0.js --accept-encoding gzip\n    \
                  jammer session --type js app widgets"
)]
pub struct Cli {
    /// Config file (defaults to ./jammer.yaml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Manifest file, overriding the config
    #[arg(long, global = true)]
    pub manifest: Option<PathBuf>,

    /// Directory module sources are read from, overriding the config
    #[arg(long, global = true)]
    pub source_root: Option<PathBuf>,

    /// Prefix of generated bundle URIs
    #[arg(long, global = true, env = "JAMMER_ROOT_URI")]
    pub root_uri: Option<String>,

    /// Debug mode: live file stats, no timestamps, no caching headers
    #[arg(
        long,
        global = true,
        env = "JAMMER_DEBUG",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub debug: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            manifest: self.manifest.clone(),
            source_root: self.source_root.clone(),
            root_uri: self.root_uri.clone(),
            debug: self.debug,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a bundle and show its identity
    Resolve(ResolveArgs),

    /// Print the concatenated sources of a bundle
    Contents(ContentsArgs),

    /// Show the response headers a bundle would be served with
    Headers(HeadersArgs),

    /// Resolve a sequence of load requests from one page
    Session(SessionArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Which bundle to resolve
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Bundle URI path, resolved exactly as a request for it would be
    #[arg(long, required_unless_present = "deps", conflicts_with_all = ["deps", "transitive"])]
    pub path: Option<String>,

    /// Comma-separated module names; `name+vN` pins a version, `group.*` expands
    #[arg(long, requires = "content_type")]
    pub deps: Option<String>,

    /// Content type: script, stylesheet, markup or a file extension
    #[arg(long = "type", value_name = "TYPE")]
    pub content_type: Option<String>,

    /// Also load the direct dependencies of every module
    #[arg(long)]
    pub transitive: bool,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Resolve modules in canonical order:\n    jammer resolve --deps app,util --type js\n\n\
                  Resolve with direct dependencies:\n    jammer resolve --deps app --type js --transitive\n\n\
                  Resolve a bundle URI:\n    jammer resolve --path /jam/1700000500/app+v2.0.js\n\n\
                  Machine-readable output:\n    jammer resolve --deps app --type js --json")]
pub struct ResolveArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print the bundle summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the contents command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Print a bundle:\n    jammer contents --deps app,util --type js\n\n\
                  Write a bundle to a file:\n    jammer contents --path /jam/12/site+v1.0.css -o site.css")]
pub struct ContentsArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Write to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Arguments for the headers command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Browser and proxy caching headers:\n    jammer headers --path /jam/12/app+v1.0.js\n\n\
                  Proxy headers only:\n    jammer headers --deps app --type js --policy proxy\n\n\
                  Include compression:\n    jammer headers --deps app --type js --accept-encoding 'gzip, deflate'")]
pub struct HeadersArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Which caches to address
    #[arg(long, value_enum, default_value_t = CachePolicy::Both)]
    pub policy: CachePolicy,

    /// Emit caching headers even for unclassified paths
    #[arg(long)]
    pub force: bool,

    /// Client Accept-Encoding; adds compression headers for the contents
    #[arg(long)]
    pub accept_encoding: Option<String>,
}

/// Arguments for the session command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Two load requests from one page:\n    jammer session --type js app widgets,app\n\n\
                  Modules the page already has:\n    jammer session --type js --loaded util app")]
pub struct SessionArgs {
    /// File extension of the requested bundles
    #[arg(long = "type", value_name = "EXT")]
    pub extension: String,

    /// Modules already on the page
    #[arg(long, value_delimiter = ',')]
    pub loaded: Vec<String>,

    /// Load requests, each a comma-separated module list, in page order
    #[arg(required = true)]
    pub requests: Vec<String>,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    jammer completions --shell bash > ~/.bash_completion.d/jammer\n\n\
                  Generate zsh completions:\n    jammer completions --shell zsh > ~/.zfunc/_jammer\n\n\
                  Generate fish completions:\n    jammer completions --shell fish > ~/.config/fish/completions/jammer.fish")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(long, value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_resolve_deps() {
        let cli = Cli::try_parse_from([
            "jammer", "resolve", "--deps", "a,b", "--type", "js", "--transitive",
        ])
        .unwrap();
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.target.deps.as_deref(), Some("a,b"));
                assert_eq!(args.target.content_type.as_deref(), Some("js"));
                assert!(args.target.transitive);
                assert!(!args.json);
            }
            _ => panic!("Expected Resolve command"),
        }
    }

    #[test]
    fn test_cli_parsing_resolve_path() {
        let cli = Cli::try_parse_from(["jammer", "resolve", "--path", "/jam/1/a+v1.0.js", "--json"])
            .unwrap();
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.target.path.as_deref(), Some("/jam/1/a+v1.0.js"));
                assert!(args.json);
            }
            _ => panic!("Expected Resolve command"),
        }
    }

    #[test]
    fn test_cli_parsing_requires_target() {
        assert!(Cli::try_parse_from(["jammer", "resolve"]).is_err());
    }

    #[test]
    fn test_cli_parsing_deps_require_type() {
        assert!(Cli::try_parse_from(["jammer", "contents", "--deps", "a"]).is_err());
    }

    #[test]
    fn test_cli_parsing_path_conflicts_with_transitive() {
        assert!(
            Cli::try_parse_from(["jammer", "resolve", "--path", "/jam/a.js", "--transitive"])
                .is_err()
        );
    }

    #[test]
    fn test_cli_parsing_headers_policy() {
        let cli = Cli::try_parse_from([
            "jammer", "headers", "--path", "/jam/a.js", "--policy", "proxy",
        ])
        .unwrap();
        match cli.command {
            Commands::Headers(args) => {
                assert_eq!(args.policy, CachePolicy::Proxy);
                assert!(args.accept_encoding.is_none());
            }
            _ => panic!("Expected Headers command"),
        }
    }

    #[test]
    fn test_cli_parsing_session() {
        let cli = Cli::try_parse_from([
            "jammer", "session", "--type", "js", "--loaded", "a,b", "c", "d,e",
        ])
        .unwrap();
        match cli.command {
            Commands::Session(args) => {
                assert_eq!(args.extension, "js");
                assert_eq!(args.loaded, vec!["a", "b"]);
                assert_eq!(args.requests, vec!["c", "d,e"]);
            }
            _ => panic!("Expected Session command"),
        }
    }

    #[test]
    fn test_cli_global_overrides() {
        let cli = Cli::try_parse_from([
            "jammer",
            "resolve",
            "--deps",
            "a",
            "--type",
            "css",
            "--debug",
            "--root-uri",
            "/assets",
        ])
        .unwrap();
        let overrides = cli.overrides();

        assert!(overrides.debug);
        assert_eq!(overrides.root_uri.as_deref(), Some("/assets"));
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["jammer", "completions", "--shell", "zsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Completions(CompletionsArgs { shell: Shell::Zsh })
        ));
    }
}
