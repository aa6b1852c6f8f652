//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "assetmirror")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (also raises extractor logging to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mirror bundled assets into a directory
    Extract(ExtractArgs),
    /// List bundled assets without extraction
    List(ListArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Asset source: a directory, or a zip/apk/jar/aar/tar/tar.gz package
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Destination directory, which must already exist (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Package subdirectory to treat as the asset root (e.g. "assets")
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Only mirror this subtree of the asset root
    #[arg(long, value_name = "PATH")]
    pub subtree: Option<String>,

    /// Create empty directories when the source can identify them
    #[arg(long)]
    pub create_empty_dirs: bool,

    /// Overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Asset source: a directory, or a zip/apk/jar/aar/tar/tar.gz package
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Package subdirectory to treat as the asset root (e.g. "assets")
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Show the kind of every entry
    #[arg(short, long)]
    pub long: bool,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract() {
        let cli = Cli::try_parse_from([
            "assetmirror",
            "extract",
            "app.apk",
            "out",
            "--prefix",
            "assets",
            "--force",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.source, PathBuf::from("app.apk"));
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.prefix.as_deref(), Some("assets"));
        assert!(args.force);
        assert!(!args.create_empty_dirs);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["assetmirror", "-v", "-q", "list", "x"]).is_err());
    }
}
