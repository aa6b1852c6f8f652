//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_source_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use assetmirror_core::AssetPath;
use assetmirror_core::EmptyDirPolicy;
use assetmirror_core::ExtractConfig;
use assetmirror_core::NoopProgress;
use assetmirror_core::mirror_into;
use assetmirror_core::namespace::open_package;
use std::env;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter, quiet: bool) -> Result<()> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let source_root = match &args.subtree {
        Some(subtree) => add_source_context(AssetPath::parse(subtree), &args.source)?,
        None => AssetPath::root(),
    };

    let config = ExtractConfig {
        force: args.force,
        empty_dirs: if args.create_empty_dirs {
            EmptyDirPolicy::Create
        } else {
            EmptyDirPolicy::Skip
        },
        source_root,
    };

    let assets = add_source_context(
        open_package(&args.source, args.prefix.as_deref()),
        &args.source,
    )?;

    // Spinner only on an interactive terminal with human output
    let report = if !quiet && CliProgress::should_show() {
        let mut progress = CliProgress::new("Extracting");
        add_source_context(
            mirror_into(&assets, &output_dir, &config, &mut progress),
            &args.source,
        )?
    } else {
        let mut noop = NoopProgress;
        add_source_context(
            mirror_into(&assets, &output_dir, &config, &mut noop),
            &args.source,
        )?
    };

    formatter.format_extraction_result(&report)?;

    Ok(())
}
