//! List command implementation

use crate::cli::ListArgs;
use crate::error::add_source_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use assetmirror_core::AssetPath;
use assetmirror_core::list_assets;
use assetmirror_core::namespace::open_package;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let assets = add_source_context(
        open_package(&args.source, args.prefix.as_deref()),
        &args.source,
    )?;

    let manifest = add_source_context(list_assets(&assets, &AssetPath::root()), &args.source)?;

    if args.long {
        formatter.format_manifest_long(&manifest)?;
    } else {
        formatter.format_manifest_short(&manifest)?;
    }

    Ok(())
}
