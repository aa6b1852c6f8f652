//! Diagnostic logging setup.

use anyhow::Context as _;
use anyhow::anyhow;
use assetmirror_core::LOG_TARGET;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV: &str = "ASSETMIRROR_LOG";

/// Enables tracing output to stderr.
///
/// `ASSETMIRROR_LOG` takes precedence over the verbosity flags. Without it,
/// the extractor logs at `warn`, at `debug` with `--verbose`, and only errors
/// with `--quiet`.
pub fn enable_tracing(verbose: bool, quiet: bool) -> anyhow::Result<()> {
    let filter = if let Ok(directives) = std::env::var(LOG_ENV) {
        EnvFilter::try_new(directives).context("invalid ASSETMIRROR_LOG")?
    } else {
        EnvFilter::try_new(default_directives(verbose, quiet))
            .context("invalid default log filter")?
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()
        .map_err(|e| anyhow!(e).context("failed to enable tracing"))?;

    Ok(())
}

fn default_directives(verbose: bool, quiet: bool) -> String {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    format!("error,{LOG_TARGET}={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives(false, false), "error,asset_extractor=warn");
        assert_eq!(default_directives(true, false), "error,asset_extractor=debug");
        assert_eq!(default_directives(false, true), "error,asset_extractor=error");
    }

    #[test]
    fn test_default_directives_parse() {
        for (verbose, quiet) in [(false, false), (true, false), (false, true)] {
            assert!(EnvFilter::try_new(default_directives(verbose, quiet)).is_ok());
        }
    }
}
