//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use assetmirror_core::AssetManifest;
use assetmirror_core::ExtractionReport;
use assetmirror_core::NodeKind;
use console::Term;
use console::style;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn kind_char(kind: Option<NodeKind>) -> char {
        match kind {
            Some(NodeKind::Directory) => 'd',
            Some(NodeKind::File) => '-',
            None => '?',
        }
    }

    fn write_header(&self, ok: bool, message: &str) {
        let line = if !self.use_colors {
            message.to_string()
        } else if ok {
            format!("{} {message}", style("✓").green().bold())
        } else {
            format!("{} {message}", style("⚠").yellow().bold())
        };
        let _ = self.term.write_line(&line);
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if report.is_clean() {
            self.write_header(true, "Extraction complete");
        } else {
            self.write_header(false, "Extraction complete with failures");
        }

        let _ = self.term.write_line(&format!(
            "  Files copied:     {}",
            Self::format_number(report.files_copied)
        ));
        let _ = self.term.write_line(&format!(
            "  Files skipped:    {}",
            Self::format_number(report.files_skipped)
        ));
        let _ = self.term.write_line(&format!(
            "  Directories:      {}",
            Self::format_number(report.directories_created)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_written)
        ));

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "  Unreadable:       {}",
                report.leaves_unreadable
            ));
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", report.duration));
        }

        if report.has_warnings() {
            let _ = self.term.write_line("");
            if self.use_colors {
                let _ = self
                    .term
                    .write_line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                let _ = self.term.write_line("Warnings:");
            }
            for warning in &report.warnings {
                let _ = self.term.write_line(&format!("  - {warning}"));
            }
        }

        Ok(())
    }

    fn format_manifest_short(&self, manifest: &AssetManifest) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in &manifest.entries {
            if entry.kind == Some(NodeKind::Directory) {
                let _ = self.term.write_line(&format!("{}/", entry.path));
            } else {
                let _ = self.term.write_line(entry.path.as_str());
            }
        }

        Ok(())
    }

    fn format_manifest_long(&self, manifest: &AssetManifest) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in &manifest.entries {
            let _ = self.term.write_line(&format!(
                "{} {}",
                Self::kind_char(entry.kind),
                entry.path
            ));
        }

        let _ = self.term.write_line("");
        let mut total = format!(
            "Total: {} files, {} directories",
            Self::format_number(manifest.total_files()),
            Self::format_number(manifest.total_directories())
        );
        if manifest.total_unknown() > 0 {
            total.push_str(&format!(
                ", {} unclassified",
                Self::format_number(manifest.total_unknown())
            ));
        }
        let _ = self.term.write_line(&total);

        if manifest.nodes_failed > 0 {
            let _ = self.term.write_line(&format!(
                "  {} entries could not be listed",
                manifest.nodes_failed
            ));
        }

        Ok(())
    }
}
