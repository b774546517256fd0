//! Diagnostic rendering helpers shared by `app` and anything else that
//! turns a `miette::Report` into terminal output.
//!
//! A typical `miette_util` crate converts `codespan::Span` byte offsets
//! to/from `miette::SourceSpan` so a report can underline a slice of source
//! text it holds in memory. This engine never holds source text at runtime
//! — `p4st-ast::Region` is a line/column label attached to already-elaborated
//! IL, not a byte range into a loaded file — so there is nothing to convert
//! into a `SourceSpan`. What this crate keeps is the `ToMiette` naming
//! convention and a single-report rendering helper.

use p4st_ast::Region;

/// `ToMiette` here only ever targets a human-readable label, since there is
/// no source span to build.
pub trait ToMiette {
    type Target;

    fn to_miette(self) -> Self::Target;
}

impl ToMiette for Region {
    type Target = String;

    fn to_miette(self) -> Self::Target {
        self.to_string()
    }
}

impl ToMiette for &Region {
    type Target = String;

    fn to_miette(self) -> Self::Target {
        self.to_string()
    }
}

/// Terminal width for pretty-printing.
const TERMINAL_WIDTH: usize = 200;

/// Renders one diagnostic report to a string, the single-report case this
/// engine's CLI needs.
pub fn render_report_to_string(report: &miette::Report, colorize: bool) -> String {
    let theme = if colorize { miette::GraphicalTheme::unicode() } else { miette::GraphicalTheme::unicode_nocolor() };
    let handler = miette::GraphicalReportHandler::new_themed(theme).with_width(TERMINAL_WIDTH);
    let mut output = String::new();
    handler.render_report(&mut output, report.as_ref()).expect("failed to render report");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use p4st_ast::{Position, Region};

    #[test]
    fn region_renders_as_its_display_string() {
        let region = Region::new(None, Position::new(1, 2), Position::new(1, 5));
        assert_eq!(region.clone().to_miette(), region.to_string());
    }
}
