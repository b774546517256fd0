mod cli;
mod runner;
mod suites;

/// Relative to the workspace root, where this binary is expected to run from.
pub const TEST_SUITES_PATH: &str = "test/suites";

fn main() {
    cli::exec()
}
