use std::io::Write;

use p4st_driver::{value_to_json, Engine};
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

use crate::suites::{Case, Config, Invocation, Suite};

pub struct Args {
    pub filter: Option<String>,
}

pub struct Runner {
    suites: Vec<Suite>,
}

impl Runner {
    pub fn load(suites_path: impl AsRef<std::path::Path>) -> Self {
        let suites: Vec<Suite> = crate::suites::load(suites_path).collect();
        log::debug!("loaded {} suite(s)", suites.len());
        Runner { suites }
    }

    pub fn run(&self, args: &Args) -> RunResult {
        let mut executed_cases = 0u32;
        let mut failed_cases = 0u32;
        let mut results = Vec::new();

        for suite in &self.suites {
            let result = self.run_suite(args, suite);
            executed_cases += result.executed_cases;
            failed_cases += result.failed_cases;
            results.push(result);
        }

        RunResult { results, executed_cases, failed_cases }
    }

    fn run_suite(&self, args: &Args, suite: &Suite) -> SuiteResult {
        let mut executed_cases = 0u32;
        let mut failed_cases = 0u32;
        let mut results = Vec::new();

        for case in &suite.cases {
            if !matches_filter(&suite.name, &case.name, args.filter.as_deref()) {
                continue;
            }
            let result = run_case(&suite.config, case);
            executed_cases += 1;
            if result.outcome.is_err() {
                failed_cases += 1;
            }
            results.push(result);
        }

        SuiteResult { suite: suite.clone(), results, executed_cases, failed_cases }
    }
}

fn matches_filter(suite: &str, case: &str, filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(f) => suite.contains(f) || case.contains(f),
    }
}

/// What a single case run produces, rendered to a string so it can be
/// diffed against the case's golden `.expected` file.
fn render(engine_result: Result<String, String>) -> String {
    match engine_result {
        Ok(rendering) => rendering,
        Err(message) => format!("error: {message}"),
    }
}

fn run_invocation(case: &Case) -> Result<String, String> {
    let engine = Engine::load_spec_json(&case.spec_json()).map_err(|e| e.to_string())?;
    match case.invocation() {
        Invocation::Run { relation, inputs } => {
            let outcome = engine.run_relation(&relation, &inputs).map_err(|e| e.to_string())?;
            let mut bindings = outcome.bindings;
            bindings.sort_by(|a, b| a.0.cmp(&b.0));
            let mut lines: Vec<String> =
                bindings.iter().map(|(name, value)| format!("{name} = {}", value_to_json(value))).collect();
            lines.push(format!("phantoms = {}", outcome.phantom_log.len()));
            Ok(lines.join("\n"))
        }
        Invocation::Call { function, args } => {
            let value = engine.call_function(&function, &args).map_err(|e| e.to_string())?;
            Ok(value_to_json(&value).to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub enum Failure {
    Mismatch { actual: String, expected: String },
    ExpectedFailure { actual: String },
    NoExpectedFile { actual: String },
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::Mismatch { actual, expected } => {
                write!(f, "expected:\n{expected}\nactual:\n{actual}")
            }
            Failure::ExpectedFailure { actual } => {
                write!(f, "suite expects every case to fail, but this one produced:\n{actual}")
            }
            Failure::NoExpectedFile { actual } => {
                write!(f, "no `.expected` file recorded yet; actual output was:\n{actual}")
            }
        }
    }
}

fn run_case(config: &Config, case: &Case) -> CaseResult {
    let actual = render(run_invocation(case));
    let is_error = actual.starts_with("error: ");

    let outcome = if config.expect_failure && !is_error {
        Err(Failure::ExpectedFailure { actual: actual.clone() })
    } else {
        match case.expected() {
            Some(expected) if expected == actual => Ok(()),
            Some(expected) => Err(Failure::Mismatch { actual: actual.clone(), expected }),
            None => Err(Failure::NoExpectedFile { actual: actual.clone() }),
        }
    };

    CaseResult { case: case.clone(), actual, outcome }
}

pub struct RunResult {
    results: Vec<SuiteResult>,
    executed_cases: u32,
    failed_cases: u32,
}

impl RunResult {
    pub fn success(&self) -> bool {
        self.failed_cases == 0
    }

    pub fn update_expected(&self) {
        for result in self.results.iter().flat_map(|s| s.results.iter()) {
            if matches!(result.outcome, Err(Failure::Mismatch { .. }) | Err(Failure::NoExpectedFile { .. })) {
                result.case.set_expected(&result.actual);
            }
        }
    }

    pub fn print(&self) {
        let mut out = StandardStream::stdout(termcolor::ColorChoice::Auto);
        for suite in &self.results {
            suite.print(&mut out);
        }
        let _ = writeln!(
            out,
            "In total: {}/{} successful",
            self.executed_cases - self.failed_cases,
            self.executed_cases
        );
    }
}

pub struct SuiteResult {
    suite: Suite,
    results: Vec<CaseResult>,
    executed_cases: u32,
    failed_cases: u32,
}

impl SuiteResult {
    fn print(&self, out: &mut StandardStream) {
        let _ = writeln!(out, "Suite \"{}\":", self.suite.name);
        let mut results = self.results.clone();
        results.sort_by(|a, b| a.case.name.cmp(&b.case.name));
        for result in &results {
            result.print(out);
        }
        let _ = writeln!(out, "{}/{} successful\n", self.executed_cases - self.failed_cases, self.executed_cases);
    }
}

#[derive(Clone)]
pub struct CaseResult {
    case: Case,
    actual: String,
    outcome: Result<(), Failure>,
}

impl CaseResult {
    fn print(&self, out: &mut StandardStream) {
        match &self.outcome {
            Ok(()) => {
                let _ = out.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                let _ = writeln!(out, "    - {:60} ok", self.case.name);
                let _ = out.reset();
            }
            Err(err) => {
                let _ = out.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                let _ = writeln!(out, "    - {:60} FAILED", self.case.name);
                let _ = out.reset();
                let _ = writeln!(out, "      {err}\n");
            }
        }
    }
}
