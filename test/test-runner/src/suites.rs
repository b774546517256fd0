use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde_derive::Deserialize;
use walkdir::WalkDir;

/// What a case asks the engine to do: run a relation against input values,
/// or call a deterministic function against argument values.
#[derive(Deserialize)]
#[serde(tag = "kind")]
pub enum Invocation {
    Run { relation: String, inputs: Vec<serde_json::Value> },
    Call { function: String, args: Vec<serde_json::Value> },
}

/// One test case: an IL spec, what to invoke against it, and (once
/// recorded) the golden output it's expected to produce.
#[derive(Clone)]
pub struct Case {
    pub suite: String,
    pub name: String,
    pub spec_path: PathBuf,
    invoke_path: PathBuf,
}

impl Case {
    fn new(suite: String, invoke_path: PathBuf) -> Self {
        let stem = invoke_path.file_name().unwrap().to_str().unwrap();
        let name = stem.strip_suffix(".invoke.json").unwrap_or(stem).to_owned();
        let spec_path = invoke_path.with_file_name(format!("{name}.json"));
        Case { suite, name, spec_path, invoke_path }
    }

    pub fn spec_json(&self) -> String {
        fs::read_to_string(&self.spec_path)
            .unwrap_or_else(|e| panic!("reading spec for case `{}`: {e}", self.name))
    }

    pub fn invocation(&self) -> Invocation {
        let text = fs::read_to_string(&self.invoke_path)
            .unwrap_or_else(|e| panic!("reading invocation for case `{}`: {e}", self.name));
        serde_json::from_str(&text).unwrap_or_else(|e| panic!("parsing invocation for case `{}`: {e}", self.name))
    }

    pub fn expected(&self) -> Option<String> {
        let path = self.expected_path();
        path.is_file().then(|| fs::read_to_string(path).unwrap())
    }

    pub fn set_expected(&self, s: &str) {
        fs::write(self.expected_path(), s).unwrap();
    }

    fn expected_path(&self) -> PathBuf {
        self.invoke_path.parent().unwrap().join(format!("{}.expected", self.name))
    }
}

fn case_paths(path: impl AsRef<Path>) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file() && path.file_name().and_then(OsStr::to_str).is_some_and(|n| n.ends_with(".invoke.json"))
        })
}

/// A suite's `suite.json` sidecar: no phase names, since this engine has a
/// single evaluation step rather than a parse/lower/check pipeline that
/// could fail partway through.
#[derive(Default, Deserialize, Clone)]
pub struct Config {
    /// If set, every case in the suite is expected to error rather than run
    /// to completion.
    #[serde(default)]
    pub expect_failure: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone)]
pub struct Suite {
    pub name: String,
    pub config: Config,
    pub cases: Vec<Case>,
}

impl Suite {
    fn new(path: PathBuf) -> Self {
        let name = path.file_name().unwrap().to_str().unwrap().to_owned();

        let config_path = path.join("suite.json");
        let config = if config_path.is_file() {
            let text = fs::read_to_string(config_path).unwrap();
            serde_json::from_str(&text).unwrap()
        } else {
            Config::default()
        };

        let cases = case_paths(&path).map(|p| Case::new(name.clone(), p)).collect();

        Suite { name, config, cases }
    }
}

pub fn load(path: impl AsRef<Path>) -> impl Iterator<Item = Suite> {
    let suite_dirs = WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_dir());
    suite_dirs.map(Suite::new)
}
