//! Helpers to run the `fastdiag-solver` binary in integration tests.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::collections::BTreeSet;
use std::fs::File;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;
use std::time::Duration;

use regex::Regex;
use wait_timeout::ChildExt;

#[derive(Debug)]
pub(crate) struct Files {
    pub(crate) instance_file: PathBuf,
    pub(crate) log_file: PathBuf,
    pub(crate) err_file: PathBuf,
}

impl Files {
    pub(crate) fn cleanup(self) -> std::io::Result<()> {
        std::fs::remove_file(self.log_file)?;
        std::fs::remove_file(self.err_file)?;

        Ok(())
    }
}

/// The sets of constraint names printed by the solver.
#[derive(Debug, Default)]
pub(crate) struct SolverOutput {
    pub(crate) conflicts: BTreeSet<BTreeSet<String>>,
    pub(crate) diagnoses: BTreeSet<BTreeSet<String>>,
    pub(crate) num_conflict_lines: usize,
    pub(crate) num_diagnosis_lines: usize,
    pub(crate) no_conflict: bool,
    pub(crate) no_diagnosis: bool,
    pub(crate) statistics: Vec<(String, u64)>,
    pub(crate) raw: String,
}

pub(crate) fn instance_path(instance_name: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}/tests/instances/{instance_name}.kb",
        env!("CARGO_MANIFEST_DIR")
    ))
}

/// Runs the solver on the instance and returns its output. The output files are named after
/// `prefix`, so that tests which share an instance do not overwrite each other's output.
pub(crate) fn run_solver(instance_name: &str, prefix: &str, args: &[&str]) -> SolverOutput {
    let files = run_solver_with_options(instance_name, prefix, args);

    let raw = std::fs::read_to_string(&files.log_file).expect("Failed to read the log file.");
    files.cleanup().expect("Failed to remove the output files.");

    parse_output(raw)
}

pub(crate) fn run_solver_with_options(
    instance_name: &str,
    prefix: &str,
    args: &[&str],
) -> Files {
    const TEST_TIMEOUT: Duration = Duration::from_secs(60);

    let instance_path = instance_path(instance_name);
    let solver = PathBuf::from(env!("CARGO_BIN_EXE_fastdiag-solver"));

    let log_file_path = instance_path.with_extension(format!("{prefix}.log"));
    let err_file_path = instance_path.with_extension(format!("{prefix}.err"));

    let mut command = Command::new(solver);
    for arg in args {
        let _ = command.arg(arg);
    }

    let mut child = command
        .arg(&instance_path)
        .stdout(File::create(&log_file_path).expect("Failed to create log file."))
        .stderr(File::create(&err_file_path).expect("Failed to create error file."))
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run solver.");

    match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => panic!("solver took more than {} seconds", TEST_TIMEOUT.as_secs()),
        Ok(Some(status)) if status.success() => {}
        Ok(Some(e)) => panic!("error diagnosing instance {e}"),
        Err(e) => panic!("error starting solver: {e}"),
    }

    Files {
        instance_file: instance_path,
        log_file: log_file_path,
        err_file: err_file_path,
    }
}

fn parse_output(raw: String) -> SolverOutput {
    let set_regex = Regex::new(r"^(conflict|diagnosis): \{(.*)\}$").expect("valid regex");
    let statistic_regex = Regex::new(r"^%%%fastdiag-stat: (\w+)=(\d+)$").expect("valid regex");

    let mut output = SolverOutput::default();
    let mut done = false;

    for line in raw.lines() {
        if let Some(captures) = set_regex.captures(line) {
            let names = captures[2]
                .split(", ")
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect::<BTreeSet<_>>();

            if &captures[1] == "conflict" {
                output.num_conflict_lines += 1;
                let _ = output.conflicts.insert(names);
            } else {
                output.num_diagnosis_lines += 1;
                let _ = output.diagnoses.insert(names);
            }
        } else if let Some(captures) = statistic_regex.captures(line) {
            let value = captures[2].parse().expect("numeric statistic");
            output.statistics.push((captures[1].to_owned(), value));
        } else if line == "no conflict" {
            output.no_conflict = true;
        } else if line == "no diagnosis" {
            output.no_diagnosis = true;
        } else if line == "% done" {
            done = true;
        }
    }

    assert!(done, "the solver did not finish its output:\n{raw}");
    output.raw = raw;
    output
}

/// Builds the expected sets of constraint names.
pub(crate) fn sets(expected: &[&[&str]]) -> BTreeSet<BTreeSet<String>> {
    expected
        .iter()
        .map(|names| names.iter().map(|&name| name.to_owned()).collect())
        .collect()
}
