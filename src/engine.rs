//! Run orchestration: the list flow, and the normal flow that collects
//! local hashes, diffs them against the account, and submits or overflows.
//! Generic over the task client so tests can script the remote side.
//!
//! Typical usage:
//!
//! ```no_run
//! use ohc_uploader::{api::OhcClient, config::Config, engine};
//! # fn main() -> Result<(), ohc_uploader::error::Error> {
//! let config = Config::from_env();
//! config.validate()?;
//! let client = OhcClient::new(config.clone())?;
//! let outcome = engine::run_upload(&config, &client, std::path::Path::new("."))?;
//! std::process::exit(outcome.exit_code());
//! # }
//! ```
use std::path::Path;

use log::info;

use crate::api::{ApiResponse, TaskClient};
use crate::batch::{self, SubmissionPlan};
use crate::collect::collect_hashes;
use crate::config::Config;
use crate::error::Error;
use crate::reconcile::{existing_hashes, filter_new};

/// Terminal state of a normal-mode run that did not fail outright.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// No matching input files, or all of them empty.
    NoLocalHashes,
    /// Every local hash is already on the account.
    AllKnown { total: usize },
    /// One submit call was made; its response decides success.
    Submitted {
        submitted: usize,
        skipped: usize,
        response: ApiResponse,
    },
    /// Too many new hashes; the tail was written out instead of submitted.
    Overflow { ready: usize, written: usize },
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::NoLocalHashes | RunOutcome::AllKnown { .. } => 0,
            RunOutcome::Submitted { response, .. } => {
                if response.is_success() {
                    0
                } else {
                    3
                }
            }
            RunOutcome::Overflow { .. } => 1,
        }
    }
}

/// List mode: one `list_tasks` call, response handed back for display.
pub fn run_list<C: TaskClient>(client: &C) -> Result<ApiResponse, Error> {
    client.fetch_tasks()
}

/// Normal mode: collect local hashes, drop the ones the account already
/// has, then either submit the remainder in one call or persist the
/// overflow. The task list must come back successfully before any diffing;
/// an incomplete existing-set would resubmit known hashes.
pub fn run_upload<C: TaskClient>(
    config: &Config,
    client: &C,
    dir: &Path,
) -> Result<RunOutcome, Error> {
    let local = collect_hashes(dir, &config.input_extension)?;
    if local.is_empty() {
        return Ok(RunOutcome::NoLocalHashes);
    }
    let total = local.len();
    info!(
        "found {total} unique hashes across local .{} files",
        config.input_extension
    );

    info!("checking the account for already-submitted hashes");
    let tasks = client.fetch_tasks()?;
    if !tasks.is_success() {
        return Err(Error::Api {
            status: tasks.status,
            message: tasks.error_message(),
        });
    }

    let existing = existing_hashes(&tasks.body);
    let new_hashes = filter_new(local, &existing);
    let skipped = total - new_hashes.len();
    info!(
        "already on the account: {skipped}, new to submit: {}",
        new_hashes.len()
    );

    if new_hashes.is_empty() {
        return Ok(RunOutcome::AllKnown { total });
    }

    match batch::plan(new_hashes, config.max_hashes_per_request) {
        SubmissionPlan::Submit(hashes) => {
            info!("submitting one request with {} new hashes", hashes.len());
            let submitted = hashes.len();
            let response = client.submit(&hashes)?;
            Ok(RunOutcome::Submitted {
                submitted,
                skipped,
                response,
            })
        }
        SubmissionPlan::Overflow { ready, overflow } => {
            batch::write_overflow(dir.join(&config.overflow_file), &overflow)?;
            Ok(RunOutcome::Overflow {
                ready: ready.len(),
                written: overflow.len(),
            })
        }
    }
}
