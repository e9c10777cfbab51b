//! Terminal rendering: raw response dumps and run summaries.
//!
//! Response bodies are printed verbatim, one `key: value` line per
//! top-level field, so the service's answer is visible exactly as it came
//! back. Only the summary headlines are colored.
use colored::Colorize;
use serde_json::Value;

use crate::api::ApiResponse;
use crate::config::Config;
use crate::engine::RunOutcome;

/// Status line followed by the body in key-value form.
pub fn render_response(resp: &ApiResponse) -> String {
    let mut out = format!("HTTP {}\n", resp.status);
    match &resp.body {
        Value::Object(map) => {
            for (key, value) in map {
                out.push_str(&format!("{key}: {value}\n"));
            }
        }
        other => out.push_str(&format!("{other}\n")),
    }
    out
}

/// Human summary of a normal-mode run.
pub fn render_outcome(outcome: &RunOutcome, config: &Config) -> String {
    match outcome {
        RunOutcome::NoLocalHashes => format!(
            "No hashes found (no .{} files in this directory, or all were empty).",
            config.input_extension
        ),
        RunOutcome::AllKnown { total } => format!(
            "{}: all {} local hashes are already submitted on this account.",
            "Nothing to do".bold().green(),
            total
        ),
        RunOutcome::Submitted {
            submitted,
            skipped,
            response,
        } => {
            let headline = if response.is_success() {
                format!("Submitted {submitted} new hashes ({skipped} already on the account)")
                    .bold()
                    .green()
                    .to_string()
            } else {
                "Submission rejected by the service"
                    .bold()
                    .red()
                    .to_string()
            };
            format!("{headline}\n{}", render_response(response))
        }
        RunOutcome::Overflow { ready, written } => format!(
            "{}: more than {} new hashes remain, nothing was submitted (one call per run).\n\
             - first {ready} new hashes are ready for the next run\n\
             - wrote the remaining {written} to {}",
            "Too many new hashes".bold().yellow(),
            config.max_hashes_per_request,
            config.overflow_file
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_renders_status_then_sorted_key_value_pairs() {
        let resp = ApiResponse {
            status: 200,
            body: json!({"tasks": [], "success": true}),
        };
        insta::assert_snapshot!(render_response(&resp), @r###"
        HTTP 200
        success: true
        tasks: []
        "###);
    }

    #[test]
    fn non_object_bodies_render_as_is() {
        let resp = ApiResponse {
            status: 502,
            body: json!("bad gateway"),
        };
        assert_eq!(render_response(&resp), "HTTP 502\n\"bad gateway\"\n");
    }

    #[test]
    fn overflow_summary_names_counts_and_file() {
        colored::control::set_override(false);
        let config = Config::default();
        let s = render_outcome(
            &RunOutcome::Overflow {
                ready: 50,
                written: 7,
            },
            &config,
        );
        assert!(s.contains("first 50 new hashes"));
        assert!(s.contains("remaining 7"));
        assert!(s.contains("ohc_overflow_hashes.txt"));
    }

    #[test]
    fn no_local_hashes_summary_names_the_extension() {
        let config = Config::default();
        let s = render_outcome(&RunOutcome::NoLocalHashes, &config);
        assert!(s.contains(".hc22000"));
    }
}
