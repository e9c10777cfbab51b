//! Submission cap enforcement and the overflow artifact.
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// What to do with the new hashes of one run: a single submit of
/// everything, or no submit at all with the tail persisted for later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionPlan {
    Submit(Vec<String>),
    Overflow {
        ready: Vec<String>,
        overflow: Vec<String>,
    },
}

/// Split `new_hashes` against the per-request cap. At most `cap` entries
/// may be submitted in one run; anything past that index overflows.
pub fn plan(mut new_hashes: Vec<String>, cap: usize) -> SubmissionPlan {
    if new_hashes.len() <= cap {
        SubmissionPlan::Submit(new_hashes)
    } else {
        let overflow = new_hashes.split_off(cap);
        SubmissionPlan::Overflow {
            ready: new_hashes,
            overflow,
        }
    }
}

/// Write overflowed hashes one per line, replacing any previous file.
pub fn write_overflow<P: AsRef<Path>>(path: P, hashes: &[String]) -> io::Result<()> {
    let mut f = File::create(path)?;
    for hash in hashes {
        writeln!(f, "{hash}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn numbered(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("h{i}")).collect()
    }

    #[test]
    fn exactly_at_the_cap_submits_everything() {
        match plan(numbered(50), 50) {
            SubmissionPlan::Submit(hashes) => assert_eq!(hashes.len(), 50),
            other => panic!("expected Submit, got {other:?}"),
        }
    }

    #[test]
    fn one_past_the_cap_overflows_exactly_one() {
        match plan(numbered(51), 50) {
            SubmissionPlan::Overflow { ready, overflow } => {
                assert_eq!(ready.len(), 50);
                assert_eq!(overflow, vec!["h50".to_string()]);
            }
            other => panic!("expected Overflow, got {other:?}"),
        }
    }

    #[test]
    fn overflow_keeps_relative_order() {
        match plan(numbered(53), 50) {
            SubmissionPlan::Overflow { ready, overflow } => {
                assert_eq!(ready.last().unwrap(), "h49");
                assert_eq!(overflow, vec!["h50".to_string(), "h51".to_string(), "h52".to_string()]);
            }
            other => panic!("expected Overflow, got {other:?}"),
        }
    }

    #[test]
    fn overflow_file_is_overwritten_not_appended() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("overflow.txt");
        write_overflow(&path, &numbered(3)).unwrap();
        write_overflow(&path, &["only".to_string()]).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "only\n");
    }
}
