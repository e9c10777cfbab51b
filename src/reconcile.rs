use std::collections::HashSet;

use serde_json::Value;

/// Hashes already on the account, pulled from the `tasks` array of a list
/// response. Entries without a usable hash field are skipped, as is an
/// empty hash; a missing or non-array `tasks` field yields an empty set.
pub fn existing_hashes(body: &Value) -> HashSet<String> {
    body.get("tasks")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|task| task.get("hash").and_then(Value::as_str))
        .filter(|hash| !hash.is_empty())
        .map(str::to_string)
        .collect()
}

/// Order-preserving set difference: local hashes not yet on the account.
pub fn filter_new(local: Vec<String>, existing: &HashSet<String>) -> Vec<String> {
    local
        .into_iter()
        .filter(|hash| !existing.contains(hash))
        .collect()
}
