//! Field-level merge policies.
//!
//! Every helper takes borrowed layers ordered from least to most specific
//! and returns a freshly owned value. Inputs are never modified.
//!
//! | Policy                         | Used for                                |
//! |--------------------------------|-----------------------------------------|
//! | [`merge_arrays`]               | `customizations.vscode.extensions`      |
//! | [`deep_merge`]                 | `features`, `vscode.settings`           |
//! | [`merge_env`]                  | `containerEnv`, `remoteEnv`             |
//! | [`merge_mounts`]               | `mounts`                                |
//! | [`merge_post_create_command`]  | `postCreateCommand`                     |
//! | [`merge_path`]                 | `remoteEnv.PATH`                        |

use std::collections::HashMap;

use serde_json::Value;

use super::config::{EnvMap, JsonObject, LifecycleCommand, Mount};

/// Separator for concatenated commands: run in order, stop at first failure.
pub const COMMAND_SEPARATOR: &str = " && ";

/// Separator between `PATH` entries.
pub const PATH_SEPARATOR: char = ':';

/// Concatenate `base` then `preset`, dropping repeated values.
///
/// First occurrence wins the position. When only one side is present it is
/// returned as-is.
pub fn merge_arrays<T: Clone + PartialEq>(base: Option<&[T]>, preset: Option<&[T]>) -> Option<Vec<T>> {
    match (base, preset) {
        (None, None) => None,
        (Some(only), None) | (None, Some(only)) => Some(only.to_vec()),
        (Some(base), Some(preset)) => {
            let mut merged: Vec<T> = Vec::with_capacity(base.len() + preset.len());
            for item in base.iter().chain(preset) {
                if !merged.contains(item) {
                    merged.push(item.clone());
                }
            }
            Some(merged)
        }
    }
}

/// Recursively merge two JSON objects, `preset` winning on conflicts.
///
/// Keys recurse only when both sides hold an object. Arrays, scalars and
/// `null` from `preset` replace the base value wholesale.
pub fn deep_merge(base: Option<&JsonObject>, preset: Option<&JsonObject>) -> Option<JsonObject> {
    match (base, preset) {
        (None, None) => None,
        (Some(only), None) | (None, Some(only)) => Some(only.clone()),
        (Some(base), Some(preset)) => Some(merge_objects(base, preset)),
    }
}

fn merge_objects(base: &JsonObject, overlay: &JsonObject) -> JsonObject {
    let mut result = base.clone();
    for (key, overlay_value) in overlay {
        let merged = match (result.get(key), overlay_value) {
            (Some(Value::Object(base_map)), Value::Object(overlay_map)) => {
                Value::Object(merge_objects(base_map, overlay_map))
            }
            _ => overlay_value.clone(),
        };
        result.insert(key.clone(), merged);
    }
    result
}

/// Key-wise merge of two environment maps, `preset` winning.
pub fn merge_env(base: Option<&EnvMap>, preset: Option<&EnvMap>) -> Option<EnvMap> {
    match (base, preset) {
        (None, None) => None,
        (Some(only), None) | (None, Some(only)) => Some(only.clone()),
        (Some(base), Some(preset)) => {
            let mut merged = base.clone();
            merged.extend(preset.iter().map(|(k, v)| (k.clone(), v.clone())));
            Some(merged)
        }
    }
}

/// Merge mount lists from all three layers, de-duplicating by target.
///
/// A later entry with an already-seen target replaces the earlier one in
/// place. Entries without a target are de-duplicated by exact value.
pub fn merge_mounts(
    base: Option<&[Mount]>,
    preset: Option<&[Mount]>,
    project: Option<&[Mount]>,
) -> Option<Vec<Mount>> {
    let mut result: Vec<Mount> = Vec::new();
    let mut by_target: HashMap<&str, usize> = HashMap::new();

    for mount in [base, preset, project].into_iter().flatten().flatten() {
        match mount.target() {
            Some(target) => match by_target.get(target) {
                Some(&index) => result[index] = mount.clone(),
                None => {
                    by_target.insert(target, result.len());
                    result.push(mount.clone());
                }
            },
            None if !result.contains(mount) => result.push(mount.clone()),
            None => {}
        }
    }

    (!result.is_empty()).then_some(result)
}

/// Concatenate base then preset instructions into one fail-fast command line.
pub fn merge_post_create_command(
    base: Option<&LifecycleCommand>,
    preset: Option<&LifecycleCommand>,
) -> Option<String> {
    let instructions: Vec<&str> = [base, preset]
        .into_iter()
        .flatten()
        .flat_map(LifecycleCommand::instructions)
        .collect();

    (!instructions.is_empty()).then(|| instructions.join(COMMAND_SEPARATOR))
}

/// Prepend `preset_path` to `base_path` so the preset's directories are
/// searched first. Empty strings count as absent.
pub fn merge_path(base_path: Option<&str>, preset_path: Option<&str>) -> Option<String> {
    let base_path = base_path.filter(|p| !p.is_empty());
    let preset_path = preset_path.filter(|p| !p.is_empty());

    match (base_path, preset_path) {
        (None, None) => None,
        (Some(only), None) | (None, Some(only)) => Some(only.to_owned()),
        (Some(base), Some(preset)) => Some(format!("{preset}{PATH_SEPARATOR}{base}")),
    }
}
