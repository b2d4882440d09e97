//! Three-layer assembly: base → preset → project override.

use tracing::{instrument, trace};

use super::config::{
    Customizations, DevContainerConfig, LifecycleCommand, PATH_KEY, SCHEMA_URL,
    VsCodeCustomizations,
};
use super::merge::{
    deep_merge, merge_arrays, merge_env, merge_mounts, merge_path, merge_post_create_command,
};

/// Combine the three layers into one descriptor.
///
/// Whole-value fields (`name`, `image`, `remoteUser`, unknown keys, ...)
/// follow "most specific wins". Fields with a dedicated policy are merged
/// as described in [`super::merge`]. A `postCreateCommand` set on the
/// project layer, even an empty one, replaces the base and preset commands
/// instead of being appended to them. An explicit `null` there drops the
/// command altogether.
///
/// Never fails and never touches its inputs.
#[instrument(skip_all, fields(preset = preset.is_some(), project = project.is_some()))]
pub fn generate_preset_config(
    base: &DevContainerConfig,
    preset: Option<&DevContainerConfig>,
    project: Option<&DevContainerConfig>,
) -> DevContainerConfig {
    let layers = Layers {
        base,
        preset,
        project,
    };

    let post_create_command = match project.and_then(|p| p.post_create_command.as_ref()) {
        Some(explicit) => {
            trace!("project postCreateCommand overrides base and preset");
            explicit.clone().map(Some)
        }
        None => merge_post_create_command(
            base.post_create(),
            preset.and_then(DevContainerConfig::post_create),
        )
        .map(|cmd| Some(LifecycleCommand::Single(cmd))),
    };

    DevContainerConfig {
        schema: layers
            .most_specific(|c| c.schema.as_ref())
            .or_else(|| Some(SCHEMA_URL.to_owned())),
        name: layers.most_specific(|c| c.name.as_ref()),
        image: layers.most_specific(|c| c.image.as_ref()),
        docker_file: layers.most_specific(|c| c.docker_file.as_ref()),
        build: layers.most_specific(|c| c.build.as_ref()),
        features: deep_merge(
            deep_merge(
                base.features.as_ref(),
                preset.and_then(|p| p.features.as_ref()),
            )
            .as_ref(),
            project.and_then(|p| p.features.as_ref()),
        ),
        customizations: layers.customizations(),
        forward_ports: layers.most_specific(|c| c.forward_ports.as_ref()),
        post_create_command,
        post_start_command: layers.most_specific(|c| c.post_start_command.as_ref()),
        post_attach_command: layers.most_specific(|c| c.post_attach_command.as_ref()),
        container_env: merge_env(
            merge_env(
                base.container_env.as_ref(),
                preset.and_then(|p| p.container_env.as_ref()),
            )
            .as_ref(),
            project.and_then(|p| p.container_env.as_ref()),
        ),
        remote_env: layers.remote_env(),
        remote_user: layers.most_specific(|c| c.remote_user.as_ref()),
        mounts: merge_mounts(
            base.mounts.as_deref(),
            preset.and_then(|p| p.mounts.as_deref()),
            project.and_then(|p| p.mounts.as_deref()),
        ),
        extra: layers.extra(),
    }
}

struct Layers<'a> {
    base: &'a DevContainerConfig,
    preset: Option<&'a DevContainerConfig>,
    project: Option<&'a DevContainerConfig>,
}

impl<'a> Layers<'a> {
    /// Most specific to least specific.
    fn specific_first(&self) -> impl Iterator<Item = &'a DevContainerConfig> {
        [self.project, self.preset, Some(self.base)]
            .into_iter()
            .flatten()
    }

    fn most_specific<T, F>(&self, field: F) -> Option<T>
    where
        T: Clone + 'a,
        F: Fn(&'a DevContainerConfig) -> Option<&'a T>,
    {
        self.specific_first().find_map(field).cloned()
    }

    fn customizations(&self) -> Option<Customizations> {
        let base = self.base.customizations.as_ref();
        let preset = self.preset.and_then(|p| p.customizations.as_ref());
        let project = self.project.and_then(|p| p.customizations.as_ref());

        let base_vscode = self.base.vscode();
        let preset_vscode = self.preset.and_then(DevContainerConfig::vscode);
        let project_vscode = self.project.and_then(DevContainerConfig::vscode);

        let vscode = VsCodeCustomizations {
            extensions: merge_arrays(
                merge_arrays(
                    base_vscode.and_then(|v| v.extensions.as_deref()),
                    preset_vscode.and_then(|v| v.extensions.as_deref()),
                )
                .as_deref(),
                project_vscode.and_then(|v| v.extensions.as_deref()),
            ),
            settings: deep_merge(
                deep_merge(
                    base_vscode.and_then(|v| v.settings.as_ref()),
                    preset_vscode.and_then(|v| v.settings.as_ref()),
                )
                .as_ref(),
                project_vscode.and_then(|v| v.settings.as_ref()),
            ),
            other: deep_merge(
                deep_merge(
                    base_vscode.map(|v| &v.other),
                    preset_vscode.map(|v| &v.other),
                )
                .as_ref(),
                project_vscode.map(|v| &v.other),
            )
            .unwrap_or_default(),
        };

        let other = deep_merge(
            deep_merge(base.map(|c| &c.other), preset.map(|c| &c.other)).as_ref(),
            project.map(|c| &c.other),
        )
        .unwrap_or_default();

        if vscode.is_empty() && other.is_empty() {
            return None;
        }

        Some(Customizations {
            vscode: (!vscode.is_empty()).then_some(vscode),
            other,
        })
    }

    fn remote_env(&self) -> Option<super::config::EnvMap> {
        let mut merged = merge_env(
            merge_env(
                self.base.remote_env.as_ref(),
                self.preset.and_then(|p| p.remote_env.as_ref()),
            )
            .as_ref(),
            self.project.and_then(|p| p.remote_env.as_ref()),
        );

        let path = merge_path(
            merge_path(
                self.base.remote_path(),
                self.preset.and_then(DevContainerConfig::remote_path),
            )
            .as_deref(),
            self.project.and_then(DevContainerConfig::remote_path),
        );

        // A `null` PATH on the most specific layer stays unset.
        if let (Some(path), Some(env)) = (path, merged.as_mut()) {
            if let Some(Some(value)) = env.get_mut(PATH_KEY) {
                *value = path;
            }
        }
        merged
    }

    /// Shallow spread of pass-through keys, most specific last.
    fn extra(&self) -> super::config::JsonObject {
        let mut extra = self.base.extra.clone();
        for layer in [self.preset, self.project].into_iter().flatten() {
            for (key, value) in &layer.extra {
                extra.insert(key.clone(), value.clone());
            }
        }
        extra
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{EnvMap, Mount};
    use crate::domain::serialize::to_descriptor_json;
    use serde_json::json;

    fn layer(value: serde_json::Value) -> DevContainerConfig {
        serde_json::from_value(value).unwrap()
    }

    fn base() -> DevContainerConfig {
        layer(json!({
            "image": "mcr.microsoft.com/devcontainers/base:ubuntu",
            "features": {
                "ghcr.io/devcontainers/features/git:1": { "version": "latest" },
                "ghcr.io/devcontainers/features/node:1": { "version": "lts" }
            },
            "customizations": {
                "vscode": {
                    "extensions": ["eamodio.gitlens", "usernamehw.errorlens"],
                    "settings": {
                        "editor.formatOnSave": true,
                        "editor.codeActionsOnSave": { "source.fixAll": "explicit" }
                    }
                }
            },
            "remoteEnv": { "PATH": "/base/bin:${containerEnv:PATH}" },
            "mounts": ["source=${localEnv:HOME}/.claude,target=/home/dev-user/.claude,type=bind"],
            "postCreateCommand": "bash setup.sh",
            "remoteUser": "dev-user"
        }))
    }

    #[test]
    fn base_only_scenario() {
        let merged = generate_preset_config(&base(), None, None);
        assert_eq!(
            merged.post_create(),
            Some(&LifecycleCommand::from("bash setup.sh"))
        );
        assert_eq!(merged.image, base().image);
        assert_eq!(merged.schema.as_deref(), Some(SCHEMA_URL));
        assert_eq!(merged.remote_user.as_deref(), Some("dev-user"));
    }

    #[test]
    fn preset_scalars_override_base() {
        let preset = layer(json!({ "name": "Python Base", "image": "python:3.11" }));
        let merged = generate_preset_config(&base(), Some(&preset), None);
        assert_eq!(merged.name.as_deref(), Some("Python Base"));
        assert_eq!(merged.image.as_deref(), Some("python:3.11"));
    }

    #[test]
    fn project_scalars_override_preset() {
        let preset = layer(json!({ "name": "Preset" }));
        let project = layer(json!({ "name": "Project", "forwardPorts": [3000, "db:5432"] }));
        let merged = generate_preset_config(&base(), Some(&preset), Some(&project));
        assert_eq!(merged.name.as_deref(), Some("Project"));
        assert_eq!(merged.forward_ports.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn commands_appended_without_project_command() {
        let preset = layer(json!({ "postCreateCommand": "echo preset" }));
        let project = layer(json!({ "name": "x" }));
        let merged = generate_preset_config(&base(), Some(&preset), Some(&project));
        assert_eq!(
            merged.post_create(),
            Some(&LifecycleCommand::from("bash setup.sh && echo preset"))
        );
    }

    #[test]
    fn project_command_replaces_base_and_preset() {
        let base = layer(json!({ "image": "x", "postCreateCommand": "echo base" }));
        let preset = layer(json!({ "postCreateCommand": "echo preset" }));
        let project = layer(json!({ "postCreateCommand": "echo project" }));
        let merged = generate_preset_config(&base, Some(&preset), Some(&project));
        assert_eq!(
            merged.post_create(),
            Some(&LifecycleCommand::from("echo project"))
        );
    }

    #[test]
    fn explicit_empty_project_command_still_wins() {
        let project = layer(json!({ "postCreateCommand": "" }));
        let merged = generate_preset_config(&base(), None, Some(&project));
        assert_eq!(merged.post_create(), Some(&LifecycleCommand::from("")));
    }

    #[test]
    fn explicit_null_project_command_drops_command() {
        let base = layer(json!({ "postCreateCommand": "echo base" }));
        let preset = layer(json!({ "postCreateCommand": "echo preset" }));
        let project = layer(json!({ "postCreateCommand": null }));
        let merged = generate_preset_config(&base, Some(&preset), Some(&project));
        assert_eq!(merged.post_create_command, None);

        let text = to_descriptor_json(&merged).unwrap();
        assert!(!text.contains("postCreateCommand"));
    }

    #[test]
    fn null_command_on_preset_is_treated_as_absent() {
        let base = layer(json!({ "postCreateCommand": "echo base" }));
        let preset = layer(json!({ "postCreateCommand": null }));
        let merged = generate_preset_config(&base, Some(&preset), None);
        assert_eq!(merged.post_create(), Some(&LifecycleCommand::from("echo base")));
    }

    #[test]
    fn array_commands_merge() {
        let base = layer(json!({ "postCreateCommand": ["a", "b"] }));
        let preset = layer(json!({ "postCreateCommand": "c" }));
        let merged = generate_preset_config(&base, Some(&preset), None);
        assert_eq!(
            merged.post_create(),
            Some(&LifecycleCommand::from("a && b && c"))
        );
    }

    #[test]
    fn features_deep_merge_three_layers() {
        let preset = layer(json!({
            "features": {
                "ghcr.io/devcontainers/features/node:1": { "version": "20", "nodeGypDependencies": true }
            }
        }));
        let project = layer(json!({
            "features": { "ghcr.io/devcontainers/features/docker-in-docker:2": {} }
        }));
        let merged = generate_preset_config(&base(), Some(&preset), Some(&project));
        let features = merged.features.unwrap();
        assert_eq!(features.len(), 3);
        assert_eq!(
            features["ghcr.io/devcontainers/features/node:1"],
            json!({ "version": "20", "nodeGypDependencies": true })
        );
        assert_eq!(
            features["ghcr.io/devcontainers/features/git:1"],
            json!({ "version": "latest" })
        );
    }

    #[test]
    fn extensions_dedup_and_settings_merge() {
        let preset = layer(json!({
            "customizations": { "vscode": {
                "extensions": ["ms-python.python", "eamodio.gitlens"],
                "settings": { "editor.codeActionsOnSave": { "source.organizeImports": "explicit" } }
            }}
        }));
        let project = layer(json!({
            "customizations": { "vscode": {
                "extensions": ["ms-python.python", "charliermarsh.ruff"],
                "settings": { "editor.formatOnSave": false }
            }}
        }));
        let merged = generate_preset_config(&base(), Some(&preset), Some(&project));
        let vscode = merged.vscode().unwrap();
        assert_eq!(
            vscode.extensions.clone().unwrap(),
            vec![
                "eamodio.gitlens",
                "usernamehw.errorlens",
                "ms-python.python",
                "charliermarsh.ruff"
            ]
        );
        let settings = vscode.settings.as_ref().unwrap();
        assert_eq!(settings["editor.formatOnSave"], json!(false));
        assert_eq!(
            settings["editor.codeActionsOnSave"],
            json!({ "source.fixAll": "explicit", "source.organizeImports": "explicit" })
        );
    }

    #[test]
    fn other_customization_tools_are_kept() {
        let project = layer(json!({
            "customizations": { "jetbrains": { "backend": "IntelliJ" } }
        }));
        let merged = generate_preset_config(&base(), None, Some(&project));
        let customizations = merged.customizations.unwrap();
        assert_eq!(customizations.other["jetbrains"], json!({ "backend": "IntelliJ" }));
        assert!(customizations.vscode.is_some());
    }

    #[test]
    fn no_customizations_anywhere_is_omitted() {
        let base = layer(json!({ "image": "x" }));
        assert!(generate_preset_config(&base, None, None).customizations.is_none());
    }

    #[test]
    fn path_is_concatenated_across_layers() {
        let preset = layer(json!({ "remoteEnv": { "PATH": "/preset/bin", "CODEX_HOME": "/codex" } }));
        let project = layer(json!({ "remoteEnv": { "PATH": "/project/bin" } }));
        let merged = generate_preset_config(&base(), Some(&preset), Some(&project));
        let env = merged.remote_env.unwrap();
        assert_eq!(
            env["PATH"].as_deref(),
            Some("/project/bin:/preset/bin:/base/bin:${containerEnv:PATH}")
        );
        assert_eq!(env["CODEX_HOME"].as_deref(), Some("/codex"));
    }

    #[test]
    fn base_path_kept_when_preset_has_none() {
        let preset = layer(json!({ "remoteEnv": { "OTHER": "1" } }));
        let merged = generate_preset_config(&base(), Some(&preset), None);
        let env = merged.remote_env.unwrap();
        assert_eq!(env["PATH"].as_deref(), Some("/base/bin:${containerEnv:PATH}"));
        assert_eq!(env["OTHER"].as_deref(), Some("1"));
    }

    #[test]
    fn null_env_value_overrides_and_survives_merge() {
        let project = layer(json!({ "remoteEnv": { "PATH": null, "DEBUG": null } }));
        let merged = generate_preset_config(&base(), None, Some(&project));
        let env = merged.remote_env.clone().unwrap();
        assert_eq!(env["PATH"], None);
        assert_eq!(env["DEBUG"], None);

        let text = to_descriptor_json(&merged).unwrap();
        assert!(text.contains("\"DEBUG\": null"));
    }

    #[test]
    fn container_env_merges() {
        let base = layer(json!({ "containerEnv": { "A": "base", "B": "base" } }));
        let project = layer(json!({ "containerEnv": { "B": "project" } }));
        let merged = generate_preset_config(&base, None, Some(&project));
        assert_eq!(
            merged.container_env,
            Some(EnvMap::from([
                ("A".to_string(), Some("base".to_string())),
                ("B".to_string(), Some("project".to_string())),
            ]))
        );
    }

    #[test]
    fn project_mount_replaces_same_target() {
        let project = layer(json!({
            "mounts": ["source=/elsewhere,target=/home/dev-user/.claude,type=bind"]
        }));
        let merged = generate_preset_config(&base(), None, Some(&project));
        assert_eq!(
            merged.mounts,
            Some(vec![Mount::from(
                "source=/elsewhere,target=/home/dev-user/.claude,type=bind"
            )])
        );
    }

    #[test]
    fn pass_through_keys_most_specific_wins() {
        let preset = layer(json!({ "runArgs": ["--init"], "workspaceFolder": "/w" }));
        let project = layer(json!({ "runArgs": ["--privileged"] }));
        let merged = generate_preset_config(&base(), Some(&preset), Some(&project));
        assert_eq!(merged.extra["runArgs"], json!(["--privileged"]));
        assert_eq!(merged.extra["workspaceFolder"], json!("/w"));
    }

    #[test]
    fn inputs_are_not_mutated() {
        let base = base();
        let preset = layer(json!({ "remoteEnv": { "PATH": "/p" }, "mounts": ["target=/m"] }));
        let project = layer(json!({ "containerEnv": { "X": "1" } }));
        let (b, p, q) = (base.clone(), preset.clone(), project.clone());
        let _ = generate_preset_config(&base, Some(&preset), Some(&project));
        assert_eq!((base, preset, project), (b, p, q));
    }

    #[test]
    fn assembly_is_idempotent() {
        let preset = layer(json!({ "name": "n", "features": { "a/b:1": {} } }));
        let first = to_descriptor_json(&generate_preset_config(&base(), Some(&preset), None)).unwrap();
        let second = to_descriptor_json(&generate_preset_config(&base(), Some(&preset), None)).unwrap();
        assert_eq!(first, second);
    }
}
