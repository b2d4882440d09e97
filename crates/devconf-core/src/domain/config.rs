//! The devcontainer descriptor model.
//!
//! [`DevContainerConfig`] is used for every layer (base, preset, project
//! override) and for the merged result. Recognised keys are typed; anything
//! else lands in [`DevContainerConfig::extra`] and is carried through the
//! merge untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// `$schema` tag written at the top of every generated descriptor.
pub const SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/devcontainers/spec/main/schemas/devContainer.schema.json";

/// Environment key that is concatenated across layers instead of replaced.
pub const PATH_KEY: &str = "PATH";

/// Plain JSON object (ordered).
pub type JsonObject = Map<String, Value>;

/// `containerEnv` / `remoteEnv` map. A `null` value unsets the variable.
pub type EnvMap = BTreeMap<String, Option<String>>;

/// One configuration layer, or the merged descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevContainerConfig {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<Value>,

    /// Feature id → options. Ids are opaque to the merge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<JsonObject>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customizations: Option<Customizations>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_ports: Option<Vec<ForwardPort>>,

    /// `Some(None)` records an explicit `null`, which a project layer uses
    /// to drop the inherited command.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub post_create_command: Option<Option<LifecycleCommand>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_start_command: Option<LifecycleCommand>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_attach_command: Option<LifecycleCommand>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_env: Option<EnvMap>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_env: Option<EnvMap>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_user: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mounts: Option<Vec<Mount>>,

    /// Any other top-level key (`runArgs`, `workspaceFolder`, `$comment`, ...).
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl DevContainerConfig {
    /// The `customizations.vscode` bundle, if this layer has one.
    pub fn vscode(&self) -> Option<&VsCodeCustomizations> {
        self.customizations.as_ref()?.vscode.as_ref()
    }

    /// The `remoteEnv.PATH` value, if set to a string.
    pub fn remote_path(&self) -> Option<&str> {
        self.remote_env.as_ref()?.get(PATH_KEY)?.as_deref()
    }

    /// The `postCreateCommand`, ignoring an explicit `null`.
    pub fn post_create(&self) -> Option<&LifecycleCommand> {
        self.post_create_command.as_ref()?.as_ref()
    }
}

/// Deserialize a key that is present, keeping `null` apart from absence.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// `customizations` block. Only `vscode` is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customizations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vscode: Option<VsCodeCustomizations>,

    #[serde(flatten)]
    pub other: JsonObject,
}

/// `customizations.vscode` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VsCodeCustomizations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<JsonObject>,

    #[serde(flatten)]
    pub other: JsonObject,
}

impl VsCodeCustomizations {
    pub fn is_empty(&self) -> bool {
        self.extensions.is_none() && self.settings.is_none() && self.other.is_empty()
    }
}

/// A lifecycle hook such as `postCreateCommand`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LifecycleCommand {
    /// One shell command line.
    Single(String),
    /// Ordered instructions.
    Sequence(Vec<String>),
    /// Named commands run in parallel by the devcontainer tool.
    Parallel(JsonObject),
}

impl LifecycleCommand {
    /// Instructions contributed to a concatenated command.
    ///
    /// An empty string and the parallel form contribute nothing.
    pub fn instructions(&self) -> Vec<&str> {
        match self {
            Self::Single(cmd) if cmd.is_empty() => Vec::new(),
            Self::Single(cmd) => vec![cmd.as_str()],
            Self::Sequence(cmds) => cmds.iter().map(String::as_str).collect(),
            Self::Parallel(_) => Vec::new(),
        }
    }
}

impl From<&str> for LifecycleCommand {
    fn from(cmd: &str) -> Self {
        Self::Single(cmd.to_owned())
    }
}

/// An entry of `forwardPorts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ForwardPort {
    Port(u16),
    /// `"host:port"` form.
    Address(String),
}

/// An entry of `mounts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Mount {
    /// Docker `--mount` syntax: `source=...,target=...,type=bind`.
    Spec(String),
    Record(MountRecord),
}

/// Structured mount entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MountRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(flatten)]
    pub other: JsonObject,
}

impl Mount {
    /// In-container path used as the de-duplication key.
    ///
    /// For the string form this is the value of the first `target=` or
    /// `dst=` pair. Empty values count as absent.
    pub fn target(&self) -> Option<&str> {
        let target = match self {
            Self::Record(record) => record.target.as_deref(),
            Self::Spec(spec) => spec.split(',').find_map(|part| {
                let (key, value) = part.trim().split_once('=')?;
                matches!(key, "target" | "dst").then_some(value)
            }),
        };
        target.filter(|t| !t.is_empty())
    }
}

impl From<&str> for Mount {
    fn from(spec: &str) -> Self {
        Self::Spec(spec.to_owned())
    }
}

/// Outcome of checking a loosely-typed value at the load boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigCheck {
    Valid(DevContainerConfig),
    Invalid(String),
}

/// Decide whether `value` is usable as a configuration layer.
///
/// This runs once where a layer enters the system; the merge engine never
/// re-checks its inputs.
pub fn check_config(value: Value) -> ConfigCheck {
    let kind = match &value {
        Value::Object(_) => None,
        Value::Null => Some("null"),
        Value::Bool(_) => Some("a boolean"),
        Value::Number(_) => Some("a number"),
        Value::String(_) => Some("a string"),
        Value::Array(_) => Some("an array"),
    };
    if let Some(kind) = kind {
        return ConfigCheck::Invalid(format!("expected a JSON object, found {kind}"));
    }

    match serde_json::from_value::<DevContainerConfig>(value) {
        Ok(config) => ConfigCheck::Valid(config),
        Err(e) => ConfigCheck::Invalid(e.to_string()),
    }
}
