use super::config::{DevContainerConfig, Mount, SCHEMA_URL};
use super::error::DomainError;

/// Top-level keys understood by the devcontainer tooling.
///
/// Keys outside this list are still written, but reported as warnings.
pub const RECOGNISED_KEYS: &[&str] = &[
    "$schema",
    "name",
    "image",
    "dockerFile",
    "build",
    "features",
    "customizations",
    "forwardPorts",
    "portsAttributes",
    "otherPortsAttributes",
    "appPort",
    "postCreateCommand",
    "postStartCommand",
    "postAttachCommand",
    "initializeCommand",
    "onCreateCommand",
    "updateContentCommand",
    "waitFor",
    "containerEnv",
    "remoteEnv",
    "remoteUser",
    "containerUser",
    "updateRemoteUserUID",
    "userEnvProbe",
    "mounts",
    "runArgs",
    "workspaceFolder",
    "workspaceMount",
    "shutdownAction",
    "overrideCommand",
    "hostRequirements",
    "privileged",
    "capAdd",
    "securityOpt",
    "gpuSupport",
];

/// Findings for a merged descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make the descriptor unusable.
    pub errors: Vec<String>,
    /// Problems worth reporting that do not block the write.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Turn blocking findings into an error, keeping the report otherwise.
    pub fn into_result(self) -> Result<Self, DomainError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(DomainError::InvalidDescriptor {
                errors: self.errors,
            })
        }
    }
}

/// Ad hoc sanity checks on a descriptor. Not a JSON Schema validator.
pub fn validate(config: &DevContainerConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if config.image.is_none() && config.docker_file.is_none() && config.build.is_none() {
        report
            .errors
            .push("one of 'image', 'dockerFile' or 'build' is required".into());
    }

    if let Some(features) = &config.features {
        for (id, options) in features {
            if !options.is_object() {
                report
                    .errors
                    .push(format!("feature '{id}' options must be an object"));
            }
            if !id.contains('/') {
                report.warnings.push(format!(
                    "feature '{id}' is not a registry reference (expected e.g. ghcr.io/org/feature:1)"
                ));
            }
        }
    }

    for (index, mount) in config.mounts.iter().flatten().enumerate() {
        match mount {
            Mount::Spec(spec) if spec.trim().is_empty() => {
                report.errors.push(format!("mount #{index} is empty"));
            }
            Mount::Record(record) if record.source.is_none() && record.target.is_none() => {
                report
                    .errors
                    .push(format!("mount #{index} has neither source nor target"));
            }
            _ => {}
        }
    }

    if let Some(schema) = config.schema.as_deref().filter(|s| *s != SCHEMA_URL) {
        report
            .warnings
            .push(format!("'$schema' is '{schema}', expected '{SCHEMA_URL}'"));
    }

    if config.name.is_none() {
        report.warnings.push("'name' is recommended".into());
    }
    if config.remote_user.is_none() {
        report.warnings.push("'remoteUser' is recommended".into());
    }

    for key in config.extra.keys() {
        if !RECOGNISED_KEYS.contains(&key.as_str()) {
            report.warnings.push(format!("unknown top-level key '{key}'"));
        }
    }

    report
}
