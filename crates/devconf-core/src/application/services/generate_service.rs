//! Generate Service - the `init` use case.
//!
//! 1. Resolve the preset (if any)
//! 2. Refuse to clobber an existing descriptor unless forced
//! 3. Load the project override from the output directory
//! 4. Assemble and validate
//! 5. Write the descriptor, then copy the assets
//!
//! Every step finishes before the next one starts.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{AssetBundle, AssetFile, Filesystem, PresetStore, ProjectConfigLoader},
        services::DescriptorService,
    },
    domain::{DevContainerConfig, generate_preset_config, to_descriptor_json, validate},
    error::DevconfResult,
};

/// File name of the generated descriptor.
pub const DESCRIPTOR_FILE: &str = "devcontainer.json";

/// Input of [`GenerateService::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub preset: Option<String>,
    pub output_dir: PathBuf,
    pub force: bool,
    pub dry_run: bool,
    pub copy_assets: bool,
}

impl GenerateRequest {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            preset: None,
            output_dir: output_dir.into(),
            force: false,
            dry_run: false,
            copy_assets: true,
        }
    }

    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn copy_assets(mut self, copy: bool) -> Self {
        self.copy_assets = copy;
        self
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.output_dir.join(DESCRIPTOR_FILE)
    }
}

/// What `generate` did, or would do on a dry run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOutcome {
    pub descriptor_path: PathBuf,
    pub config: DevContainerConfig,
    pub json: String,
    /// Non-blocking validation findings.
    pub warnings: Vec<String>,
    /// Assets written (or that would be written), as output paths.
    pub assets: Vec<PathBuf>,
    pub used_project_override: bool,
    /// `false` on a dry run.
    pub written: bool,
}

/// Descriptor generation service.
pub struct GenerateService {
    base: DevContainerConfig,
    presets: Box<dyn PresetStore>,
    loader: Box<dyn ProjectConfigLoader>,
    filesystem: Box<dyn Filesystem>,
    assets: Box<dyn AssetBundle>,
}

impl GenerateService {
    /// Create a new generate service with the base layer and adapters.
    pub fn new(
        base: DevContainerConfig,
        presets: Box<dyn PresetStore>,
        loader: Box<dyn ProjectConfigLoader>,
        filesystem: Box<dyn Filesystem>,
        assets: Box<dyn AssetBundle>,
    ) -> Self {
        Self {
            base,
            presets,
            loader,
            filesystem,
            assets,
        }
    }

    #[instrument(
        skip_all,
        fields(
            preset = request.preset.as_deref().unwrap_or("<base>"),
            output = %request.output_dir.display(),
            dry_run = request.dry_run
        )
    )]
    pub fn generate(&self, request: &GenerateRequest) -> DevconfResult<GenerateOutcome> {
        let preset = match request.preset.as_deref() {
            Some(name) => {
                let preset = self.presets.get(name)?;
                info!(preset = %preset.name, "Using preset");
                Some(preset)
            }
            None => {
                info!("Using base configuration only");
                None
            }
        };

        let descriptor_path = request.descriptor_path();
        if self.filesystem.exists(&descriptor_path) && !request.force {
            return Err(ApplicationError::DescriptorExists {
                path: descriptor_path,
            }
            .into());
        }

        let project = self.loader.load(&request.output_dir);
        if project.is_some() {
            info!("Applying project override");
        }

        let config = generate_preset_config(
            &self.base,
            preset.as_ref().map(|p| &p.config),
            project.as_ref(),
        );

        let report = validate(&config).into_result()?;
        for warning in &report.warnings {
            debug!(%warning, "Descriptor check");
        }

        let assets = if request.copy_assets {
            self.assets.files()?
        } else {
            Vec::new()
        };
        let asset_paths: Vec<PathBuf> = assets
            .iter()
            .map(|a| request.output_dir.join(&a.path))
            .collect();

        if request.dry_run {
            info!("Dry run, nothing written");
            return Ok(GenerateOutcome {
                json: to_descriptor_json(&config)?,
                descriptor_path,
                config,
                warnings: report.warnings,
                assets: asset_paths,
                used_project_override: project.is_some(),
                written: false,
            });
        }

        self.filesystem.create_dir_all(&request.output_dir)?;
        let json =
            DescriptorService::new(self.filesystem.as_ref()).write(&descriptor_path, &config)?;
        info!(path = %descriptor_path.display(), "Descriptor written");

        for asset in &assets {
            self.write_asset(&request.output_dir, asset)?;
        }

        Ok(GenerateOutcome {
            descriptor_path,
            config,
            json,
            warnings: report.warnings,
            assets: asset_paths,
            used_project_override: project.is_some(),
            written: true,
        })
    }

    fn write_asset(&self, root: &Path, asset: &AssetFile) -> DevconfResult<()> {
        let path = root.join(&asset.path);
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&path, &asset.contents)?;
        if asset.executable {
            self.filesystem.set_permissions(&path, true)?;
        }
        debug!(path = %path.display(), executable = asset.executable, "Asset copied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        MockAssetBundle, MockFilesystem, MockPresetStore, MockProjectConfigLoader,
    };
    use crate::domain::{DomainError, LifecycleCommand, Preset};
    use crate::error::DevconfError;
    use mockall::predicate::eq;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn base() -> DevContainerConfig {
        serde_json::from_value(json!({
            "name": "Base",
            "image": "mcr.microsoft.com/devcontainers/base:ubuntu",
            "postCreateCommand": "bash .devcontainer/post-create.sh",
            "remoteUser": "dev-user"
        }))
        .unwrap()
    }

    fn python() -> Preset {
        Preset {
            name: "python".into(),
            label: "Python".into(),
            description: "Python development environment".into(),
            config: serde_json::from_value(json!({
                "name": "Python Base",
                "postCreateCommand": "pip install poetry"
            }))
            .unwrap(),
        }
    }

    fn store() -> MockPresetStore {
        let mut store = MockPresetStore::new();
        store.expect_get().returning(|name| match name {
            "python" => Ok(python()),
            other => Err(DomainError::UnknownPreset {
                name: other.into(),
                available: vec!["python".into()],
            }
            .into()),
        });
        store
    }

    fn no_override() -> MockProjectConfigLoader {
        let mut loader = MockProjectConfigLoader::new();
        loader.expect_load().returning(|_| None);
        loader
    }

    fn one_asset() -> MockAssetBundle {
        let mut assets = MockAssetBundle::new();
        assets.expect_files().returning(|| {
            Ok(vec![AssetFile {
                path: PathBuf::from("bin/with-project-env"),
                contents: b"#!/bin/sh\n".to_vec(),
                executable: true,
            }])
        });
        assets
    }

    /// Filesystem mock that records written paths.
    fn recording_fs(exists: bool) -> (MockFilesystem, Arc<Mutex<Vec<PathBuf>>>) {
        let written = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&written);
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(exists);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(move |path, _| {
            sink.lock().unwrap().push(path.to_path_buf());
            Ok(())
        });
        fs.expect_set_permissions()
            .with(eq(PathBuf::from("/p/.devcontainer/bin/with-project-env")), eq(true))
            .returning(|_, _| Ok(()));
        (fs, written)
    }

    fn service(
        fs: MockFilesystem,
        loader: MockProjectConfigLoader,
        assets: MockAssetBundle,
    ) -> GenerateService {
        GenerateService::new(
            base(),
            Box::new(store()),
            Box::new(loader),
            Box::new(fs),
            Box::new(assets),
        )
    }

    #[test]
    fn writes_descriptor_then_assets() {
        let (fs, written) = recording_fs(false);
        let svc = service(fs, no_override(), one_asset());

        let outcome = svc
            .generate(&GenerateRequest::new("/p/.devcontainer").with_preset("python"))
            .unwrap();

        assert!(outcome.written);
        assert_eq!(outcome.config.name.as_deref(), Some("Python Base"));
        assert_eq!(
            outcome.config.post_create(),
            Some(&LifecycleCommand::from(
                "bash .devcontainer/post-create.sh && pip install poetry"
            ))
        );
        assert_eq!(
            *written.lock().unwrap(),
            vec![
                PathBuf::from("/p/.devcontainer/devcontainer.json"),
                PathBuf::from("/p/.devcontainer/bin/with-project-env"),
            ]
        );
    }

    #[test]
    fn unknown_preset_writes_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_write_file().never();
        fs.expect_create_dir_all().never();
        let svc = service(fs, no_override(), MockAssetBundle::new());

        let err = svc
            .generate(&GenerateRequest::new("/p/.devcontainer").with_preset("cobol"))
            .unwrap_err();

        match err {
            DevconfError::Domain(DomainError::UnknownPreset { name, available }) => {
                assert_eq!(name, "cobol");
                assert_eq!(available, vec!["python"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn existing_descriptor_requires_force() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_write_file().never();
        let svc = service(fs, MockProjectConfigLoader::new(), MockAssetBundle::new());

        let err = svc
            .generate(&GenerateRequest::new("/p/.devcontainer"))
            .unwrap_err();
        assert!(matches!(
            err,
            DevconfError::Application(ApplicationError::DescriptorExists { .. })
        ));
    }

    #[test]
    fn force_overwrites_existing_descriptor() {
        let (fs, written) = recording_fs(true);
        let svc = service(fs, no_override(), one_asset());

        let outcome = svc
            .generate(&GenerateRequest::new("/p/.devcontainer").force(true))
            .unwrap();
        assert!(outcome.written);
        assert_eq!(written.lock().unwrap().len(), 2);
    }

    #[test]
    fn dry_run_touches_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();
        let svc = service(fs, no_override(), one_asset());

        let outcome = svc
            .generate(&GenerateRequest::new("/p/.devcontainer").dry_run(true))
            .unwrap();

        assert!(!outcome.written);
        assert!(outcome.json.ends_with("}\n"));
        assert_eq!(
            outcome.assets,
            vec![PathBuf::from("/p/.devcontainer/bin/with-project-env")]
        );
    }

    #[test]
    fn project_override_is_loaded_from_output_dir() {
        let (fs, _) = recording_fs(false);
        let mut loader = MockProjectConfigLoader::new();
        loader
            .expect_load()
            .with(eq(PathBuf::from("/p/.devcontainer")))
            .times(1)
            .returning(|_| {
                Some(
                    serde_json::from_value(json!({ "postCreateCommand": "make setup" })).unwrap(),
                )
            });
        let svc = service(fs, loader, MockAssetBundle::new());

        let outcome = svc
            .generate(
                &GenerateRequest::new("/p/.devcontainer")
                    .with_preset("python")
                    .copy_assets(false),
            )
            .unwrap();

        assert!(outcome.used_project_override);
        assert_eq!(
            outcome.config.post_create(),
            Some(&LifecycleCommand::from("make setup"))
        );
        assert!(outcome.assets.is_empty());
    }

    #[test]
    fn invalid_descriptor_blocks_write() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_write_file().never();
        let mut loader = MockProjectConfigLoader::new();
        loader.expect_load().returning(|_| {
            Some(serde_json::from_value(json!({ "features": { "ghcr.io/a/b:1": true } })).unwrap())
        });
        let svc = service(fs, loader, MockAssetBundle::new());

        let err = svc
            .generate(&GenerateRequest::new("/p/.devcontainer"))
            .unwrap_err();
        assert!(matches!(
            err,
            DevconfError::Domain(DomainError::InvalidDescriptor { .. })
        ));
    }
}
