//! Auxiliary scripts copied next to the generated descriptor.
//!
//! A bundle consists of:
//!
//! ```text
//! bin/             ← helper commands, copied recursively
//! initialize.sh    ← host-side hook
//! post-create.sh   ← container-side hook
//! ```
//!
//! # Resolution order
//!
//! [`resolve`] picks the first of:
//!
//! 1. an explicitly configured directory (`assets_dir` / `$DEVCONF_ASSETS_DIR`)
//! 2. `./templates`
//! 3. `<executable-dir>/templates`
//! 4. `../templates`
//!
//! that holds a complete bundle, and otherwise falls back to the copy
//! embedded in the binary.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use devconf_core::{
    application::{
        ApplicationError,
        ports::{AssetBundle, AssetFile},
    },
    error::DevconfResult,
};

/// Environment variable naming an assets directory.
pub const ASSETS_DIR_ENV: &str = "DEVCONF_ASSETS_DIR";

const BIN_DIR: &str = "bin";
const HOOKS: [&str; 2] = ["initialize.sh", "post-create.sh"];

const EMBEDDED: &[(&str, &[u8])] = &[
    (
        "bin/with-project-env",
        include_bytes!("../assets/bin/with-project-env"),
    ),
    ("initialize.sh", include_bytes!("../assets/initialize.sh")),
    ("post-create.sh", include_bytes!("../assets/post-create.sh")),
];

/// The bundle shipped inside the binary. Every file is executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssets;

impl AssetBundle for EmbeddedAssets {
    fn files(&self) -> DevconfResult<Vec<AssetFile>> {
        Ok(EMBEDDED
            .iter()
            .map(|(path, contents)| AssetFile {
                path: PathBuf::from(path),
                contents: contents.to_vec(),
                executable: true,
            })
            .collect())
    }
}

/// A bundle read from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether both hook scripts are present.
    pub fn is_complete(&self) -> bool {
        HOOKS.iter().all(|hook| self.root.join(hook).is_file())
    }

    fn read(&self, relative: &Path) -> DevconfResult<AssetFile> {
        let path = self.root.join(relative);
        let contents = fs::read(&path).map_err(|e| ApplicationError::AssetsUnavailable {
            reason: format!("failed to read '{}': {e}", path.display()),
        })?;

        Ok(AssetFile {
            path: relative.to_path_buf(),
            contents,
            executable: is_executable(&path),
        })
    }
}

impl AssetBundle for DirectoryAssets {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn files(&self) -> DevconfResult<Vec<AssetFile>> {
        let mut files = Vec::new();

        let bin = self.root.join(BIN_DIR);
        if bin.is_dir() {
            for entry in WalkDir::new(&bin).min_depth(1).sort_by_file_name() {
                let entry = entry.map_err(|e| ApplicationError::AssetsUnavailable {
                    reason: format!("failed to walk '{}': {e}", bin.display()),
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let relative = entry.path().strip_prefix(&self.root).map_err(|e| {
                    ApplicationError::AssetsUnavailable {
                        reason: e.to_string(),
                    }
                })?;
                files.push(self.read(relative)?);
            }
        } else {
            debug!("no bin/ directory in assets");
        }

        for hook in HOOKS {
            files.push(self.read(Path::new(hook))?);
        }

        debug!(count = files.len(), "assets collected");
        Ok(files)
    }
}

/// Pick the asset bundle to copy from.
///
/// An explicitly configured directory that is missing or incomplete is
/// reported and the embedded bundle is used instead.
pub fn resolve(configured: Option<&Path>) -> Box<dyn AssetBundle> {
    if let Some(dir) = configured {
        let assets = DirectoryAssets::new(dir);
        if assets.is_complete() {
            info!(path = %dir.display(), "using configured assets directory");
            return Box::new(assets);
        }
        warn!(
            path = %dir.display(),
            "configured assets directory is missing or incomplete, using built-in assets"
        );
        return Box::new(EmbeddedAssets);
    }

    for candidate in candidate_paths() {
        debug!(path = %candidate.display(), "checking candidate assets path");
        let assets = DirectoryAssets::new(&candidate);
        if assets.is_complete() {
            info!(path = %candidate.display(), "using assets directory");
            return Box::new(assets);
        }
    }

    debug!("no assets directory found, using built-in assets");
    Box::new(EmbeddedAssets)
}

/// Ordered directories to search when nothing is configured.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(4);

    if let Ok(env_dir) = std::env::var(ASSETS_DIR_ENV) {
        paths.push(PathBuf::from(env_dir));
    }

    paths.push(PathBuf::from("templates"));

    if let Some(exe_sibling) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("templates")))
    {
        paths.push(exe_sibling);
    }

    paths.push(PathBuf::from("../templates"));
    paths
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    false
}
