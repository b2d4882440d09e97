//! Writing a rendered descriptor to disk.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{DevContainerConfig, to_descriptor_json},
    error::DevconfResult,
};

/// Renders descriptors and writes them through a [`Filesystem`].
pub struct DescriptorService<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> DescriptorService<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Write `config` to `path`, creating missing parent directories first.
    ///
    /// Returns the text that was written.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn write(&self, path: &Path, config: &DevContainerConfig) -> DevconfResult<String> {
        let json = to_descriptor_json(config)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(path, json.as_bytes())?;

        debug!(bytes = json.len(), "Descriptor written");
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use mockall::{Sequence, predicate::eq};
    use std::path::PathBuf;

    #[test]
    fn creates_parent_before_writing() {
        let mut fs = MockFilesystem::new();
        let mut seq = Sequence::new();
        fs.expect_create_dir_all()
            .with(eq(PathBuf::from("/out/.devcontainer")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|path, content| {
                path == Path::new("/out/.devcontainer/devcontainer.json")
                    && content.ends_with(b"}\n")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let config = DevContainerConfig {
            image: Some("ubuntu".into()),
            ..Default::default()
        };
        let json = DescriptorService::new(&fs)
            .write(Path::new("/out/.devcontainer/devcontainer.json"), &config)
            .unwrap();
        assert_eq!(json, "{\n  \"image\": \"ubuntu\"\n}\n");
    }

    #[test]
    fn bare_file_name_skips_mkdir() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().never();
        fs.expect_write_file().times(1).returning(|_, _| Ok(()));

        DescriptorService::new(&fs)
            .write(Path::new("devcontainer.json"), &DevContainerConfig::default())
            .unwrap();
    }
}
