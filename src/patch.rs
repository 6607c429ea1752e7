use crate::{
    config::Config,
    manifest::{Manifest, ParseError},
    opts::WriteMode,
};
use std::{
    fs::{self, File, OpenOptions, Permissions},
    io::{self, Read as _, Seek as _, SeekFrom, Write as _},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("No manifest found at {path:?}")]
    NotFound { path: PathBuf },
    #[error("Failed to open manifest at {path:?} for reading and writing: {cause}")]
    OpenFailed { path: PathBuf, cause: io::Error },
    #[error("Failed to read manifest at {path:?}: {cause}")]
    ReadFailed { path: PathBuf, cause: io::Error },
    #[error("Failed to parse manifest at {path:?}: {cause}")]
    ParseFailed { path: PathBuf, cause: ParseError },
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to serialize manifest: {0}")]
    SerializeFailed(serde_json::Error),
    #[error("Failed to resolve manifest path {path:?}: {cause}")]
    ResolveFailed { path: PathBuf, cause: io::Error },
    #[error("Failed to read permissions of manifest at {path:?}: {cause}")]
    MetadataFailed { path: PathBuf, cause: io::Error },
    #[error("Failed to create temp file in {dir:?}: {cause}")]
    TempFileFailed { dir: PathBuf, cause: io::Error },
    #[error("Failed to rewind manifest at {path:?}: {cause}")]
    RewindFailed { path: PathBuf, cause: io::Error },
    #[error("Failed to write manifest to {path:?}: {cause}")]
    WriteFailed { path: PathBuf, cause: io::Error },
    #[error("Failed to truncate manifest at {path:?}: {cause}")]
    TruncateFailed { path: PathBuf, cause: io::Error },
    #[error("Failed to replace manifest at {path:?} with {temp:?}: {cause}")]
    PersistFailed {
        path: PathBuf,
        temp: PathBuf,
        cause: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum PatchError {
    #[error(transparent)]
    LoadFailed(LoadError),
    #[error(transparent)]
    WriteFailed(WriteError),
}

fn open(path: &Path) -> Result<File, LoadError> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|cause| {
            if cause.kind() == io::ErrorKind::NotFound {
                LoadError::NotFound {
                    path: path.to_owned(),
                }
            } else {
                LoadError::OpenFailed {
                    path: path.to_owned(),
                    cause,
                }
            }
        })
}

fn load(path: &Path, file: &mut File) -> Result<Manifest, LoadError> {
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|cause| LoadError::ReadFailed {
            path: path.to_owned(),
            cause,
        })?;
    log::debug!("read {} bytes from {:?}", contents.len(), path);
    contents.parse().map_err(|cause| LoadError::ParseFailed {
        path: path.to_owned(),
        cause,
    })
}

fn write_in_place(path: &Path, mut file: File, bytes: &[u8]) -> Result<(), WriteError> {
    file.seek(SeekFrom::Start(0))
        .map_err(|cause| WriteError::RewindFailed {
            path: path.to_owned(),
            cause,
        })?;
    file.write_all(bytes)
        .and_then(|()| file.flush())
        .map_err(|cause| WriteError::WriteFailed {
            path: path.to_owned(),
            cause,
        })?;
    // Anything past the new content is left over from the old manifest.
    file.set_len(bytes.len() as u64)
        .and_then(|()| file.sync_all())
        .map_err(|cause| WriteError::TruncateFailed {
            path: path.to_owned(),
            cause,
        })
}

fn write_atomic(path: &Path, file: File, bytes: &[u8]) -> Result<(), WriteError> {
    // Follow symlinks so the link itself isn't replaced by a regular file.
    let path = fs::canonicalize(path).map_err(|cause| WriteError::ResolveFailed {
        path: path.to_owned(),
        cause,
    })?;
    let permissions: Permissions = file
        .metadata()
        .map(|metadata| metadata.permissions())
        .map_err(|cause| WriteError::MetadataFailed {
            path: path.clone(),
            cause,
        })?;
    // Some platforms refuse to rename over a file that's still open.
    drop(file);
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir).map_err(|cause| WriteError::TempFileFailed {
        dir: dir.to_owned(),
        cause,
    })?;
    log::debug!("staging manifest in {:?}", temp.path());
    temp.write_all(bytes)
        .and_then(|()| temp.as_file().set_permissions(permissions))
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|cause| WriteError::WriteFailed {
            path: temp.path().to_owned(),
            cause,
        })?;
    temp.persist(&path)
        .map(|_| ())
        .map_err(|err| WriteError::PersistFailed {
            temp: err.file.path().to_owned(),
            path,
            cause: err.error,
        })
}

/// Sets `key` to `value` in the manifest described by `config`.
///
/// The manifest is opened for reading and writing up front, so a read-only
/// file fails before anything is written. On any error the file on disk is
/// left as it was.
///
/// [`WriteMode::Atomic`] renames a new file over the manifest: permissions are
/// carried over, but hard links are broken and the owner becomes the caller.
/// [`WriteMode::InPlace`] keeps both.
pub fn patch_with_config(config: &Config, value: &str) -> Result<(), PatchError> {
    let path = config.manifest_path();
    log::info!("loading manifest from {:?}", path);
    let mut file = open(path).map_err(PatchError::LoadFailed)?;
    let mut manifest = load(path, &mut file).map_err(PatchError::LoadFailed)?;
    match manifest.set(config.key(), value) {
        Some(previous) => log::info!(
            "replacing `{}` (was {}) with {:?}",
            config.key(),
            previous,
            value
        ),
        None => log::info!("adding `{}` with {:?}", config.key(), value),
    }
    log::debug!("patched manifest: {}", manifest);
    let bytes = manifest
        .to_vec_pretty(config.indent())
        .map_err(|err| PatchError::WriteFailed(WriteError::SerializeFailed(err)))?;
    log::info!(
        "writing {} bytes to {:?} ({})",
        bytes.len(),
        path,
        config.write_mode().as_str()
    );
    match config.write_mode() {
        WriteMode::Atomic => write_atomic(path, file, &bytes),
        WriteMode::InPlace => write_in_place(path, file, &bytes),
    }
    .map_err(PatchError::WriteFailed)
}

/// Sets `key` to `value` in the manifest at `path` with the default indent and
/// write mode.
pub fn patch(path: impl AsRef<Path>, key: &str, value: &str) -> Result<(), PatchError> {
    let config = Config::default()
        .with_manifest_path(path.as_ref())
        .with_key(key);
    patch_with_config(&config, value)
}
