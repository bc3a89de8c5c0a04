//! Result packaging

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Name of the archive written into the output directory.
pub const ARCHIVE_NAME: &str = "wasm_package.zip";

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("artifact does not exist: {0}")]
    ArtifactMissing(PathBuf),

    #[error("artifact path has no file name: {0}")]
    InvalidArtifactPath(PathBuf),

    #[error("failed to write archive {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write archive {path}: {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

/// Wrap `artifact` into `<output_dir>/wasm_package.zip` as its only entry,
/// stored under its base file name.
pub fn package_artifact(artifact: &Path, output_dir: &Path) -> Result<PathBuf, PackageError> {
    if !artifact.is_file() {
        return Err(PackageError::ArtifactMissing(artifact.to_path_buf()));
    }

    let entry_name = artifact
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PackageError::InvalidArtifactPath(artifact.to_path_buf()))?
        .to_string();

    let archive_path = output_dir.join(ARCHIVE_NAME);
    let io_err = |source: io::Error| PackageError::Io {
        path: archive_path.clone(),
        source,
    };
    let zip_err = |source: zip::result::ZipError| PackageError::Zip {
        path: archive_path.clone(),
        source,
    };

    let mut input = File::open(artifact).map_err(io_err)?;
    let mut writer = ZipWriter::new(File::create(&archive_path).map_err(io_err)?);

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    writer.start_file(entry_name.clone(), options).map_err(zip_err)?;
    io::copy(&mut input, &mut writer).map_err(io_err)?;
    writer.finish().map_err(zip_err)?;

    info!(archive = %archive_path.display(), entry = %entry_name, "Packaged artifact");
    Ok(archive_path)
}
