//! Whole-document JSON persistence.
//!
//! A document is read in full and written in full. Writes go to a sibling
//! temporary file that is then renamed over the target, so a concurrent reader
//! sees either the old document or the new one.

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
  sync::atomic::{AtomicU64, Ordering},
};

use serde::{Serialize, de::DeserializeOwned};
use tokio::{fs, io::AsyncWriteExt as _};

use crate::{Error, Result};

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
  move |source| Error::Io {
    path: path.to_path_buf(),
    source,
  }
}

fn encode<T: Serialize>(path: &Path, value: &T) -> Result<Vec<u8>> {
  serde_json::to_vec_pretty(value).map_err(|source| Error::Encode {
    path: path.to_path_buf(),
    source,
  })
}

async fn ensure_parent(path: &Path) -> Result<()> {
  match path.parent() {
    Some(dir) if !dir.as_os_str().is_empty() => {
      fs::create_dir_all(dir).await.map_err(io_err(dir))
    }
    _ => Ok(()),
  }
}

/// Read the document at `path`.
///
/// A missing file is created with `default` as its content and `default` is
/// returned. An existing file that does not decode as `T` is treated as
/// missing: `default` is returned and the file is left untouched.
pub async fn read_or_init<T>(path: &Path, default: T) -> Result<T>
where
  T: Serialize + DeserializeOwned,
{
  ensure_parent(path).await?;

  match fs::OpenOptions::new()
    .write(true)
    .create_new(true)
    .open(path)
    .await
  {
    Ok(mut file) => {
      let bytes = encode(path, &default)?;
      file.write_all(&bytes).await.map_err(io_err(path))?;
      file.flush().await.map_err(io_err(path))?;
      tracing::debug!(path = %path.display(), "created document");
      return Ok(default);
    }
    Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
    Err(e) => return Err(io_err(path)(e)),
  }

  let bytes = fs::read(path).await.map_err(io_err(path))?;
  match serde_json::from_slice(&bytes) {
    Ok(doc) => Ok(doc),
    Err(e) => {
      tracing::warn!(
        path = %path.display(),
        error = %e,
        "document is not valid; using default"
      );
      Ok(default)
    }
  }
}

/// Replace the document at `path` with `value`.
pub async fn write<T: Serialize>(path: &Path, value: &T) -> Result<()> {
  ensure_parent(path).await?;
  let bytes = encode(path, value)?;

  let tmp = tmp_path(path);
  fs::write(&tmp, &bytes).await.map_err(io_err(&tmp))?;
  if let Err(e) = fs::rename(&tmp, path).await {
    let _ = fs::remove_file(&tmp).await;
    return Err(io_err(path)(e));
  }

  tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote document");
  Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
  let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
  let name = path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default();
  path.with_file_name(format!(".{name}.{}.{seq}.tmp", std::process::id()))
}
