use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("could not determine cache directory")]
    NoCacheDir,
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Progress callback: `(bytes_downloaded, total_bytes)`; `total_bytes` is 0
/// when the server sent no Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Resolves a model file by name: returns the cached copy when present,
/// otherwise downloads it into the cache.
pub fn resolve(
    name: &str,
    url: &str,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    let cache_dir = model_cache_dir()?;
    let cached = cache_dir.join(name);
    if cached.exists() {
        return Ok(cached);
    }

    fs::create_dir_all(&cache_dir).map_err(ModelResolveError::CacheDir)?;
    log::info!("Downloading model {name} from {url}");
    download(url, &cached, progress)?;
    Ok(cached)
}

/// Platform cache directory for downloaded models, e.g.
/// `~/.cache/faceveil/models` on Linux.
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    dirs::cache_dir()
        .map(|d| d.join("faceveil").join("models"))
        .ok_or(ModelResolveError::NoCacheDir)
}

/// Downloads to `<dest>.part` first, then renames, so an interrupted
/// download never leaves a truncated model behind.
fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let wrap_dl = |source| ModelResolveError::Download {
        url: url.to_string(),
        source,
    };

    let response = reqwest::blocking::get(url).map_err(wrap_dl)?;
    let total = response.content_length().unwrap_or(0);
    let body = response.bytes().map_err(wrap_dl)?;

    let part = dest.with_extension("part");
    let wrap_io = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ModelResolveError::Write { path, source }
    };

    let mut file = fs::File::create(&part).map_err(wrap_io(&part))?;
    let mut written: u64 = 0;
    for chunk in body.chunks(1 << 20) {
        file.write_all(chunk).map_err(wrap_io(&part))?;
        written += chunk.len() as u64;
        if let Some(ref cb) = progress {
            cb(written, total);
        }
    }
    file.flush().map_err(wrap_io(&part))?;
    drop(file);

    fs::rename(&part, dest).map_err(wrap_io(dest))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_model_cache_dir_is_namespaced() {
        let dir = model_cache_dir().unwrap();
        let text = dir.to_string_lossy();
        assert!(text.contains("faceveil"));
        assert!(text.ends_with("models"));
    }

    #[test]
    fn test_download_invalid_url_returns_error() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("model.onnx");
        let result = download("http://invalid.nonexistent.example.com/model", &dest, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_failed_download_leaves_no_partial_file() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("model.onnx");
        let _ = download("http://invalid.nonexistent.example.com/model", &dest, None);
        assert!(!dest.exists());
        assert!(!dest.with_extension("part").exists());
    }
}
