use crate::model::Snapshot;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

pub fn resolve_path(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    if !path.exists() {
        bail!("snapshot file not found at {}", path.display());
    }
    if !path.is_file() {
        bail!("snapshot path is not a file: {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading snapshot {}", path.display()))?;
    let snapshot = serde_json::from_str::<Snapshot>(&content)
        .with_context(|| format!("failed parsing snapshot {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        companies = snapshot.companies.len(),
        users = snapshot.users.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}
