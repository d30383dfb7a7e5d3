use anyhow::{Context, Result};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::{fs, path::Path, path::PathBuf};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Resolve CLI seed tokens: integers are taken as-is, anything else is
/// hashed so that named seeds ("demo", "ci-nightly") stay reproducible.
#[must_use]
pub fn resolve_seeds(tokens: &[String]) -> Vec<u64> {
    tokens
        .iter()
        .map(|token| {
            token.parse::<u64>().unwrap_or_else(|_| {
                let digest = Sha256::digest(token.as_bytes());
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(&digest[..8]);
                u64::from_le_bytes(bytes)
            })
        })
        .collect()
}

/// Per-run directory for failure artifacts.
#[must_use]
pub fn artifacts_dir(base: &Path, scenario: &str, seed: u64) -> PathBuf {
    let ts = Utc::now().format("%Y%m%dT%H%M%S");
    base.join(scenario).join(format!("seed-{seed}")).join(ts.to_string())
}

/// Dump the final snapshot and the error chain of a failed run.
pub fn write_failure_artifacts(dir: &Path, snapshot: Option<&str>, err: &anyhow::Error) -> Result<()> {
    fs::create_dir_all(dir).context("creating artifacts dir")?;
    if let Some(json) = snapshot {
        let _ = fs::write(dir.join("snapshot.json"), json);
    }
    let _ = fs::write(dir.join("error.txt"), format!("{err:#}"));
    Ok(())
}
