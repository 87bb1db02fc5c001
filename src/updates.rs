use crate::error::{SenseError, SenseResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

pub const DEFAULT_RELEASE_URL: &str =
    "https://api.github.com/repos/gamesense/gamesense/releases/latest";

/// `true` when `latest` is strictly newer than `current`.
/// Dotted numeric versions; missing components count as 0 and a leading `v` is ignored.
pub fn compare_versions(current: &str, latest: &str) -> SenseResult<bool> {
    let cur = parse_version(current)?;
    let new = parse_version(latest)?;
    let len = cur.len().max(new.len());
    for i in 0..len {
        let c = cur.get(i).copied().unwrap_or(0);
        let l = new.get(i).copied().unwrap_or(0);
        if l != c {
            return Ok(l > c);
        }
    }
    Ok(false)
}

fn parse_version(v: &str) -> SenseResult<Vec<u64>> {
    let trimmed = v.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    trimmed
        .split('.')
        .map(|part| {
            part.parse::<u64>()
                .map_err(|_| SenseError::Update(format!("'{}' is not a numeric version", v)))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// The subset of a GitHub "latest release" payload the tool reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    pub tag_name: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl ReleaseInfo {
    pub fn from_json(json: &str) -> SenseResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn version(&self) -> &str {
        self.tag_name.trim_start_matches(['v', 'V'])
    }

    /// The first `.zip` package attached to the release, if any.
    pub fn package(&self) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|a| a.name.ends_with(".zip"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatus {
    pub current_version: String,
    pub latest_version: String,
    pub last_checked: String,
    pub update_available: bool,
}

impl UpdateStatus {
    pub fn evaluate(current: &str, release: &ReleaseInfo) -> SenseResult<Self> {
        Ok(Self {
            current_version: current.to_string(),
            latest_version: release.version().to_string(),
            last_checked: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            update_available: compare_versions(current, release.version())?,
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> SenseResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!(
            "Update check recorded: current {}, latest {}",
            self.current_version, self.latest_version
        );
        Ok(())
    }
}

/// Blocking fetch of the latest release description.
#[cfg(feature = "update-check")]
pub fn fetch_latest_release(url: &str, current_version: &str) -> SenseResult<ReleaseInfo> {
    use reqwest::blocking::Client;

    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .user_agent(format!("gamesense/{}", current_version))
        .build()
        .map_err(|e| SenseError::Update(e.to_string()))?;

    let response = client
        .get(url)
        .header("Accept", "application/vnd.github.v3+json")
        .send()
        .map_err(|e| SenseError::Update(e.to_string()))?;

    if !response.status().is_success() {
        return Err(SenseError::Update(format!(
            "release server answered {}",
            response.status()
        )));
    }

    response
        .json::<ReleaseInfo>()
        .map_err(|e| SenseError::Update(e.to_string()))
}

#[cfg(not(feature = "update-check"))]
pub fn fetch_latest_release(_url: &str, _current_version: &str) -> SenseResult<ReleaseInfo> {
    Err(SenseError::Update(
        "built without the update-check feature".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_versions_detected() {
        assert!(compare_versions("1.0.0", "1.0.1").unwrap());
        assert!(compare_versions("1.9", "1.10").unwrap());
        assert!(compare_versions("1.0", "v1.0.1").unwrap());
    }

    #[test]
    fn same_or_older_is_not_an_update() {
        assert!(!compare_versions("1.0", "1.0.0").unwrap());
        assert!(!compare_versions("2.0.0", "1.9.9").unwrap());
    }

    #[test]
    fn non_numeric_versions_rejected() {
        assert!(compare_versions("1.0", "1.0-beta").is_err());
    }

    #[test]
    fn release_payload() {
        let json = r#"{
            "tag_name": "v0.4.0",
            "body": "Fixes",
            "assets": [
                {"name": "notes.txt", "browser_download_url": "https://x/notes.txt"},
                {"name": "gamesense.zip", "browser_download_url": "https://x/g.zip"}
            ],
            "draft": false
        }"#;
        let release = ReleaseInfo::from_json(json).unwrap();
        assert_eq!(release.version(), "0.4.0");
        assert_eq!(release.package().unwrap().name, "gamesense.zip");
        let status = UpdateStatus::evaluate("0.3.0", &release).unwrap();
        assert!(status.update_available);
    }
}
