use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One entry of the review list: a display name and the page it links to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub link: String,
}

/// The ordered list of documents to review, stored as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(content)?;
        if let Some(pos) = manifest
            .entries
            .iter()
            .position(|e| e.name.trim().is_empty() || e.link.trim().is_empty())
        {
            anyhow::bail!("Manifest entry {} has an empty name or link", pos);
        }
        Ok(manifest)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ManifestEntry> {
        self.entries.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parse_reads_entries_in_order() {
        let manifest = Manifest::parse(
            r#"[
                {"name": "Augustus", "link": "https://en.wikipedia.org/wiki/Augustus"},
                {"name": "Lucius Verus", "link": "https://en.wikipedia.org/wiki/Lucius_Verus"}
            ]"#,
        )
        .unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.get(1).unwrap().name, "Lucius Verus");
    }

    #[test]
    fn parse_rejects_blank_links() {
        let err = Manifest::parse(r#"[{"name": "Otho", "link": " "}]"#).unwrap_err();
        assert!(err.to_string().contains("entry 0"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(
            &path,
            r#"[{"name": "Nerva", "link": "https://en.wikipedia.org/wiki/Nerva"}]"#,
        )
        .unwrap();
        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(
            manifest.get(0),
            Some(&ManifestEntry {
                name: "Nerva".to_string(),
                link: "https://en.wikipedia.org/wiki/Nerva".to_string(),
            })
        );
    }

    #[test]
    fn load_missing_file_names_the_path() {
        let dir = tempdir().unwrap();
        let err = Manifest::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }
}
