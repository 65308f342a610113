use std::path::Path;

use anyhow::Context as _;

use crate::error::PapergenResult;

/// Engine configuration parsed from a YAML file.
///
/// This layer never interprets individual keys; the document rides along to
/// the rendering engine verbatim. Parsing goes through serde_yaml and is
/// converted to a JSON value for uniform downstream handling.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EngineConfig(serde_json::Value);

impl EngineConfig {
    pub fn load(path: &Path) -> PapergenResult<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config file '{}'", path.display()))?;
        let yaml: serde_yaml::Value = serde_yaml::from_str(&raw)
            .with_context(|| format!("parse config file '{}'", path.display()))?;
        let json = serde_json::to_value(yaml)
            .with_context(|| format!("convert config file '{}' to json", path.display()))?;
        Ok(Self(json))
    }

    pub fn from_value(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let dir = PathBuf::from("target").join("config_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_yaml_into_json_value() {
        let path = scratch_file(
            "ok.yaml",
            "paper_w: 8.5\npaper_h: 11\nlead_names: [I, II, III]\n",
        );
        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.as_value()["paper_w"], 8.5);
        assert_eq!(config.as_value()["lead_names"][1], "II");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(EngineConfig::load(Path::new("target/config_tests/nope.yaml")).is_err());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let path = scratch_file("bad.yaml", "paper_w: [unclosed\n");
        assert!(EngineConfig::load(&path).is_err());
    }
}
