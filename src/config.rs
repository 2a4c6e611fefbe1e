use crate::transpiler::rewrite::{RewriteRule, RewriteTable};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Settings for one generator run, assembled from the command line.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratorConfig {
    /// Defaults to the directory of the input file
    pub output_dir: Option<PathBuf>,
    /// Defaults to the input file stem
    pub class_name: Option<String>,
    pub use_default_rewrites: bool,
    /// Applied after the defaults; a rule for an already mapped name replaces it
    pub rewrites: Vec<RewriteRule>,
    /// Print the artifacts instead of writing files
    pub to_stdout: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            class_name: None,
            use_default_rewrites: true,
            rewrites: Vec::new(),
            to_stdout: false,
        }
    }
}

impl GeneratorConfig {
    pub fn rewrite_table(&self) -> RewriteTable {
        let mut table = if self.use_default_rewrites {
            RewriteTable::default()
        } else {
            RewriteTable::empty()
        };
        for rule in &self.rewrites {
            table.insert(rule.clone());
        }
        table
    }

    /// Class name for `input`: the explicit override or the file stem, case preserved
    pub fn class_name_for(&self, input: &Path) -> String {
        match &self.class_name {
            Some(name) => name.clone(),
            None => input
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    pub fn output_dir_for(&self, input: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_input_path() {
        let config = GeneratorConfig::default();
        let input = Path::new("models/FruitModel.qml");

        assert_eq!(config.class_name_for(input), "FruitModel");
        assert_eq!(config.output_dir_for(input), PathBuf::from("models"));
        assert_eq!(config.output_dir_for(Path::new("Fruit.qml")), PathBuf::new());
        assert_eq!(config.rewrite_table(), RewriteTable::default());
    }

    #[test]
    fn test_overrides() {
        let config = GeneratorConfig {
            output_dir: Some(PathBuf::from("gen")),
            class_name: Some("Fruits".to_string()),
            use_default_rewrites: false,
            rewrites: vec!["qsTr=QObject::tr".parse().unwrap()],
            to_stdout: false,
        };
        let input = Path::new("models/fruit-model.qml");

        assert_eq!(config.class_name_for(input), "Fruits");
        assert_eq!(config.output_dir_for(input), PathBuf::from("gen"));

        let table = config.rewrite_table();
        assert_eq!(table.rules().len(), 1);
        assert_eq!(table.apply("qsTrId(\"x\")"), "qsTrId(\"x\")");
    }
}
