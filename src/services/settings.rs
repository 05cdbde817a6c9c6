use crate::domain::constants::{DEFAULT_CONFIG_PATH, DEFAULT_EDITOR, DEFAULT_STORE_DIR};
use crate::parser::ParseFrame;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(default)]
    pub store_dir: Option<PathBuf>,
    #[serde(default)]
    pub editor: Option<String>,
    #[serde(default)]
    pub json: Option<bool>,
}

/// Options claimed by the root level of the command tree.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RootOptions {
    pub store: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub verbose: bool,
}

impl RootOptions {
    pub fn from_frame(frame: &ParseFrame<'_>) -> Self {
        Self {
            store: frame.value("store").map(PathBuf::from),
            config: frame.value("config").map(PathBuf::from),
            json: frame.is_set("json"),
            verbose: frame.is_set("verbose"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub store_dir: PathBuf,
    pub editor: String,
    pub json: bool,
}

impl Settings {
    /// CLI option > settings file > environment > built-in default.
    pub fn load(root: &RootOptions) -> anyhow::Result<Self> {
        let home = std::env::var("HOME").ok().map(PathBuf::from);
        let file = match &root.config {
            Some(path) => load_file(path)?,
            None => match &home {
                Some(h) if h.join(DEFAULT_CONFIG_PATH).is_file() => {
                    load_file(&h.join(DEFAULT_CONFIG_PATH))?
                }
                _ => SettingsFile::default(),
            },
        };
        Self::merge(root, file, home.as_deref(), |key| std::env::var(key).ok())
    }

    pub fn merge(
        root: &RootOptions,
        file: SettingsFile,
        home: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let store_dir = match root.store.clone().or(file.store_dir) {
            Some(dir) => dir,
            None => home
                .map(|h| h.join(DEFAULT_STORE_DIR))
                .context("HOME is not set; pass --store or set store_dir in the settings file")?,
        };
        let editor = file
            .editor
            .or_else(|| env("VISUAL"))
            .or_else(|| env("EDITOR"))
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string());
        Ok(Self {
            store_dir,
            editor,
            json: root.json || file.json.unwrap_or(false),
        })
    }
}

pub fn load_file(path: &Path) -> anyhow::Result<SettingsFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing settings {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::build_tree;
    use crate::parser::resolve;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn root_frame_feeds_root_options() {
        let tree = build_tree();
        let inv = resolve(&tree, ["--store", "/s", "--config=/c.toml", "--json", "prompt"]);
        let opts = RootOptions::from_frame(inv.root());
        assert_eq!(opts.store, Some(PathBuf::from("/s")));
        assert_eq!(opts.config, Some(PathBuf::from("/c.toml")));
        assert!(opts.json);
        assert!(!opts.verbose);
    }

    #[test]
    fn defaults_derive_from_home() {
        let s = Settings::merge(
            &RootOptions::default(),
            SettingsFile::default(),
            Some(Path::new("/home/u")),
            no_env,
        )
        .unwrap();
        assert_eq!(s.store_dir, PathBuf::from("/home/u/.local/share/promptctl"));
        assert_eq!(s.editor, "vi");
        assert!(!s.json);
    }

    #[test]
    fn cli_beats_file_beats_env() {
        let file = SettingsFile {
            store_dir: Some(PathBuf::from("/from-file")),
            editor: None,
            json: Some(true),
        };
        let root = RootOptions {
            store: Some(PathBuf::from("/from-cli")),
            ..RootOptions::default()
        };
        let env = |key: &str| (key == "EDITOR").then(|| "nano".to_string());
        let s = Settings::merge(&root, file, None, env).unwrap();
        assert_eq!(s.store_dir, PathBuf::from("/from-cli"));
        assert_eq!(s.editor, "nano");
        assert!(s.json);
    }

    #[test]
    fn missing_home_without_store_is_an_error() {
        let err = Settings::merge(&RootOptions::default(), SettingsFile::default(), None, no_env)
            .unwrap_err();
        assert!(err.to_string().contains("HOME is not set"));
    }

    #[test]
    fn settings_file_parses_and_rejects_unknown_keys() {
        let tmp = TempDir::new().expect("temp dir");
        let good = tmp.path().join("good.toml");
        std::fs::write(&good, "store_dir = \"/x\"\neditor = \"code -w\"\n").unwrap();
        let parsed = load_file(&good).unwrap();
        assert_eq!(parsed.store_dir, Some(PathBuf::from("/x")));
        assert_eq!(parsed.editor.as_deref(), Some("code -w"));

        let bad = tmp.path().join("bad.toml");
        std::fs::write(&bad, "stor_dir = \"/x\"\n").unwrap();
        assert!(load_file(&bad).is_err());
        assert!(load_file(&tmp.path().join("absent.toml")).is_err());
    }
}
