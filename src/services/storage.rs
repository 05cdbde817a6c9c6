use crate::domain::constants::AUDIT_LOG_FILE;
use crate::domain::models::{Component, Resource, SearchHit};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Storage collaborator behind the action dispatcher.
///
/// Every method is one atomic operation from the caller's point of view;
/// callers never retry.
pub trait ResourceStore {
    fn create_resource(&self, component: Component, name: &str) -> anyhow::Result<Resource>;

    fn fetch_for_edit(&self, component: Component, name: &str) -> anyhow::Result<Resource>;

    fn clone_resource(
        &self,
        component: Component,
        name: &str,
        new_name: &str,
    ) -> anyhow::Result<Resource>;

    fn list_resources(&self, component: Component) -> anyhow::Result<Vec<Resource>>;

    fn search_resources(
        &self,
        component: Component,
        query: Option<&str>,
    ) -> anyhow::Result<Vec<SearchHit>>;
}

/// One file per resource: `<root>/prompts/<name>.md`, `<root>/scripts/<name>.sh`.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn component_dir(&self, component: Component) -> PathBuf {
        self.root.join(component.dir_name())
    }

    fn resource_path(&self, component: Component, name: &str) -> PathBuf {
        self.component_dir(component)
            .join(format!("{}.{}", name, component.extension()))
    }

    fn resource(&self, component: Component, name: &str) -> Resource {
        Resource {
            component,
            name: name.to_string(),
            path: self.resource_path(component, name),
        }
    }

    fn existing(&self, component: Component, name: &str) -> anyhow::Result<Resource> {
        validate_name(name)?;
        let r = self.resource(component, name);
        if !r.path.is_file() {
            anyhow::bail!("{} not found: {}", component.as_str(), name);
        }
        Ok(r)
    }

    fn vacant(&self, component: Component, name: &str) -> anyhow::Result<Resource> {
        validate_name(name)?;
        let r = self.resource(component, name);
        if r.path.exists() {
            anyhow::bail!("{} exists: {}", component.as_str(), name);
        }
        if let Some(parent) = r.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        Ok(r)
    }

    fn audit(&self, action: &str, data: serde_json::Value) {
        let path = self.root.join(AUDIT_LOG_FILE);
        let event = serde_json::json!({
            "ts": unix_now(),
            "action": action,
            "data": data
        });
        let line = format!("{}\n", event);
        let written = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .and_then(|mut f| std::io::Write::write_all(&mut f, line.as_bytes()));
        if let Err(err) = written {
            tracing::debug!(path = %path.display(), %err, "audit log not written");
        }
    }

    fn names(&self, component: Component) -> anyhow::Result<Vec<String>> {
        let dir = self.component_dir(component);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        let entries =
            std::fs::read_dir(&dir).with_context(|| format!("reading {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(component.extension()) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                out.push(stem.to_string());
            }
        }
        out.sort();
        Ok(out)
    }
}

/// Opens a fresh file for `r`; fails with "exists" if one appeared after
/// `vacant` checked the path.
fn create_new(r: &Resource) -> anyhow::Result<std::fs::File> {
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&r.path)
    {
        Ok(file) => Ok(file),
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            anyhow::bail!("{} exists: {}", r.component.as_str(), r.name)
        }
        Err(err) => Err(err).with_context(|| format!("creating {}", r.path.display())),
    }
}

impl ResourceStore for FsStore {
    fn create_resource(&self, component: Component, name: &str) -> anyhow::Result<Resource> {
        let r = self.vacant(component, name)?;
        let mut file = create_new(&r)?;
        std::io::Write::write_all(&mut file, starter_body(component, name).as_bytes())
            .with_context(|| format!("writing {}", r.path.display()))?;
        tracing::debug!(path = %r.path.display(), "resource created");
        self.audit("create", serde_json::json!({"component": component, "name": name}));
        Ok(r)
    }

    fn fetch_for_edit(&self, component: Component, name: &str) -> anyhow::Result<Resource> {
        self.existing(component, name)
    }

    fn clone_resource(
        &self,
        component: Component,
        name: &str,
        new_name: &str,
    ) -> anyhow::Result<Resource> {
        let source = self.existing(component, name)?;
        let target = self.vacant(component, new_name)?;
        let mut src = std::fs::File::open(&source.path)
            .with_context(|| format!("opening {}", source.path.display()))?;
        let mut dest = create_new(&target)?;
        std::io::copy(&mut src, &mut dest).with_context(|| {
            format!(
                "copying {} to {}",
                source.path.display(),
                target.path.display()
            )
        })?;
        self.audit(
            "clone",
            serde_json::json!({"component": component, "name": name, "as": new_name}),
        );
        Ok(target)
    }

    fn list_resources(&self, component: Component) -> anyhow::Result<Vec<Resource>> {
        Ok(self
            .names(component)?
            .iter()
            .map(|n| self.resource(component, n))
            .collect())
    }

    fn search_resources(
        &self,
        component: Component,
        query: Option<&str>,
    ) -> anyhow::Result<Vec<SearchHit>> {
        let needle = query.map(str::to_lowercase);
        let mut hits = Vec::new();
        for name in self.names(component)? {
            let path = self.resource_path(component, &name);
            let body = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let matched = match &needle {
                None => true,
                Some(q) => name.to_lowercase().contains(q) || body.to_lowercase().contains(q),
            };
            if matched {
                hits.push(SearchHit {
                    component,
                    summary: summary_line(&body),
                    name,
                });
            }
        }
        Ok(hits)
    }
}

fn validate_name(name: &str) -> anyhow::Result<()> {
    let ok = !name.trim().is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && Path::new(name).components().count() == 1;
    if !ok {
        anyhow::bail!("invalid resource name: {:?}", name);
    }
    Ok(())
}

fn starter_body(component: Component, name: &str) -> String {
    match component {
        Component::Prompt => format!("# {}\n", name),
        Component::Script => format!("#!/bin/sh\n# {}\n", name),
    }
}

fn summary_line(body: &str) -> String {
    body.lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with("#!"))
        .unwrap_or_default()
        .to_string()
}

fn unix_now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
