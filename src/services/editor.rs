use anyhow::Context;
use std::path::Path;
use std::process::Command;

/// Runs `editor` (which may carry its own arguments, e.g. `code -w`) on
/// `path` and waits for it to exit.
pub fn open(editor: &str, path: &Path) -> anyhow::Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .with_context(|| format!("empty editor command for {}", path.display()))?;
    tracing::info!(editor = program, path = %path.display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .with_context(|| format!("spawning editor `{}`", program))?;
    if !status.success() {
        anyhow::bail!("editor `{}` exited with {}", program, status);
    }
    Ok(())
}
