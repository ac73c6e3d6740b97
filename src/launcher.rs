use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use std::process::Command;

/// Standalone Flash player shipped alongside the catalog, used for .swf entries
const FLASH_PLAYER: &str = "Open With/flashplayer_11_sa.exe";

/// Launch a cataloged file and do not wait for it.
///
/// Windows executables and Flash movies go through wine; everything
/// else is handed to the OS's preferred handler.
pub fn launch(base_dir: &Path, filename: &str) -> Result<()> {
    let path = base_dir.join(filename);
    if !path.is_file() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    info!("Launching {}", path.display());

    match extension.as_str() {
        "exe" => {
            Command::new("wine")
                .arg(&path)
                .current_dir(base_dir)
                .spawn()
                .with_context(|| format!("Failed to start wine for {}", path.display()))?;
        }
        "swf" => {
            Command::new("wine")
                .arg(base_dir.join(FLASH_PLAYER))
                .arg(&path)
                .current_dir(base_dir)
                .spawn()
                .with_context(|| format!("Failed to start Flash player for {}", path.display()))?;
        }
        _ => {
            open::that_detached(&path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = launch(dir.path(), "ghost.zip");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("File not found"));
    }
}
