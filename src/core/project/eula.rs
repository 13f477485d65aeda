use std::io::ErrorKind;
use std::path::Path;

use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::core::error::{ActionError, ActionResult};

pub const EULA_FILE: &str = "eula.txt";
const ACCEPTED: &str = "eula=true";
const DECLINED: &str = "eula=false";

/// Create `eula.txt` containing `eula=true`; an existing file is an error.
pub async fn create_accepted_eula(path: &Path) -> ActionResult<()> {
    let mut file = match tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(ActionError::EulaAlreadyExists(path.to_path_buf()));
        }
        Err(e) => return Err(ActionError::io(path, e)),
    };

    file.write_all(ACCEPTED.as_bytes())
        .await
        .map_err(|e| ActionError::io(path, e))?;
    file.flush().await.map_err(|e| ActionError::io(path, e))?;

    info!("Successfully accepted EULA at {}", path.display());
    Ok(())
}

/// Flip every `eula=false` line to `eula=true`, keeping the rest.
pub fn patch_eula(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for line in content.lines() {
        out.push_str(if line.contains(DECLINED) { ACCEPTED } else { line });
        out.push('\n');
    }
    out
}

/// Accept the EULA the server generated on its first boot.
///
/// If the server never wrote the file, a fresh accepted one is created.
pub async fn accept_generated_eula(path: &Path) -> ActionResult<()> {
    let patched = match tokio::fs::read_to_string(path).await {
        Ok(content) => patch_eula(&content),
        Err(e) if e.kind() == ErrorKind::NotFound => format!("{}\n", ACCEPTED),
        Err(e) => return Err(ActionError::io(path, e)),
    };

    tokio::fs::write(path, patched)
        .await
        .map_err(|e| ActionError::io(path, e))?;

    info!("Successfully accepted EULA at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATED: &str = "#By changing the setting below to TRUE you are indicating your agreement to our EULA (https://account.mojang.com/documents/minecraft_eula).\n#Wed Mar 18 12:00:00 UTC 2020\neula=false\n";

    #[test]
    fn patch_flips_only_the_flag_line() {
        let patched = patch_eula(GENERATED);
        assert!(patched.ends_with("eula=true\n"));
        assert!(patched.starts_with("#By changing the setting below"));
        assert!(!patched.contains("eula=false"));
    }

    #[tokio::test]
    async fn exclusive_create_writes_accepted_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EULA_FILE);

        create_accepted_eula(&path).await.unwrap();

        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "eula=true");
    }

    #[tokio::test]
    async fn exclusive_create_fails_loudly_when_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EULA_FILE);
        tokio::fs::write(&path, "eula=false\n").await.unwrap();

        let err = create_accepted_eula(&path).await.unwrap_err();

        assert!(matches!(err, ActionError::EulaAlreadyExists(_)));
        assert_eq!(
            tokio::fs::read_to_string(&path).await.unwrap(),
            "eula=false\n"
        );
    }

    #[tokio::test]
    async fn accept_generated_patches_or_creates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EULA_FILE);

        accept_generated_eula(&path).await.unwrap();
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "eula=true\n");

        tokio::fs::write(&path, GENERATED).await.unwrap();
        accept_generated_eula(&path).await.unwrap();
        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.contains("eula=true"));
        assert!(!content.contains("eula=false"));
    }
}
