//! Starting the target program
//!
//! Fire-and-forget: the child is spawned and immediately let go. No pipes,
//! no wait, no exit status.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("No program selected. Set the executable path in Settings.")]
    EmptyPath,

    #[error("Program not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to start {}: {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Start `target` and return the child's PID
///
/// Relative paths are taken from the launcher's working directory.
pub fn launch_target(target: &str) -> Result<u32, LaunchError> {
    let base = std::env::current_dir().map_err(|e| {
        debug!(error = %e, "Working directory unavailable");
        LaunchError::NotFound(PathBuf::from(target.trim()))
    })?;
    launch_target_in(target, &base)
}

/// Start `target`, resolving a relative path against `base`
///
/// The program is spawned by absolute path so neither `PATH` lookup nor the
/// child's working directory changes which file runs. The child runs from
/// its own directory so programs that load assets relative to themselves
/// behave as when started from a file manager.
pub fn launch_target_in(target: &str, base: &Path) -> Result<u32, LaunchError> {
    let target = target.trim();
    if target.is_empty() {
        return Err(LaunchError::EmptyPath);
    }

    let path = resolve(Path::new(target), base);
    if !path.exists() {
        return Err(LaunchError::NotFound(PathBuf::from(target)));
    }

    let mut command = Command::new(&path);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    if let Some(dir) = path.parent() {
        command.current_dir(dir);
    }

    let child = command.spawn().map_err(|source| LaunchError::Spawn {
        path: path.clone(),
        source,
    })?;
    let pid = child.id();
    info!(pid, path = %path.display(), "Launched target program");
    Ok(pid)
}

fn resolve(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("roro-launcher-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_empty_path_rejected() {
        assert!(matches!(launch_target(""), Err(LaunchError::EmptyPath)));
        assert!(matches!(launch_target("   "), Err(LaunchError::EmptyPath)));
    }

    #[test]
    fn test_missing_path_rejected() {
        let err = launch_target("/definitely/not/here/game.exe").unwrap_err();
        assert!(matches!(err, LaunchError::NotFound(_)));
        assert!(err.to_string().contains("game.exe"));
    }

    #[test]
    fn test_non_executable_reports_spawn_error() {
        let dir = scratch_dir("launch-text");
        let file = dir.join("not-a-program.txt");
        std::fs::write(&file, "plain text").unwrap();

        let err = launch_target(file.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }

    #[test]
    fn test_resolve_relative_against_base() {
        let base = Path::new("/srv/launcher");
        assert_eq!(
            resolve(Path::new("games/sub/run"), base),
            PathBuf::from("/srv/launcher/games/sub/run")
        );
        assert_eq!(resolve(Path::new("run"), base), PathBuf::from("/srv/launcher/run"));
        assert_eq!(resolve(Path::new("/opt/run"), base), PathBuf::from("/opt/run"));
    }

    #[cfg(unix)]
    #[test]
    fn test_relative_path_with_directories_launches() {
        let base = scratch_dir("launch-nested");
        std::fs::create_dir_all(base.join("games/sub")).unwrap();
        std::os::unix::fs::symlink("/bin/sh", base.join("games/sub/run")).unwrap();

        assert!(launch_target_in("games/sub/run", &base).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_bare_filename_launches_from_base() {
        let base = scratch_dir("launch-bare");
        std::os::unix::fs::symlink("/bin/sh", base.join("run_here")).unwrap();

        assert!(launch_target_in("run_here", &base).is_ok());
        assert!(matches!(
            launch_target_in("not_here", &base),
            Err(LaunchError::NotFound(_))
        ));
    }
}
