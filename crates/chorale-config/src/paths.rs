//! Where presets live on disk.
//!
//! User presets go in the platform config directory:
//!
//! - Linux: `~/.config/chorale/presets/`
//! - macOS: `~/Library/Application Support/chorale/presets/`
//! - Windows: `%APPDATA%\chorale\presets\`
//!
//! A read-only system directory (`/usr/share/chorale/presets/` on Linux) is
//! searched after the user directory.
//!
//! # Example
//!
//! ```rust,no_run
//! use chorale_config::paths;
//!
//! if let Some(path) = paths::find_preset("lush") {
//!     println!("Found preset at: {}", path.display());
//! }
//! ```

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "chorale";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

const PRESET_EXTENSION: &str = "toml";

/// The user configuration directory (`<config>/chorale`).
///
/// Falls back to the current directory if the platform has no config dir.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// The user presets directory (`<config>/chorale/presets`).
pub fn user_presets_dir() -> PathBuf {
    user_config_dir().join(PRESETS_SUBDIR)
}

/// The system-wide presets directory.
pub fn system_presets_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    let base = PathBuf::from("/usr/share");
    #[cfg(target_os = "macos")]
    let base = PathBuf::from("/Library/Application Support");
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_NAME).join(PRESETS_SUBDIR)
}

/// Resolve a preset by path or name.
///
/// `name` is tried as a file path first, then as a preset name (with or
/// without `.toml`) in the user and system preset directories.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    find_preset_in(name, &[user_presets_dir(), system_presets_dir()])
}

fn find_preset_in(name: &str, search_dirs: &[PathBuf]) -> Option<PathBuf> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Some(direct.to_path_buf());
    }

    let file_name = if direct.extension().is_some_and(|ext| ext == PRESET_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}.{PRESET_EXTENSION}")
    };

    search_dirs
        .iter()
        .map(|dir| dir.join(&file_name))
        .find(|candidate| candidate.is_file())
}

/// Create the user presets directory if needed and return it.
pub fn ensure_user_presets_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_presets_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// Preset files in the user directory, sorted by path.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// Preset files in the system directory, sorted by path.
pub fn list_system_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&system_presets_dir())
}

/// User presets followed by system presets.
pub fn list_all_presets() -> Vec<PathBuf> {
    let mut presets = list_user_presets();
    presets.extend(list_system_presets());
    presets
}

fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == PRESET_EXTENSION)
        })
        .collect();
    presets.sort();
    presets
}

/// File stem of a preset path.
///
/// ```rust
/// use chorale_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/lush.toml"));
/// assert_eq!(name.as_deref(), Some("lush"));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}

/// File name for a preset display name: lowercase, spaces and punctuation
/// folded to `_`.
///
/// ```rust
/// use chorale_config::paths::preset_file_name;
///
/// assert_eq!(preset_file_name("Slow Shimmer!"), "slow_shimmer.toml");
/// ```
pub fn preset_file_name(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            stem.push(ch.to_ascii_lowercase());
        } else if !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let stem = stem.trim_matches('_');
    let stem = if stem.is_empty() { "untitled" } else { stem };
    format!("{stem}.{PRESET_EXTENSION}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dirs_are_namespaced() {
        assert!(user_config_dir().ends_with("chorale"));
        assert!(user_presets_dir().ends_with("chorale/presets"));
        assert!(system_presets_dir().ends_with("chorale/presets"));
    }

    #[test]
    fn test_find_preset_by_path() {
        let temp_dir = TempDir::new().unwrap();
        let preset_path = temp_dir.path().join("test.toml");
        fs::write(&preset_path, "name = \"test\"").unwrap();

        let found = find_preset(preset_path.to_str().unwrap());
        assert_eq!(found, Some(preset_path));
    }

    #[test]
    fn test_find_preset_by_name_in_search_dirs() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(second.path().join("lush.toml"), "name = \"Lush\"").unwrap();

        let dirs = [first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(
            find_preset_in("lush", &dirs),
            Some(second.path().join("lush.toml"))
        );
        assert_eq!(
            find_preset_in("lush.toml", &dirs),
            Some(second.path().join("lush.toml"))
        );

        // Earlier directories win
        fs::write(first.path().join("lush.toml"), "name = \"Lush\"").unwrap();
        assert_eq!(
            find_preset_in("lush", &dirs),
            Some(first.path().join("lush.toml"))
        );
    }

    #[test]
    fn test_find_preset_not_found() {
        assert!(find_preset("nonexistent_preset_12345").is_none());
    }

    #[test]
    fn test_list_presets_in_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.toml"), "").unwrap();
        fs::write(temp_dir.path().join("a.toml"), "").unwrap();
        fs::write(temp_dir.path().join("not_a_preset.txt"), "").unwrap();

        let presets = list_presets_in_dir(temp_dir.path());
        assert_eq!(
            presets,
            vec![temp_dir.path().join("a.toml"), temp_dir.path().join("b.toml")]
        );
    }

    #[test]
    fn test_list_presets_nonexistent_dir() {
        assert!(list_presets_in_dir(Path::new("/nonexistent/path/12345")).is_empty());
    }

    #[test]
    fn test_preset_name_from_path() {
        assert_eq!(
            preset_name_from_path(Path::new("simple.toml")),
            Some("simple".to_string())
        );
    }

    #[test]
    fn test_preset_file_name() {
        assert_eq!(preset_file_name("Classic"), "classic.toml");
        assert_eq!(preset_file_name("  wide   stereo "), "wide_stereo.toml");
        assert_eq!(preset_file_name("80s-chorus"), "80s-chorus.toml");
        assert_eq!(preset_file_name("!!!"), "untitled.toml");
    }
}
