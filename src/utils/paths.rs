use dirs::home_dir;
use std::{
    env,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".pocket_ledger";
const CONFIG_FILE: &str = "config.json";
const STORE_FILE: &str = "store.json";
const TMP_SUFFIX: &str = "tmp";

/// Environment variable that relocates every file the application writes.
pub const HOME_ENV: &str = "POCKET_LEDGER_HOME";

/// Returns the application-specific data directory, defaulting to `~/.pocket_ledger`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path of the configuration file inside `base`.
pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Path of the default key-value store document inside `base`.
pub fn store_file_in(base: &Path) -> PathBuf {
    base.join(STORE_FILE)
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Sibling path used while rewriting `path`, e.g. `store.json.tmp`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Replaces `path` with `data` by writing a temporary sibling and renaming it
/// over the original. On failure the original file is left as it was.
pub fn write_file_atomic(path: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_rooted_in_base() {
        let base = PathBuf::from("/tmp/pocket");
        assert_eq!(config_file_in(&base), base.join("config.json"));
        assert_eq!(store_file_in(&base), base.join("store.json"));
    }

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("/data/store.json")),
            PathBuf::from("/data/store.json.tmp")
        );
        assert_eq!(tmp_path(Path::new("/data/store")), PathBuf::from("/data/store.tmp"));
    }

    #[test]
    fn atomic_write_replaces_contents_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("config.json");
        write_file_atomic(&target, "one").unwrap();
        write_file_atomic(&target, "two").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "two");
        assert!(!tmp_path(&target).exists());
    }
}
