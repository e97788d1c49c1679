use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use directories::{ProjectDirs, UserDirs};
use once_cell::sync::Lazy;
use redb::{Database, TableDefinition, TableError, backends::InMemoryBackend};
use tracing::{debug, warn};

pub const LIMIT: &str = "limit";
pub const SORT: &str = "sort";
pub const SELECTABLE: &str = "selectable";
pub const ROOT_PATH: &str = "root_path";

pub const DEFAULT_LIMIT: usize = 20;
pub const DEFAULT_SORT: &str = "title,asc";

const TABLE: TableDefinition<&str, String> = TableDefinition::new("gallery");

pub static VAULTIFY: Lazy<Vaultify> = Lazy::new(|| {
    debug!("initializing preference vault");
    default_db_path()
        .and_then(Vaultify::open)
        .or_else(|e| {
            warn!("preferences will not persist: {e:?}");
            Vaultify::in_memory()
        })
        .unwrap_or_else(|e| panic!("unable to create an in-memory preference vault: {e:?}"))
});

fn default_db_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("io.github", "gallery", "gallery")
        .context("no home directory to keep preferences in")?;
    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir)
        .with_context(|| format!("creating {}", data_dir.display()))?;
    Ok(data_dir.join("gallery.redb"))
}

fn default_root() -> PathBuf {
    UserDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// View preferences that outlive a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preferences {
    pub limit: usize,
    pub sort: String,
    pub selectable: bool,
    pub root_path: PathBuf,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            sort: DEFAULT_SORT.to_string(),
            selectable: true,
            root_path: default_root(),
        }
    }
}

pub struct Vaultify {
    db: Database,
}

impl Vaultify {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let db = Database::create(path)
            .with_context(|| format!("opening preferences at {}", path.display()))?;
        debug!("preferences opened at {}", path.display());
        Ok(Self { db })
    }

    pub fn in_memory() -> Result<Self> {
        let db = Database::builder().create_with_backend(InMemoryBackend::new())?;
        Ok(Self { db })
    }

    /// Seeds the global vault with defaults for any key not stored yet.
    pub fn init_vault() {
        if let Err(e) = VAULTIFY.seed_defaults() {
            warn!("failed to seed preferences: {e:?}");
        }
    }

    pub fn seed_defaults(&self) -> Result<()> {
        let defaults = Preferences::default();
        let seeds = [
            (LIMIT, defaults.limit.to_string()),
            (SORT, defaults.sort),
            (SELECTABLE, serde_json::to_string(&defaults.selectable)?),
            (ROOT_PATH, defaults.root_path.to_string_lossy().into_owned()),
        ];
        for (key, value) in seeds {
            if self.get(key)?.is_none() {
                self.set(key, value)?;
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(TABLE) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(table.get(key)?.map(|value| value.value()))
    }

    pub fn set(&self, key: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        debug!("preference {key} updated");
        Ok(())
    }

    /// Reads every preference, keeping the default for anything missing or
    /// unreadable.
    pub fn preferences(&self) -> Preferences {
        let mut preferences = Preferences::default();

        let positive = |raw: &str| raw.parse::<usize>().ok().filter(|limit| *limit > 0);
        if let Some(limit) = self.read(LIMIT, positive) {
            preferences.limit = limit;
        }
        if let Some(sort) = self.read(SORT, |raw| Some(raw.to_string())) {
            preferences.sort = sort;
        }
        if let Some(selectable) = self.read(SELECTABLE, |raw| serde_json::from_str(raw).ok()) {
            preferences.selectable = selectable;
        }
        if let Some(root_path) = self.read(ROOT_PATH, |raw| Some(PathBuf::from(raw))) {
            preferences.root_path = root_path;
        }
        preferences
    }

    fn read<T>(&self, key: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
        match self.get(key) {
            Ok(Some(raw)) => {
                let parsed = parse(&raw);
                if parsed.is_none() {
                    warn!("ignoring unreadable preference {key}={raw}");
                }
                parsed
            }
            Ok(None) => None,
            Err(e) => {
                warn!("failed to read preference {key}: {e:?}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_keys_read_as_none() {
        let vault = Vaultify::in_memory().unwrap();
        assert_eq!(vault.get(SORT).unwrap(), None);
        assert_eq!(vault.preferences(), Preferences::default());
    }

    #[test]
    fn preferences_survive_reopening() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.redb");

        {
            let vault = Vaultify::open(&path).unwrap();
            vault.seed_defaults().unwrap();
            vault.set(SORT, "size,desc").unwrap();
            vault.set(LIMIT, "50").unwrap();
            vault.set(SELECTABLE, "false").unwrap();
        }

        let vault = Vaultify::open(&path).unwrap();
        let preferences = vault.preferences();
        assert_eq!(preferences.sort, "size,desc");
        assert_eq!(preferences.limit, 50);
        assert!(!preferences.selectable);
    }

    #[test]
    fn seeding_keeps_existing_values() {
        let vault = Vaultify::in_memory().unwrap();
        vault.set(LIMIT, "10").unwrap();
        vault.seed_defaults().unwrap();

        assert_eq!(vault.get(LIMIT).unwrap().as_deref(), Some("10"));
        assert_eq!(vault.get(SORT).unwrap().as_deref(), Some(DEFAULT_SORT));
        assert_eq!(vault.get(SELECTABLE).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn unreadable_values_fall_back_to_defaults() {
        let vault = Vaultify::in_memory().unwrap();
        vault.set(LIMIT, "0").unwrap();
        vault.set(SELECTABLE, "maybe").unwrap();

        let preferences = vault.preferences();
        assert_eq!(preferences.limit, DEFAULT_LIMIT);
        assert!(preferences.selectable);
    }
}
