use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Names the file a persisted type lives in.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

/// A directory of JSON files, one per [`StorageKey`].
#[derive(Clone, Debug)]
pub(crate) struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub(crate) fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub(crate) fn path<T: StorageKey>(&self) -> PathBuf {
        self.dir.join(format!("{}.json", T::KEY))
    }

    /// Raw contents, or `None` when nothing was stored yet.
    pub(crate) fn read<T: StorageKey>(&self) -> anyhow::Result<Option<String>> {
        let path = self.path::<T>();
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("reading {}", path.display())),
        }
    }

    /// Loads the stored value, falling back to the default when it is missing or unreadable.
    pub(crate) fn local_or_default<T>(&self) -> T
    where
        T: StorageKey + DeserializeOwned + Default,
    {
        let text = match self.read::<T>() {
            Ok(Some(text)) => text,
            Ok(None) => return T::default(),
            Err(err) => {
                log::warn!("{:#}, using defaults", err);
                return T::default();
            }
        };

        serde_json::from_str(&text).unwrap_or_else(|err| {
            log::warn!("could not parse {}: {}, using defaults", T::KEY, err);
            T::default()
        })
    }

    pub(crate) fn save<T: StorageKey + Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let path = self.path::<T>();
        let json = serde_json::to_string(value).context("encoding save data")?;
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        log::debug!("saved {}", path.display());
        Ok(())
    }

    pub(crate) fn remove<T: StorageKey>(&self) -> anyhow::Result<()> {
        let path = self.path::<T>();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("removing {}", path.display())),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde::Deserialize;

    /// Fresh, empty directory under the system temp dir.
    pub(crate) fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sweeper-{}-{}", std::process::id(), name));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
    }

    impl StorageKey for Counter {
        const KEY: &'static str = "counter";
    }

    #[test]
    fn missing_file_gives_default() {
        let storage = Storage::new(scratch_dir("missing"));

        assert_eq!(storage.read::<Counter>().unwrap(), None);
        assert_eq!(storage.local_or_default::<Counter>(), Counter::default());
    }

    #[test]
    fn save_then_load() {
        let storage = Storage::new(scratch_dir("save-load"));

        storage.save(&Counter { value: 3 }).unwrap();

        assert_eq!(storage.local_or_default::<Counter>(), Counter { value: 3 });
    }

    #[test]
    fn garbage_gives_default() {
        let dir = scratch_dir("garbage");
        let storage = Storage::new(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(storage.path::<Counter>(), "{ nope").unwrap();

        assert_eq!(storage.local_or_default::<Counter>(), Counter::default());
    }

    #[test]
    fn remove_is_idempotent() {
        let storage = Storage::new(scratch_dir("remove"));
        storage.save(&Counter { value: 1 }).unwrap();

        storage.remove::<Counter>().unwrap();
        storage.remove::<Counter>().unwrap();

        assert_eq!(storage.read::<Counter>().unwrap(), None);
    }
}
