//! # nd-slots-fs
//! newsdesk/crates/nd-plugins/nd-slots-fs/src/lib.rs
//! Local filesystem implementation of `SlotStore`.
//! One file per slot: `<root>/<slot>.json`, replaced atomically on write.

use anyhow::{bail, Context};
use nd_core::traits::SlotStore;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct FileSlots {
    /// Directory holding the slot files (e.g., "./data")
    root_path: PathBuf,
}

impl FileSlots {
    /// Creates the root directory if it does not exist yet.
    pub fn open(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root_path = root.into();
        std::fs::create_dir_all(&root_path)
            .with_context(|| format!("creating slot directory {}", root_path.display()))?;
        Ok(Self { root_path })
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    /// Maps a slot name to its file, refusing names that could escape the root.
    fn slot_path(&self, slot: &str) -> anyhow::Result<PathBuf> {
        if slot.is_empty()
            || slot.starts_with('.')
            || slot.contains(['/', '\\'])
            || slot.contains("..")
        {
            bail!("invalid slot name `{slot}`");
        }
        Ok(self.root_path.join(format!("{slot}.json")))
    }
}

impl SlotStore for FileSlots {
    fn read(&self, slot: &str) -> anyhow::Result<Option<String>> {
        let path = self.slot_path(slot)?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    /// Writes to a hidden temp file in the same directory, then renames it
    /// over the slot file so readers never see a partial value.
    fn write(&self, slot: &str, value: &str) -> anyhow::Result<()> {
        let path = self.slot_path(slot)?;
        let tmp = self
            .root_path
            .join(format!(".{slot}.json.tmp.{}", std::process::id()));
        {
            let mut file = std::fs::File::create(&tmp)
                .with_context(|| format!("creating {}", tmp.display()))?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("replacing {}", path.display()))?;
        debug!(slot, bytes = value.len(), "slot written");
        Ok(())
    }

    fn remove(&self, slot: &str) -> anyhow::Result<()> {
        let path = self.slot_path(slot)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
        }
    }
}
