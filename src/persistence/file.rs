use super::{PersistenceResult, SettingsStore};
use crate::settings::Settings;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Settings kept as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    fn save_settings(&self, settings: &Settings) -> PersistenceResult<()> {
        save_settings_to_json(settings, &self.path)
    }

    fn load_settings(&self) -> PersistenceResult<Option<Settings>> {
        match File::open(&self.path) {
            Ok(file) => {
                let settings = serde_json::from_reader(BufReader::new(file))?;
                Ok(Some(settings))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Writes through a temp file in the target directory and renames it into
/// place, so readers never observe a half-written file.
pub fn save_settings_to_json<P: AsRef<Path>>(settings: &Settings, path: P) -> PersistenceResult<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, settings)?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    debug!(path = %path.display(), "settings written");
    Ok(())
}

pub fn load_settings_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Settings> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
