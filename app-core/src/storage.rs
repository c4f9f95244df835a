//! This module defines the `Storage` type which collects frontend and backend
//! state and stores/loads it to/from a JSON file.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{from_reader, to_writer_pretty};
use std::path::{Path, PathBuf};

use crate::string_error::ErrorStringExt;

pub const STORAGE_FILE: &str = "./.chartdeck_state.json";

#[derive(Debug, Serialize, Deserialize)]
pub struct Storage<B, F> {
    pub backend_storage: B,
    pub frontend_storage: F,
}

impl<B, F> Storage<B, F>
where
    B: Serialize + DeserializeOwned,
    F: Serialize + DeserializeOwned,
{
    pub fn new(backend_storage: B, frontend_storage: F) -> Self {
        Self {
            backend_storage,
            frontend_storage,
        }
    }

    pub fn save_json(&self, path: Option<&Path>) -> Result<(), String> {
        let path = storage_path(path);
        let file = std::fs::File::create(&path).err_to_string("could not open storage file")?;
        to_writer_pretty(file, &self).err_to_string("could not save app state to json")?;
        log::debug!("saved app state to file {:?}", path);
        Ok(())
    }

    pub fn load_json(path: Option<&Path>) -> Result<Storage<B, F>, String> {
        let path = storage_path(path);
        let file = std::fs::File::open(&path).err_to_string("could not open storage file")?;
        let storage =
            from_reader(file).err_to_string("could not load app state from storage file")?;
        log::debug!("loaded app state from file {:?}", path);
        Ok(storage)
    }
}

fn storage_path(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(STORAGE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Front {
        view: String,
        index: usize,
    }

    #[test]
    fn test_save_then_load_restores_frontend() {
        let path = std::env::temp_dir().join(format!(
            "app-core-storage-{}.json",
            std::process::id()
        ));
        let storage = Storage::new(
            (),
            Front {
                view: "gapminder".into(),
                index: 12,
            },
        );
        storage.save_json(Some(&path)).unwrap();

        let loaded = Storage::<(), Front>::load_json(Some(&path)).unwrap();
        assert_eq!(loaded.frontend_storage, storage.frontend_storage);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let path = Path::new("/definitely/not/here/state.json");
        let err = Storage::<(), Front>::load_json(Some(path)).unwrap_err();
        assert!(err.starts_with("could not open storage file"));
    }
}
