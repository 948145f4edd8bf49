use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::file::SelectedFile;

/// A transient display resource derived from a selected file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewHandle {
    id: u64,
    url: String,
}

impl PreviewHandle {
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Owner of preview resources. Every handle created must be released exactly once.
pub trait PreviewStore: Send {
    fn create(&mut self, file: &SelectedFile) -> PreviewHandle;
    fn release(&mut self, handle: PreviewHandle);
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    live: HashMap<u64, String>,
}

/// In-process `PreviewStore`. Clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl PreviewRegistry {
    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PreviewStore for PreviewRegistry {
    fn create(&mut self, file: &SelectedFile) -> PreviewHandle {
        let mut registry = self.lock();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.live.insert(id, file.name.clone());

        PreviewHandle {
            id,
            url: format!("preview://{}/{}", id, file.name),
        }
    }

    fn release(&mut self, handle: PreviewHandle) {
        if self.lock().live.remove(&handle.id).is_none() {
            tracing::warn!("preview {} released twice", handle.url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_live_handles() {
        let registry = PreviewRegistry::default();
        let mut store = registry.clone();
        let file = SelectedFile::from_bytes("face.png", "image/png", vec![0u8; 4]);

        let first = store.create(&file);
        let second = store.create(&file);
        assert_ne!(first, second);
        assert_eq!(registry.live_count(), 2);

        store.release(first);
        store.release(second);
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn url_names_the_file() {
        let mut store = PreviewRegistry::default();
        let file = SelectedFile::from_bytes("face.png", "image/png", vec![0u8; 4]);

        let handle = store.create(&file);

        assert_eq!(handle.url(), "preview://1/face.png");
    }
}
