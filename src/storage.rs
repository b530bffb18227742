#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("persistent storage is unavailable")]
    Unavailable,
    #[error("storage rejected write to {key}: {reason}")]
    Rejected { key: String, reason: String },
}

/// Durable string key/value storage scoped to one browser instance.
///
/// Implementations must never panic: a read that cannot be served is
/// `None`, a write that cannot be stored is an `Err` the caller may ignore.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::{cell::RefCell, collections::HashMap};

    /// In-memory stand-in for `localStorage`.
    #[derive(Debug, Default)]
    pub(crate) struct MemoryStore {
        entries: RefCell<HashMap<String, String>>,
    }

    impl MemoryStore {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
            let entries = entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect();
            Self {
                entries: RefCell::new(entries),
            }
        }
    }

    impl PreferenceStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    /// Serves reads from a fixed map and refuses every write, like a
    /// browser with a full quota.
    #[derive(Default)]
    pub(crate) struct FullStore {
        pub(crate) entries: HashMap<String, String>,
    }

    impl PreferenceStore for FullStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.get(key).cloned()
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Rejected {
                key: key.to_string(),
                reason: "QuotaExceededError".to_string(),
            })
        }
    }
}
