use std::collections::HashMap;

/// Session scoped key/value storage. In a browser this is `window.sessionStorage`; failures there
/// aren't interesting to us so the interface is infallible.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
    fn remove_item(&mut self, key: &str);
}

/// Storage that lives as long as the value does. Useful off the web and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        Default::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}

/// Carries the sidebar's scroll offset over a single navigation.
#[derive(Debug, Clone)]
pub struct ScrollMemory<'a> {
    key: &'a str,
}

impl<'a> ScrollMemory<'a> {
    pub fn new(key: &'a str) -> ScrollMemory<'a> {
        ScrollMemory { key }
    }

    pub fn record<S: SessionStorage + ?Sized>(&self, storage: &mut S, offset: i64) {
        trace!("Recording sidebar offset {} under {}", offset, self.key);
        storage.set_item(self.key, &offset.to_string());
    }

    /// Read the recorded offset and clear it. The key is cleared even if the value is garbage.
    pub fn take<S: SessionStorage + ?Sized>(&self, storage: &mut S) -> Option<i64> {
        let value = storage.get_item(self.key)?;
        storage.remove_item(self.key);

        // Browsers report fractional offsets on zoomed pages.
        match value.trim().parse::<f64>() {
            Ok(offset) if offset.is_finite() => Some(offset.round() as i64),
            _ => {
                warn!("Ignoring unreadable sidebar offset {:?}", value);
                None
            }
        }
    }
}
