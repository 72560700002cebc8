use std::collections::HashMap;

/// Process-wide directory of shared state, keyed table/key/field. Components
/// publish the values they own (device metadata, live toggle states) and read
/// what their collaborators have published.
#[derive(Debug, Default)]
pub struct Directory {
    slots: HashMap<String, HashMap<String, HashMap<String, String>>>,
}

impl Directory {
    pub fn new() -> Self {
        Directory::default()
    }

    pub fn publish(&mut self, table: &str, key: &str, field: &str, value: &str) {
        self.slots
            .entry(table.to_string())
            .or_default()
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
    }

    pub fn get(&self, table: &str, key: &str, field: &str) -> Option<String> {
        self.slots.get(table)?.get(key)?.get(field).cloned()
    }
}
