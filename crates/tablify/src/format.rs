use std::collections::HashMap;

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;
const GB: f64 = MB * 1024.0;

pub const SELECT_KEY: &str = "Gallery.SELECT";

pub trait SizeFormatter {
    fn format_size(&self, bytes: u64) -> String;
}

pub trait Translator {
    fn translate(&self, key: &str) -> String;
}

/// Binary-unit byte counts with one decimal place above plain bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct HumanSize;

impl SizeFormatter for HumanSize {
    fn format_size(&self, bytes: u64) -> String {
        let size = bytes as f64;
        if size >= GB {
            format!("{:.1} GB", size / GB)
        } else if size >= MB {
            format!("{:.1} MB", size / MB)
        } else if size >= KB {
            format!("{:.1} KB", size / KB)
        } else {
            format!("{bytes} B")
        }
    }
}

/// In-memory string table for hosts without locale files. Unknown keys
/// translate to themselves.
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty().with(SELECT_KEY, "Select")
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
