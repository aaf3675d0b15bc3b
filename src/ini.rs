//! INI File Reading
//!
//! Minimal reader for the INI dialect used by game and client data files:
//! bracketed section names, `key=value` lines and `;` comments. Sections and
//! keys keep the order they appear in, which list sections such as
//! `[Battles]` rely on.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// A parsed INI document
#[derive(Debug, Clone, Default)]
pub struct IniFile {
    sections: Vec<IniSection>,
    index: HashMap<String, usize>,
}

/// One `[Section]` of an INI document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniSection {
    name: String,
    keys: Vec<String>,
    values: HashMap<String, String>,
}

impl IniFile {
    /// Read and parse an INI file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| Error::IniLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        // Game data files are frequently not valid UTF-8
        let content = String::from_utf8_lossy(&bytes);
        Ok(Self::parse(&content))
    }

    /// Parse INI text
    ///
    /// Lines outside of any section are ignored. A repeated section header
    /// continues the earlier section; a repeated key overwrites its value.
    pub fn parse(content: &str) -> Self {
        let mut file = IniFile::default();
        let mut current: Option<usize> = None;

        for raw_line in content.lines() {
            let line = strip_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let Some(end) = rest.find(']') else {
                    trace!("Ignoring malformed section header: {}", line);
                    continue;
                };
                let name = rest[..end].trim();
                current = Some(file.section_index_or_insert(name));
                continue;
            }

            let Some(section_idx) = current else {
                continue;
            };

            let Some((key, value)) = line.split_once('=') else {
                trace!("Ignoring line without '=': {}", line);
                continue;
            };

            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            file.sections[section_idx].set_value(key, value.trim());
        }

        file
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        self.sections.push(IniSection::new(name));
        let idx = self.sections.len() - 1;
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Look up a section by name
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.index.get(name).map(|&idx| &self.sections[idx])
    }

    /// All sections in file order
    pub fn sections(&self) -> &[IniSection] {
        &self.sections
    }
}

impl IniSection {
    /// Create an empty section
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            keys: Vec::new(),
            values: HashMap::new(),
        }
    }

    /// Section name without brackets
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a key, keeping its original position if it already exists
    pub fn set_value(&mut self, key: &str, value: &str) {
        if self.values.insert(key.to_string(), value.to_string()).is_none() {
            self.keys.push(key.to_string());
        }
    }

    /// Whether the key is present (even with an empty value)
    pub fn key_exists(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Raw value of a key
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// String value of a key, or `default` if the key is missing
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.value(key).unwrap_or(default).to_string()
    }

    /// Integer value of a key, or `default` if missing or unparseable
    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        self.value(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Boolean value of a key, or `default` if missing or unrecognized
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.value(key).and_then(parse_bool).unwrap_or(default)
    }

    /// Comma-separated list value with empty entries removed
    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.value(key).map(split_list).unwrap_or_default()
    }

    /// Key/value pairs in file order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys
            .iter()
            .map(move |k| (k.as_str(), self.values[k].as_str()))
    }

    /// Number of keys in the section
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the section has no keys
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Parse an INI boolean
///
/// Accepts the spellings found in game data files; returns `None` for
/// anything else so callers can fall back to a default.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" | "1" | "y" => Some(true),
        "no" | "false" | "0" | "n" => Some(false),
        _ => None,
    }
}

/// Split a comma-separated list, dropping empty entries
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(idx) => &line[..idx],
        None => line,
    }
}
