//! Persisted server cookies
//!
//! The browser keeps the API's session cookies for us; the native client
//! keeps them in a small JSON file (cookie name -> raw `Set-Cookie` value).

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// File holding the `Set-Cookie` values issued by the API
#[derive(Debug, Clone)]
pub struct CookieFile {
    path: PathBuf,
}

impl CookieFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored cookies, in a form suitable for `Jar::add_cookie_str`.
    ///
    /// A missing or unreadable file yields no cookies.
    pub fn load(&self) -> Vec<String> {
        self.read().into_values().collect()
    }

    /// Merge newly issued cookies; expired ones are dropped
    pub fn record<'a>(&self, issued: impl IntoIterator<Item = &'a str>) -> io::Result<()> {
        let mut cookies = self.read();

        for raw in issued {
            let Some(name) = cookie_name(raw) else {
                continue;
            };
            if is_expired(raw) {
                cookies.remove(name);
            } else {
                cookies.insert(name.to_string(), raw.to_string());
            }
        }

        if cookies.is_empty() {
            return self.clear();
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&cookies)?;
        std::fs::write(&self.path, json)
    }

    pub fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    fn read(&self) -> BTreeMap<String, String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return BTreeMap::new(),
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed cookie file {:?}: {}", self.path, e);
            BTreeMap::new()
        })
    }
}

fn cookie_name(raw: &str) -> Option<&str> {
    let (name, _) = raw.split(';').next()?.split_once('=')?;
    let name = name.trim();
    (!name.is_empty()).then_some(name)
}

fn is_expired(raw: &str) -> bool {
    let mut parts = raw.split(';');
    let value = parts
        .next()
        .and_then(|pair| pair.split_once('='))
        .map(|(_, v)| v.trim())
        .unwrap_or_default();

    value.is_empty()
        || parts.any(|attr| {
            let attr = attr.trim().to_ascii_lowercase();
            attr == "max-age=0" || attr.starts_with("max-age=-")
        })
}
