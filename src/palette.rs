//! # Colour palettes
//!
//! Fixed colours for the categories that show up in exposure plots: signatures
//! (`sbs`), `pairing_status`, `ffpe`, `pathology` and `lymphgen` subgroups.
//! The built-in palettes are parsed once per process and never change; a custom
//! set can be read from a json file of the same shape.
use std::{path::Path, sync::OnceLock};

use anyhow::{Context, Result};
use indexmap::IndexMap;

use crate::io::json;

const BUILTIN_PALETTES: &str = include_str!("palettes.json");

static PALETTES: OnceLock<Palettes> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palettes {
    categories: IndexMap<String, IndexMap<String, String>>,
}

impl Palettes {
    pub fn from_json(json: &str) -> Result<Self> {
        let categories = serde_json::from_str(json).context("Could not parse palettes")?;
        Ok(Self { categories })
    }
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            categories: json::read_palettes(path)?,
        })
    }
    /// Label to colour mapping of `category`, in definition order.
    pub fn category(&self, category: &str) -> Option<&IndexMap<String, String>> {
        self.categories.get(category)
    }
    pub fn colour(&self, category: &str, label: &str) -> Option<&str> {
        self.category(category)?.get(label).map(String::as_str)
    }
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }
}

/// The built-in palettes.
pub fn palettes() -> Result<&'static Palettes> {
    if let Some(palettes) = PALETTES.get() {
        return Ok(palettes);
    }
    let parsed = Palettes::from_json(BUILTIN_PALETTES)?;
    Ok(PALETTES.get_or_init(|| parsed))
}
