//! Design tokens consumed by the web frontend's utility-CSS build.
//!
//! The table is plain data: nothing here generates CSS. It is validated at
//! startup and served as JSON so the frontend build and the server agree on
//! one source of truth.

use std::collections::HashSet;
use std::fmt;

use anyhow::{anyhow, bail, Context};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

mod tokens;

pub use tokens::THEME;

/// Root font size browsers use when the page does not set one.
pub const ROOT_FONT_PX: f64 = 16.0;

static VALIDATE_TOKEN_NAME: Lazy<Regex> = Lazy::new(|| Regex::new("^[a-z0-9.-]+$").unwrap());
static VALIDATE_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^var\(--[a-z0-9-]+\)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeConfig {
    pub content: &'static [&'static str],
    pub theme: Theme,
    pub plugins: &'static [Plugin],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub extend: ThemeExtension,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeExtension {
    pub colors: TokenTable,
    pub font_size: TokenTable,
    pub spacing: TokenTable,
}

/// Ordered token name to value mapping. Serializes as a JSON object with keys
/// in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTable(&'static [(&'static str, &'static str)]);

impl TokenTable {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self(entries)
    }

    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.0.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Serialize for TokenTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plugin {
    Typography,
    Forms,
    ContainerQueries,
    AspectRatio,
}

impl Plugin {
    pub fn package(&self) -> &'static str {
        match self {
            Plugin::Typography => "@tailwindcss/typography",
            Plugin::Forms => "@tailwindcss/forms",
            Plugin::ContainerQueries => "@tailwindcss/container-queries",
            Plugin::AspectRatio => "@tailwindcss/aspect-ratio",
        }
    }
}

impl fmt::Display for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.package())
    }
}

impl Serialize for Plugin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.package())
    }
}

/// A length in `em`, the only unit the token tables use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub em: f64,
}

impl Length {
    pub fn parse(value: &str) -> anyhow::Result<Length> {
        let number = value
            .strip_suffix("em")
            .ok_or_else(|| anyhow!("'{}' is not an em length", value))?;

        let em = number
            .parse::<f64>()
            .with_context(|| format!("'{}' is not an em length", value))?;

        if !em.is_finite() || em < 0.0 {
            bail!("'{}' is not a non-negative length", value);
        }

        Ok(Length { em })
    }

    pub fn to_px(&self, base_px: f64) -> f64 {
        self.em * base_px
    }
}

#[derive(Clone, Copy)]
enum ValueKind {
    Color,
    Length,
}

impl ThemeConfig {
    /// Pixel size of a font-size token at the default root font size.
    pub fn font_size_px(&self, name: &str) -> Option<f64> {
        let value = self.theme.extend.font_size.get(name)?;
        Length::parse(value).ok().map(|len| len.to_px(ROOT_FONT_PX))
    }

    /// Checks token names and values, failing on the first bad token.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.content.is_empty() {
            bail!("theme has no content globs");
        }

        let extend = &self.theme.extend;
        let tables = [
            ("colors", extend.colors, ValueKind::Color),
            ("fontSize", extend.font_size, ValueKind::Length),
            ("spacing", extend.spacing, ValueKind::Length),
        ];

        for (category, table, kind) in tables {
            let mut seen = HashSet::new();

            for (name, value) in table.iter() {
                if !VALIDATE_TOKEN_NAME.is_match(name) {
                    bail!("{} token '{}' has an invalid name", category, name);
                }

                if !seen.insert(name) {
                    bail!("{} token '{}' is defined more than once", category, name);
                }

                match kind {
                    ValueKind::Color => {
                        if !VALIDATE_COLOR.is_match(value) {
                            bail!("{} token '{}' has invalid color '{}'", category, name, value);
                        }
                    }
                    ValueKind::Length => {
                        Length::parse(value)
                            .with_context(|| format!("{} token '{}'", category, name))?;
                    }
                }
            }
        }

        let mut plugins = HashSet::new();
        for plugin in self.plugins {
            if !plugins.insert(plugin.package()) {
                bail!("plugin '{}' is listed more than once", plugin);
            }
        }

        Ok(())
    }
}
