// Parsing of multiline device lists passed in by the launcher
use std::collections::{HashMap, HashSet};

/// One configured favorite: `deviceName[;alias]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteEntry {
    pub name: String,
    pub alias: String,
}

/// Ordered favorites plus the derived name -> alias map.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    entries: Vec<FavoriteEntry>,
    aliases: HashMap<String, String>,
}

impl Favorites {
    pub fn from_entries(entries: Vec<FavoriteEntry>) -> Self {
        let aliases = entries
            .iter()
            .map(|entry| (entry.name.clone(), entry.alias.clone()))
            .collect();
        Self { entries, aliases }
    }

    /// Device names in configured order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.name.clone()).collect()
    }

    pub fn alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Friendly name for `name`, falling back to the raw name.
    pub fn display_title<'a>(&'a self, name: &'a str) -> &'a str {
        self.alias(name).unwrap_or(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Device names excluded from presentation. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blocklist(HashSet<String>);

impl Blocklist {
    pub fn parse(raw: &str) -> Self {
        parse_lines(raw).into_iter().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for Blocklist {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Split a multiline argument into its lines.
///
/// Empty lines are dropped; nothing is trimmed.
pub fn parse_lines(raw: &str) -> Vec<String> {
    raw.split('\n')
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Parse a single `name[;alias]` line.
///
/// Only the first semicolon splits. Empty pieces are discarded, so `"a;"`
/// and `";a"` both yield `a` as name and alias, and a bare `";"` yields
/// nothing. A whitespace-only line yields the empty entry `("", "")`.
pub fn parse_favorite_line(line: &str) -> Option<FavoriteEntry> {
    let parts: Vec<&str> = line.splitn(2, ';').filter(|part| !part.is_empty()).collect();

    match parts.as_slice() {
        [name, alias] => Some(FavoriteEntry {
            name: name.trim().to_string(),
            alias: alias.trim().to_string(),
        }),
        [name] => {
            let name = name.trim().to_string();
            Some(FavoriteEntry {
                alias: name.clone(),
                name,
            })
        }
        _ => None,
    }
}

pub fn parse_favorites(raw: &str) -> Favorites {
    let entries = parse_lines(raw)
        .iter()
        .filter_map(|line| parse_favorite_line(line))
        .collect();
    Favorites::from_entries(entries)
}
