use crate::types::LocateMode;
use indexmap::IndexMap;
use log::debug;

/// Mapping from search key to the first line containing it
///
/// Keys without a matching line map to the empty string. Built fresh for
/// each dump and dropped once its values are extracted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagIndex<'a> {
    lines: IndexMap<&'a str, &'a str>,
}

impl<'a> TagIndex<'a> {
    /// Creates an index with every key unresolved
    fn with_keys(keys: &[&'a str]) -> Self {
        Self {
            lines: keys.iter().map(|key| (*key, "")).collect(),
        }
    }

    /// Line matched for a key, or `""` when the key was not found
    pub fn line(&self, key: &str) -> &'a str {
        self.lines.get(key).copied().unwrap_or("")
    }

    /// Whether a line was found for the key
    pub fn is_found(&self, key: &str) -> bool {
        !self.line(key).is_empty()
    }

    /// Number of keys with a matching line
    pub fn found_count(&self) -> usize {
        self.lines.values().filter(|line| !line.is_empty()).count()
    }

    /// (key, line) pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.lines.iter().map(|(key, line)| (*key, *line))
    }

    /// Number of keys in the index
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the index holds no keys
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Strategy for locating tag lines in a dump
///
/// Matching is substring containment and the lowest-numbered matching
/// line wins. Implementations differ only in traversal order.
pub trait TagLocator {
    fn locate<'a, S: AsRef<str>>(&self, keys: &[&'a str], lines: &'a [S]) -> TagIndex<'a>;
}

/// Scans the dump once per key and stops at the first match
///
/// Target tags sit near the top of a dump, so most keys resolve after a
/// handful of lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortCircuitLocator;

impl TagLocator for ShortCircuitLocator {
    fn locate<'a, S: AsRef<str>>(&self, keys: &[&'a str], lines: &'a [S]) -> TagIndex<'a> {
        let mut index = TagIndex::with_keys(keys);
        for key in keys {
            if let Some(line_num) = find_tag_line(key, lines) {
                index.lines.insert(*key, lines[line_num].as_ref());
            }
        }
        index
    }
}

/// Walks every line once, testing all keys against each
#[derive(Debug, Clone, Copy, Default)]
pub struct SinglePassLocator;

impl TagLocator for SinglePassLocator {
    fn locate<'a, S: AsRef<str>>(&self, keys: &[&'a str], lines: &'a [S]) -> TagIndex<'a> {
        let mut index = TagIndex::with_keys(keys);
        for line in lines {
            let line = line.as_ref();
            for key in keys {
                if line.contains(key) {
                    if let Some(slot) = index.lines.get_mut(key) {
                        // Later duplicates of a tag are ignored
                        if slot.is_empty() {
                            *slot = line;
                        }
                    }
                }
            }
        }
        index
    }
}

impl LocateMode {
    /// Builds the tag index with this mode's locator
    pub fn locate<'a, S: AsRef<str>>(&self, keys: &[&'a str], lines: &'a [S]) -> TagIndex<'a> {
        let index = match self {
            LocateMode::Optimized => ShortCircuitLocator.locate(keys, lines),
            LocateMode::Exhaustive => SinglePassLocator.locate(keys, lines),
        };
        for (key, line) in index.iter() {
            debug!("{}={}", key, line.trim_end());
        }
        debug!("located {} of {} keys", index.found_count(), index.len());
        index
    }
}

/// Index of the first line containing `key`, or `None`
pub fn find_tag_line<S: AsRef<str>>(key: &str, lines: &[S]) -> Option<usize> {
    lines.iter().position(|line| line.as_ref().contains(key))
}

/// Builds a tag index, optimized (short-circuit) or exhaustive
pub fn locate_tags<'a, S: AsRef<str>>(
    keys: &[&'a str],
    lines: &'a [S],
    optimized: bool,
) -> TagIndex<'a> {
    let mode = if optimized {
        LocateMode::Optimized
    } else {
        LocateMode::Exhaustive
    };
    mode.locate(keys, lines)
}
