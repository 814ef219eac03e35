//! Tag schema and per-dialect search keys
//!
//! A [`TagSchema`] fixes which fields are extracted and in what column
//! order. A [`DialectKeyMap`] says which literal string identifies each
//! field's line in one dialect. Both are plain values handed to the
//! extractor, so several schemas can be used side by side.

pub mod tags;
pub mod transfer_syntax;

use crate::error::{Result, TagcatError};
use crate::types::{Dialect, Field};
use indexmap::IndexMap;

pub use transfer_syntax::{normalize_transfer_syntax, transfer_syntax_name};

/// Ordered list of fields extracted into every record
///
/// The first field is always [`Field::Filename`] and no field repeats.
///
/// # Example
///
/// ```
/// use tagcat_core::{Field, TagSchema};
///
/// let schema = TagSchema::new(vec![Field::Filename, Field::Modality]).unwrap();
/// assert_eq!(schema.headers(), vec!["filename", "modality"]);
///
/// assert!(TagSchema::new(vec![Field::Modality]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSchema {
    fields: Vec<Field>,
}

impl TagSchema {
    /// Creates a schema from an ordered field list
    ///
    /// # Errors
    ///
    /// Returns [`TagcatError::InvalidSchema`] if the list does not start
    /// with `filename` or names a field twice.
    pub fn new(fields: Vec<Field>) -> Result<Self> {
        if fields.first() != Some(&Field::Filename) {
            return Err(TagcatError::InvalidSchema(
                "first field must be filename".to_string(),
            ));
        }
        for (idx, field) in fields.iter().enumerate() {
            if fields[..idx].contains(field) {
                return Err(TagcatError::InvalidSchema(format!(
                    "field {} listed more than once",
                    field
                )));
            }
        }
        Ok(Self { fields })
    }

    /// Fields in column order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Fields resolved by line search (everything but `filename`)
    pub fn searchable(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.iter().copied().filter(Field::is_searchable)
    }

    /// Column header names
    pub fn headers(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name().to_string()).collect()
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false: a schema holds at least `filename`
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for TagSchema {
    fn default() -> Self {
        Self {
            fields: Field::ALL.to_vec(),
        }
    }
}

/// Mapping from field to the literal key that finds its line in one dialect
///
/// The key set covers exactly the schema's searchable fields, kept in
/// schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectKeyMap {
    dialect: Dialect,
    keys: IndexMap<Field, String>,
}

impl DialectKeyMap {
    /// Derives the key map for a dialect from each field's DICOM tag
    ///
    /// # Errors
    ///
    /// Returns [`TagcatError::InvalidSchema`] for [`Dialect::Unknown`].
    pub fn for_dialect(schema: &TagSchema, dialect: Dialect) -> Result<Self> {
        if dialect.is_unknown() {
            return Err(TagcatError::InvalidSchema(format!(
                "no search keys for {} dialect",
                dialect
            )));
        }
        Ok(Self::from_tags(schema, dialect))
    }

    /// Tag-derived keys; every searchable field has a tag with a FUJI and DCMTK rendering
    pub(crate) fn from_tags(schema: &TagSchema, dialect: Dialect) -> Self {
        let keys = schema
            .searchable()
            .filter_map(|field| {
                let key = tags::search_key(dialect, field.tag()?)?;
                Some((field, key))
            })
            .collect();
        Self { dialect, keys }
    }

    /// Builds a key map from explicit (field, key) pairs
    ///
    /// Pairs may come in any order; the map is stored in schema order.
    ///
    /// # Errors
    ///
    /// Returns [`TagcatError::InvalidSchema`] if a pair names `filename`
    /// or a field outside the schema, if a key is empty, or if a
    /// searchable schema field has no key.
    pub fn new<I, S>(schema: &TagSchema, dialect: Dialect, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Field, S)>,
        S: Into<String>,
    {
        let mut given: IndexMap<Field, String> = IndexMap::new();
        for (field, key) in pairs {
            let key = key.into();
            if !field.is_searchable() || !schema.fields().contains(&field) {
                return Err(TagcatError::InvalidSchema(format!(
                    "field {} cannot have a search key",
                    field
                )));
            }
            if key.is_empty() {
                return Err(TagcatError::InvalidSchema(format!(
                    "empty search key for field {}",
                    field
                )));
            }
            given.insert(field, key);
        }

        let mut keys = IndexMap::new();
        for field in schema.searchable() {
            let key = given.swap_remove(&field).ok_or_else(|| {
                TagcatError::InvalidSchema(format!("missing search key for field {}", field))
            })?;
            keys.insert(field, key);
        }
        Ok(Self { dialect, keys })
    }

    /// Dialect these keys belong to
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Search key for a field
    pub fn key(&self, field: Field) -> Option<&str> {
        self.keys.get(&field).map(String::as_str)
    }

    /// All search keys in schema order
    pub fn keys(&self) -> Vec<&str> {
        self.keys.values().map(String::as_str).collect()
    }

    /// (field, key) pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.keys.iter().map(|(field, key)| (*field, key.as_str()))
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the map has no keys
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
