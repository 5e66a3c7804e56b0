//! The decoration reflection table.
//!
//! Every expanded definition appends a record keyed by the function name
//! and the literal parameter text, listing the applied decorators in
//! annotation order. Records are never merged or deduplicated: two clauses
//! with textually identical parameter vectors yield two records, so the
//! table is an ordered association list rather than a map.
//!
//! The table serializes to MessagePack with named maps; equal tables
//! produce bit-identical bytes, so recompiling the same source against the
//! same registry is detectable as a no-op.

use serde::{Deserialize, Serialize};

use garland_foundation::{Error, ErrorKind, Result};
use garland_language::Ast;

/// Name of the generated zero-argument query function.
///
/// Reserved unconditionally: user code may never define it, whether or not
/// the module decorates anything.
pub const QUERY_FN_NAME: &str = "decorations";

/// Key of one reflection record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationKey {
    /// The decorated function's name.
    pub name: String,
    /// The parameter vector exactly as written in source.
    pub params: String,
}

impl DecorationKey {
    /// Creates a record key.
    #[must_use]
    pub fn new(name: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: params.into(),
        }
    }
}

/// One applied decorator inside a record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationEntry {
    /// The module that declared the decorator.
    pub module: String,
    /// The decorator name.
    pub decorator: String,
    /// Argument source text, one slice per argument.
    pub args: Vec<String>,
}

impl DecorationEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(
        module: impl Into<String>,
        decorator: impl Into<String>,
        args: Vec<String>,
    ) -> Self {
        Self {
            module: module.into(),
            decorator: decorator.into(),
            args,
        }
    }
}

/// Ordered association list of decoration records for one module.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationTable {
    records: Vec<(DecorationKey, Vec<DecorationEntry>)>,
}

impl DecorationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends a record. Existing records with the same key are kept.
    pub fn record(&mut self, key: DecorationKey, entries: Vec<DecorationEntry>) {
        self.records.push((key, entries));
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[(DecorationKey, Vec<DecorationEntry>)] {
        &self.records
    }

    /// Every record matching the key, in insertion order.
    #[must_use]
    pub fn lookup(&self, name: &str, params: &str) -> Vec<&[DecorationEntry]> {
        self.records
            .iter()
            .filter(|(key, _)| key.name == name && key.params == params)
            .map(|(_, entries)| entries.as_slice())
            .collect()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no definition in the module was decorated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serializes the table to MessagePack bytes with named maps.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec_named(self)
            .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
    }

    /// Deserializes a table from MessagePack bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid table.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes)
            .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
    }

    /// Renders the table as an association-vector literal of strings:
    /// `[[[name params] [[module decorator [args...]] ...]] ...]`.
    #[must_use]
    pub fn to_literal(&self) -> Ast {
        let records = self
            .records
            .iter()
            .map(|(key, entries)| {
                let key_vec = Ast::vector(vec![
                    Ast::string(key.name.clone()),
                    Ast::string(key.params.clone()),
                ]);
                let entry_vecs = entries
                    .iter()
                    .map(|entry| {
                        Ast::vector(vec![
                            Ast::string(entry.module.clone()),
                            Ast::string(entry.decorator.clone()),
                            Ast::vector(entry.args.iter().cloned().map(Ast::string).collect()),
                        ])
                    })
                    .collect();
                Ast::vector(vec![key_vec, Ast::vector(entry_vecs)])
            })
            .collect();
        Ast::vector(records)
    }

    /// Builds the generated `decorations` query function: a zero-argument
    /// definition returning the table as a quoted literal.
    #[must_use]
    pub fn query_fn(&self) -> Ast {
        Ast::list(vec![
            Ast::symbol("defn"),
            Ast::symbol(QUERY_FN_NAME),
            Ast::vector(vec![]),
            Ast::quote(self.to_literal()),
        ])
    }
}
