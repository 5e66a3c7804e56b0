//! Fresh-name generation for expanded code.
//!
//! Decorator templates introduce bindings into function bodies they did
//! not write. Binding names are drawn from here so they can never
//! collide with user symbols: every generated name carries the
//! `__gar__` marker, and the marker is rejected wherever it appears in
//! hand-written source.
//!
//! # Example
//!
//! ```
//! use garland_language::NameGenerator;
//!
//! let mut names = NameGenerator::with_seed(7);
//! let a = names.fresh("state");
//! let b = names.fresh("state");
//! assert_ne!(a, b);
//! assert!(NameGenerator::is_generated(&a));
//! ```

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Marker embedded in every generated name.
pub const GENERATED_MARKER: &str = "__gar__";

/// Generator for unique symbol names.
///
/// Each generator carries its own counter and a salt, so independent
/// expansions never need to coordinate through shared state. The salt
/// keeps names from two expansions of the same module distinct; pass a
/// seed to make the whole sequence reproducible.
#[derive(Clone, Debug)]
pub struct NameGenerator {
    /// Salt distinguishing this generator's names from other runs.
    salt: u32,
    /// Number of names handed out so far.
    counter: u64,
}

impl NameGenerator {
    /// Creates a generator with a salt drawn from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            salt: rand::random::<u32>(),
            counter: 0,
        }
    }

    /// Creates a generator whose output is fully determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self {
            salt: rng.next_u32(),
            counter: 0,
        }
    }

    /// Returns this generator's salt.
    #[must_use]
    pub const fn salt(&self) -> u32 {
        self.salt
    }

    /// Generates a unique name based on the given base.
    ///
    /// The generated name has the form `{base}__gar__{salt}_{n}`.
    #[must_use]
    pub fn fresh(&mut self, base: &str) -> String {
        let n = self.counter;
        self.counter += 1;
        let salt = self.salt;
        format!("{base}{GENERATED_MARKER}{salt:08x}_{n}")
    }

    /// Expands a fresh-name pattern (e.g. `x#`) to a unique name.
    ///
    /// If the name ends with `#`, replaces it with a unique suffix.
    /// Otherwise returns the name unchanged.
    #[must_use]
    pub fn expand_pattern(&mut self, name: &str) -> String {
        if let Some(base) = name.strip_suffix('#') {
            self.fresh(base)
        } else {
            name.to_string()
        }
    }

    /// Checks if a name is a fresh-name pattern (ends with `#`).
    #[must_use]
    pub fn is_pattern(name: &str) -> bool {
        name.ends_with('#')
    }

    /// Checks if a name was produced by a generator.
    #[must_use]
    pub fn is_generated(name: &str) -> bool {
        name.contains(GENERATED_MARKER)
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
