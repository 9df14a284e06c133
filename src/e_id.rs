// src/e_id.rs
use dashmap::DashSet;
use log::debug;
use once_cell::sync::Lazy;
use rand::{distr::Alphanumeric, Rng};

/// Length of the identifiers handed out by [`IdGenerator::generate`].
pub const ID_LEN: usize = 8;

static GLOBAL_IDS: Lazy<IdGenerator> = Lazy::new(IdGenerator::new);

/// Hands out short random identifiers, never the same one twice.
///
/// Every id issued is remembered in an append-only set. `DashSet::insert`
/// tests and inserts in one step, so two threads sharing a generator can never
/// both claim the same id.
///
/// ```
/// use cargo_e_tree::e_id::IdGenerator;
///
/// let ids = IdGenerator::new();
/// let a = ids.generate();
/// let b = ids.generate();
/// assert_ne!(a, b);
/// assert_eq!(ids.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct IdGenerator {
    used: DashSet<String>,
}

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator {
            used: DashSet::new(),
        }
    }

    /// The process-wide generator.
    pub fn global() -> &'static IdGenerator {
        &GLOBAL_IDS
    }

    pub fn generate(&self) -> String {
        loop {
            let candidate: String = rand::rng()
                .sample_iter(&Alphanumeric)
                .take(ID_LEN)
                .map(char::from)
                .collect();
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            debug!("id collision on {}, drawing again", candidate);
        }
    }

    /// Number of ids issued so far.
    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.used.contains(id)
    }
}
