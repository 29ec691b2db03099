//! Name-to-factory resolution for mechanisms.

use crate::expsyn::ExpSyn;
use crate::hh::Hh;
use crate::mechanism::Mechanism;
use crate::pas::Pas;
use indexmap::IndexMap;
use std::error::Error;
use std::fmt;

/// Builds a mechanism over a CV index set.
pub type MechanismFactory = fn(Vec<u32>) -> Box<dyn Mechanism>;

/// Failure to resolve a mechanism name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogueError {
    /// The name that was not registered.
    pub name: String,
}

impl fmt::Display for CatalogueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mechanism '{}' is not in the catalogue", self.name)
    }
}

impl Error for CatalogueError {}

/// Registry mapping mechanism names to factories.
///
/// The standard catalogue covers the mechanisms the validation suite
/// exercises; callers extend it with [`Catalogue::register`] before handing
/// it to the engine.
///
/// # Examples
///
/// ```
/// use neurite_mech::Catalogue;
///
/// let catalogue = Catalogue::standard();
/// let hh = catalogue.make("hh", vec![0]).unwrap();
/// assert_eq!(hh.name(), "hh");
/// assert!(catalogue.make("kdr", vec![0]).is_err());
/// ```
#[derive(Clone)]
pub struct Catalogue {
    factories: IndexMap<String, MechanismFactory>,
}

impl Catalogue {
    /// An empty catalogue.
    pub fn empty() -> Self {
        Self {
            factories: IndexMap::new(),
        }
    }

    /// The standard catalogue: `hh`, `pas`, `expsyn`.
    pub fn standard() -> Self {
        let mut catalogue = Self::empty();
        catalogue.register("hh", |nodes| Box::new(Hh::new(nodes)));
        catalogue.register("pas", |nodes| Box::new(Pas::new(nodes)));
        catalogue.register("expsyn", |nodes| Box::new(ExpSyn::new(nodes)));
        catalogue
    }

    /// Register (or replace) a factory under `name`.
    pub fn register(&mut self, name: impl Into<String>, factory: MechanismFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Instantiate the named mechanism over the given CV index set.
    pub fn make(&self, name: &str, node_index: Vec<u32>) -> Result<Box<dyn Mechanism>, CatalogueError> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory(node_index)),
            None => Err(CatalogueError { name: name.into() }),
        }
    }

    /// The registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::standard()
    }
}

// Factories are bare fn pointers; show the registered names only.
impl fmt::Debug for Catalogue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalogue")
            .field("names", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
