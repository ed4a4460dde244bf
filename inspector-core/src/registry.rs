use crate::error::{ConstructionError, ManagerError};
use crate::item::Item;
use std::rc::Rc;

/// Maps a type key and a typed integer to an item name, e.g. `7` to
/// `Cam-07`. Returning `None` leaves the text as typed.
pub type NameGenerator = Rc<dyn Fn(&str, i64) -> Option<String>>;

pub type ItemConstructor = Rc<dyn Fn(&CreationArgs) -> Result<Item, ConstructionError>>;

/// Arguments handed to every item constructor.
#[derive(Clone, Default)]
pub struct CreationArgs {
    pub name: Option<String>,
    pub name_generator: Option<NameGenerator>,
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl CreationArgs {
    pub fn name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(default)
    }
}

impl std::fmt::Debug for CreationArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreationArgs")
            .field("name", &self.name)
            .field("name_generator", &self.name_generator.is_some())
            .field("options", &self.options)
            .finish()
    }
}

#[derive(Clone)]
struct RegistryEntry {
    key: String,
    type_name: String,
    constructor: ItemConstructor,
}

/// Item types the collection can create, in the order they are offered.
#[derive(Clone, Default)]
pub struct ItemRegistry {
    entries: Vec<RegistryEntry>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type offered as `key` and persisted as `type_name`.
    /// Registering an existing key replaces it.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        type_name: impl Into<String>,
        constructor: impl Fn(&CreationArgs) -> Result<Item, ConstructionError> + 'static,
    ) -> &mut Self {
        let entry = RegistryEntry {
            key: key.into(),
            type_name: type_name.into(),
            constructor: Rc::new(constructor),
        };
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => {
                log::warn!("item key '{}' registered twice, replacing", entry.key);
                *existing = entry;
            }
            None => self.entries.push(entry),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn key(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.key.as_str())
    }

    pub fn index_of_key(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    pub fn index_of_type(&self, type_name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.type_name == type_name)
    }

    /// Runs the constructor at `index` and stamps its type name on the item.
    pub fn create(&self, index: usize, args: &CreationArgs) -> Result<Item, ManagerError> {
        let entry = self.entries.get(index).ok_or_else(|| {
            if self.is_empty() {
                ManagerError::NoItemTypes
            } else {
                ManagerError::UnknownKey(format!("#{index}"))
            }
        })?;
        let mut item =
            (entry.constructor)(args).map_err(|source| ManagerError::Construction {
                type_name: entry.type_name.clone(),
                source,
            })?;
        item.set_type_name(&entry.type_name);
        Ok(item)
    }
}

impl std::fmt::Debug for ItemRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (&e.key, &e.type_name)))
            .finish()
    }
}
