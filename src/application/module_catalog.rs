//! Module collection merged across semester queries
//!
//! The same module (same `num`) is listed once per semester it was taken
//! in. The catalog keeps one record per number and accumulates the semester
//! labels in the order they were seen.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::domain::Module;

#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    modules: Vec<Module>,
    by_num: HashMap<String, usize>,
}

impl ModuleCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a module observed under one or more semesters.
    ///
    /// Unknown numbers are appended. Known numbers only gain the new
    /// semester labels; the first record's other fields are kept.
    pub fn merge(&mut self, module: Module) {
        match self.by_num.get(&module.num) {
            Some(&index) => {
                let existing = &mut self.modules[index];
                for semester in &module.semesters {
                    existing.add_semester(semester);
                }
            }
            None => {
                self.by_num.insert(module.num.clone(), self.modules.len());
                self.modules.push(module);
            }
        }
    }

    #[must_use]
    pub fn get(&self, num: &str) -> Option<&Module> {
        self.by_num.get(num).map(|&index| &self.modules[index])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Module> {
        self.modules.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Module] {
        &self.modules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Extend<Module> for ModuleCatalog {
    fn extend<T: IntoIterator<Item = Module>>(&mut self, iter: T) {
        for module in iter {
            self.merge(module);
        }
    }
}

impl FromIterator<Module> for ModuleCatalog {
    fn from_iter<T: IntoIterator<Item = Module>>(iter: T) -> Self {
        let mut catalog = Self::new();
        catalog.extend(iter);
        catalog
    }
}

impl<'a> IntoIterator for &'a ModuleCatalog {
    type Item = &'a Module;
    type IntoIter = std::slice::Iter<'a, Module>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}

// Serialized as the plain module list; the index is derived state.
impl Serialize for ModuleCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.modules.serialize(serializer)
    }
}
