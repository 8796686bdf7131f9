//! Ordered, name-keyed list of annotation parameters.
//!
//! [`ParameterValueList`] preserves the order in which parameters were declared in the class
//! file and adds lookup by parameter name on top of ordinary positional access. It comes in two
//! modes that share every read operation:
//!
//! - **Mutable** - built by [`ParameterValueList::new`], [`ParameterValueList::with_capacity`]
//!   or from an existing sequence. Positional writes behave like a `Vec`, except that
//!   out-of-range indices return [`Error::IndexOutOfBounds`] instead of panicking.
//! - **Immutable empty** - the single process-wide instance returned by
//!   [`ParameterValueList::empty_list`]. Every write returns [`Error::InvalidOperation`]
//!   and leaves the list untouched.
//!
//! # Name Lookup
//!
//! Parameter names are normally unique within one annotation. If duplicates are present,
//! [`ParameterValueList::get`] and everything built on it return the FIRST entry with the
//! name, in insertion order.
//!
//! # Thread Safety
//!
//! The list holds no interior mutability, so a shared reference can be read from any number
//! of threads. The empty instance goes further: its iterators are built over a fresh empty
//! slice on every call and never touch the list's own storage, so iteration, parallel
//! iteration and sorting from unrelated threads cannot interfere with one another.
//!
//! # Examples
//!
//! ```rust
//! use classmeta::metadata::annotations::{AnnotationParameter, ParameterValue, ParameterValueList};
//!
//! let mut list = ParameterValueList::with_capacity(2);
//! list.push(AnnotationParameter::new("value", ParameterValue::from("main")))?;
//! list.push(AnnotationParameter::new("order", ParameterValue::from("first")))?;
//!
//! assert_eq!(list.get_value("value"), Some(&ParameterValue::from("main")));
//! assert!(list.get_value("missing").is_none());
//!
//! assert!(ParameterValueList::empty_list().clone().push(list[0].clone()).is_err());
//! # Ok::<(), classmeta::Error>(())
//! ```

use std::{
    collections::{HashMap, HashSet},
    ops::Index,
};

use rayon::prelude::*;

use crate::{
    metadata::{
        annotations::{AnnotationParameter, ParameterValue},
        classinfo::ClassDescriptor,
        config::NormalizationConfig,
    },
    Error, Result,
};

const IMMUTABLE: &str = "list is immutable";

static EMPTY_LIST: ParameterValueList = ParameterValueList {
    entries: Vec::new(),
    immutable: true,
};

/// An ordered list of [`AnnotationParameter`]s with lookup by name
#[derive(Debug, Clone, Default)]
pub struct ParameterValueList {
    entries: Vec<AnnotationParameter>,
    immutable: bool,
}

impl ParameterValueList {
    /// Create a new mutable, empty list
    #[must_use]
    pub fn new() -> Self {
        ParameterValueList {
            entries: Vec::new(),
            immutable: false,
        }
    }

    /// Create a new mutable, empty list with room for `size_hint` parameters
    #[must_use]
    pub fn with_capacity(size_hint: usize) -> Self {
        ParameterValueList {
            entries: Vec::with_capacity(size_hint),
            immutable: false,
        }
    }

    /// The shared immutable empty list
    ///
    /// Returned wherever "no parameters" has to be represented. Absent and not-yet-computed
    /// parameter sets are both represented by this instance.
    #[must_use]
    pub fn empty_list() -> &'static ParameterValueList {
        &EMPTY_LIST
    }

    /// Returns true for the immutable empty list and its clones
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.immutable {
            Err(Error::InvalidOperation(IMMUTABLE))
        } else {
            Ok(())
        }
    }

    // ---------------------------------------------------------------------------------------
    // Read access
    // ---------------------------------------------------------------------------------------

    /// The parameters as a slice, in insertion order
    #[must_use]
    pub fn as_slice(&self) -> &[AnnotationParameter] {
        if self.immutable {
            &[]
        } else {
            &self.entries
        }
    }

    /// Number of parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns true if there are no parameters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Iterate over the parameters in insertion order
    ///
    /// The iterator is double-ended and knows its exact length, so it doubles as a
    /// positional cursor.
    pub fn iter(&self) -> std::slice::Iter<'_, AnnotationParameter> {
        self.as_slice().iter()
    }

    /// Iterate over the parameters in parallel
    pub fn par_iter(&self) -> rayon::slice::Iter<'_, AnnotationParameter> {
        self.as_slice().par_iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, AnnotationParameter> {
        self.entries.iter_mut()
    }

    /// The parameter at `index`
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&AnnotationParameter> {
        self.as_slice().get(index)
    }

    /// The first parameter named `name`, or `None`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AnnotationParameter> {
        self.iter().find(|entry| entry.name() == name)
    }

    /// The value of the first parameter named `name`, or `None`
    ///
    /// The value may be any of the [`ParameterValue`] variants: a string, a boxed primitive,
    /// a 1-dimensional primitive array (after normalization), an object array whose elements
    /// are again of these kinds, an enum constant, a class reference or a nested annotation.
    #[must_use]
    pub fn get_value(&self, name: &str) -> Option<&ParameterValue> {
        self.get(name).map(AnnotationParameter::value)
    }

    /// Returns true if a parameter named `name` exists
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The parameter names, in insertion order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(AnnotationParameter::name).collect()
    }

    /// Index the parameters by name; for duplicate names the first entry wins
    #[must_use]
    pub fn as_map(&self) -> HashMap<&str, &AnnotationParameter> {
        let mut map = HashMap::with_capacity(self.len());
        for entry in self.iter() {
            map.entry(entry.name()).or_insert(entry);
        }
        map
    }

    /// Collect the parameters matching `predicate` into a new mutable list
    #[must_use]
    pub fn filter<F>(&self, predicate: F) -> ParameterValueList
    where
        F: Fn(&AnnotationParameter) -> bool,
    {
        self.iter().filter(|entry| predicate(*entry)).cloned().collect()
    }

    // ---------------------------------------------------------------------------------------
    // Positional writes
    // ---------------------------------------------------------------------------------------

    /// Append a parameter
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] on the immutable list.
    pub fn push(&mut self, entry: AnnotationParameter) -> Result<()> {
        self.ensure_mutable()?;
        self.entries.push(entry);
        Ok(())
    }

    /// Insert a parameter at `index`, shifting later parameters back
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] on the immutable list, or
    /// [`Error::IndexOutOfBounds`] if `index > len`.
    pub fn insert(&mut self, index: usize, entry: AnnotationParameter) -> Result<()> {
        self.ensure_mutable()?;
        if index > self.entries.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.entries.len(),
            });
        }
        self.entries.insert(index, entry);
        Ok(())
    }

    /// Remove and return the parameter at `index`
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] on the immutable list, or
    /// [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<AnnotationParameter> {
        self.ensure_mutable()?;
        if index >= self.entries.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Remove the first parameter equal to `entry`, returning whether one was found
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] on the immutable list.
    pub fn remove_item(&mut self, entry: &AnnotationParameter) -> Result<bool> {
        self.ensure_mutable()?;
        match self.entries.iter().position(|existing| existing == entry) {
            Some(index) => {
                self.entries.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace the parameter at `index`, returning the previous one
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] on the immutable list, or
    /// [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn set(&mut self, index: usize, entry: AnnotationParameter) -> Result<AnnotationParameter> {
        self.ensure_mutable()?;
        match self.entries.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, entry)),
            None => Err(Error::IndexOutOfBounds {
                index,
                len: self.entries.len(),
            }),
        }
    }

    // ---------------------------------------------------------------------------------------
    // Bulk writes
    // ---------------------------------------------------------------------------------------

    /// Append all parameters from `entries`, keeping their order
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] on the immutable list.
    pub fn append_all<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = AnnotationParameter>,
    {
        self.ensure_mutable()?;
        self.entries.extend(entries);
        Ok(())
    }

    /// Insert all parameters from `entries` at `index`, keeping their order
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] on the immutable list, or
    /// [`Error::IndexOutOfBounds`] if `index > len`.
    pub fn insert_all<I>(&mut self, index: usize, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = AnnotationParameter>,
    {
        self.ensure_mutable()?;
        if index > self.entries.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.entries.len(),
            });
        }
        self.entries.splice(index..index, entries);
        Ok(())
    }

    /// Remove every parameter equal to one of `entries`, returning whether any was removed
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] on the immutable list.
    pub fn remove_all(&mut self, entries: &[AnnotationParameter]) -> Result<bool> {
        self.ensure_mutable()?;
        let before = self.entries.len();
        self.entries.retain(|existing| !entries.contains(existing));
        Ok(self.entries.len() != before)
    }

    /// Keep only the parameters matching `predicate`, returning whether any was removed
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] on the immutable list.
    pub fn retain<F>(&mut self, predicate: F) -> Result<bool>
    where
        F: FnMut(&AnnotationParameter) -> bool,
    {
        self.ensure_mutable()?;
        let before = self.entries.len();
        self.entries.retain(predicate);
        Ok(self.entries.len() != before)
    }

    /// Remove all parameters
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] on the immutable list.
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_mutable()?;
        self.entries.clear();
        Ok(())
    }

    /// Stable sort by parameter name
    ///
    /// Sorting the immutable empty list is allowed and leaves it untouched, since there is
    /// nothing to reorder.
    pub fn sort_by_name(&mut self) {
        if self.immutable {
            return;
        }
        self.entries.sort_by(|a, b| a.name().cmp(b.name()));
    }

    // ---------------------------------------------------------------------------------------
    // Traversal
    // ---------------------------------------------------------------------------------------

    /// Add the names of every class referenced by any parameter value, recursively
    ///
    /// Names already present in `referenced_class_names` are kept; nothing is removed.
    /// Termination relies on the value graph being finite, which holds for anything read
    /// from a class file.
    pub fn find_referenced_class_names(&self, referenced_class_names: &mut HashSet<String>) {
        for entry in self.iter() {
            entry.find_referenced_class_names(referenced_class_names);
        }
    }

    /// Rewrite boxed object arrays into primitive arrays for every parameter that
    /// `annotation_class` declares as a 1-dimensional primitive array
    ///
    /// Parameters are visited in order; the first failure stops the pass and is returned
    /// unchanged, leaving earlier parameters converted.
    ///
    /// # Errors
    /// Propagates the per-parameter errors of
    /// [`AnnotationParameter::convert_wrapper_arrays_with`].
    pub fn convert_wrapper_arrays_to_primitive_arrays(
        &mut self,
        annotation_class: &ClassDescriptor,
    ) -> Result<()> {
        self.convert_wrapper_arrays_with(annotation_class, &NormalizationConfig::default())
    }

    /// Array normalization with explicit configuration
    ///
    /// # Errors
    /// Propagates the per-parameter errors of
    /// [`AnnotationParameter::convert_wrapper_arrays_with`].
    pub fn convert_wrapper_arrays_with(
        &mut self,
        annotation_class: &ClassDescriptor,
        config: &NormalizationConfig,
    ) -> Result<()> {
        for entry in &mut self.entries {
            entry.convert_wrapper_arrays_with(annotation_class, config)?;
        }
        Ok(())
    }
}

impl PartialEq for ParameterValueList {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Index<usize> for ParameterValueList {
    type Output = AnnotationParameter;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl From<Vec<AnnotationParameter>> for ParameterValueList {
    fn from(entries: Vec<AnnotationParameter>) -> Self {
        ParameterValueList {
            entries,
            immutable: false,
        }
    }
}

impl FromIterator<AnnotationParameter> for ParameterValueList {
    fn from_iter<I: IntoIterator<Item = AnnotationParameter>>(iter: I) -> Self {
        ParameterValueList::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a ParameterValueList {
    type Item = &'a AnnotationParameter;
    type IntoIter = std::slice::Iter<'a, AnnotationParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ParameterValueList {
    type Item = AnnotationParameter;
    type IntoIter = std::vec::IntoIter<AnnotationParameter>;

    fn into_iter(self) -> Self::IntoIter {
        if self.immutable {
            Vec::new().into_iter()
        } else {
            self.entries.into_iter()
        }
    }
}
