// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property keys and values attached to elements.

use alloc::sync::Arc;

use hashbrown::HashMap;

use crate::event::ChangeKind;
use crate::{ElementId, Error, Position, TextTree};

/// An opaque property key.
///
/// Keys compare by name and inheritance, so `inherited("X")` and `local("X")`
/// are distinct properties. An inheriting property resolves through the chain of
/// enclosing elements; a non-inheriting one only looks at the innermost
/// element and then the tree root.
///
/// ```
/// use text_tree::Property;
///
/// const FONT_SIZE: Property = Property::inherited("FontSize");
/// const TAG: Property = Property::local("Tag");
/// assert!(FONT_SIZE.inherits());
/// assert!(!TAG.inherits());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Property {
    name: &'static str,
    inherits: bool,
}

impl Property {
    /// A property that inherits from enclosing elements.
    #[must_use]
    pub const fn inherited(name: &'static str) -> Self {
        Self {
            name,
            inherits: true,
        }
    }

    /// A property that applies to a single element.
    #[must_use]
    pub const fn local(name: &'static str) -> Self {
        Self {
            name,
            inherits: false,
        }
    }

    /// The key name.
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Whether lookups walk up the element chain.
    pub const fn inherits(self) -> bool {
        self.inherits
    }
}

/// A property value.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// A flag.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Number(f64),
    /// A shared string.
    Text(Arc<str>),
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(Arc::from(value))
    }
}

/// Explicit values set on one element or on the tree root.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct PropertyMap {
    values: HashMap<Property, PropertyValue>,
}

impl PropertyMap {
    pub(crate) fn get(&self, property: Property) -> Option<&PropertyValue> {
        self.values.get(&property)
    }

    /// Stores `value`; returns `false` when it was already present.
    pub(crate) fn set(&mut self, property: Property, value: PropertyValue) -> bool {
        if self.values.get(&property) == Some(&value) {
            return false;
        }
        self.values.insert(property, value);
        true
    }

    /// Removes the value; returns `false` when none was set.
    pub(crate) fn clear(&mut self, property: Property) -> bool {
        self.values.remove(&property).is_some()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }
}

impl TextTree {
    /// Sets `property` on the innermost element containing `position`, or on
    /// the root when `position` is at root scope.
    pub fn set_value(
        &mut self,
        position: Position,
        property: Property,
        value: PropertyValue,
    ) -> Result<(), Error> {
        let gap = self.gap(position)?;
        match self.scope_index(gap) {
            Some(index) => self.set_element_value(self.element_handle(index), property, value),
            None => {
                self.set_root_value(property, value);
                Ok(())
            }
        }
    }

    /// Clears `property` on the innermost element containing `position`.
    pub fn clear_value(&mut self, position: Position, property: Property) -> Result<(), Error> {
        let gap = self.gap(position)?;
        match self.scope_index(gap) {
            Some(index) => self.clear_element_value(self.element_handle(index), property),
            None => {
                self.clear_root_value(property);
                Ok(())
            }
        }
    }

    /// Resolves `property` at `position`.
    ///
    /// The nearest explicit value wins, walking from the innermost element
    /// outwards for inheriting properties, then the root values. `None`
    /// means unset; callers supply their own default.
    pub fn get_value(
        &self,
        position: Position,
        property: Property,
    ) -> Result<Option<&PropertyValue>, Error> {
        let gap = self.gap(position)?;
        Ok(self.value_at_gap(gap, property))
    }

    /// Sets `property` on `element`.
    pub fn set_element_value(
        &mut self,
        element: ElementId,
        property: Property,
        value: PropertyValue,
    ) -> Result<(), Error> {
        let data = self.element_data_mut(element)?;
        if data.properties.set(property, value) {
            let start = data.start;
            self.commit(ChangeKind::PropertyChanged(Some(element), property), start, 0, 0);
        }
        Ok(())
    }

    /// Clears `property` on `element`.
    pub fn clear_element_value(&mut self, element: ElementId, property: Property) -> Result<(), Error> {
        let data = self.element_data_mut(element)?;
        if data.properties.clear(property) {
            let start = data.start;
            self.commit(ChangeKind::PropertyChanged(Some(element), property), start, 0, 0);
        }
        Ok(())
    }

    /// The value set directly on `element`, ignoring inheritance.
    pub fn element_value(
        &self,
        element: ElementId,
        property: Property,
    ) -> Result<Option<&PropertyValue>, Error> {
        Ok(self.element_data(element)?.properties.get(property))
    }

    /// Resolves `property` for `element` the way [`get_value`](Self::get_value) does.
    pub fn resolved_element_value(
        &self,
        element: ElementId,
        property: Property,
    ) -> Result<Option<&PropertyValue>, Error> {
        self.element_data(element)?;
        Ok(self.resolve(Some(element.index), property))
    }

    /// Number of explicit values on `element`.
    pub fn element_value_count(&self, element: ElementId) -> Result<usize, Error> {
        Ok(self.element_data(element)?.properties.len())
    }

    /// Sets a root value, the fallback for every element.
    pub fn set_root_value(&mut self, property: Property, value: PropertyValue) {
        if self.root_properties.set(property, value) {
            self.commit(ChangeKind::PropertyChanged(None, property), 0, 0, 0);
        }
    }

    /// Clears a root value.
    pub fn clear_root_value(&mut self, property: Property) {
        if self.root_properties.clear(property) {
            self.commit(ChangeKind::PropertyChanged(None, property), 0, 0, 0);
        }
    }

    /// The root value of `property`.
    pub fn root_value(&self, property: Property) -> Option<&PropertyValue> {
        self.root_properties.get(property)
    }

    pub(crate) fn value_at_gap(&self, gap: usize, property: Property) -> Option<&PropertyValue> {
        self.resolve(self.scope_index(gap), property)
    }

    fn resolve(&self, mut scope: Option<u32>, property: Property) -> Option<&PropertyValue> {
        while let Some(index) = scope {
            let data = self.elements.by_index(index)?;
            if let Some(value) = data.properties.get(property) {
                return Some(value);
            }
            if !property.inherits() {
                break;
            }
            scope = data.parent;
        }
        self.root_properties.get(property)
    }
}
