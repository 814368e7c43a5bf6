//! The style root — where the theme becomes visible.
//!
//! [`StyleRoot`] is the slice of a rendering surface the synchronizer
//! touches: inline custom properties (`--color-primary-900: #0A0E27`), class
//! markers (`dark` / `light`), and attribute observers that queue a record
//! for every change, like a DOM `MutationObserver` on the root element.
//!
//! [`Document`] is the in-memory implementation. A binding to a real page
//! implements the same trait.

use std::collections::{BTreeMap, BTreeSet};

use bitflags::bitflags;
use p_color::ColorToken;
use p_theme::ColorLookup;

// ---------------------------------------------------------------------------
// Observation types
// ---------------------------------------------------------------------------

bitflags! {
    /// Which root attributes an observer cares about.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct AttributeFilter: u8 {
        /// The inline `style` attribute (custom properties).
        const STYLE = 0b0000_0001;
        /// The `class` attribute (mode markers).
        const CLASS = 0b0000_0010;
    }
}

/// Handle for a registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

/// One queued change to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRecord {
    /// A custom property was set or removed. `old_value` is `None` when
    /// the property did not exist before.
    Style { property: String, old_value: Option<String> },
    /// A class marker was added (`added == true`) or removed.
    Class { class: String, added: bool },
}

impl MutationRecord {
    /// The attribute this record belongs to.
    #[must_use]
    pub const fn attribute(&self) -> AttributeFilter {
        match self {
            Self::Style { .. } => AttributeFilter::STYLE,
            Self::Class { .. } => AttributeFilter::CLASS,
        }
    }
}

// ---------------------------------------------------------------------------
// StyleRoot
// ---------------------------------------------------------------------------

/// The mutable surface the synchronizer projects onto.
pub trait StyleRoot {
    /// Set a custom property. Setting the current value is a no-op and
    /// queues no record.
    fn set_property(&mut self, name: &str, value: &str);

    /// Remove a custom property if present.
    fn remove_property(&mut self, name: &str);

    /// The current value of a custom property.
    fn property(&self, name: &str) -> Option<String>;

    fn add_class(&mut self, class: &str);

    fn remove_class(&mut self, class: &str);

    fn has_class(&self, class: &str) -> bool;

    /// Start queueing records for attributes in `filter`.
    fn observe(&mut self, filter: AttributeFilter) -> ObserverId;

    /// Stop an observer and drop its queue. Unknown ids are ignored.
    fn disconnect(&mut self, id: ObserverId);

    /// Drain the records queued for `id`.
    fn take_records(&mut self, id: ObserverId) -> Vec<MutationRecord>;
}

/// Read custom properties off a style root as palette colors.
///
/// Validation goes through this rather than the in-memory palette, so it
/// sees what the root actually carries, including outside overrides.
#[derive(Debug, Clone, Copy)]
pub struct Computed<'a, R: ?Sized>(pub &'a R);

impl<R: StyleRoot + ?Sized> ColorLookup for Computed<'_, R> {
    fn property(&self, name: &str) -> Option<ColorToken> {
        self.0.property(name).map(ColorToken::new)
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Observer {
    filter: AttributeFilter,
    queue: Vec<MutationRecord>,
}

/// In-memory style root.
#[derive(Debug, Clone, Default)]
pub struct Document {
    properties: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    observers: BTreeMap<ObserverId, Observer>,
    next_observer: u64,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All custom properties, sorted by name.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// All class markers, sorted.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Number of live observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn record(&mut self, record: &MutationRecord) {
        let attribute = record.attribute();
        for observer in self.observers.values_mut() {
            if observer.filter.intersects(attribute) {
                observer.queue.push(record.clone());
            }
        }
    }
}

impl StyleRoot for Document {
    fn set_property(&mut self, name: &str, value: &str) {
        let old_value = self.properties.insert(name.to_owned(), value.to_owned());
        if old_value.as_deref() != Some(value) {
            self.record(&MutationRecord::Style { property: name.to_owned(), old_value });
        }
    }

    fn remove_property(&mut self, name: &str) {
        if let Some(old) = self.properties.remove(name) {
            self.record(&MutationRecord::Style { property: name.to_owned(), old_value: Some(old) });
        }
    }

    fn property(&self, name: &str) -> Option<String> {
        self.properties.get(name).cloned()
    }

    fn add_class(&mut self, class: &str) {
        if self.classes.insert(class.to_owned()) {
            self.record(&MutationRecord::Class { class: class.to_owned(), added: true });
        }
    }

    fn remove_class(&mut self, class: &str) {
        if self.classes.remove(class) {
            self.record(&MutationRecord::Class { class: class.to_owned(), added: false });
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    fn observe(&mut self, filter: AttributeFilter) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.insert(id, Observer { filter, queue: Vec::new() });
        id
    }

    fn disconnect(&mut self, id: ObserverId) {
        self.observers.remove(&id);
    }

    fn take_records(&mut self, id: ObserverId) -> Vec<MutationRecord> {
        self.observers.get_mut(&id).map(|o| std::mem::take(&mut o.queue)).unwrap_or_default()
    }
}
