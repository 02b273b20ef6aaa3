//! Geometric elements and their ordered registry.
//!
//! The core needs exactly three capabilities from an element: its
//! fluid/solid flag, its boundary labels, and a rendering hook. Shape
//! classes (circles, spheres, polygons, ...) implement [`Element`]; their
//! containment math lives with them, never here.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Callback surface a renderer implements to draw elements.
///
/// The geometry core never invokes this itself; an external viewer iterates
/// the registry and hands each element its sink.
pub trait RenderSink {
    /// Draw a region outline; `fluid` selects fluid or solid styling.
    fn region(&mut self, outline: &[[f64; 3]], fluid: bool);
    /// Place a marker for `label` at `position`.
    fn label(&mut self, position: [f64; 3], label: i32);
}

/// Capability interface for a geometric element added to the box.
///
/// Elements re-classify the region they enclose as fluid or solid; later
/// elements win over earlier ones where they overlap.
pub trait Element: fmt::Debug + Send + Sync {
    /// `true` when the enclosed region is fluid, `false` when solid.
    fn is_fluid(&self) -> bool;
    /// Boundary labels carried by the element's surface.
    fn labels(&self) -> &[i32];
    /// Draw the element through a renderer's sink.
    fn render(&self, sink: &mut dyn RenderSink);
    /// One-line description for diagnostic reports.
    fn describe(&self) -> String;
}

/// Ordered, append-only collection of elements.
///
/// There is no removal: carving a hole out of a fluid region is expressed
/// by appending a solid element over it, so composition order is the whole
/// story.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    elems: Vec<Arc<dyn Element>>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element.
    pub fn push(&mut self, element: Arc<dyn Element>) {
        self.elems.push(element);
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// Elements in composition order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<dyn Element>> {
        self.elems.iter()
    }

    /// Union of `base` and every element's labels, ascending.
    pub fn labels_union(&self, base: impl IntoIterator<Item = i32>) -> BTreeSet<i32> {
        let mut labels: BTreeSet<i32> = base.into_iter().collect();
        for element in &self.elems {
            labels.extend(element.labels().iter().copied());
        }
        labels
    }
}

impl<'a> IntoIterator for &'a ElementRegistry {
    type Item = &'a Arc<dyn Element>;
    type IntoIter = std::slice::Iter<'a, Arc<dyn Element>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elems.iter()
    }
}


#[cfg(test)]
mod tests {
    use super::stub::Marker;
    use super::*;

    #[test]
    fn registry_preserves_order() {
        let mut registry = ElementRegistry::new();
        registry.push(Marker::fluid(&[1]));
        registry.push(Marker::solid(&[2]));
        assert_eq!(registry.len(), 2);
        let flags: Vec<bool> = registry.iter().map(|e| e.is_fluid()).collect();
        assert_eq!(flags, [true, false]);
    }

    #[test]
    fn labels_union_merges_faces_and_elements() {
        let mut registry = ElementRegistry::new();
        registry.push(Marker::solid(&[5, 3]));
        registry.push(Marker::fluid(&[3, 9]));
        let union = registry.labels_union([-2, 0]);
        assert_eq!(union.into_iter().collect::<Vec<_>>(), [-2, 0, 3, 5, 9]);
    }
}
