//! The assembled domain geometry.
//!
//! [`Geometry`] ties together the parsed box, the resolved face labels, the
//! process layout, and the element registry into the domain description one
//! process owns: global bounds, the local sub-box, per-face labels with
//! interface overrides applied, and the ordered fluid/solid elements.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use itertools::Itertools;

use crate::decompose::{AxisBounds, local_bounds};
use crate::domain_error::GeometryError;
use crate::element::{Element, ElementRegistry};
use crate::label::{FaceLabel, initial_labels, override_interfaces, periodicity};
use crate::spec::{DomainSpec, parse_box};
use crate::topology::{CartTopology, Topology};

/// Decomposed domain description owned by one process.
///
/// Immutable after construction except for [`Geometry::add_element`].
#[derive(Debug, Clone)]
pub struct Geometry {
    dim: usize,
    global_bounds: Vec<AxisBounds>,
    local_bounds: Vec<AxisBounds>,
    box_labels: Vec<FaceLabel>,
    periods: Vec<bool>,
    elements: ElementRegistry,
}

impl Geometry {
    /// Build the geometry for this process.
    ///
    /// The sequencing is load-bearing: periodicity is derived from the
    /// labels *before* the topology is consulted, and the interface
    /// override runs *after* the local bounds are fixed. Every failure is
    /// fatal; no partially constructed geometry escapes.
    pub fn new<T: Topology>(spec: &DomainSpec, topology: &T) -> Result<Self, GeometryError> {
        let (dim, global_bounds) = parse_box(&spec.box_spec)?;
        let mut box_labels = initial_labels(dim, spec.box_spec.label.as_ref())?;
        let periods = periodicity(&box_labels);

        let cart = topology.cart(dim, &periods)?;
        let local_bounds = local_bounds(&global_bounds, cart.split(), cart.coords());

        let neighbors: Vec<(bool, bool)> = (0..dim).map(|axis| cart.neighbors(axis)).collect();
        override_interfaces(&mut box_labels, &neighbors);

        log::debug!(
            "geometry: split {:?}, coords {:?}, face labels {:?}",
            cart.split(),
            cart.coords(),
            box_labels.iter().map(|label| label.to_raw()).collect::<Vec<_>>(),
        );
        log::debug!("geometry: local bounds {:?}", local_bounds);

        let mut elements = ElementRegistry::new();
        for element in &spec.elements {
            elements.push(Arc::clone(element));
        }

        Ok(Self {
            dim,
            global_bounds,
            local_bounds,
            box_labels,
            periods,
            elements,
        })
    }

    /// Spatial dimension, 1 to 3.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Bounds of the whole box, before decomposition.
    pub fn global_bounds(&self) -> &[AxisBounds] {
        &self.global_bounds
    }

    /// Bounds of the sub-box owned by this process.
    pub fn local_bounds(&self) -> &[AxisBounds] {
        &self.local_bounds
    }

    /// Per-face labels, ordered axis 0 low, axis 0 high, axis 1 low, ...
    pub fn box_labels(&self) -> &[FaceLabel] {
        &self.box_labels
    }

    /// Face labels in the bare-integer form boundary-condition setups use.
    pub fn raw_box_labels(&self) -> Vec<i32> {
        self.box_labels.iter().map(|label| label.to_raw()).collect()
    }

    /// Per-axis periodicity of the unsplit box.
    pub fn periods(&self) -> &[bool] {
        &self.periods
    }

    /// Elements in composition order.
    pub fn elements(&self) -> &ElementRegistry {
        &self.elements
    }

    /// Add a fluid or solid element over the current geometry.
    ///
    /// Appended elements land at the end of the registry, so they win over
    /// everything already there where regions overlap.
    pub fn add_element(&mut self, element: Arc<dyn Element>) {
        self.elements.push(element);
    }

    /// Every label a boundary condition may have to cover: the union of all
    /// face labels (sentinels included as-is) and all element labels.
    pub fn labels(&self) -> BTreeSet<i32> {
        self.elements
            .labels_union(self.box_labels.iter().map(|label| label.to_raw()))
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Geometry")?;
        writeln!(f, "\tspatial dimension: {}", self.dim)?;
        writeln!(f, "\tglobal bounds: {}", self.global_bounds.iter().format(" x "))?;
        writeln!(f, "\tlocal bounds: {}", self.local_bounds.iter().format(" x "))?;
        writeln!(f, "\tface labels: [{}]", self.box_labels.iter().format(", "))?;
        if !self.elements.is_empty() {
            writeln!(f, "\telements:")?;
            for (index, element) in self.elements.iter().enumerate() {
                writeln!(f, "\t\t{index}: {}", element.describe())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::stub::Marker;
    use crate::spec::BoxSpec;
    use crate::topology::SerialTopology;

    #[test]
    fn serial_construction_keeps_global_bounds() {
        let spec = DomainSpec::new(BoxSpec::rectangle([0.0, 2.0], [0.0, 1.0]).with_label(1));
        let geom = Geometry::new(&spec, &SerialTopology).unwrap();
        assert_eq!(geom.dim(), 2);
        assert_eq!(geom.local_bounds(), geom.global_bounds());
        assert_eq!(geom.raw_box_labels(), vec![1, 1, 1, 1]);
        assert_eq!(geom.periods(), [false, false]);
    }

    #[test]
    fn elements_are_adopted_in_declaration_order() {
        let spec = DomainSpec::new(BoxSpec::segment([0.0, 1.0]).with_label(0))
            .with_element(Marker::solid(&[3]))
            .with_element(Marker::fluid(&[4]));
        let mut geom = Geometry::new(&spec, &SerialTopology).unwrap();
        assert_eq!(geom.elements().len(), 2);
        geom.add_element(Marker::solid(&[5]));
        let flags: Vec<bool> = geom.elements().iter().map(|e| e.is_fluid()).collect();
        assert_eq!(flags, [false, true, false]);
        assert_eq!(geom.labels().into_iter().collect::<Vec<_>>(), [0, 3, 4, 5]);
    }

    #[test]
    fn display_reports_dimension_bounds_and_elements() {
        let spec = DomainSpec::new(BoxSpec::segment([0.0, 1.0]).with_label(0))
            .with_element(Marker::solid(&[3]));
        let geom = Geometry::new(&spec, &SerialTopology).unwrap();
        let report = geom.to_string();
        assert!(report.contains("spatial dimension: 1"));
        assert!(report.contains("[0, 1]"));
        assert!(report.contains("marker(fluid=false"));
    }

    #[test]
    fn specification_failures_abort_construction() {
        let err = Geometry::new(&DomainSpec::default(), &SerialTopology).unwrap_err();
        assert!(matches!(err, GeometryError::Specification(_)));
    }
}
