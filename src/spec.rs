//! Box and domain specifications.
//!
//! The input mirrors the mapping lattice solvers are configured with: an
//! `x` interval (required), optional `y` and `z` declared contiguously, an
//! optional face label, and an ordered element list. Fields stay loosely
//! typed so shape problems surface as [`SpecificationError`] values instead
//! of being rejected opaquely by a deserializer.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::decompose::AxisBounds;
use crate::domain_error::SpecificationError;
use crate::element::Element;

/// Face labels of the box: one integer for every face, or one per face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelSpec {
    /// The same label on all `2*dim` faces.
    Uniform(i32),
    /// One label per face, ordered axis 0 low, axis 0 high, axis 1 low, ...
    PerFace(Vec<i32>),
}

impl From<i32> for LabelSpec {
    fn from(value: i32) -> Self {
        LabelSpec::Uniform(value)
    }
}

impl From<Vec<i32>> for LabelSpec {
    fn from(values: Vec<i32>) -> Self {
        LabelSpec::PerFace(values)
    }
}

/// Rectangular box of 1, 2, or 3 axes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    /// Bounds of the first axis. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<f64>>,
    /// Bounds of the second axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<f64>>,
    /// Bounds of the third axis; only meaningful when `y` is declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<Vec<f64>>,
    /// Optional face labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<LabelSpec>,
}

impl BoxSpec {
    /// 1-D box over `x`.
    pub fn segment(x: [f64; 2]) -> Self {
        Self {
            x: Some(x.to_vec()),
            ..Self::default()
        }
    }

    /// 2-D box over `x` and `y`.
    pub fn rectangle(x: [f64; 2], y: [f64; 2]) -> Self {
        Self {
            y: Some(y.to_vec()),
            ..Self::segment(x)
        }
    }

    /// 3-D box over `x`, `y`, and `z`.
    pub fn cuboid(x: [f64; 2], y: [f64; 2], z: [f64; 2]) -> Self {
        Self {
            z: Some(z.to_vec()),
            ..Self::rectangle(x, y)
        }
    }

    /// Attach a label specification.
    pub fn with_label(mut self, label: impl Into<LabelSpec>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Full geometry specification: the box plus any initial elements.
///
/// Elements are runtime trait objects and do not round-trip through serde;
/// a deserialized spec starts with an empty element list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainSpec {
    /// The computed box.
    #[serde(rename = "box")]
    pub box_spec: BoxSpec,
    /// Elements composed over the box, in declaration order.
    #[serde(skip)]
    pub elements: Vec<Arc<dyn Element>>,
}

impl DomainSpec {
    pub fn new(box_spec: BoxSpec) -> Self {
        Self {
            box_spec,
            elements: Vec::new(),
        }
    }

    /// Append an element; list order is the composition order.
    pub fn with_element(mut self, element: Arc<dyn Element>) -> Self {
        self.elements.push(element);
        self
    }
}

/// Extract the spatial dimension and global bounds from a box
/// specification. Pure; no side effects.
pub fn parse_box(spec: &BoxSpec) -> Result<(usize, Vec<AxisBounds>), SpecificationError> {
    let x = spec.x.as_deref().ok_or(SpecificationError::MissingX)?;
    let mut bounds = vec![axis_bounds('x', x)?];
    match (&spec.y, &spec.z) {
        (None, Some(_)) => return Err(SpecificationError::NonContiguousAxes),
        (None, None) => {}
        (Some(y), z) => {
            bounds.push(axis_bounds('y', y)?);
            if let Some(z) = z {
                bounds.push(axis_bounds('z', z)?);
            }
        }
    }
    Ok((bounds.len(), bounds))
}

fn axis_bounds(axis: char, raw: &[f64]) -> Result<AxisBounds, SpecificationError> {
    let &[lo, hi] = raw else {
        return Err(SpecificationError::BoundsArity {
            axis,
            got: raw.len(),
        });
    };
    if !(lo < hi) {
        return Err(SpecificationError::UnorderedBounds { axis, lo, hi });
    }
    Ok(AxisBounds::new(lo, hi))
}
