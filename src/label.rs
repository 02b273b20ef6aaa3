//! Face labels and the inter-process interface override.
//!
//! Boundary-condition setups consume bare integers in which two values are
//! reserved: `-1` marks an unset face (a matching pair makes the axis
//! periodic) and `-2` marks a face adjoining another process's sub-domain.
//! Internally the sentinels are a tagged enum; the raw form only appears at
//! the consumer surface.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain_error::SpecificationError;
use crate::spec::LabelSpec;

/// Raw sentinel for an unset / periodic-candidate face.
pub const PERIODIC_RAW: i32 = -1;
/// Raw sentinel for a process-to-process interface face.
pub const INTERFACE_RAW: i32 = -2;

/// Label carried by one face of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceLabel {
    /// Physical boundary; the value selects a boundary condition downstream.
    Physical(i32),
    /// Unset face. When both faces of an axis are unset the axis wraps on
    /// itself.
    Periodic,
    /// The face adjoins another process's sub-domain, not a physical edge.
    Interface,
}

impl FaceLabel {
    /// Decode the bare-integer form.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            PERIODIC_RAW => FaceLabel::Periodic,
            INTERFACE_RAW => FaceLabel::Interface,
            value => FaceLabel::Physical(value),
        }
    }

    /// Serialize back to the bare-integer form.
    pub const fn to_raw(self) -> i32 {
        match self {
            FaceLabel::Physical(value) => value,
            FaceLabel::Periodic => PERIODIC_RAW,
            FaceLabel::Interface => INTERFACE_RAW,
        }
    }
}

impl fmt::Display for FaceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_raw())
    }
}

/// Resolve the initial per-face labels of a `dim`-dimensional box.
///
/// A single integer broadcasts to all `2*dim` faces; a list must carry
/// exactly one value per face; no label at all leaves every face unset.
pub fn initial_labels(
    dim: usize,
    spec: Option<&LabelSpec>,
) -> Result<Vec<FaceLabel>, SpecificationError> {
    let faces = 2 * dim;
    match spec {
        None => Ok(vec![FaceLabel::Periodic; faces]),
        Some(LabelSpec::Uniform(value)) => Ok(vec![FaceLabel::from_raw(*value); faces]),
        Some(LabelSpec::PerFace(values)) => {
            if values.len() != faces {
                return Err(SpecificationError::LabelShape {
                    expected: faces,
                    got: values.len(),
                });
            }
            Ok(values.iter().copied().map(FaceLabel::from_raw).collect())
        }
    }
}

/// Per-axis periodicity of the *unsplit* box: an axis wraps iff both of its
/// faces are unset.
///
/// Periodicity is a property of the physical box, decided once from the
/// pre-override labels, independent of how many processes the box is later
/// split into.
pub fn periodicity(labels: &[FaceLabel]) -> Vec<bool> {
    labels
        .chunks_exact(2)
        .map(|faces| faces[0] == FaceLabel::Periodic && faces[1] == FaceLabel::Periodic)
        .collect()
}

/// Mark every face that adjoins another process as an interface.
///
/// `neighbors[d]` is (negative direction, positive direction). This pass
/// runs strictly after [`periodicity`] has been derived, so a periodic axis
/// split across processes becomes all-interface while an unsplit one keeps
/// its sentinel. Applying the pass twice with the same flags changes
/// nothing.
pub fn override_interfaces(labels: &mut [FaceLabel], neighbors: &[(bool, bool)]) {
    for (axis, &(negative, positive)) in neighbors.iter().enumerate() {
        if negative {
            labels[2 * axis] = FaceLabel::Interface;
        }
        if positive {
            labels[2 * axis + 1] = FaceLabel::Interface;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_roundtrip() {
        for raw in [-3, -2, -1, 0, 1, 42] {
            assert_eq!(FaceLabel::from_raw(raw).to_raw(), raw);
        }
        assert_eq!(FaceLabel::from_raw(-1), FaceLabel::Periodic);
        assert_eq!(FaceLabel::from_raw(-2), FaceLabel::Interface);
    }

    #[test]
    fn uniform_label_broadcasts() {
        let labels = initial_labels(2, Some(&LabelSpec::Uniform(7))).unwrap();
        assert_eq!(labels, vec![FaceLabel::Physical(7); 4]);
    }

    #[test]
    fn absent_label_defaults_to_unset() {
        let labels = initial_labels(3, None).unwrap();
        assert_eq!(labels, vec![FaceLabel::Periodic; 6]);
    }

    #[test]
    fn per_face_label_requires_two_per_axis() {
        let err = initial_labels(2, Some(&LabelSpec::PerFace(vec![1, 2, 3]))).unwrap_err();
        assert_eq!(err, SpecificationError::LabelShape { expected: 4, got: 3 });
        let labels = initial_labels(2, Some(&LabelSpec::PerFace(vec![1, 2, 3, 4]))).unwrap();
        assert_eq!(labels.iter().map(|l| l.to_raw()).collect::<Vec<_>>(), [1, 2, 3, 4]);
    }

    #[test]
    fn periodicity_needs_both_faces_unset() {
        let labels: Vec<_> = [-1, -1, -1, 0].iter().map(|&l| FaceLabel::from_raw(l)).collect();
        assert_eq!(periodicity(&labels), vec![true, false]);
    }

    #[test]
    fn override_is_idempotent() {
        let mut labels: Vec<_> = [1, 1, -1, -1].iter().map(|&l| FaceLabel::from_raw(l)).collect();
        let neighbors = [(false, true), (true, true)];
        override_interfaces(&mut labels, &neighbors);
        let once = labels.clone();
        override_interfaces(&mut labels, &neighbors);
        assert_eq!(labels, once);
        assert_eq!(
            once.iter().map(|l| l.to_raw()).collect::<Vec<_>>(),
            [1, -2, -2, -2]
        );
    }
}
