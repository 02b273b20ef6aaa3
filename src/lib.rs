//! # lattice-domain
//!
//! lattice-domain describes the computational box of a lattice-based PDE
//! solver: its dimension and bounds, the labels its faces carry for
//! boundary-condition setup, the sub-box owned by each process of a
//! distributed run, and the ordered fluid/solid elements composed over it.
//!
//! ## Subsystems
//! - [`spec`]: typed box/domain specifications, serde-deserializable from
//!   the mapping form solvers are configured with.
//! - [`label`]: face labels with the periodic (`-1`) and interface (`-2`)
//!   sentinels modeled as a tagged enum.
//! - [`topology`]: the Cartesian process-topology contract plus serial,
//!   deterministic block, and (feature `mpi-support`) MPI providers.
//! - [`decompose`]: anchored block decomposition of the global bounds.
//! - [`element`]: the capability interface geometric elements implement,
//!   and their append-only registry.
//! - [`geometry`]: the orchestrator tying the above together.
//!
//! ## Example
//! ```
//! use lattice_domain::prelude::*;
//!
//! let spec = DomainSpec::new(BoxSpec::rectangle([0.0, 2.0], [0.0, 1.0]).with_label(1));
//! let geom = Geometry::new(&spec, &SerialTopology)?;
//! assert_eq!(geom.dim(), 2);
//! assert_eq!(geom.raw_box_labels(), vec![1, 1, 1, 1]);
//! assert_eq!(geom.local_bounds(), geom.global_bounds());
//! # Ok::<(), lattice_domain::domain_error::GeometryError>(())
//! ```
//!
//! ## Distributed runs
//! Construction is a pure function of (spec, topology); the only collective
//! point is [`topology::Topology::cart`]. Every process must observe the
//! same split factors there, or the sub-boxes stop tiling the global box.

pub mod decompose;
pub mod domain_error;
pub mod element;
pub mod geometry;
pub mod label;
pub mod spec;
pub mod topology;

/// The most-used traits & types.
pub mod prelude {
    pub use crate::decompose::AxisBounds;
    pub use crate::domain_error::{GeometryError, SpecificationError, TopologyError};
    pub use crate::element::{Element, ElementRegistry, RenderSink};
    pub use crate::geometry::Geometry;
    pub use crate::label::FaceLabel;
    pub use crate::spec::{BoxSpec, DomainSpec, LabelSpec};
    #[cfg(feature = "mpi-support")]
    pub use crate::topology::MpiTopology;
    pub use crate::topology::{BlockTopology, CartGrid, CartTopology, SerialTopology, Topology};
}
