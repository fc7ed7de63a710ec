#![forbid(unsafe_code)]

//! Headless model of the HEN experiment topology editor.
//!
//! A [`Topology`] holds the hosts ("computer" nodes) placed on the canvas,
//! their fixed set of interfaces, and the VLAN edges between interfaces of
//! different hosts. It reads and writes the saved-topology XML document the
//! HEN server stores, and parses the inventory replies used to populate new
//! nodes.
//!
//! ```
//! use hen_topology::{HardwareProfile, InterfaceSlot, NetbootInfo, Topology};
//!
//! let mut topo = Topology::default();
//! let slots = vec![InterfaceSlot::default(); 2];
//! for id in ["computer1", "computer2"] {
//!     topo.create_node(id, &HardwareProfile::default(), NetbootInfo::default(), &slots)?;
//! }
//! let edge = topo.create_edge("vlanA", "computer1", 0, "computer2", 0)?;
//! assert_eq!(edge.id, "vlanA0");
//! # Ok::<(), hen_topology::Error>(())
//! ```

pub mod cidr;
pub mod config;
pub mod element;
pub mod error;
pub mod experiment;
pub mod geom;
pub mod model;
pub mod observer;
pub mod pool;
pub mod profile;
mod topology;
pub mod xml;

pub use cidr::{Cidr, subnet_mask_for_prefix};
pub use config::EditorConfig;
pub use element::{Element, ElementKind, Field};
pub use error::{Error, Result};
pub use experiment::{ExperimentMeta, UserCredentials};
pub use model::{AddressField, Edge, Interface, Node};
pub use observer::{EditorObserver, NoopObserver};
pub use pool::NodePool;
pub use profile::{HardwareProfile, InterfaceSlot, NetbootField, NetbootInfo};
pub use topology::Topology;

#[cfg(test)]
mod tests;
