//! XML documents exchanged with the HEN server: the saved topology and the
//! inventory lookup replies.

pub mod read;
pub mod reply;
mod write;

pub use read::{LoadedTopology, read_topology};
pub use reply::{ProfileReply, ReportedInterface, parse_node_list, parse_profile_reply};
pub use write::write_topology;
