//! Geometric algorithms of the path network: distances, nearest node
//! snapping and attachment of custom locations.

pub mod attachment;
pub mod distance;
pub mod nearest;

pub use attachment::{Attachment, attach, closest_point_on_segment, connect_custom_nodes};
pub use distance::{distance, distance_rounded, planar_distance};
pub use nearest::resolve;
