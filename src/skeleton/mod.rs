pub mod body;
pub mod joint;

pub use body::{ClippedEdges, Skeleton, SkeletonTrackingState};
pub use joint::{Joint, JointTrackingState, JointType, SkeletonPoint};
