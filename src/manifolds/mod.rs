pub mod collection;
pub mod euclidean;
pub mod point2;
pub mod pose2;

pub use point2::Point2;
pub use pose2::{Pose2, Pose2Tangent};
