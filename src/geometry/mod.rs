pub mod hit_testing;
pub mod resize;

pub use hit_testing::{
    classify_box, hit_test, Affordance, BoxZone, HitResult, HitTarget, Placement, ResizeDirection,
};
pub use resize::{resize_rect, ResizeStep};
