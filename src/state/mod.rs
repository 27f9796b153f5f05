mod gesture_state;

pub use gesture_state::GestureState;
