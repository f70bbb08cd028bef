//! Camera module: the viewpoint every frame is rendered from.
//!
//! The renderer owns one camera; the caller moves it between frames.

mod camera;

pub use camera::Camera;
