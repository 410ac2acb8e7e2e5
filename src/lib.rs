pub mod camera;
pub mod compute;
pub mod entities;
pub mod input;
