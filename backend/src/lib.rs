pub mod audio;
pub mod error;
pub mod glutils;
pub mod math;
pub mod mesh;
pub mod shaders;
pub mod system;
pub mod text;

pub use error::BackendError;
