pub mod capsule;
pub mod error;
pub mod limits;
pub mod shape;
pub mod surface;

pub use capsule::*;
pub use error::*;
pub use limits::*;
pub use shape::*;
pub use surface::*;
