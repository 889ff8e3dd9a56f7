//! Beam building blocks

mod beam;
mod material;
mod section;

pub use beam::Beam;
pub use material::Material;
pub use section::Section;
