pub mod gauss_seidel;
pub mod transform;
pub mod vec2;

pub use gauss_seidel::GaussSeidelConfig;
pub use transform::Transform;
pub use vec2::Vec2;
