pub mod sphere;

pub use sphere::SphereMesh;
