pub mod error;
pub mod traits;
pub mod product;

pub use error::{Error, Result};
pub use traits::{dot, norm_squared, Differentiable, VectorSpace};
pub use product::Product;
