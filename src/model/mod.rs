//! Pure data structures for orders and the shelf temperatures they are stored at.

pub mod error;
pub mod loader;
pub mod order;
pub mod temperature;

pub use error::*;
pub use loader::*;
pub use order::*;
pub use temperature::*;
