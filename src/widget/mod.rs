//! Widget system: the `Widget` trait.

pub mod traits;

pub use traits::Widget;
