//! Built-in widgets: FeedbackBanner.

pub mod banner;

pub use banner::{FeedbackBanner, BANNER_MARGIN};
