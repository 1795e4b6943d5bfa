//! Widget trait: the rendering seam between the container, its content and
//! the banner.
//!
//! A widget knows its type name and how to render itself into strips within a
//! given region. Host applications implement it for whatever the container
//! wraps.

use std::any::Any;

use crate::geometry::Region;
use crate::render::strip::Strip;

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by everything the container can render.
///
/// Object-safe: the container stores its content as `Box<dyn Widget>`.
pub trait Widget {
    /// Type name, used in logs and debug output.
    fn widget_type(&self) -> &str;

    /// Render this widget's content into strips within the given region.
    ///
    /// Strips are painted in order; a later strip covers earlier cells.
    fn render(&self, region: Region) -> Vec<Strip>;

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;
}

// ===========================================================================
// Tests
// ===========================================================================
