//! FeedbackBanner: the presentational overlay for one feedback.
//!
//! Stateless: it is built from exactly a message and a kind each time the
//! container renders. The banner takes the top row of its region, keeps a
//! one-cell margin on both sides, and centers the message on a green
//! (success) or red (error) background.

use std::any::Any;

use crate::feedback::FeedbackKind;
use crate::geometry::Region;
use crate::render::strip::{CellStyle, Strip};
use crate::widget::traits::Widget;

/// Horizontal margin, in cells, between the banner and its region's edges.
pub const BANNER_MARGIN: i32 = 1;

/// A one-row banner showing a feedback message.
///
/// # Examples
///
/// ```ignore
/// let banner = FeedbackBanner::new("Rating saved", FeedbackKind::Success);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackBanner {
    message: String,
    kind: FeedbackKind,
}

impl FeedbackBanner {
    /// `message` is display text, already resolved from its key.
    pub fn new(message: impl Into<String>, kind: FeedbackKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> FeedbackKind {
        self.kind
    }

    /// Cell style for a banner of the given kind.
    pub fn style_for(kind: FeedbackKind) -> CellStyle {
        let background = match kind {
            FeedbackKind::Success => "green",
            FeedbackKind::Error => "red",
        };
        CellStyle::new().fg("white").bg(background).bold()
    }
}

impl Widget for FeedbackBanner {
    fn widget_type(&self) -> &str {
        "FeedbackBanner"
    }

    fn render(&self, region: Region) -> Vec<Strip> {
        let (row, _) = region.split_horizontal(1);
        // Narrow regions get the full width rather than no banner at all.
        let row = if row.width > 2 * BANNER_MARGIN {
            row.inset_x(BANNER_MARGIN)
        } else {
            row
        };
        if row.is_empty() {
            return Vec::new();
        }

        // Centered; an odd leftover cell goes to the right. Too-long text is
        // cut at the row's width.
        let style = Self::style_for(self.kind);
        let text: String = self.message.chars().take(row.width as usize).collect();
        let pad_left = (row.width - text.chars().count() as i32) / 2;

        let mut strip = Strip::new(row.y, row.x);
        strip.push_str(&" ".repeat(pad_left as usize), style.clone());
        strip.push_str(&text, style.clone());
        strip.fill(row.width, style);
        vec![strip]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
