//! Snapshot rendering helpers.
//!
//! Turn rendered strips into plain text for snapshot tests and assertions.
//! Strips are painted in order, so a banner rendered after the content
//! appears on top of it.

use crate::geometry::Region;
use crate::render::strip::Strip;
use crate::widget::Widget;

/// Render a widget into a `width` x `height` region at the origin and return
/// its text.
///
/// Each row becomes one line with trailing spaces trimmed. Lines are
/// separated by `'\n'` and the final line has no trailing newline.
///
/// # Examples
///
/// ```ignore
/// let output = render_to_string(&container, 30, 3);
/// assert!(output.contains("Rating saved"));
/// ```
pub fn render_to_string(widget: &dyn Widget, width: i32, height: i32) -> String {
    let strips = widget.render(Region::new(0, 0, width, height));
    strips_to_string(&strips, width, height)
}

/// Same as [`render_to_string`], split into lines.
pub fn render_to_lines(widget: &dyn Widget, width: i32, height: i32) -> Vec<String> {
    render_to_string(widget, width, height)
        .split('\n')
        .map(str::to_owned)
        .collect()
}

/// Paint strips onto a blank `width` x `height` grid and return its text.
///
/// Cells outside the grid are clipped.
pub fn strips_to_string(strips: &[Strip], width: i32, height: i32) -> String {
    if width <= 0 || height <= 0 {
        return String::new();
    }

    let bounds = Region::new(0, 0, width, height);
    let mut grid: Vec<Vec<char>> = vec![vec![' '; width as usize]; height as usize];

    for strip in strips {
        for (i, cell) in strip.cells.iter().enumerate() {
            let x = strip.x_offset + i as i32;
            if bounds.contains(x, strip.y) {
                grid[strip.y as usize][x as usize] = cell.ch;
            }
        }
    }

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::FeedbackKind;
    use crate::render::strip::CellStyle;
    use crate::widgets::FeedbackBanner;

    fn strip(y: i32, x: i32, text: &str) -> Strip {
        let mut s = Strip::new(y, x);
        s.push_str(text, CellStyle::new());
        s
    }

    #[test]
    fn later_strips_paint_over_earlier_ones() {
        let strips = vec![strip(0, 0, "aaaaaa"), strip(0, 2, "bb")];
        assert_eq!(strips_to_string(&strips, 6, 1), "aabbaa");
    }

    #[test]
    fn clips_out_of_bounds_cells() {
        let strips = vec![strip(0, -2, "xxabc"), strip(5, 0, "gone"), strip(1, 3, "long")];
        assert_eq!(strips_to_string(&strips, 4, 2), "abc\n   l");
    }

    #[test]
    fn zero_dimensions_render_empty() {
        assert_eq!(strips_to_string(&[strip(0, 0, "x")], 0, 3), "");
        assert_eq!(strips_to_string(&[strip(0, 0, "x")], 3, 0), "");
    }

    #[test]
    fn render_banner_to_lines() {
        let banner = FeedbackBanner::new("Hi", FeedbackKind::Success);
        let lines = render_to_lines(&banner, 8, 2);
        assert_eq!(lines, vec!["   Hi".to_owned(), String::new()]);
    }
}
