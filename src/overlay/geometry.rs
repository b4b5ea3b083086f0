//! Placement of floating widgets relative to a target box or the viewport

use crate::dom::Rect;

/// Gap between a widget and the box it is anchored to, in CSS pixels
pub const ANCHOR_GAP: f64 = 5.0;

/// Distance of the toast from the top of the viewport
pub const TOAST_TOP_MARGIN: f64 = 20.0;

/// Maximum CSS stacking order
pub const MAX_Z_INDEX: &str = "2147483647";

/// Where a widget sits
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Just right of the anchor, top edges aligned (trigger button)
    RightOf(Rect),
    /// Below the anchor, left edges aligned (menu, loading indicator)
    Below(Rect),
    /// Centered in the viewport (prompt dialog)
    ViewportCenter,
    /// Horizontally centered at the top of the viewport (toast)
    ViewportTopCenter,
}

/// Computed CSS positioning for a widget
#[derive(Debug, Clone, PartialEq)]
pub struct CssPosition {
    pub position: &'static str,
    pub left: String,
    pub top: String,
    pub transform: Option<&'static str>,
}

impl CssPosition {
    fn absolute(left: f64, top: f64) -> Self {
        Self {
            position: "absolute",
            left: px(left),
            top: px(top),
            transform: None,
        }
    }

    /// Style declarations in application order
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("position", self.position.to_string()),
            ("left", self.left.clone()),
            ("top", self.top.clone()),
        ];
        if let Some(transform) = self.transform {
            out.push(("transform", transform.to_string()));
        }
        out
    }
}

impl Placement {
    /// Calculate CSS position for this placement
    pub fn compute(&self) -> CssPosition {
        match *self {
            Placement::RightOf(anchor) => {
                CssPosition::absolute(anchor.right() + ANCHOR_GAP, anchor.top)
            }
            Placement::Below(anchor) => {
                CssPosition::absolute(anchor.left, anchor.bottom() + ANCHOR_GAP)
            }
            Placement::ViewportCenter => CssPosition {
                position: "fixed",
                left: "50%".to_string(),
                top: "50%".to_string(),
                transform: Some("translate(-50%, -50%)"),
            },
            Placement::ViewportTopCenter => CssPosition {
                position: "fixed",
                left: "50%".to_string(),
                top: px(TOAST_TOP_MARGIN),
                transform: Some("translateX(-50%)"),
            },
        }
    }
}

/// Format a pixel length the way inline styles expect (`"12px"`, `"12.5px"`)
pub fn px(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}px", value as i64)
    } else {
        format!("{}px", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_of_aligns_top() {
        let rect = Rect::new(100.0, 40.0, 200.0, 30.0);
        let pos = Placement::RightOf(rect).compute();

        assert_eq!(pos.position, "absolute");
        assert_eq!(pos.left, "305px");
        assert_eq!(pos.top, "40px");
        assert_eq!(pos.transform, None);
    }

    #[test]
    fn test_below_aligns_left() {
        let rect = Rect::new(100.0, 40.0, 200.0, 30.0);
        let pos = Placement::Below(rect).compute();

        assert_eq!(pos.left, "100px");
        assert_eq!(pos.top, "75px");
    }

    #[test]
    fn test_viewport_center() {
        let pos = Placement::ViewportCenter.compute();
        assert_eq!(pos.position, "fixed");
        assert_eq!(pos.left, "50%");
        assert_eq!(pos.top, "50%");
        assert_eq!(pos.transform, Some("translate(-50%, -50%)"));
    }

    #[test]
    fn test_viewport_top_center() {
        let pos = Placement::ViewportTopCenter.compute();
        assert_eq!(pos.top, "20px");
        assert_eq!(pos.declarations().len(), 4);
    }

    #[test]
    fn test_px_formatting() {
        assert_eq!(px(12.0), "12px");
        assert_eq!(px(12.5), "12.5px");
        assert_eq!(px(-3.0), "-3px");
    }
}
