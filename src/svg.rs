///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Imports
///
///////////////////////////////////////////////////////////////////////////////////////////////////
use crate::config::format_attribute;

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// SVG Rendering
///
///////////////////////////////////////////////////////////////////////////////////////////////////

/// The `transform` attribute of the rotating group.
pub fn transform_attribute(rotation: f64) -> String {
    format!("rotate({} 100 100)", format_attribute(rotation))
}

/// Renders the wheel at `rotation` degrees as an SVG document.
///
/// Uses the same 200x200 view box and geometry as [`WheelPainter`](crate::WheelPainter).
pub fn render_svg(rotation: f64) -> String {
    format!(
        r#"<svg width="100%" height="100%" viewBox="0 0 200 200" style="cursor: grab;" xmlns="http://www.w3.org/2000/svg">
  <g id="wheel-group" transform="{}">
    <circle cx="100" cy="100" r="90" fill="none" stroke="black" stroke-width="10"></circle>
    <circle cx="100" cy="100" r="5" fill="gray"></circle>
    <line x1="100" y1="20" x2="100" y2="100" stroke="grey" stroke-width="5"></line>
  </g>
</svg>
"#,
        transform_attribute(rotation)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_rotates_about_the_center() {
        assert_eq!(transform_attribute(45.0), "rotate(45 100 100)");
        assert_eq!(transform_attribute(-90.0), "rotate(-90 100 100)");
        assert_eq!(transform_attribute(12.5), "rotate(12.5 100 100)");
        assert_eq!(transform_attribute(-0.0), "rotate(0 100 100)");
    }

    #[test]
    fn svg_carries_the_current_rotation() {
        let svg = render_svg(90.0);
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"<g id="wheel-group" transform="rotate(90 100 100)">"#));
        assert_eq!(svg.matches("<circle ").count(), 2);
        assert_eq!(svg.matches("<line ").count(), 1);
    }
}
