///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Imports
///
///////////////////////////////////////////////////////////////////////////////////////////////////
use druid::kurbo::{Circle, Line};
use druid::widget::Painter;
use druid::{Affine, Color, Data, Point, RenderContext, Size, Vec2};
use druid_color_thesaurus::{black, gray};

use crate::rotation::RotationData;

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Geometry
///
///////////////////////////////////////////////////////////////////////////////////////////////////
/// Side of the square view box every wheel is drawn in.
pub const VIEW_BOX: f64 = 200.0;
pub const VIEW_BOX_CENTER: Point = Point::new(100.0, 100.0);
pub const RING_RADIUS: f64 = 90.0;
pub const RING_WIDTH: f64 = 10.0;
pub const HUB_RADIUS: f64 = 5.0;
pub const POINTER_TIP: Point = Point::new(100.0, 20.0);
pub const POINTER_WIDTH: f64 = 5.0;

/// Maps the view box onto `size`, scaled uniformly and centered.
pub fn view_box_transform(size: Size) -> Affine {
    let scale = size.width.min(size.height) / VIEW_BOX;
    let offset = Vec2::new(
        (size.width - VIEW_BOX * scale) / 2.0,
        (size.height - VIEW_BOX * scale) / 2.0,
    );
    Affine::translate(offset) * Affine::scale(scale)
}

/// Rotation by `rotation` degrees about the view box center.
pub fn rotation_transform(rotation: f64) -> Affine {
    let center = VIEW_BOX_CENTER.to_vec2();
    Affine::translate(center) * Affine::rotate(rotation.to_radians()) * Affine::translate(-center)
}

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// WheelPainter
///
///////////////////////////////////////////////////////////////////////////////////////////////////
#[derive(Copy, Clone, Debug)]
pub struct WheelPainter {
    ring_color: Color,
    hub_color: Color,
    pointer_color: Color,
}

impl Default for WheelPainter {
    fn default() -> Self {
        Self {
            ring_color: black::ONYX,
            hub_color: gray::DAVYS_GRAY,
            pointer_color: gray::MARENGO,
        }
    }
}

impl WheelPainter {
    pub fn with_ring_color(mut self, color: Color) -> Self {
        self.ring_color = color;
        self
    }

    pub fn with_hub_color(mut self, color: Color) -> Self {
        self.hub_color = color;
        self
    }

    pub fn with_pointer_color(mut self, color: Color) -> Self {
        self.pointer_color = color;
        self
    }

    pub fn wheel<T: Data + RotationData>(&self) -> Painter<T> {
        let painter = *self;

        Painter::new(move |ctx, data: &T, _env| {
            let size = ctx.size();

            ctx.with_save(|ctx| {
                ctx.transform(view_box_transform(size));
                ctx.transform(rotation_transform(data.get_rotation()));

                ctx.stroke(Circle::new(VIEW_BOX_CENTER, RING_RADIUS), &painter.ring_color, RING_WIDTH);
                ctx.fill(Circle::new(VIEW_BOX_CENTER, HUB_RADIUS), &painter.hub_color);
                ctx.stroke(Line::new(POINTER_TIP, VIEW_BOX_CENTER), &painter.pointer_color, POINTER_WIDTH);
            });
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_close(actual: Point, expected: Point) {
        assert!(
            (actual - expected).hypot() < 1e-9,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn view_box_fits_the_short_side() {
        let transform = view_box_transform(Size::new(400.0, 200.0));
        assert_point_close(transform * Point::ORIGIN, Point::new(100.0, 0.0));
        assert_point_close(transform * Point::new(200.0, 200.0), Point::new(300.0, 200.0));

        let transform = view_box_transform(Size::new(100.0, 300.0));
        assert_point_close(transform * VIEW_BOX_CENTER, Point::new(50.0, 150.0));
    }

    #[test]
    fn rotation_turns_the_pointer_clockwise() {
        assert_point_close(rotation_transform(0.0) * POINTER_TIP, POINTER_TIP);
        assert_point_close(rotation_transform(90.0) * POINTER_TIP, Point::new(180.0, 100.0));
        assert_point_close(rotation_transform(-90.0) * POINTER_TIP, Point::new(20.0, 100.0));
        assert_point_close(rotation_transform(45.0) * VIEW_BOX_CENTER, VIEW_BOX_CENTER);
    }
}
