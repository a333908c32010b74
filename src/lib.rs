///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Imports
///
///////////////////////////////////////////////////////////////////////////////////////////////////
use druid::{Data, Widget, WidgetExt};

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Modules
///
///////////////////////////////////////////////////////////////////////////////////////////////////
pub mod config;
pub mod painter;
pub mod rotation;
pub mod snapping;
pub mod svg;
pub mod wheel;

pub use config::{ConfigKey, UnknownAttribute, OBSERVED_ATTRIBUTES};
pub use painter::WheelPainter;
pub use rotation::{
    CommandOutcome, DragSession, RotateEvent, RotationController, RotationData, ROTATE,
    SET_ATTRIBUTE, SET_ROTATION,
};
pub use wheel::{WheelData, WheelDataAccess};

///////////////////////////////////////////////////////////////////////////////////////////////////
//
// WheelState
//
///////////////////////////////////////////////////////////////////////////////////////////////////
#[derive(Clone, Copy, PartialEq, Data, Debug)]
pub enum WheelState {
    Idle,
    Dragging,
}

///////////////////////////////////////////////////////////////////////////////////////////////////
//
// Wheel
//
///////////////////////////////////////////////////////////////////////////////////////////////////
/// A draggable wheel bound to [`WheelData`].
///
/// Rotation changes caused by dragging, by releasing with return-to-default
/// enabled, or by a published [`SET_ROTATION`] command are sent upwards as
/// [`ROTATE`] notifications.
pub fn wheel() -> impl Widget<WheelData> {
    WheelPainter::default()
        .wheel::<WheelData>()
        .controller(RotationController::new())
}
