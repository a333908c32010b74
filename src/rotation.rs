///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Imports
///
///////////////////////////////////////////////////////////////////////////////////////////////////
use druid::widget::Controller;
use druid::{
    Command, Cursor, Data, Env, Event, EventCtx, LifeCycle, LifeCycleCtx, MouseButton, Point,
    Selector, Widget,
};

use crate::config::ConfigKey;
use crate::wheel::WheelDataAccess;
use crate::WheelState;

//////////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Command Selectors
///
/////////////////////////////////////////////////////////////////////////////////////////////////////
/// Notification sent to ancestors whenever the wheel publishes its rotation.
pub const ROTATE: Selector<RotateEvent> = Selector::new("druid-wheel-widget.rotate");
/// `(angle, publish)`: set the rotation programmatically.
pub const SET_ROTATION: Selector<(f64, bool)> = Selector::new("druid-wheel-widget.set-rotation");
/// `(key, value)`: set (`Some`) or remove (`None`) a configuration attribute.
pub const SET_ATTRIBUTE: Selector<(ConfigKey, Option<String>)> =
    Selector::new("druid-wheel-widget.set-attribute");

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// RotateEvent
///
///////////////////////////////////////////////////////////////////////////////////////////////////
/// The settled rotation, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Data)]
pub struct RotateEvent {
    pub angle: f64,
}

impl RotateEvent {
    pub fn new(angle: f64) -> Self {
        Self { angle }
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// RotationData
///
///////////////////////////////////////////////////////////////////////////////////////////////////
pub trait RotationData {
    fn get_rotation(&self) -> f64;
    /// Snaps, clamps and applies `angle`; returns an event only when `publish` is set.
    fn set_rotation(&mut self, angle: f64, publish: bool) -> Option<RotateEvent>;
    /// Adds `delta` to the rotation, then snaps and clamps it.
    ///
    /// Returns `None` and leaves the rotation alone when the settled value
    /// equals the current one.
    fn apply_rotation_delta(&mut self, delta: f64) -> Option<RotateEvent>;
    /// Called when the pointer is released.
    fn release(&mut self) -> Option<RotateEvent>;
}

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Pointer geometry
///
///////////////////////////////////////////////////////////////////////////////////////////////////
/// Angle of `pointer` around `center` in degrees, in `[-180, 180]`.
///
/// Screen coordinates grow downwards, so positive angles turn clockwise.
pub fn polar_angle(pointer: Point, center: Point) -> f64 {
    let offset = pointer - center;
    offset.y.atan2(offset.x).to_degrees()
}

/// Unwraps a delta across the ±180° seam.
///
/// Assumes the pointer never travels more than half a turn between two events.
pub fn normalize_delta(delta: f64) -> f64 {
    if delta > 180.0 {
        delta - 360.0
    } else if delta < -180.0 {
        delta + 360.0
    } else {
        delta
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// DragSession
///
///////////////////////////////////////////////////////////////////////////////////////////////////
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    state: WheelState,
    start_angle: f64,
}

impl Default for DragSession {
    fn default() -> Self {
        Self {
            state: WheelState::Idle,
            start_angle: 0.0,
        }
    }
}

impl DragSession {
    pub fn state(&self) -> WheelState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == WheelState::Dragging
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn start(&mut self, angle: f64) {
        self.state = WheelState::Dragging;
        self.start_angle = angle;
    }

    /// Feeds the pointer angle of a move event into `data`.
    ///
    /// The start angle only advances when the rotation actually changed, so
    /// motion smaller than one step accumulates across events.
    pub fn drag<T: RotationData>(&mut self, angle: f64, data: &mut T) -> Option<RotateEvent> {
        if !self.is_dragging() {
            return None;
        }

        let delta = normalize_delta(angle - self.start_angle);
        log::trace!("Wheel drag delta {:.2} at {:.2}", delta, angle);

        let event = data.apply_rotation_delta(delta)?;
        self.start_angle = angle;
        Some(event)
    }

    /// Ends the drag. Safe to call while idle.
    pub fn end<T: RotationData>(&mut self, data: &mut T) -> Option<RotateEvent> {
        self.state = WheelState::Idle;
        data.release()
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// RotationController
///
///////////////////////////////////////////////////////////////////////////////////////////////////
/// Turns left-button drags around the child's center into rotation updates.
#[derive(Default)]
pub struct RotationController {
    session: DragSession,
}

/// What [`RotationController::apply_command`] did with a command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandOutcome {
    /// Not a wheel command.
    Ignored,
    /// Applied, with the event to publish if any.
    Applied(Option<RotateEvent>),
}

impl RotationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// Starts a drag at `angle`. Only the left button drags.
    pub fn press(&mut self, button: MouseButton, angle: f64) -> bool {
        if !button.is_left() {
            return false;
        }
        self.session.start(angle);
        log::debug!("Wheel drag started at {:.2}", angle);
        true
    }

    /// Ends the drag on a left-button release; other buttons leave it running.
    pub fn release<T: RotationData>(&mut self, button: MouseButton, data: &mut T) -> Option<RotateEvent> {
        if !button.is_left() {
            return None;
        }
        if self.session.is_dragging() {
            log::debug!("Wheel drag ended at {}", data.get_rotation());
        }
        self.session.end(data)
    }

    /// Applies [`SET_ROTATION`] and [`SET_ATTRIBUTE`] to `data`.
    pub fn apply_command<T: WheelDataAccess>(cmd: &Command, data: &mut T) -> CommandOutcome {
        if let Some((angle, publish)) = cmd.get(SET_ROTATION) {
            CommandOutcome::Applied(data.set_rotation(*angle, *publish))
        } else if let Some((key, value)) = cmd.get(SET_ATTRIBUTE) {
            data.apply_attribute(*key, value.as_deref());
            CommandOutcome::Applied(None)
        } else {
            CommandOutcome::Ignored
        }
    }

    fn publish(ctx: &mut EventCtx, event: Option<RotateEvent>) {
        if let Some(event) = event {
            log::debug!("Wheel rotated to {}", event.angle);
            ctx.submit_notification(ROTATE.with(event));
        }
    }
}

impl<T: Data + WheelDataAccess, W: Widget<T>> Controller<T, W> for RotationController {
    fn event(&mut self, child: &mut W, ctx: &mut EventCtx, event: &Event, data: &mut T, env: &Env) {
        let center = ctx.size().to_rect().center();

        match event {
            Event::MouseDown(mouse_event) => {
                let angle = polar_angle(mouse_event.pos, center);
                if self.press(mouse_event.button, angle) {
                    // Keep receiving moves and the release once the pointer leaves us
                    ctx.set_active(true);
                    ctx.set_handled();
                }
            }
            Event::MouseMove(mouse_event) => {
                ctx.set_cursor(&Cursor::OpenHand);
                if self.session.is_dragging() {
                    ctx.set_handled();
                    let angle = polar_angle(mouse_event.pos, center);
                    let rotated = self.session.drag(angle, data);
                    if rotated.is_some() {
                        ctx.request_paint();
                    }
                    Self::publish(ctx, rotated);
                }
            }
            Event::MouseUp(mouse_event) => {
                if mouse_event.button.is_left() {
                    ctx.set_active(false);
                }
                let released = self.release(mouse_event.button, data);
                if released.is_some() {
                    ctx.request_paint();
                }
                Self::publish(ctx, released);
            }
            Event::Command(cmd) => {
                if let CommandOutcome::Applied(rotated) = Self::apply_command(cmd, data) {
                    ctx.request_paint();
                    ctx.set_handled();
                    Self::publish(ctx, rotated);
                }
            }
            _ => {}
        }

        child.event(ctx, event, data, env);
    }

    fn lifecycle(&mut self, child: &mut W, ctx: &mut LifeCycleCtx, event: &LifeCycle, data: &T, env: &Env) {
        if let LifeCycle::WidgetAdded = event {
            self.session = DragSession::default();
            log::debug!("Wheel {:?} mounted at {}", ctx.widget_id(), data.get_rotation());
        }

        child.lifecycle(ctx, event, data, env);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::WheelData;
    use druid::Target;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn polar_angle_follows_screen_axes() {
        let center = Point::new(100.0, 100.0);
        assert_close(polar_angle(Point::new(150.0, 100.0), center), 0.0);
        assert_close(polar_angle(Point::new(100.0, 150.0), center), 90.0);
        assert_close(polar_angle(Point::new(50.0, 100.0), center), 180.0);
        assert_close(polar_angle(Point::new(100.0, 50.0), center), -90.0);
    }

    #[test]
    fn normalize_delta_unwraps_the_seam() {
        assert_eq!(normalize_delta(-358.0), 2.0);
        assert_eq!(normalize_delta(358.0), -2.0);
        assert_eq!(normalize_delta(180.0), 180.0);
        assert_eq!(normalize_delta(-45.0), -45.0);
    }

    #[test]
    fn moves_while_idle_are_ignored() {
        let mut data = WheelData::new();
        let mut session = DragSession::default();
        assert_eq!(session.drag(45.0, &mut data), None);
        assert_eq!(data.rotation(), 0.0);
        assert_eq!(session.state(), WheelState::Idle);
    }

    #[test]
    fn drag_rotates_by_the_pointer_delta() {
        let mut data = WheelData::new();
        let mut session = DragSession::default();

        session.start(10.0);
        assert!(session.is_dragging());
        assert_eq!(session.drag(40.0, &mut data), Some(RotateEvent::new(30.0)));
        assert_eq!(session.start_angle(), 40.0);
        assert_eq!(session.drag(20.0, &mut data), Some(RotateEvent::new(10.0)));
        assert_eq!(data.rotation(), 10.0);
    }

    #[test]
    fn crossing_the_seam_is_a_small_step() {
        let mut data = WheelData::new();
        let mut session = DragSession::default();

        session.start(179.0);
        assert_eq!(session.drag(-179.0, &mut data), Some(RotateEvent::new(2.0)));

        session.start(-179.0);
        assert_eq!(session.drag(179.0, &mut data), Some(RotateEvent::new(0.0)));
    }

    #[test]
    fn sub_step_motion_accumulates() {
        let mut data = WheelData::from_attributes([("step", "45")]);
        let mut session = DragSession::default();

        session.start(0.0);
        assert_eq!(session.drag(10.0, &mut data), None);
        assert_eq!(session.start_angle(), 0.0);
        assert_eq!(session.drag(20.0, &mut data), None);
        assert_eq!(session.start_angle(), 0.0);
        assert_eq!(session.drag(30.0, &mut data), Some(RotateEvent::new(45.0)));
        assert_eq!(session.start_angle(), 30.0);
    }

    #[test]
    fn drag_stops_at_bounds_without_events() {
        let mut data = WheelData::from_attributes([("min", "-90"), ("max", "90")]);
        let mut session = DragSession::default();

        session.start(0.0);
        assert_eq!(session.drag(120.0, &mut data), Some(RotateEvent::new(90.0)));
        assert_eq!(session.drag(150.0, &mut data), None);
        assert_eq!(session.start_angle(), 120.0);
        assert_eq!(data.rotation(), 90.0);
    }

    #[test]
    fn end_returns_to_default_when_enabled() {
        let mut data = WheelData::from_attributes([("default", "15"), ("return-to-default", "")]);
        let mut session = DragSession::default();

        session.start(0.0);
        session.drag(60.0, &mut data);
        assert_eq!(data.rotation(), 75.0);

        assert_eq!(session.end(&mut data), Some(RotateEvent::new(15.0)));
        assert!(!session.is_dragging());
        assert_eq!(data.rotation(), 15.0);
    }

    #[test]
    fn end_is_idempotent() {
        let mut data = WheelData::new();
        let mut session = DragSession::default();
        assert_eq!(session.end(&mut data), None);
        assert_eq!(session.end(&mut data), None);
        assert_eq!(session.state(), WheelState::Idle);
    }

    #[test]
    fn end_while_idle_still_returns_to_default() {
        let mut data = WheelData::from_attributes([("return-to-default", "")]);
        data.set_rotation(30.0, false);
        let mut session = DragSession::default();
        assert_eq!(session.end(&mut data), Some(RotateEvent::new(0.0)));
    }

    #[test]
    fn only_the_left_button_drags() {
        let mut data = WheelData::new();
        let mut controller = RotationController::new();

        assert!(!controller.press(MouseButton::Right, 10.0));
        assert!(!controller.session().is_dragging());

        assert!(controller.press(MouseButton::Left, 10.0));
        assert!(controller.session().is_dragging());
        assert_eq!(controller.session().start_angle(), 10.0);

        // a second button pressed mid-drag keeps the original start angle
        assert!(!controller.press(MouseButton::Right, 90.0));
        assert_eq!(controller.session().start_angle(), 10.0);
        assert_eq!(data.rotation(), 0.0);
    }

    #[test]
    fn other_buttons_do_not_end_a_drag() {
        let mut data = WheelData::from_attributes([("default", "15"), ("return-to-default", "")]);
        let mut controller = RotationController::new();

        controller.press(MouseButton::Left, 0.0);
        controller.session.drag(30.0, &mut data);
        assert_eq!(data.rotation(), 45.0);

        assert_eq!(controller.release(MouseButton::Right, &mut data), None);
        assert!(controller.session().is_dragging());
        assert_eq!(data.rotation(), 45.0);

        assert_eq!(
            controller.release(MouseButton::Left, &mut data),
            Some(RotateEvent::new(15.0))
        );
        assert!(!controller.session().is_dragging());
    }

    #[test]
    fn set_rotation_command_respects_publish() {
        let mut data = WheelData::from_attributes([("step", "45")]);

        let silent = Command::new(SET_ROTATION, (47.0, false), Target::Global);
        assert_eq!(
            RotationController::apply_command(&silent, &mut data),
            CommandOutcome::Applied(None)
        );
        assert_eq!(data.rotation(), 45.0);

        let loud = Command::new(SET_ROTATION, (-100.0, true), Target::Global);
        assert_eq!(
            RotationController::apply_command(&loud, &mut data),
            CommandOutcome::Applied(Some(RotateEvent::new(-90.0)))
        );
    }

    #[test]
    fn set_attribute_command_can_remove() {
        let mut data = WheelData::from_attributes([("max", "30"), ("default", "20")]);

        let remove = Command::new(SET_ATTRIBUTE, (ConfigKey::Max, None), Target::Global);
        assert_eq!(
            RotationController::apply_command(&remove, &mut data),
            CommandOutcome::Applied(None)
        );
        assert!(!data.has_attribute(ConfigKey::Max));
        assert_eq!(data.max(), f64::INFINITY);

        let set = Command::new(SET_ATTRIBUTE, (ConfigKey::Max, Some("10".to_string())), Target::Global);
        RotationController::apply_command(&set, &mut data);
        assert_eq!(data.attribute(ConfigKey::Max), Some("10"));
        assert_eq!(data.rotation(), 10.0);
    }

    #[test]
    fn unrelated_commands_are_ignored() {
        const OTHER: Selector<()> = Selector::new("druid-wheel-widget.test-other");
        let mut data = WheelData::new();
        let cmd = Command::new(OTHER, (), Target::Global);
        assert_eq!(RotationController::apply_command(&cmd, &mut data), CommandOutcome::Ignored);
        assert_eq!(data, WheelData::new());
    }
}
