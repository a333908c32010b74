use druid::widget::{Button, Controller, CrossAxisAlignment, Flex, Label, MainAxisAlignment};
use druid::{
    theme, AppLauncher, Color, Command, Data, Env, Event, EventCtx, Lens, LocalizedString,
    Target, Widget, WidgetExt, WidgetId, WindowDesc,
};

use druid_color_thesaurus::*;

use druid_wheel_widget::{wheel, ConfigKey, WheelData, ROTATE, SET_ATTRIBUTE, SET_ROTATION};

//////////////////////////////////////////////////////////////////////////////////////
// Constants
//////////////////////////////////////////////////////////////////////////////////////
pub const BACKGROUND: Color = black::ONYX;
pub const WHEEL_ID: WidgetId = WidgetId::reserved(1);
pub const WHEEL_SIZE: f64 = 240.0;

//////////////////////////////////////////////////////////////////////////////////////
//
// AppData
//
//////////////////////////////////////////////////////////////////////////////////////

#[derive(Clone, Data, Lens, PartialEq)]
pub struct AppData {
    pub wheel: WheelData,
    pub last_angle: f64,
    pub events: usize,
}

//////////////////////////////////////////////////////////////////////////////////////
//
// RotateListener
//
//////////////////////////////////////////////////////////////////////////////////////
/// Records every rotation the wheel publishes.
struct RotateListener;

impl<W: Widget<AppData>> Controller<AppData, W> for RotateListener {
    fn event(&mut self, child: &mut W, ctx: &mut EventCtx, event: &Event, data: &mut AppData, env: &Env) {
        if let Event::Notification(note) = event {
            if let Some(rotate) = note.get(ROTATE) {
                log::info!("Wheel rotated to {}", rotate.angle);
                data.last_angle = rotate.angle;
                data.events += 1;
                ctx.set_handled();
                return;
            }
        }

        child.event(ctx, event, data, env);
    }
}

//////////////////////////////////////////////////////////////////////////////////////
//
// Main
//
//////////////////////////////////////////////////////////////////////////////////////

fn main() {
    let main_window = WindowDesc::new(make_ui())
        .window_size((420.0, 460.0))
        .title(LocalizedString::new("Steering Wheel"));

    let data = AppData {
        wheel: WheelData::from_attributes([
            ("min", "-90"),
            ("max", "90"),
            ("step", "45"),
            ("default", "0"),
            ("return-to-default", ""),
        ]),
        last_angle: 0.0,
        events: 0,
    };

    AppLauncher::with_window(main_window)
        .configure_env(|env, _| {
            env.set(theme::WINDOW_BACKGROUND_COLOR, gray::GAINSBORO);
            env.set(theme::TEXT_COLOR, white::ALABASTER)
        })
        .log_to_console()
        .launch(data)
        .expect("launch failed");
}

fn make_ui() -> impl Widget<AppData> {
    let wheel = wheel()
        .with_id(WHEEL_ID)
        .fix_size(WHEEL_SIZE, WHEEL_SIZE)
        .lens(AppData::wheel);

    Flex::column()
        .with_flex_child(wheel, 1.0)
        .with_child(make_control_bar())
        .main_axis_alignment(MainAxisAlignment::SpaceAround)
        .cross_axis_alignment(CrossAxisAlignment::Center)
        .controller(RotateListener)
}

fn make_control_bar() -> impl Widget<AppData> {
    Flex::column()
        .with_child(
            Flex::row()
                .with_child(Label::new("Angle: "))
                .with_child(Label::new(|data: &AppData, _: &_| {
                    format!("{:.1} ({} events)", data.last_angle, data.events)
                })),
        )
        .with_child(
            Flex::row()
                .with_child(rotate_button("-90", -90.0))
                .with_child(rotate_button("Centre", 0.0))
                .with_child(rotate_button("+90", 90.0))
                .with_child(Button::new("Return").on_click(|ctx, data: &mut AppData, _env| {
                    let value = if data.wheel.return_to_default() {
                        None
                    } else {
                        Some(String::new())
                    };
                    ctx.submit_command(Command::new(
                        SET_ATTRIBUTE,
                        (ConfigKey::ReturnToDefault, value),
                        Target::Widget(WHEEL_ID),
                    ));
                }))
                .with_child(Label::new(|data: &AppData, _: &_| {
                    if data.wheel.return_to_default() {
                        "on".to_string()
                    } else {
                        "off".to_string()
                    }
                })),
        )
        .cross_axis_alignment(CrossAxisAlignment::Center)
        .padding(5.0)
        .background(BACKGROUND)
}

fn rotate_button(text: &'static str, angle: f64) -> impl Widget<AppData> {
    Button::new(text).on_click(move |ctx, _data: &mut AppData, _env| {
        ctx.submit_command(Command::new(SET_ROTATION, (angle, true), Target::Widget(WHEEL_ID)));
    })
}
