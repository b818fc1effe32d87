use std::cell::Cell;
use std::rc::Rc;

use fltk::{
    app::{self, Sender},
    draw::{self, LineStyle},
    enums::{Color, Event, Key},
    prelude::*,
    widget::Widget,
};

use crate::app::messages::PanelMessage;
use crate::app::visibility::Visibility;

pub const TOGGLE_SIZE: i32 = 52;

const ARROW_HALF: i32 = 8;

/// Accessible name of the toggle for the given panel state.
pub fn accessible_label(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Closed => "Open article parameters form",
        Visibility::Open => "Close article parameters form",
    }
}

/// Round arrow button that opens and closes the panel.
///
/// It keeps no panel state of its own: the controller pushes the current
/// visibility in through `set_visibility` and the widget only draws it.
#[derive(Clone)]
pub struct ToggleButton {
    pub widget: Widget,
    state: Rc<ToggleState>,
}

#[derive(Default)]
struct ToggleState {
    shown: Cell<Visibility>,
    focused: Cell<bool>,
}

impl ToggleButton {
    pub fn new(x: i32, y: i32, sender: Sender<PanelMessage>) -> Self {
        let state = Rc::new(ToggleState::default());
        let mut widget = Widget::new(x, y, TOGGLE_SIZE, TOGGLE_SIZE, None);
        widget.set_visible_focus();
        widget.set_tooltip(accessible_label(Visibility::Closed));

        let draw_state = state.clone();
        widget.draw(move |wid| draw_toggle(wid, &draw_state));

        let handle_state = state.clone();
        widget.handle(move |wid, event| handle_toggle(wid, event, &handle_state, sender));

        Self { widget, state }
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.state.shown.set(visibility);
        self.widget.set_tooltip(accessible_label(visibility));
        self.widget.redraw();
    }
}

fn draw_toggle(wid: &Widget, state: &ToggleState) {
    let (x, y, w, h) = (wid.x(), wid.y(), wid.w(), wid.h());
    let visibility = state.shown.get();

    let fill = if visibility.is_open() {
        Color::from_rgb(0, 0, 0)
    } else {
        Color::from_rgb(255, 255, 255)
    };
    draw::set_draw_color(Color::from_rgb(0, 0, 0));
    draw::draw_pie(x, y, w, h, 0.0, 360.0);
    draw::set_draw_color(fill);
    draw::draw_pie(x + 2, y + 2, w - 4, h - 4, 0.0, 360.0);

    // Chevron points right while closed, left while open
    let cx = x + w / 2;
    let cy = y + h / 2;
    let dir = if visibility.is_open() { -1 } else { 1 };
    let stroke = if visibility.is_open() {
        Color::from_rgb(255, 255, 255)
    } else {
        Color::from_rgb(0, 0, 0)
    };
    draw::set_draw_color(stroke);
    draw::set_line_style(LineStyle::Solid, 3);
    draw::draw_line(cx - dir * ARROW_HALF / 2, cy - ARROW_HALF, cx + dir * ARROW_HALF / 2, cy);
    draw::draw_line(cx + dir * ARROW_HALF / 2, cy, cx - dir * ARROW_HALF / 2, cy + ARROW_HALF);
    draw::set_line_style(LineStyle::Solid, 0);

    if state.focused.get() {
        draw::set_draw_color(Color::from_rgb(95, 52, 196));
        draw::draw_rect(x, y, w, h);
    }
}

fn handle_toggle(
    wid: &mut Widget,
    event: Event,
    state: &ToggleState,
    sender: Sender<PanelMessage>,
) -> bool {
    match event {
        // Claim the press so the release comes back here
        Event::Push => {
            let _ = wid.take_focus();
            true
        }
        Event::Released => {
            if app::event_inside_widget(&*wid) {
                sender.send(PanelMessage::ToggleActivated);
            }
            true
        }
        Event::KeyDown => {
            let key = app::event_key();
            if key == Key::Enter || key == Key::KPEnter || key == Key::from_char(' ') {
                sender.send(PanelMessage::ToggleActivated);
                true
            } else {
                false
            }
        }
        Event::Focus | Event::Unfocus => {
            state.focused.set(event == Event::Focus);
            wid.redraw();
            true
        }
        _ => false,
    }
}
