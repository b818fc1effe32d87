use fltk::{
    app::Sender,
    button::{Button, RadioRoundButton, ReturnButton},
    enums::{Align, Color, Font, FrameType},
    frame::Frame,
    group::Group,
    menu::Choice,
    prelude::*,
};

use crate::app::draft::{FieldKey, RawFieldReport, SettingsDraft};
use crate::app::listeners::Rect;
use crate::app::messages::PanelMessage;
use crate::app::options::OptionCatalog;
use crate::app::visibility::Visibility;

pub const PANEL_WIDTH: i32 = 420;

const PADDING: i32 = 30;
const TITLE_HEIGHT: i32 = 22;
const CONTROL_HEIGHT: i32 = 30;
const FIELD_GAP: i32 = 18;
const RADIO_WIDTH: i32 = 90;
const BUTTON_WIDTH: i32 = 110;
const BUTTON_HEIGHT: i32 = 40;

/// How a field is presented in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Dropdown,
    RadioList,
}

pub fn control_kind(key: FieldKey) -> ControlKind {
    match key {
        FieldKey::FontSize => ControlKind::RadioList,
        _ => ControlKind::Dropdown,
    }
}

/// Escape characters FLTK menus treat as markup.
pub fn menu_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '/' => out.push_str("\\/"),
            '&' => out.push_str("&&"),
            '_' => out.push_str("\\_"),
            '|' => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

enum FieldControl {
    Dropdown(Choice),
    RadioList(Vec<RadioRoundButton>),
}

impl FieldControl {
    fn select(&mut self, index: Option<usize>) {
        match self {
            Self::Dropdown(choice) => {
                choice.set_value(index.map_or(-1, |i| i as i32));
            }
            Self::RadioList(buttons) => {
                for (i, button) in buttons.iter_mut().enumerate() {
                    button.set_value(Some(i) == index);
                }
            }
        }
    }
}

/// The overlay form: one control per field, then Reset and Apply.
pub struct PanelForm {
    pub group: Group,
    fields: Vec<(FieldKey, FieldControl)>,
}

impl PanelForm {
    pub fn new(
        x: i32,
        y: i32,
        h: i32,
        catalog: &OptionCatalog,
        draft: &SettingsDraft,
        sender: &Sender<PanelMessage>,
    ) -> Self {
        let mut group = Group::default().with_pos(x, y).with_size(PANEL_WIDTH, h);
        group.set_frame(FrameType::FlatBox);
        group.set_color(Color::White);

        let inner_x = x + PADDING;
        let inner_w = PANEL_WIDTH - 2 * PADDING;
        let mut cy = y + PADDING;

        let mut heading = Frame::default()
            .with_pos(inner_x, cy)
            .with_size(inner_w, 40)
            .with_label("ARTICLE PARAMETERS");
        heading.set_label_font(Font::HelveticaBold);
        heading.set_label_size(24);
        heading.set_align(Align::Left | Align::Inside);
        cy += 40 + FIELD_GAP;

        let mut fields = Vec::with_capacity(FieldKey::ALL.len());
        for key in FieldKey::ALL {
            // Separator between the text and the page fields
            if key == FieldKey::BackgroundColor {
                let mut separator = Frame::default().with_pos(inner_x, cy).with_size(inner_w, 1);
                separator.set_frame(FrameType::FlatBox);
                separator.set_color(Color::from_rgb(196, 196, 196));
                cy += 1 + FIELD_GAP;
            }

            let mut title = Frame::default()
                .with_pos(inner_x, cy)
                .with_size(inner_w, TITLE_HEIGHT)
                .with_label(&key.title().to_uppercase());
            title.set_label_font(Font::HelveticaBold);
            title.set_label_size(12);
            title.set_align(Align::Left | Align::Inside);
            cy += TITLE_HEIGHT;

            let control = build_control(key, inner_x, cy, inner_w, catalog, sender);
            fields.push((key, control));
            cy += CONTROL_HEIGHT + FIELD_GAP;
        }

        let button_y = y + h - PADDING - BUTTON_HEIGHT;
        let mut reset_btn = Button::default()
            .with_pos(x + PANEL_WIDTH - PADDING - 2 * BUTTON_WIDTH - 10, button_y)
            .with_size(BUTTON_WIDTH, BUTTON_HEIGHT)
            .with_label("Reset");
        reset_btn.set_callback({
            let s = *sender;
            move |_| s.send(PanelMessage::Reset)
        });

        let mut apply_btn = ReturnButton::default()
            .with_pos(x + PANEL_WIDTH - PADDING - BUTTON_WIDTH, button_y)
            .with_size(BUTTON_WIDTH, BUTTON_HEIGHT)
            .with_label("Apply");
        apply_btn.set_color(Color::from_rgb(255, 200, 2));
        apply_btn.set_callback({
            let s = *sender;
            move |_| s.send(PanelMessage::Apply)
        });

        group.end();
        group.hide();

        let mut form = Self { group, fields };
        form.sync_from_draft(draft, catalog);
        form
    }

    /// Show each control's selection from the draft.
    pub fn sync_from_draft(&mut self, draft: &SettingsDraft, catalog: &OptionCatalog) {
        for (key, control) in &mut self.fields {
            control.select(catalog.position(*key, draft.value(*key)));
        }
        self.group.redraw();
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        if visibility.is_open() {
            self.group.show();
        } else {
            self.group.hide();
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.group.x(), self.group.y(), self.group.w(), self.group.h())
    }
}

fn build_control(
    key: FieldKey,
    x: i32,
    y: i32,
    w: i32,
    catalog: &OptionCatalog,
    sender: &Sender<PanelMessage>,
) -> FieldControl {
    let options = catalog.options(key);
    match control_kind(key) {
        ControlKind::Dropdown => {
            let mut choice = Choice::default().with_pos(x, y).with_size(w, CONTROL_HEIGHT);
            for option in options {
                choice.add_choice(&menu_label(option.label()));
            }
            choice.set_callback({
                let s = *sender;
                move |c| s.send(PanelMessage::FieldReported(RawFieldReport::new(key, c.value())))
            });
            FieldControl::Dropdown(choice)
        }
        ControlKind::RadioList => {
            let row = Group::default().with_pos(x, y).with_size(w, CONTROL_HEIGHT);
            let mut buttons = Vec::with_capacity(options.len());
            for (i, option) in options.iter().enumerate() {
                let mut button = RadioRoundButton::default()
                    .with_pos(x + i as i32 * RADIO_WIDTH, y)
                    .with_size(RADIO_WIDTH, CONTROL_HEIGHT)
                    .with_label(option.label());
                let index = i as i32;
                button.set_callback({
                    let s = *sender;
                    move |b| {
                        if b.value() {
                            s.send(PanelMessage::FieldReported(RawFieldReport::new(key, index)));
                        }
                    }
                });
                buttons.push(button);
            }
            row.end();
            FieldControl::RadioList(buttons)
        }
    }
}
