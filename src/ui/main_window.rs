use fltk::{
    app::{self, Sender},
    enums::{Event, Key},
    group::Group,
    prelude::*,
    widget::Widget,
    window::Window,
};

use crate::app::config::PanelConfig;
use crate::app::listeners::{Interaction, KeyPress, ListenerRegistry, Point, Rect};
use crate::app::messages::PanelMessage;
use crate::app::outside_click::RootRegion;
use crate::app::panel::{PanelController, UpdateOutcome};
use crate::app::visibility::Visibility;

use super::article_view::ArticleView;
use super::panel_form::{PanelForm, PANEL_WIDTH};
use super::toggle_button::ToggleButton;

pub const WINDOW_WIDTH: i32 = 1200;
pub const WINDOW_HEIGHT: i32 = 800;

const TOGGLE_MARGIN: i32 = 20;

pub struct MainWidgets {
    pub wind: Window,
    pub article: ArticleView,
    pub form: PanelForm,
    pub toggle: ToggleButton,
}

pub fn build_main_window(config: &PanelConfig, sender: &Sender<PanelMessage>) -> MainWidgets {
    let mut wind = Window::default()
        .with_size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .with_label("Article parameters")
        .center_screen();
    wind.set_xclass("ArticleParams");

    // Stacking order: article, then the overlay, then the toggle on top
    let article = ArticleView::new(0, 0, WINDOW_WIDTH, WINDOW_HEIGHT, &config.defaults);
    let form = PanelForm::new(0, 0, WINDOW_HEIGHT, &config.catalog, &config.defaults, sender);
    let toggle = ToggleButton::new(TOGGLE_MARGIN, TOGGLE_MARGIN, *sender);

    wind.end();

    // Escape belongs to the panel; only the close button ends the app
    wind.set_callback(|w| {
        if app::event() == Event::Close {
            w.hide();
        }
    });

    MainWidgets {
        wind,
        article,
        form,
        toggle,
    }
}

/// Bounds that count as "inside the panel": the overlay and its toggle.
fn region_of(panel: &Group, toggle: &Widget) -> Vec<Rect> {
    vec![
        Rect::new(panel.x(), panel.y(), panel.w(), panel.h()),
        Rect::new(toggle.x(), toggle.y(), toggle.w(), toggle.h()),
    ]
}

impl MainWidgets {
    /// Forward every press and key event in the window to the global
    /// listener table. The messages it yields are queued on the channel and
    /// handled after the current event.
    pub fn install_event_hook(
        &mut self,
        registry: &ListenerRegistry,
        root: &RootRegion,
        sender: &Sender<PanelMessage>,
    ) {
        let registry = registry.clone();
        let root = root.clone();
        let panel = self.form.group.clone();
        let toggle = self.toggle.widget.clone();
        let s = *sender;

        self.wind.handle(move |_, event| match event {
            Event::Push => {
                if root.is_attached() {
                    root.attach(region_of(&panel, &toggle));
                }
                let point = Point::new(app::event_x(), app::event_y());
                for msg in registry.dispatch(&Interaction::Pointer(point)) {
                    s.send(msg);
                }
                // The press still goes on to the widget under the pointer
                false
            }
            Event::KeyDown | Event::Shortcut => {
                let key = if app::event_key() == Key::Escape {
                    KeyPress::Escape
                } else {
                    KeyPress::Other
                };
                let msgs = registry.dispatch(&Interaction::Key(key));
                let consumed = key == KeyPress::Escape && !msgs.is_empty();
                for msg in msgs {
                    s.send(msg);
                }
                consumed
            }
            _ => false,
        });
    }

    /// Show the window and publish the panel region to the detector.
    pub fn mount(&mut self, root: &RootRegion) {
        self.wind.show();
        let toggle = &self.toggle.widget;
        root.attach(vec![
            self.form.bounds(),
            Rect::new(toggle.x(), toggle.y(), toggle.w(), toggle.h()),
        ]);
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.form.set_visibility(visibility);
        self.toggle.set_visibility(visibility);
        let toggle_x = if visibility.is_open() {
            PANEL_WIDTH + TOGGLE_MARGIN
        } else {
            TOGGLE_MARGIN
        };
        self.toggle.widget.set_pos(toggle_x, TOGGLE_MARGIN);
        self.wind.redraw();
    }

    /// Bring the widgets in line with the controller after a message.
    pub fn render(&mut self, panel: &PanelController, outcome: &UpdateOutcome) {
        match outcome {
            UpdateOutcome::VisibilityChanged(visibility) => self.set_visibility(*visibility),
            // A rejected update may have left a control showing a value the
            // draft never took
            UpdateOutcome::Reset | UpdateOutcome::Rejected(_) => {
                self.form.sync_from_draft(panel.draft(), panel.catalog());
            }
            UpdateOutcome::DraftChanged | UpdateOutcome::Applied | UpdateOutcome::Ignored => {}
        }
    }
}
