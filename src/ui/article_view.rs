use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    draw,
    enums::{Align, Color, Font},
    prelude::*,
    widget::Widget,
};

use crate::app::draft::{FieldKey, SettingsDraft};

const ARTICLE_TITLE: &str = "Portrait of a Lady on Fire";

const ARTICLE_BODY: &[&str] = &[
    "Brittany, late eighteenth century. A painter is commissioned to paint the \
     wedding portrait of a young woman who has just left the convent. Because \
     the bride refuses to pose, the painter has to work in secret, observing \
     her by day and painting her from memory at night.",
    "The film is built from looks: who watches, who is watched, and what \
     changes when the subject of a portrait starts looking back. Every \
     setting on the page can be tuned from the parameters panel on the left.",
];

const TITLE_SCALE: i32 = 2;
const TITLE_GAP: i32 = 32;
const MIN_MARGIN: i32 = 24;

/// Visual parameters of the article, derived from an applied draft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArticleStyle {
    pub font: Font,
    pub font_size: i32,
    pub font_color: Color,
    pub background: Color,
    pub content_width: i32,
}

impl ArticleStyle {
    pub fn from_draft(draft: &SettingsDraft) -> Self {
        let family = draft.get(FieldKey::FontFamily);
        Self {
            font: font_for(family.class_name().unwrap_or(family.value())),
            font_size: parse_px(draft.value(FieldKey::FontSize)).unwrap_or(18),
            font_color: parse_color(draft.value(FieldKey::FontColor)).unwrap_or(Color::Black),
            background: parse_color(draft.value(FieldKey::BackgroundColor)).unwrap_or(Color::White),
            content_width: parse_px(draft.value(FieldKey::ContentWidth)).unwrap_or(1394),
        }
    }
}

/// Closest built-in FLTK face for an article font family.
pub fn font_for(family: &str) -> Font {
    match family {
        "cormorant-garamond" | "Cormorant Garamond" => Font::Times,
        "merriweather" | "Merriweather" => Font::TimesBold,
        "days-one" | "Days One" => Font::HelveticaBold,
        "ubuntu" | "Ubuntu" => Font::Screen,
        _ => Font::Helvetica,
    }
}

/// "18px" -> 18
pub fn parse_px(value: &str) -> Option<i32> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}

/// "#RRGGBB" -> color
pub fn parse_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().map(Color::from_hex)
}

/// The article page the panel restyles.
#[derive(Clone)]
pub struct ArticleView {
    pub widget: Widget,
    style: Rc<RefCell<ArticleStyle>>,
}

impl ArticleView {
    pub fn new(x: i32, y: i32, w: i32, h: i32, draft: &SettingsDraft) -> Self {
        let style = Rc::new(RefCell::new(ArticleStyle::from_draft(draft)));
        let mut widget = Widget::new(x, y, w, h, None);

        let draw_style = style.clone();
        widget.draw(move |wid| draw_article(wid, &draw_style.borrow()));

        Self { widget, style }
    }

    /// Restyle the article from an applied draft.
    pub fn apply_draft(&mut self, draft: &SettingsDraft) {
        *self.style.borrow_mut() = ArticleStyle::from_draft(draft);
        self.widget.redraw();
    }
}

fn draw_article(wid: &Widget, style: &ArticleStyle) {
    let (x, y, w, h) = (wid.x(), wid.y(), wid.w(), wid.h());

    draw::set_draw_color(style.background);
    draw::draw_rectf(x, y, w, h);

    // Centered column, clamped to the window
    let column_w = style.content_width.min(w - 2 * MIN_MARGIN).max(0);
    let column_x = x + (w - column_w) / 2;
    let mut cy = y + MIN_MARGIN * 3;

    draw::set_draw_color(style.font_color);
    draw::set_font(style.font, style.font_size * TITLE_SCALE);
    let (_, title_h) = draw::measure(ARTICLE_TITLE, true);
    draw::draw_text2(ARTICLE_TITLE, column_x, cy, column_w, title_h, Align::Left | Align::Top);
    cy += title_h + TITLE_GAP;

    draw::set_font(style.font, style.font_size);
    let body = ARTICLE_BODY.join("\n\n");
    draw::draw_text2(
        &body,
        column_x,
        cy,
        column_w,
        (y + h - cy - MIN_MARGIN).max(0),
        Align::Left | Align::Top | Align::Wrap | Align::Inside,
    );
}
