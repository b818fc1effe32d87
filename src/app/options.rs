use serde::{Deserialize, Serialize};

use super::draft::FieldKey;
use super::error::{PanelError, Result};

/// One selectable value for a field, with the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelOption {
    value: String,
    label: String,
    /// Font family class used by the article view (font options only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class_name: Option<String>,
}

impl PanelOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            class_name: None,
        }
    }

    pub fn with_class(mut self, class_name: &str) -> Self {
        self.class_name = Some(class_name.to_string());
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }
}

/// Ordered option sets, one per field key. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionCatalog {
    font_family: Vec<PanelOption>,
    font_size: Vec<PanelOption>,
    font_color: Vec<PanelOption>,
    background_color: Vec<PanelOption>,
    content_width: Vec<PanelOption>,
}

/// Values selected when the panel is created and after every reset.
pub const DEFAULT_VALUES: [(FieldKey, &str); 5] = [
    (FieldKey::FontFamily, "Open Sans"),
    (FieldKey::FontSize, "18px"),
    (FieldKey::FontColor, "#000000"),
    (FieldKey::BackgroundColor, "#FFFFFF"),
    (FieldKey::ContentWidth, "1394px"),
];

impl Default for OptionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl OptionCatalog {
    /// Build a catalog from explicit option sets, in `FieldKey::ALL` order.
    pub fn new(
        font_family: Vec<PanelOption>,
        font_size: Vec<PanelOption>,
        font_color: Vec<PanelOption>,
        background_color: Vec<PanelOption>,
        content_width: Vec<PanelOption>,
    ) -> Result<Self> {
        let catalog = Self {
            font_family,
            font_size,
            font_color,
            background_color,
            content_width,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The option sets the article page ships with.
    pub fn builtin() -> Self {
        Self {
            font_family: vec![
                PanelOption::new("Open Sans", "Open Sans").with_class("open-sans"),
                PanelOption::new("Ubuntu", "Ubuntu").with_class("ubuntu"),
                PanelOption::new("Cormorant Garamond", "Cormorant Garamond")
                    .with_class("cormorant-garamond"),
                PanelOption::new("Days One", "Days One").with_class("days-one"),
                PanelOption::new("Merriweather", "Merriweather").with_class("merriweather"),
            ],
            font_size: vec![
                PanelOption::new("18px", "18px"),
                PanelOption::new("25px", "25px"),
                PanelOption::new("38px", "38px"),
            ],
            font_color: vec![
                PanelOption::new("#000000", "Black"),
                PanelOption::new("#FFFFFF", "White"),
                PanelOption::new("#C4C4C4", "Gray"),
                PanelOption::new("#FEAFE8", "Pink"),
                PanelOption::new("#FD24AF", "Bright pink"),
                PanelOption::new("#FFC802", "Yellow"),
                PanelOption::new("#80D994", "Green"),
                PanelOption::new("#6FC1FD", "Blue"),
                PanelOption::new("#5F34C4", "Purple"),
            ],
            background_color: vec![
                PanelOption::new("#FFFFFF", "White"),
                PanelOption::new("#000000", "Black"),
                PanelOption::new("#C4C4C4", "Gray"),
                PanelOption::new("#FEAFE8", "Pink"),
                PanelOption::new("#FFC802", "Yellow"),
                PanelOption::new("#80D994", "Green"),
                PanelOption::new("#6FC1FD", "Blue"),
                PanelOption::new("#5F34C4", "Purple"),
            ],
            content_width: vec![
                PanelOption::new("1394px", "Wide"),
                PanelOption::new("948px", "Narrow"),
            ],
        }
    }

    pub fn options(&self, key: FieldKey) -> &[PanelOption] {
        match key {
            FieldKey::FontFamily => &self.font_family,
            FieldKey::FontSize => &self.font_size,
            FieldKey::FontColor => &self.font_color,
            FieldKey::BackgroundColor => &self.background_color,
            FieldKey::ContentWidth => &self.content_width,
        }
    }

    pub fn find(&self, key: FieldKey, value: &str) -> Option<&PanelOption> {
        self.options(key).iter().find(|o| o.value == value)
    }

    /// Index of `value` within the option set of `key`
    pub fn position(&self, key: FieldKey, value: &str) -> Option<usize> {
        self.options(key).iter().position(|o| o.value == value)
    }

    /// Option at a widget index; negative indices mean "nothing selected".
    pub fn option_at(&self, key: FieldKey, index: i32) -> Option<&PanelOption> {
        if index < 0 {
            return None;
        }
        self.options(key).get(index as usize)
    }

    /// Every option set must be non-empty and free of duplicate values.
    pub fn validate(&self) -> Result<()> {
        for key in FieldKey::ALL {
            let options = self.options(key);
            if options.is_empty() {
                return Err(PanelError::Config(format!("empty option set for {key}")));
            }
            for (i, option) in options.iter().enumerate() {
                if options[..i].iter().any(|o| o.value == option.value) {
                    return Err(PanelError::Config(format!(
                        "duplicate option {:?} for {key}",
                        option.value
                    )));
                }
            }
        }
        Ok(())
    }
}
