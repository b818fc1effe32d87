use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{PanelError, Result};
use super::options::{OptionCatalog, PanelOption, DEFAULT_VALUES};

/// Identifier for one configurable article setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    FontFamily,
    FontSize,
    FontColor,
    BackgroundColor,
    ContentWidth,
}

impl FieldKey {
    /// All keys, in the order the form shows them
    pub const ALL: [FieldKey; 5] = [
        Self::FontFamily,
        Self::FontSize,
        Self::FontColor,
        Self::BackgroundColor,
        Self::ContentWidth,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::FontFamily => "font_family",
            Self::FontSize => "font_size",
            Self::FontColor => "font_color",
            Self::BackgroundColor => "background_color",
            Self::ContentWidth => "content_width",
        }
    }

    /// Title shown above the field's control
    pub fn title(&self) -> &'static str {
        match self {
            Self::FontFamily => "Font",
            Self::FontSize => "Font size",
            Self::FontColor => "Font color",
            Self::BackgroundColor => "Background color",
            Self::ContentWidth => "Content width",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A single-key change: the only way a draft is ever modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub key: FieldKey,
    pub value: String,
}

impl FieldUpdate {
    pub fn new(key: FieldKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// What a field control reports: the selected index within its option set.
/// FLTK choices and radio groups report `-1` when nothing is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFieldReport {
    pub key: FieldKey,
    pub index: i32,
}

impl RawFieldReport {
    pub fn new(key: FieldKey, index: i32) -> Self {
        Self { key, index }
    }

    /// Resolve the report against the catalog into a well-formed update.
    pub fn to_update(self, catalog: &OptionCatalog) -> Result<FieldUpdate> {
        if self.index < 0 {
            return Err(PanelError::MalformedUpdate {
                key: self.key,
                reason: "no option selected".to_string(),
            });
        }
        match catalog.option_at(self.key, self.index) {
            Some(option) => Ok(FieldUpdate::new(self.key, option.value())),
            None => Err(PanelError::MalformedUpdate {
                key: self.key,
                reason: format!(
                    "index {} out of range ({} options)",
                    self.index,
                    catalog.options(self.key).len()
                ),
            }),
        }
    }
}

/// In-progress article settings: exactly one option per field key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsDraft {
    font_family: PanelOption,
    font_size: PanelOption,
    font_color: PanelOption,
    background_color: PanelOption,
    content_width: PanelOption,
}

impl SettingsDraft {
    /// Resolve one value per key against the catalog.
    pub fn resolve<'a, I>(catalog: &OptionCatalog, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (FieldKey, &'a str)>,
    {
        let mut picked: [Option<PanelOption>; 5] = Default::default();
        for (key, value) in values {
            let option = catalog
                .find(key, value)
                .ok_or_else(|| PanelError::UnknownOption {
                    key,
                    value: value.to_string(),
                })?;
            picked[slot_index(key)] = Some(option.clone());
        }
        let [font_family, font_size, font_color, background_color, content_width] = picked;
        let missing = |key: FieldKey| PanelError::Config(format!("no default value for {key}"));
        Ok(Self {
            font_family: font_family.ok_or_else(|| missing(FieldKey::FontFamily))?,
            font_size: font_size.ok_or_else(|| missing(FieldKey::FontSize))?,
            font_color: font_color.ok_or_else(|| missing(FieldKey::FontColor))?,
            background_color: background_color
                .ok_or_else(|| missing(FieldKey::BackgroundColor))?,
            content_width: content_width.ok_or_else(|| missing(FieldKey::ContentWidth))?,
        })
    }

    /// Built-in defaults over the built-in catalog.
    pub fn builtin() -> Self {
        let catalog = OptionCatalog::builtin();
        let option = |key: FieldKey| {
            DEFAULT_VALUES
                .iter()
                .find(|(k, _)| *k == key)
                .and_then(|(_, value)| catalog.find(key, value))
                .or_else(|| catalog.options(key).first())
                .cloned()
                .unwrap_or_else(|| PanelOption::new("", ""))
        };
        Self {
            font_family: option(FieldKey::FontFamily),
            font_size: option(FieldKey::FontSize),
            font_color: option(FieldKey::FontColor),
            background_color: option(FieldKey::BackgroundColor),
            content_width: option(FieldKey::ContentWidth),
        }
    }

    pub fn get(&self, key: FieldKey) -> &PanelOption {
        match key {
            FieldKey::FontFamily => &self.font_family,
            FieldKey::FontSize => &self.font_size,
            FieldKey::FontColor => &self.font_color,
            FieldKey::BackgroundColor => &self.background_color,
            FieldKey::ContentWidth => &self.content_width,
        }
    }

    pub fn value(&self, key: FieldKey) -> &str {
        self.get(key).value()
    }

    /// Merge a single-key update. The value must come from the key's option
    /// set; on error the draft is left untouched.
    pub fn apply_update(&mut self, update: &FieldUpdate, catalog: &OptionCatalog) -> Result<()> {
        let option = catalog
            .find(update.key, &update.value)
            .ok_or_else(|| PanelError::UnknownOption {
                key: update.key,
                value: update.value.clone(),
            })?;
        let slot = match update.key {
            FieldKey::FontFamily => &mut self.font_family,
            FieldKey::FontSize => &mut self.font_size,
            FieldKey::FontColor => &mut self.font_color,
            FieldKey::BackgroundColor => &mut self.background_color,
            FieldKey::ContentWidth => &mut self.content_width,
        };
        *slot = option.clone();
        Ok(())
    }
}

fn slot_index(key: FieldKey) -> usize {
    match key {
        FieldKey::FontFamily => 0,
        FieldKey::FontSize => 1,
        FieldKey::FontColor => 2,
        FieldKey::BackgroundColor => 3,
        FieldKey::ContentWidth => 4,
    }
}
