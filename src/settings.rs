//! Ordered settings table with validation and visibility bookkeeping.
//!
//! A [`Settings`] table holds the user-visible options of one plugin
//! instance: each [`Setting`] has a stable name, a display title, a typed
//! value, a fixed domain ([`Constraints`]), and a visibility flag the
//! adapter toggles when dependent settings change. The table preserves
//! declaration order so settings can be applied to hardware in a
//! deterministic sequence.

use serde::{Deserialize, Serialize};

use crate::error::{ChopperError, ChopperResult};

/// A dynamically-typed setting value.
///
/// Integer values are accepted wherever a float domain is declared; all
/// other kinds must match the setting's declared kind exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Boolean toggle.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// One entry out of an enumerated choice list.
    Choice(String),
}

impl SettingValue {
    /// Boolean payload, if this is a [`SettingValue::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Integer payload, if this is a [`SettingValue::Int`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric payload; integers coerce to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Choice payload, if this is a [`SettingValue::Choice`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Choice(value) => Some(value),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Choice(_) => "choice",
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Choice(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Choice(value)
    }
}

/// Validation constraints for a setting value.
#[derive(Debug, Clone, Default)]
pub enum Constraints {
    /// No constraints.
    #[default]
    None,

    /// Allowed discrete choices.
    Choices(Vec<String>),

    /// Inclusive numeric range.
    FloatRange {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Integer minimum.
    IntMin(i64),
}

impl Constraints {
    /// Validate a value against the constraints.
    pub fn validate(&self, value: &SettingValue) -> ChopperResult<()> {
        match self {
            Constraints::None => Ok(()),

            Constraints::Choices(choices) => {
                let choice = value.as_str().ok_or(ChopperError::WrongType("choice"))?;
                if choices.iter().any(|c| c == choice) {
                    Ok(())
                } else {
                    Err(ChopperError::InvalidChoice(choice.to_string()))
                }
            }

            Constraints::FloatRange { min, max } => {
                let number = value.as_f64().ok_or(ChopperError::WrongType("float"))?;
                if number < *min || number > *max {
                    Err(ChopperError::OutOfRange(format!(
                        "{number} not in [{min}, {max}]"
                    )))
                } else {
                    Ok(())
                }
            }

            Constraints::IntMin(min) => {
                let number = value.as_i64().ok_or(ChopperError::WrongType("int"))?;
                if number < *min {
                    Err(ChopperError::OutOfRange(format!(
                        "{number} below minimum {min}"
                    )))
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// One named option in the settings table.
#[derive(Debug, Clone)]
pub struct Setting {
    name: String,
    title: String,
    value: SettingValue,
    constraints: Constraints,
    visible: bool,
}

impl Setting {
    /// Enumerated-choice setting.
    pub fn choice(name: &str, title: &str, choices: &[&str], initial: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            value: SettingValue::Choice(initial.to_string()),
            constraints: Constraints::Choices(choices.iter().map(|c| c.to_string()).collect()),
            visible: true,
        }
    }

    /// Unconstrained float setting.
    pub fn float(name: &str, title: &str, initial: f64) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            value: SettingValue::Float(initial),
            constraints: Constraints::None,
            visible: true,
        }
    }

    /// Float setting with an inclusive range.
    pub fn float_range(name: &str, title: &str, initial: f64, min: f64, max: f64) -> Self {
        Self {
            constraints: Constraints::FloatRange { min, max },
            ..Self::float(name, title, initial)
        }
    }

    /// Integer setting with a minimum.
    pub fn int_min(name: &str, title: &str, initial: i64, min: i64) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            value: SettingValue::Int(initial),
            constraints: Constraints::IntMin(min),
            visible: true,
        }
    }

    /// Boolean toggle setting.
    pub fn flag(name: &str, title: &str, initial: bool) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            value: SettingValue::Bool(initial),
            constraints: Constraints::None,
            visible: true,
        }
    }

    /// Mark the setting as initially hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Setting name (unique identifier).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current value.
    pub fn value(&self) -> &SettingValue {
        &self.value
    }

    /// Validation constraints.
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Whether the setting is currently shown to the user.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Ordered collection of [`Setting`]s, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    entries: Vec<Setting>,
}

impl Settings {
    /// Build a table from settings in declaration order.
    pub fn new(entries: Vec<Setting>) -> Self {
        Self { entries }
    }

    /// Setting names in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Iterate settings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Setting> {
        self.entries.iter()
    }

    /// Look up a setting by name.
    pub fn get(&self, name: &str) -> Option<&Setting> {
        self.entries.iter().find(|e| e.name == name)
    }

    fn entry_mut(&mut self, name: &str) -> ChopperResult<&mut Setting> {
        self.entries
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| ChopperError::UnknownSetting(name.to_string()))
    }

    /// Validate and store a new value.
    ///
    /// The value kind must match the setting's declared kind (integers are
    /// accepted for float settings and normalized on store), and the value
    /// must satisfy the setting's constraints. On any failure the stored
    /// value is left unchanged.
    pub fn set(&mut self, name: &str, value: SettingValue) -> ChopperResult<()> {
        let entry = self.entry_mut(name)?;

        let compatible = matches!(
            (&entry.value, &value),
            (SettingValue::Bool(_), SettingValue::Bool(_))
                | (SettingValue::Int(_), SettingValue::Int(_))
                | (
                    SettingValue::Float(_),
                    SettingValue::Float(_) | SettingValue::Int(_)
                )
                | (SettingValue::Choice(_), SettingValue::Choice(_))
        );
        if !compatible {
            return Err(ChopperError::WrongType(entry.value.kind()));
        }

        entry.constraints.validate(&value)?;

        entry.value = match (&entry.value, value) {
            (SettingValue::Float(_), SettingValue::Int(number)) => {
                SettingValue::Float(number as f64)
            }
            (_, value) => value,
        };
        Ok(())
    }

    /// Make a setting visible.
    pub fn show(&mut self, name: &str) -> ChopperResult<()> {
        self.entry_mut(name)?.visible = true;
        Ok(())
    }

    /// Hide a setting.
    pub fn hide(&mut self, name: &str) -> ChopperResult<()> {
        self.entry_mut(name)?.visible = false;
        Ok(())
    }

    /// Whether a setting is currently visible. Unknown names read hidden.
    pub fn is_visible(&self, name: &str) -> bool {
        self.get(name).is_some_and(Setting::is_visible)
    }

    /// Typed accessor for a choice setting.
    pub fn choice(&self, name: &str) -> ChopperResult<&str> {
        self.get(name)
            .ok_or_else(|| ChopperError::UnknownSetting(name.to_string()))?
            .value
            .as_str()
            .ok_or(ChopperError::WrongType("choice"))
    }

    /// Typed accessor for a float setting.
    pub fn float(&self, name: &str) -> ChopperResult<f64> {
        self.get(name)
            .ok_or_else(|| ChopperError::UnknownSetting(name.to_string()))?
            .value
            .as_f64()
            .ok_or(ChopperError::WrongType("float"))
    }

    /// Typed accessor for an integer setting.
    pub fn int(&self, name: &str) -> ChopperResult<i64> {
        self.get(name)
            .ok_or_else(|| ChopperError::UnknownSetting(name.to_string()))?
            .value
            .as_i64()
            .ok_or(ChopperError::WrongType("int"))
    }

    /// Typed accessor for a boolean setting.
    pub fn flag(&self, name: &str) -> ChopperResult<bool> {
        self.get(name)
            .ok_or_else(|| ChopperError::UnknownSetting(name.to_string()))?
            .value
            .as_bool()
            .ok_or(ChopperError::WrongType("bool"))
    }
}
