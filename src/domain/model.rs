use crate::utils::error::{PyeError, Result};
use serde::{Deserialize, Serialize};

/// Status returned by `init_factory` on success.
pub const STATUS_OK: i32 = 0;

/// Status returned when an argument cannot be passed to the engine at all
/// (for example a directory containing an interior NUL byte).
pub const STATUS_INVALID_ARGUMENT: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    Null,
    Native,
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKind::Null => write!(f, "null"),
            EngineKind::Native => write!(f, "native"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub i32);

/// Option ids understood by `set_option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineOption {
    /// Packed [`DisplayOptions`].
    Display,
    /// A [`Grade`] value.
    Grade,
    Other(i32),
}

impl EngineOption {
    pub fn id(self) -> i32 {
        match self {
            EngineOption::Display => 1,
            EngineOption::Grade => 2,
            EngineOption::Other(id) => id,
        }
    }

    pub fn from_id(id: i32) -> Self {
        match id {
            1 => EngineOption::Display,
            2 => EngineOption::Grade,
            other => EngineOption::Other(other),
        }
    }

    /// Checks that `value` is meaningful for this option. Unknown options are
    /// passed through untouched.
    pub fn check(self, value: i32) -> Result<()> {
        let valid = match self {
            EngineOption::Display => DisplayOptions::unpack(value).is_ok(),
            EngineOption::Grade => Grade::from_value(value).is_ok(),
            EngineOption::Other(_) => true,
        };
        if valid {
            Ok(())
        } else {
            Err(PyeError::InvalidOptionValueError {
                option: self.to_string(),
                value,
            })
        }
    }
}

impl std::fmt::Display for EngineOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineOption::Display => write!(f, "display"),
            EngineOption::Grade => write!(f, "grade"),
            EngineOption::Other(id) => write!(f, "option#{}", id),
        }
    }
}

macro_rules! option_values {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $value:expr),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
        #[serde(try_from = "i32", into = "i32")]
        pub enum $name {
            #[default]
            $($variant = $value),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn value(self) -> i32 {
                self as i32
            }

            pub fn from_value(value: i32) -> Result<Self> {
                match value {
                    $(v if v == $value => Ok($name::$variant),)+
                    _ => Err(PyeError::InvalidOptionValueError {
                        option: stringify!($name).to_string(),
                        value,
                    }),
                }
            }
        }

        impl TryFrom<i32> for $name {
            type Error = PyeError;

            fn try_from(value: i32) -> Result<Self> {
                Self::from_value(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> i32 {
                value.value()
            }
        }
    };
}

option_values! {
    /// Character set used for rendered text (bits 0-1).
    LangEncoding { Simplified = 0, Traditional = 1, Original = 2 }
}

option_values! {
    /// Romanisation style of the annotation (bits 2-3).
    PinyinFormat { HanyuPinyin = 0, HanyuPinyinNumbered = 4, Bopomofo = 8, BopomofoNumbered = 12 }
}

option_values! {
    /// Where the annotation is drawn relative to the character (bit 4).
    PinyinLocation { Top = 0, Bottom = 16 }
}

option_values! {
    /// Reading grade; sent on its own through [`EngineOption::Grade`].
    Grade { A = 0, B = 2, C = 12 }
}

const ENCODING_MASK: i32 = 0b0_0011;
const FORMAT_MASK: i32 = 0b0_1100;
const LOCATION_MASK: i32 = 0b1_0000;

/// The three display settings, packed into one integer with disjoint bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayOptions {
    pub encoding: LangEncoding,
    pub format: PinyinFormat,
    pub location: PinyinLocation,
}

impl DisplayOptions {
    pub fn pack(&self) -> i32 {
        self.encoding.value() | self.format.value() | self.location.value()
    }

    pub fn unpack(packed: i32) -> Result<Self> {
        if packed & !(ENCODING_MASK | FORMAT_MASK | LOCATION_MASK) != 0 {
            return Err(PyeError::InvalidOptionValueError {
                option: EngineOption::Display.to_string(),
                value: packed,
            });
        }
        Ok(Self {
            encoding: LangEncoding::from_value(packed & ENCODING_MASK)?,
            format: PinyinFormat::from_value(packed & FORMAT_MASK)?,
            location: PinyinLocation::from_value(packed & LOCATION_MASK)?,
        })
    }
}

/// Host preferences, keyed the way the browser stores them (`pyllq.*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub lang_encoding: LangEncoding,
    pub pinyin_format: PinyinFormat,
    pub pinyin_location: PinyinLocation,
    pub grade: Grade,
}

impl Preferences {
    pub const KEYS: [&'static str; 4] = [
        "pyllq.langEncoding",
        "pyllq.pinyinFormat",
        "pyllq.pinyinLocation",
        "pyllq.grade",
    ];

    pub fn display(&self) -> DisplayOptions {
        DisplayOptions {
            encoding: self.lang_encoding,
            format: self.pinyin_format,
            location: self.pinyin_location,
        }
    }

    /// Each stored key with its current value, in [`Self::KEYS`] order.
    pub fn entries(&self) -> [(&'static str, i32); 4] {
        let [encoding, format, location, grade] = Self::KEYS;
        [
            (encoding, self.lang_encoding.value()),
            (format, self.pinyin_format.value()),
            (location, self.pinyin_location.value()),
            (grade, self.grade.value()),
        ]
    }

    /// The `(option, value)` pairs to push through `set_option`, in order.
    pub fn settings(&self) -> [(EngineOption, i32); 2] {
        [
            (EngineOption::Display, self.display().pack()),
            (EngineOption::Grade, self.grade.value()),
        ]
    }

    /// Updates one preference from its stored string form, e.g.
    /// `("pyllq.pinyinFormat", "8")`.
    pub fn set_pref(&mut self, key: &str, value: &str) -> Result<()> {
        let parsed: i32 = value
            .trim()
            .parse()
            .map_err(|_| PyeError::InvalidConfigValueError {
                field: key.to_string(),
                value: value.to_string(),
                reason: "Value must be an integer".to_string(),
            })?;
        match key {
            "pyllq.langEncoding" => self.lang_encoding = LangEncoding::from_value(parsed)?,
            "pyllq.pinyinFormat" => self.pinyin_format = PinyinFormat::from_value(parsed)?,
            "pyllq.pinyinLocation" => self.pinyin_location = PinyinLocation::from_value(parsed)?,
            "pyllq.grade" => self.grade = Grade::from_value(parsed)?,
            _ => {
                return Err(PyeError::ConfigError {
                    message: format!("Unknown preference '{}'", key),
                })
            }
        }
        Ok(())
    }
}
