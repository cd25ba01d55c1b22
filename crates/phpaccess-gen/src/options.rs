//! Generation options shared by every action

use serde::{Deserialize, Serialize};
use std::fmt;

/// Indentation width used when the host has no usable setting
pub const DEFAULT_TAB_SIZE: usize = 4;

/// Which property visibility qualifies for accessor generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Public => "public",
        }
    }

    pub fn from_str(s: &str) -> Option<Visibility> {
        match s.to_lowercase().as_str() {
            "private" => Some(Visibility::Private),
            "public" => Some(Visibility::Public),
            _ => None,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The accessor kinds an action asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessorKinds {
    pub getters: bool,
    pub setters: bool,
}

impl AccessorKinds {
    pub fn both() -> Self {
        Self {
            getters: true,
            setters: true,
        }
    }

    pub fn getters_only() -> Self {
        Self {
            getters: true,
            setters: false,
        }
    }

    pub fn setters_only() -> Self {
        Self {
            getters: false,
            setters: true,
        }
    }

    /// Label used in the confirmation prompt
    pub fn title(&self) -> &'static str {
        match (self.getters, self.setters) {
            (true, true) => "Getters/Setters",
            (true, false) => "Getters",
            _ => "Setters",
        }
    }
}

/// Parser settings, passed explicitly into extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Logical name of the document, used for the parser's file id
    pub file_name: String,
}

impl ParserConfig {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new("buffer.php")
    }
}

/// Everything one invocation of the generator needs besides the source
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub kinds: AccessorKinds,
    pub visibility: Visibility,
    pub tab_size: usize,
    pub parser: ParserConfig,
}

impl GenerateOptions {
    pub fn new(kinds: AccessorKinds) -> Self {
        Self {
            kinds,
            visibility: Visibility::default(),
            tab_size: DEFAULT_TAB_SIZE,
            parser: ParserConfig::default(),
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }
}

/// Resolve an editor indentation setting to a width
///
/// Anything that is not a positive integer falls back to 4.
pub fn resolve_tab_size(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|&width| width > 0)
        .unwrap_or(DEFAULT_TAB_SIZE)
}
