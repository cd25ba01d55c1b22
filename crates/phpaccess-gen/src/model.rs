//! Class and property records extracted from a PHP file

use serde::Serialize;

/// One qualifying property of a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyModel {
    /// Property name without the leading `$`
    pub name: String,
    /// Declared type exactly as written (`int`, `?string`, ...)
    #[serde(rename = "type")]
    pub type_hint: Option<String>,
}

impl PropertyModel {
    pub fn new(name: impl Into<String>, type_hint: Option<String>) -> Self {
        Self {
            name: name.into(),
            type_hint,
        }
    }
}

/// A class with at least one qualifying property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassModel {
    pub name: String,
    /// 0-based line of the class declaration
    pub start_line: usize,
    /// 0-based line of the closing brace
    pub end_line: usize,
    /// Column of the closing brace on `end_line`
    pub end_column: usize,
    /// Qualifying properties in declaration order
    pub properties: Vec<PropertyModel>,
    /// Every method declared directly in the class, original case
    pub method_names: Vec<String>,
}

impl ClassModel {
    pub fn new(name: impl Into<String>, start_line: usize, end_line: usize) -> Self {
        Self {
            name: name.into(),
            start_line,
            end_line,
            end_column: 0,
            properties: Vec::new(),
            method_names: Vec::new(),
        }
    }

    fn has_method(&self, wanted: &str) -> bool {
        self.method_names
            .iter()
            .any(|method| method.to_lowercase() == wanted)
    }

    /// Whether a method named `get<property>` exists, ignoring case
    pub fn has_getter(&self, property_name: &str) -> bool {
        self.has_method(&format!("get{}", property_name.to_lowercase()))
    }

    /// Whether a method named `set<property>` exists, ignoring case
    pub fn has_setter(&self, property_name: &str) -> bool {
        self.has_method(&format!("set{}", property_name.to_lowercase()))
    }

    pub fn has_all_getters(&self) -> bool {
        self.properties.iter().all(|prop| self.has_getter(&prop.name))
    }

    pub fn has_all_setters(&self) -> bool {
        self.properties.iter().all(|prop| self.has_setter(&prop.name))
    }

    pub fn has_full_coverage(&self) -> bool {
        self.has_all_getters() && self.has_all_setters()
    }
}
