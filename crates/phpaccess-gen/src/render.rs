//! Accessor method text

use crate::model::PropertyModel;

/// Uppercase the first character, leave the rest alone (`userId` -> `UserId`)
pub fn pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn getter_name(property: &PropertyModel) -> String {
    format!("get{}", pascal_case(&property.name))
}

pub fn setter_name(property: &PropertyModel) -> String {
    format!("set{}", pascal_case(&property.name))
}

/// Getter method followed by a blank line, lines ended with `eol`
pub fn getter_block(property: &PropertyModel, tab_size: usize, eol: &str) -> String {
    let indent = " ".repeat(tab_size);
    format!(
        "{indent}public function {name}() {{{eol}{indent}{indent}return $this->{prop};{eol}{indent}}}{eol}{eol}",
        name = getter_name(property),
        prop = property.name,
    )
}

/// Setter method followed by a blank line; the parameter carries the declared type
pub fn setter_block(property: &PropertyModel, tab_size: usize, eol: &str) -> String {
    let indent = " ".repeat(tab_size);
    let type_prefix = property
        .type_hint
        .as_deref()
        .map(|hint| format!("{} ", hint))
        .unwrap_or_default();
    format!(
        "{indent}public function {name}({type_prefix}${prop}) {{{eol}{indent}{indent}$this->{prop} = ${prop};{eol}{indent}}}{eol}{eol}",
        name = setter_name(property),
        prop = property.name,
    )
}
