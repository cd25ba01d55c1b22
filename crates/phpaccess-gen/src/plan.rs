//! Insertion points and generated text for each selected class
//!
//! Generated methods go right before the class's closing brace:
//!
//! - If the line above the brace has code on it, the methods are appended
//!   after that line, separated by one blank line.
//! - If it is blank, the whole run of blank lines above the brace is
//!   replaced so that exactly one blank line separates the methods from the
//!   code above and from the brace below.

use std::collections::HashSet;

use mago_database::file::FileId;
use phpaccess_core::{Edit, SourceText, TextPosition, TextRange};
use serde::Serialize;
use tracing::debug;

use crate::model::ClassModel;
use crate::options::AccessorKinds;
use crate::render::{getter_block, getter_name, setter_block, setter_name};

/// Where a planned edit lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAt {
    Point(TextPosition),
    Range(TextRange),
}

impl InsertAt {
    pub fn range(&self) -> TextRange {
        match self {
            InsertAt::Point(position) => TextRange::empty(*position),
            InsertAt::Range(range) => *range,
        }
    }
}

/// Generated text for one class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEdit {
    pub class_name: String,
    pub insert_at: InsertAt,
    pub text: String,
    /// Names of the generated methods, in output order
    pub methods: Vec<String>,
}

/// Serializable summary of a planned edit
#[derive(Debug, Clone, Serialize)]
pub struct PlannedEditSummary {
    pub class: String,
    pub line: usize,
    pub methods: Vec<String>,
}

impl PlannedEdit {
    pub fn summary(&self) -> PlannedEditSummary {
        PlannedEditSummary {
            class: self.class_name.clone(),
            line: self.insert_at.range().start.line + 1,
            methods: self.methods.clone(),
        }
    }

    /// Resolve to a byte-span edit against the text it was planned on
    pub fn to_edit(&self, source: &SourceText<'_>, file_id: FileId) -> Edit {
        let range = self.insert_at.range();
        Edit::replace(
            file_id,
            source.offset_at(range.start),
            source.offset_at(range.end),
            self.text.clone(),
            format!("Generate {} in {}", self.methods.join(", "), self.class_name),
        )
    }
}

/// Computes the edits for the selected classes
#[derive(Debug, Clone, Copy)]
pub struct EditPlanner {
    kinds: AccessorKinds,
    tab_size: usize,
}

impl EditPlanner {
    pub fn new(kinds: AccessorKinds, tab_size: usize) -> Self {
        Self { kinds, tab_size }
    }

    /// Plan one edit per class that is missing a requested accessor
    pub fn plan_edits(&self, classes: &[ClassModel], source: &SourceText<'_>) -> Vec<PlannedEdit> {
        classes
            .iter()
            .filter_map(|class| self.plan_class(class, source))
            .collect()
    }

    fn plan_class(&self, class: &ClassModel, source: &SourceText<'_>) -> Option<PlannedEdit> {
        let eol = source.line_ending();
        let (body, methods) = self.render_methods(class, eol);
        if methods.is_empty() {
            return None;
        }

        let (insert_at, line_breaks) = self.insertion_point(class, source);

        let mut text = eol.repeat(line_breaks);
        text.push_str(&body);
        if text.ends_with(&eol.repeat(2)) {
            text.truncate(text.len() - eol.len());
        }

        debug!(class = %class.name, ?insert_at, methods = methods.len(), "planned edit");

        Some(PlannedEdit {
            class_name: class.name.clone(),
            insert_at,
            text,
            methods,
        })
    }

    /// Missing accessors, property by property, each block followed by a blank line
    fn render_methods(&self, class: &ClassModel, eol: &str) -> (String, Vec<String>) {
        let mut body = String::new();
        let mut methods = Vec::new();
        // A property name declared twice still gets one accessor of each kind
        let mut generated: HashSet<String> = HashSet::new();

        for property in &class.properties {
            if self.kinds.getters && !class.has_getter(&property.name) {
                let name = getter_name(property);
                if generated.insert(name.to_lowercase()) {
                    body.push_str(&getter_block(property, self.tab_size, eol));
                    methods.push(name);
                }
            }

            if self.kinds.setters && !class.has_setter(&property.name) {
                let name = setter_name(property);
                if generated.insert(name.to_lowercase()) {
                    body.push_str(&setter_block(property, self.tab_size, eol));
                    methods.push(name);
                }
            }
        }

        (body, methods)
    }

    /// Where to put the methods and how many line breaks must precede them
    pub fn insertion_point(&self, class: &ClassModel, source: &SourceText<'_>) -> (InsertAt, usize) {
        // Closing brace on the declaration line: open the body up in place,
        // dropping the whitespace in front of the brace
        if class.end_line <= class.start_line {
            let brace = TextPosition::new(class.end_line, class.end_column);
            let before_brace: String = source
                .line(class.end_line)
                .unwrap_or_default()
                .chars()
                .take(class.end_column)
                .collect();
            let content_end = TextPosition::new(class.end_line, before_brace.trim_end().chars().count());

            let insert_at = if content_end == brace {
                InsertAt::Point(brace)
            } else {
                InsertAt::Range(TextRange::new(content_end, brace))
            };
            return (insert_at, 2);
        }

        let anchor = class.end_line - 1;

        if source.is_blank(anchor) {
            let mut first_blank = anchor;
            let mut line = anchor;
            while line > class.start_line + 1 {
                line -= 1;
                if !source.is_blank(line) {
                    break;
                }
                first_blank = line;
            }

            let range = TextRange::new(
                TextPosition::new(first_blank, self.tab_size),
                TextPosition::new(anchor, self.tab_size),
            );
            (InsertAt::Range(range), 1)
        } else {
            let end_of_line = TextPosition::new(anchor, source.line_len(anchor));
            (InsertAt::Point(end_of_line), 2)
        }
    }
}

/// Resolve planned edits to byte-span edits
pub fn resolve_edits(planned: &[PlannedEdit], source: &SourceText<'_>, file_id: FileId) -> Vec<Edit> {
    planned
        .iter()
        .map(|edit| edit.to_edit(source, file_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyModel;
    use phpaccess_core::apply_edits;

    fn foo(start_line: usize, end_line: usize) -> ClassModel {
        let mut class = ClassModel::new("Foo", start_line, end_line);
        class.properties.push(PropertyModel::new("id", Some("int".to_string())));
        class
    }

    fn apply(source: &str, planned: &[PlannedEdit]) -> String {
        let text = SourceText::new(source);
        let edits = resolve_edits(planned, &text, FileId::zero());
        apply_edits(source, &edits).unwrap()
    }

    #[test]
    fn test_point_insert_after_code_line() {
        let source = "<?php\nclass Foo {\n    private int $id;\n}\n";
        let text = SourceText::new(source);
        let planner = EditPlanner::new(AccessorKinds::getters_only(), 4);

        let planned = planner.plan_edits(&[foo(1, 3)], &text);
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].insert_at, InsertAt::Point(TextPosition::new(2, 20)));
        assert_eq!(
            planned[0].text,
            "\n\n    public function getId() {\n        return $this->id;\n    }\n"
        );

        assert_eq!(
            apply(source, &planned),
            "<?php\nclass Foo {\n    private int $id;\n\n    public function getId() {\n        return $this->id;\n    }\n\n}\n"
        );
    }

    #[test]
    fn test_single_blank_line_before_brace() {
        let source = "<?php\nclass Foo {\n    private int $id;\n\n}\n";
        let text = SourceText::new(source);
        let planner = EditPlanner::new(AccessorKinds::setters_only(), 4);

        let planned = planner.plan_edits(&[foo(1, 4)], &text);
        assert_eq!(
            planned[0].insert_at,
            InsertAt::Range(TextRange::new(TextPosition::new(3, 4), TextPosition::new(3, 4)))
        );

        assert_eq!(
            apply(source, &planned),
            "<?php\nclass Foo {\n    private int $id;\n\n    public function setId(int $id) {\n        $this->id = $id;\n    }\n\n}\n"
        );
    }

    #[test]
    fn test_blank_run_collapses() {
        let source = "<?php\nclass Foo {\n    private int $id;\n\n\n\n}\n";
        let text = SourceText::new(source);
        let planner = EditPlanner::new(AccessorKinds::getters_only(), 4);

        let planned = planner.plan_edits(&[foo(1, 6)], &text);
        assert_eq!(
            planned[0].insert_at,
            InsertAt::Range(TextRange::new(TextPosition::new(3, 4), TextPosition::new(5, 4)))
        );

        let result = apply(source, &planned);
        assert_eq!(
            result,
            "<?php\nclass Foo {\n    private int $id;\n\n    public function getId() {\n        return $this->id;\n    }\n\n}\n"
        );
        // nothing above the blank run was touched
        assert!(result.starts_with("<?php\nclass Foo {\n    private int $id;\n"));
    }

    #[test]
    fn test_blank_walk_stops_below_declaration_line() {
        let source = "class Foo {\n\n\n}";
        let text = SourceText::new(source);
        let planner = EditPlanner::new(AccessorKinds::getters_only(), 4);

        let (insert_at, line_breaks) = planner.insertion_point(&foo(0, 3), &text);
        assert_eq!(
            insert_at,
            InsertAt::Range(TextRange::new(TextPosition::new(1, 4), TextPosition::new(2, 4)))
        );
        assert_eq!(line_breaks, 1);
    }

    #[test]
    fn test_single_line_class() {
        let source = "<?php\nclass Foo { private int $id; }\n";
        let text = SourceText::new(source);
        let planner = EditPlanner::new(AccessorKinds::getters_only(), 4);

        let mut class = foo(1, 1);
        class.end_column = 29;

        let planned = planner.plan_edits(&[class], &text);
        assert_eq!(
            planned[0].insert_at,
            InsertAt::Range(TextRange::new(TextPosition::new(1, 28), TextPosition::new(1, 29)))
        );
        assert_eq!(
            apply(source, &planned),
            "<?php\nclass Foo { private int $id;\n\n    public function getId() {\n        return $this->id;\n    }\n}\n"
        );
    }

    #[test]
    fn test_only_missing_methods_in_property_order() {
        let source = "<?php\nclass Foo {\n    private int $id;\n    private string $name;\n\n    public function getName() {}\n}\n";
        let text = SourceText::new(source);
        let planner = EditPlanner::new(AccessorKinds::both(), 4);

        let mut class = foo(1, 6);
        class.properties.push(PropertyModel::new("name", Some("string".to_string())));
        class.method_names.push("getName".to_string());

        let planned = planner.plan_edits(&[class], &text);
        assert_eq!(planned[0].methods, vec!["getId", "setId", "setName"]);

        let text = &planned[0].text;
        let get_id = text.find("getId").unwrap();
        let set_id = text.find("setId").unwrap();
        let set_name = text.find("setName(string $name)").unwrap();
        assert!(get_id < set_id && set_id < set_name);
        assert!(!text.contains("function getName"));
    }

    #[test]
    fn test_nothing_missing_plans_nothing() {
        let source = "class Foo {\n    private int $id;\n}";
        let text = SourceText::new(source);
        let planner = EditPlanner::new(AccessorKinds::getters_only(), 4);

        let mut class = foo(0, 2);
        class.method_names.push("getid".to_string());

        assert!(planner.plan_edits(&[class], &text).is_empty());
    }

    #[test]
    fn test_tab_size() {
        let source = "class Foo {\n  private int $id;\n}";
        let text = SourceText::new(source);
        let planner = EditPlanner::new(AccessorKinds::getters_only(), 2);

        let planned = planner.plan_edits(&[foo(0, 2)], &text);
        assert_eq!(
            planned[0].text,
            "\n\n  public function getId() {\n    return $this->id;\n  }\n"
        );
    }

    #[test]
    fn test_edit_message() {
        let source = "class Foo {\n    private int $id;\n}";
        let text = SourceText::new(source);
        let planner = EditPlanner::new(AccessorKinds::both(), 4);

        let planned = planner.plan_edits(&[foo(0, 2)], &text);
        let edit = planned[0].to_edit(&text, FileId::zero());
        assert_eq!(edit.message, "Generate getId, setId in Foo");
        assert!(edit.is_insertion());
        assert_eq!(planned[0].summary().line, 2);
    }

    #[test]
    fn test_single_line_class_tight_brace() {
        let source = "class Foo {private $a;}";
        let text = SourceText::new(source);
        let planner = EditPlanner::new(AccessorKinds::getters_only(), 4);

        let mut class = ClassModel::new("Foo", 0, 0);
        class.end_column = 22;
        class.properties.push(PropertyModel::new("a", None));

        let planned = planner.plan_edits(&[class], &text);
        assert_eq!(planned[0].insert_at, InsertAt::Point(TextPosition::new(0, 22)));
        assert_eq!(
            apply(source, &planned),
            "class Foo {private $a;\n\n    public function getA() {\n        return $this->a;\n    }\n}"
        );
    }

    #[test]
    fn test_crlf_document_keeps_its_line_ending() {
        let source = "<?php\r\nclass Foo {\r\n    private int $id;\r\n\r\n}\r\n";
        let text = SourceText::new(source);
        let planner = EditPlanner::new(AccessorKinds::getters_only(), 4);

        let planned = planner.plan_edits(&[foo(1, 4)], &text);
        assert_eq!(
            planned[0].text,
            "\r\n    public function getId() {\r\n        return $this->id;\r\n    }\r\n"
        );

        let result = apply(source, &planned);
        assert_eq!(result.matches('\n').count(), result.matches("\r\n").count());
    }
}
