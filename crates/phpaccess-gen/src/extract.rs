//! Class metadata extraction
//!
//! Walks a parsed PHP program and builds a [`ClassModel`] for every class that
//! declares at least one property with the requested visibility.
//!
//! ```php
//! class Foo {
//!     private int $id;          // modeled as (id, "int")
//!     private $a, $b;           // only $a is modeled
//!     public $label;            // skipped under the private filter
//!
//!     public function getId() {} // recorded as a method name
//! }
//! ```

use bumpalo::Bump;
use mago_database::file::FileId;
use mago_span::HasSpan;
use mago_syntax::ast::*;
use phpaccess_core::{visit, SourceText, Visitor};
use tracing::debug;

use crate::error::GenerateError;
use crate::model::{ClassModel, PropertyModel};
use crate::options::{ParserConfig, Visibility};

/// What extraction found in one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassExtraction {
    /// No class declaration anywhere in the file
    NoClassesFound,
    /// Classes exist but none declares a qualifying property
    NoQualifyingProperties,
    /// Classes with at least one qualifying property, in source order
    Classes(Vec<ClassModel>),
}

impl ClassExtraction {
    /// Turn the empty outcomes into their user-facing errors
    pub fn into_classes(self, visibility: Visibility) -> Result<Vec<ClassModel>, GenerateError> {
        match self {
            ClassExtraction::NoClassesFound => Err(GenerateError::NoClassesFound),
            ClassExtraction::NoQualifyingProperties => {
                Err(GenerateError::NoQualifyingProperties { visibility })
            }
            ClassExtraction::Classes(classes) => Ok(classes),
        }
    }
}

/// Builds class models from PHP source
#[derive(Debug, Clone, Copy)]
pub struct ClassExtractor {
    visibility: Visibility,
}

impl ClassExtractor {
    pub fn new(visibility: Visibility) -> Self {
        Self { visibility }
    }

    /// Parse `source` and extract its classes
    ///
    /// A parse error fails the whole extraction; the partial tree is discarded.
    pub fn extract_source(
        &self,
        source: &str,
        config: &ParserConfig,
    ) -> Result<ClassExtraction, GenerateError> {
        let arena = Bump::new();
        let file_id = FileId::new(config.file_name.as_str());
        let (program, parse_error) =
            mago_syntax::parser::parse_file_content(&arena, file_id, source);

        if let Some(error) = parse_error {
            debug!(file = %config.file_name, %error, "parse failed");
            return Err(GenerateError::ParseFailure {
                message: error.to_string(),
            });
        }

        Ok(self.extract(program, source))
    }

    /// Extract classes from an already parsed program
    pub fn extract<'a>(&self, program: &Program<'a>, source: &str) -> ClassExtraction {
        let mut collector = ClassCollector {
            visibility: self.visibility,
            lines: SourceText::new(source),
            classes_seen: 0,
            classes: Vec::new(),
        };
        visit(&mut collector, program, source);

        debug!(
            classes_seen = collector.classes_seen,
            qualifying = collector.classes.len(),
            visibility = %self.visibility,
            "extracted classes"
        );

        if collector.classes_seen == 0 {
            ClassExtraction::NoClassesFound
        } else if collector.classes.is_empty() {
            ClassExtraction::NoQualifyingProperties
        } else {
            ClassExtraction::Classes(collector.classes)
        }
    }
}

struct ClassCollector<'s> {
    visibility: Visibility,
    lines: SourceText<'s>,
    classes_seen: usize,
    classes: Vec<ClassModel>,
}

impl<'s> ClassCollector<'s> {
    fn get_text(&self, span: mago_span::Span) -> &'s str {
        &self.lines.text()[span.start.offset as usize..span.end.offset as usize]
    }

    fn qualifies(&self, property: &Property<'_>) -> bool {
        let modifiers = match property {
            Property::Plain(plain) => &plain.modifiers,
            Property::Hooked(hooked) => &hooked.modifiers,
        };

        let mut declared = None;
        for modifier in modifiers.iter() {
            match modifier {
                Modifier::Private(_) => declared = Some("private"),
                Modifier::Protected(_) => declared = Some("protected"),
                Modifier::Public(_) => declared = Some("public"),
                _ => {}
            }
        }

        match self.visibility {
            Visibility::Private => declared == Some("private"),
            // `var $x;` and bare typed declarations are public
            Visibility::Public => matches!(declared, None | Some("public")),
        }
    }

    fn property_model(&self, property: &Property<'_>) -> Option<PropertyModel> {
        // `private $a, $b;` yields only $a
        let (item, hint) = match property {
            Property::Plain(plain) => (plain.items.iter().next()?, plain.hint.as_ref()),
            Property::Hooked(hooked) => (&hooked.item, hooked.hint.as_ref()),
        };

        let name = item.variable().name.trim_start_matches('$');
        if name.is_empty() {
            return None;
        }

        let type_hint = hint.map(|hint| self.get_text(hint.span()).to_string());

        Some(PropertyModel::new(name, type_hint))
    }
}

impl<'a, 's> Visitor<'a> for ClassCollector<'s> {
    fn visit_class(&mut self, class: &Class<'a>, _source: &str) {
        self.classes_seen += 1;

        let mut properties = Vec::new();
        let mut method_names = Vec::new();

        for member in class.members.iter() {
            match member {
                ClassLikeMember::Property(property) => {
                    if !self.qualifies(property) {
                        continue;
                    }
                    if let Some(model) = self.property_model(property) {
                        properties.push(model);
                    }
                }
                ClassLikeMember::Method(method) => {
                    method_names.push(method.name.value.to_string());
                }
                _ => {}
            }
        }

        if properties.is_empty() {
            debug!(class = class.name.value, "no qualifying properties, skipping");
            return;
        }

        // bounded by the `class` keyword, which may sit above the name
        let start = self.lines.position_at(class.class.span().start.offset as usize);
        let end = self.lines.position_at(class.right_brace.start.offset as usize);

        let mut model = ClassModel::new(class.name.value, start.line, end.line);
        model.end_column = end.column;
        model.properties = properties;
        model.method_names = method_names;

        self.classes.push(model);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(source: &str, visibility: Visibility) -> ClassExtraction {
        ClassExtractor::new(visibility)
            .extract_source(source, &ParserConfig::default())
            .unwrap()
    }

    fn classes(source: &str) -> Vec<ClassModel> {
        match extract(source, Visibility::Private) {
            ClassExtraction::Classes(classes) => classes,
            other => panic!("expected classes, got {:?}", other),
        }
    }

    #[test]
    fn test_no_classes() {
        let source = r#"<?php
function helper() {
    return 1;
}
interface Shape {}
"#;
        assert_eq!(extract(source, Visibility::Private), ClassExtraction::NoClassesFound);
    }

    #[test]
    fn test_no_qualifying_properties() {
        let source = r#"<?php
class Foo {
    public $a;
    protected $b;

    public function run() {}
}
"#;
        assert_eq!(
            extract(source, Visibility::Private),
            ClassExtraction::NoQualifyingProperties
        );
    }

    #[test]
    fn test_basic_class() {
        let source = r#"<?php
class Foo {
    private int $id;
    private ?string $name = null;
    public $label;

    public function getName() {
        return $this->name;
    }
}
"#;
        let classes = classes(source);
        assert_eq!(classes.len(), 1);

        let foo = &classes[0];
        assert_eq!(foo.name, "Foo");
        assert_eq!(foo.start_line, 1);
        assert_eq!(foo.end_line, 9);
        assert_eq!(foo.end_column, 0);
        assert_eq!(
            foo.properties,
            vec![
                PropertyModel::new("id", Some("int".to_string())),
                PropertyModel::new("name", Some("?string".to_string())),
            ]
        );
        assert_eq!(foo.method_names, vec!["getName".to_string()]);
    }

    #[test]
    fn test_only_first_variable_of_statement() {
        let source = r#"<?php
class Pair {
    private $a, $b;
}
"#;
        let classes = classes(source);
        assert_eq!(classes[0].properties, vec![PropertyModel::new("a", None)]);
    }

    #[test]
    fn test_methods_recorded_regardless_of_visibility() {
        let source = r#"<?php
class Foo {
    private $x;

    private function getX() {}
    protected static function SETX($x) {}
}
"#;
        let classes = classes(source);
        assert_eq!(classes[0].method_names, vec!["getX", "SETX"]);
        assert!(classes[0].has_full_coverage());
    }

    #[test]
    fn test_classes_without_properties_are_dropped() {
        let source = r#"<?php
class Empty {
    public function run() {}
}

class Kept {
    private $value;
}
"#;
        let classes = classes(source);
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].name, "Kept");
        assert_eq!(classes[0].start_line, 5);
        assert_eq!(classes[0].end_line, 7);
    }

    #[test]
    fn test_public_filter() {
        let source = r#"<?php
class Dto {
    public string $title;
    var $legacy;
    private $secret;
}
"#;
        match extract(source, Visibility::Public) {
            ClassExtraction::Classes(classes) => {
                let names: Vec<&str> = classes[0]
                    .properties
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect();
                assert_eq!(names, vec!["title", "legacy"]);
            }
            other => panic!("expected classes, got {:?}", other),
        }
    }

    #[test]
    fn test_namespaced_class() {
        let source = r#"<?php
namespace App;

class Account {
    private float $balance;
}
"#;
        let classes = classes(source);
        assert_eq!(classes[0].name, "Account");
        assert_eq!(classes[0].start_line, 3);
    }

    #[test]
    fn test_parse_failure() {
        let source = "<?php\nclass Foo {\n    private $a\n";
        let result = ClassExtractor::new(Visibility::Private)
            .extract_source(source, &ParserConfig::default());

        assert!(matches!(result, Err(GenerateError::ParseFailure { .. })));
    }

    #[test]
    fn test_into_classes() {
        assert_eq!(
            ClassExtraction::NoClassesFound.into_classes(Visibility::Private),
            Err(GenerateError::NoClassesFound)
        );
        assert_eq!(
            ClassExtraction::NoQualifyingProperties.into_classes(Visibility::Public),
            Err(GenerateError::NoQualifyingProperties {
                visibility: Visibility::Public
            })
        );
    }

    #[test]
    fn test_start_line_is_class_keyword_line() {
        let source = "<?php\n#[Entity]\nfinal class\n    Order\n{\n    private $id;\n}\n";
        let classes = classes(source);

        assert_eq!(classes[0].name, "Order");
        assert_eq!(classes[0].start_line, 2);
        assert_eq!(classes[0].end_line, 6);
    }
}
