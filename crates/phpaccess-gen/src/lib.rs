//! phpaccess-gen: Getter/setter generation for PHP classes
//!
//! Pipeline:
//! - `extract`: find classes with qualifying properties
//! - `select`: drop fully covered classes, confirm the rest with a picker
//! - `plan`: compute insertion points and method text
//! - `generate()`: run all of the above and apply the batch in memory
//!
//! Available actions:
//! - getters-setters: Generate missing getters and setters
//! - getters: Generate missing getters
//! - setters: Generate missing setters

pub mod action;
pub mod error;
pub mod extract;
pub mod model;
pub mod options;
pub mod plan;
pub mod render;
pub mod select;

pub use action::Action;
pub use error::{GenerateError, Severity};
pub use extract::{ClassExtraction, ClassExtractor};
pub use model::{ClassModel, PropertyModel};
pub use options::{
    resolve_tab_size, AccessorKinds, GenerateOptions, ParserConfig, Visibility, DEFAULT_TAB_SIZE,
};
pub use plan::{resolve_edits, EditPlanner, InsertAt, PlannedEdit, PlannedEditSummary};
pub use select::{AcceptAll, PendingSelection, PickItem, Picker, SelectionCoordinator, SelectionRequest};

use mago_database::file::FileId;
use phpaccess_core::{apply_edits, Edit, SourceText};
use tracing::debug;

/// Result of a run that did not end in an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// The picker was dismissed or nothing was chosen; the source is untouched
    Cancelled,
    /// Edits were planned and applied to an in-memory copy of the source
    Edited {
        planned: Vec<PlannedEdit>,
        edits: Vec<Edit>,
        output: String,
    },
}

/// Run one action over `source`
///
/// Nothing is applied until every edit for every selected class has been
/// computed; the batch then lands as a whole or not at all.
pub async fn generate<P: Picker + ?Sized>(
    source: &str,
    options: &GenerateOptions,
    picker: &mut P,
) -> Result<Generation, GenerateError> {
    let classes = ClassExtractor::new(options.visibility)
        .extract_source(source, &options.parser)?
        .into_classes(options.visibility)?;

    let coordinator = SelectionCoordinator::new(options.kinds);
    let selected = match coordinator.select_targets(classes, picker).await {
        Ok(selected) if selected.is_empty() => return Ok(Generation::Cancelled),
        Ok(selected) => selected,
        Err(GenerateError::SelectionCancelled) => {
            debug!("selection dismissed");
            return Ok(Generation::Cancelled);
        }
        Err(error) => return Err(error),
    };

    let text = SourceText::new(source);
    let planned = EditPlanner::new(options.kinds, options.tab_size).plan_edits(&selected, &text);
    let file_id = FileId::new(options.parser.file_name.as_str());
    let edits = resolve_edits(&planned, &text, file_id);
    let output = apply_edits(source, &edits)?;

    debug!(classes = selected.len(), edits = edits.len(), "generation complete");

    Ok(Generation::Edited {
        planned,
        edits,
        output,
    })
}
