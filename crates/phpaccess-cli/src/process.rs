//! File processing logic for phpaccess

use anyhow::{bail, Context, Result};
use bumpalo::Bump;
use mago_database::file::FileId;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use phpaccess_gen::{generate, GenerateError, GenerateOptions, Generation, ParserConfig, Picker, PlannedEdit};

/// Result of processing a single file
pub struct ProcessResult {
    /// Edits that were planned, one per class
    pub planned: Vec<PlannedEdit>,
    /// Original source code
    pub old_source: String,
    /// New source code after edits
    pub new_source: String,
}

/// How a run over one file ended
pub enum FileResult {
    /// Edits are ready to be reported or written
    Edited(ProcessResult),
    /// The operator dismissed the selection
    Cancelled,
    /// A terminal outcome the operator should hear about
    Stopped(GenerateError),
}

/// Run the generator over one PHP file, without writing anything
pub async fn process_file<P: Picker + ?Sized>(
    path: &Path,
    options: &GenerateOptions,
    picker: &mut P,
) -> Result<FileResult> {
    if !path.is_file() {
        debug!(path = %path.display(), "not a file");
        return Ok(FileResult::Stopped(GenerateError::NoActiveDocument));
    }

    let source_code = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let options = options
        .clone()
        .with_parser(ParserConfig::new(path.to_string_lossy()));

    let generation = match generate(&source_code, &options, picker).await {
        Ok(generation) => generation,
        Err(error) => return Ok(FileResult::Stopped(error)),
    };

    match generation {
        Generation::Cancelled => Ok(FileResult::Cancelled),
        Generation::Edited {
            planned, output, ..
        } => {
            if !parses(&output, path) {
                bail!(
                    "Generated code for {} does not parse, file left unchanged",
                    path.display()
                );
            }

            Ok(FileResult::Edited(ProcessResult {
                planned,
                old_source: source_code,
                new_source: output,
            }))
        }
    }
}

/// Verify PHP source still parses
fn parses(source: &str, path: &Path) -> bool {
    let arena = Bump::new();
    let file_id = FileId::new(path.to_string_lossy().as_ref());
    let (_, parse_error) = mago_syntax::parser::parse_file_content(&arena, file_id, source);

    parse_error.is_none()
}

/// Replace the file's content in one step
///
/// The content goes to a temporary file next to `path` which is then renamed
/// over it, so readers see either the old or the new file.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    temp.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    if let Ok(metadata) = std::fs::metadata(path) {
        // keep the original mode; failure here is not worth aborting for
        let _ = std::fs::set_permissions(temp.path(), metadata.permissions());
    }

    temp.persist(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    info!(path = %path.display(), "file updated");
    Ok(())
}
