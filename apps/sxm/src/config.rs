//! # Content Configuration
//!
//! Loads a content bundle from a TOML file, or falls back to the built-in
//! questionnaire. Also hosts the path checks shared by every command that
//! touches the filesystem.

use std::path::{Path, PathBuf};
use sxm_core::{Content, ContentFile, SxmError};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of a content bundle (1 MB).
pub const MAX_CONTENT_FILE_SIZE: u64 = 1024 * 1024;

// =============================================================================
// PATH VALIDATION
// =============================================================================

/// Validate file size before reading.
pub fn validate_file_size(path: &Path, max_size: u64) -> Result<(), SxmError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| SxmError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(SxmError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve an input path, rejecting anything that is not an existing regular file.
pub fn validate_file_path(path: &Path) -> Result<PathBuf, SxmError> {
    let canonical = path.canonicalize().map_err(|e| {
        SxmError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(SxmError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Resolve an output path: the parent directory must exist.
pub fn validate_output_path(path: &Path) -> Result<PathBuf, SxmError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        SxmError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(SxmError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| SxmError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// CONTENT LOADING
// =============================================================================

/// Parse and validate a TOML content bundle.
pub fn parse_content(text: &str) -> Result<Content, SxmError> {
    let file: ContentFile =
        toml::from_str(text).map_err(|e| SxmError::SerializationError(e.to_string()))?;
    Content::from_file(file)
}

/// Load the content bundle at `path`, or the built-in one when `None`.
pub fn load_content(path: Option<&Path>) -> Result<Content, SxmError> {
    let Some(path) = path else {
        return Ok(Content::builtin().clone());
    };

    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_CONTENT_FILE_SIZE)?;

    let text = std::fs::read_to_string(&validated)
        .map_err(|e| SxmError::IoError(format!("Read content file: {}", e)))?;
    let content = parse_content(&text)?;

    tracing::info!(
        path = %validated.display(),
        questions = content.question_count(),
        "Loaded content bundle"
    );
    Ok(content)
}
