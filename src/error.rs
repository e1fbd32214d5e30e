use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::content::Slug;

/// Errors raised while turning a raw article file into a record or while
/// adding it to the store. One failing article never aborts the others.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no metadata header found in {}", .file.display())]
    MissingHeader { file: PathBuf },

    #[error("metadata header of {} is missing the {field} field", .file.display())]
    MissingField { field: &'static str, file: PathBuf },

    #[error("could not parse date '{value}' in {}: {reason}", .file.display())]
    InvalidDate {
        value: String,
        reason: String,
        file: PathBuf,
    },

    #[error("end of comment in the header is missing in {}", .file.display())]
    UnterminatedComment { file: PathBuf },

    #[error("duplicate slug '{slug}': {} was loaded first, {} rejected", .kept.display(), .rejected.display())]
    DuplicateSlug {
        slug: Slug,
        kept: PathBuf,
        rejected: PathBuf,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
