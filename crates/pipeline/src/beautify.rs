//! JavaScript beautification seam.

/// Best-effort reformatting of a document before extraction.
///
/// Returning `None` means "could not beautify"; the caller then uses the
/// original text unchanged.
pub trait Beautify: Send + Sync {
    fn beautify(&self, text: &str) -> Option<String>;
}

/// Leaves documents untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Beautify for Passthrough {
    fn beautify(&self, _text: &str) -> Option<String> {
        None
    }
}
