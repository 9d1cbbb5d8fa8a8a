//! The annotation engine capability consumed by the scorers.

use crate::edit::Edit;

/// Parses sentences and extracts the edits turning one sentence into another.
///
/// Implementations must be deterministic: the scorers memoize both calls by
/// sentence content.
///
/// # Example
///
/// ```
/// use layered_gec::{Edit, EditAnnotator};
///
/// struct Whitespace;
///
/// impl EditAnnotator for Whitespace {
///     type Parse = Vec<String>;
///     type Error = std::convert::Infallible;
///
///     fn parse(&self, sentence: &str) -> Result<Self::Parse, Self::Error> {
///         Ok(sentence.split(' ').map(str::to_string).collect())
///     }
///
///     fn annotate(&self, _: &Self::Parse, _: &Self::Parse) -> Result<Vec<Edit>, Self::Error> {
///         Ok(Vec::new())
///     }
/// }
/// ```
pub trait EditAnnotator {
    /// Parsed representation of one sentence.
    type Parse;
    /// Failure raised by the engine; propagated to callers unchanged.
    type Error: std::error::Error + Send + Sync + 'static;

    fn parse(&self, sentence: &str) -> Result<Self::Parse, Self::Error>;

    /// Edits turning `source` into `target`, ordered by source position.
    fn annotate(
        &self,
        source: &Self::Parse,
        target: &Self::Parse,
    ) -> Result<Vec<Edit>, Self::Error>;
}

impl<A: EditAnnotator + ?Sized> EditAnnotator for Box<A> {
    type Parse = A::Parse;
    type Error = A::Error;

    fn parse(&self, sentence: &str) -> Result<Self::Parse, Self::Error> {
        (**self).parse(sentence)
    }

    fn annotate(
        &self,
        source: &Self::Parse,
        target: &Self::Parse,
    ) -> Result<Vec<Edit>, Self::Error> {
        (**self).annotate(source, target)
    }
}
