/// This is what the `md2src` extraction scan produces, one per matched
/// heading + code-block pair, in document order
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFile {
    pub rel_path: String,
    pub language: String,
    pub content: String,
}
