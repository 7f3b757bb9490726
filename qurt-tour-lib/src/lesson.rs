/// One unit of the curriculum.
///
/// Lessons are handed out by shared reference only, so once a catalog is built
/// nothing can change them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    title: String,
    content: String,
    code: String,
}

impl Lesson {
    pub fn new(title: impl Into<String>, content: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            code: code.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The explanatory text. It is rendered as is, never interpreted.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The starter program the code buffer is reset to.
    pub fn code(&self) -> &str {
        &self.code
    }
}
