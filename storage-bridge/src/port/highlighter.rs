/// Syntax-highlighting capability handed to the host's markdown renderer.
pub trait SyntaxHighlighter: Send + Sync {
    /// Short identifier, e.g. for logs.
    fn name(&self) -> &str;

    /// Render `code` as highlighted markup. `language` is the fence tag, if any.
    fn highlight(&self, code: &str, language: Option<&str>) -> String;
}
