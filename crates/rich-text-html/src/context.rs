use crate::errors::RenderError;
use crate::output::RenderWarning;

/// Walk state shared by normalization and rendering: where we are in the tree
/// and what has gone wrong so far.
#[derive(Debug)]
pub(crate) struct RenderContext {
    max_depth: usize,
    path: Vec<usize>,
    warnings: Vec<RenderWarning>,
}

impl RenderContext {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            path: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.path.len()
    }

    pub(crate) fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Runs `f` with the path extended by child `index`.
    pub(crate) fn child<T>(&mut self, index: usize, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(index);
        let result = f(self);
        self.path.pop();
        result
    }

    pub(crate) fn record(&mut self, error: RenderError) {
        let pointer = self.pointer();
        tracing::debug!(code = ?error.code(), path = ?pointer, %error, "rich text render warning");
        self.warnings.push(RenderWarning {
            code: error.code(),
            message: Some(error.to_string()),
            path: pointer,
        });
    }

    pub(crate) fn into_warnings(self) -> Vec<RenderWarning> {
        self.warnings
    }

    fn pointer(&self) -> Option<String> {
        if self.path.is_empty() {
            return None;
        }
        Some(
            self.path
                .iter()
                .map(|index| format!("/content/{index}"))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_tracks_nested_children() {
        let mut ctx = RenderContext::new(8);
        ctx.child(0, |ctx| {
            ctx.child(2, |ctx| ctx.record(RenderError::Conversion("boom".into())))
        });
        ctx.record(RenderError::UnsupportedInput("number"));
        let warnings = ctx.into_warnings();
        assert_eq!(warnings[0].path.as_deref(), Some("/content/0/content/2"));
        assert!(warnings[1].path.is_none());
    }

    #[test]
    fn depth_follows_path() {
        let mut ctx = RenderContext::new(8);
        assert_eq!(ctx.depth(), 0);
        let inner = ctx.child(1, |ctx| ctx.child(0, |ctx| ctx.depth()));
        assert_eq!(inner, 2);
        assert_eq!(ctx.depth(), 0);
    }
}
