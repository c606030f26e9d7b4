//! Types for skeleton extraction

/// Result of skeletonizing a file or snippet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkeletonResult {
    /// The skeletonized content
    pub content: String,
    /// Line count of the input
    pub original_lines: usize,
    /// Line count of the skeleton
    pub skeleton_lines: usize,
}

impl SkeletonResult {
    /// Create a new skeleton result, counting lines of both sides
    pub fn new(original: &str, content: String) -> Self {
        let original_lines = original.lines().count();
        let skeleton_lines = content.lines().count();
        Self {
            content,
            original_lines,
            skeleton_lines,
        }
    }
}
