//! Marker-delimited insertion region.

use super::PatchError;
use std::ops::Range;

/// Default start marker: the opening tag of the projects grid.
pub const DEFAULT_START_MARKER: &str = r#"            <div class="projects-grid">"#;

/// Default end marker: the closing tag of the projects grid.
pub const DEFAULT_END_MARKER: &str = "            </div>";

/// The span of a document that holds generated content.
///
/// The region starts right after the first occurrence of the start marker
/// and ends right before the first occurrence of the end marker after it.
/// An end marker with leading whitespace only matches at the start of a line.
/// The markers themselves are preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionRegion {
    start_marker: String,
    end_marker: String,
}

impl Default for InsertionRegion {
    fn default() -> Self {
        Self::new(DEFAULT_START_MARKER, DEFAULT_END_MARKER)
    }
}

impl InsertionRegion {
    /// Creates a region from its two marker strings.
    pub fn new(start_marker: impl Into<String>, end_marker: impl Into<String>) -> Self {
        Self {
            start_marker: start_marker.into(),
            end_marker: end_marker.into(),
        }
    }

    /// Returns the start marker.
    pub fn start_marker(&self) -> &str {
        &self.start_marker
    }

    /// Returns the end marker.
    pub fn end_marker(&self) -> &str {
        &self.end_marker
    }

    /// Finds the byte range between the markers.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::RegionNotFound`] naming the marker that is missing.
    pub fn locate(&self, content: &str) -> Result<Range<usize>, PatchError> {
        let start = content
            .find(&self.start_marker)
            .map(|index| index + self.start_marker.len())
            .ok_or_else(|| PatchError::RegionNotFound {
                marker: self.start_marker.clone(),
            })?;

        let end = self
            .find_end(content, start)
            .ok_or_else(|| PatchError::RegionNotFound {
                marker: self.end_marker.clone(),
            })?;

        Ok(start..end)
    }

    /// Returns `content` with the region replaced by `body`.
    ///
    /// The result is `prefix + "\n" + body + "\n" + suffix`, where the prefix
    /// ends with the start marker and the suffix begins with the end marker.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::RegionNotFound`] if either marker is missing.
    pub fn splice(&self, content: &str, body: &str) -> Result<String, PatchError> {
        let range = self.locate(content)?;

        let mut patched =
            String::with_capacity(content.len() - range.len() + body.len() + 2);
        patched.push_str(&content[..range.start]);
        patched.push('\n');
        patched.push_str(body);
        patched.push('\n');
        patched.push_str(&content[range.end..]);

        Ok(patched)
    }

    // An indented end marker is a substring of any deeper-indented line, such
    // as the closing tags of generated cards, so it only matches line-leading.
    fn find_end(&self, content: &str, from: usize) -> Option<usize> {
        if self.end_marker.is_empty() {
            return None;
        }

        let line_anchored = self.end_marker.starts_with(char::is_whitespace);
        if !line_anchored {
            return content[from..].find(&self.end_marker).map(|i| from + i);
        }

        let step = self.end_marker.chars().next().map_or(1, char::len_utf8);
        let mut offset = from;

        while let Some(found) = content[offset..].find(&self.end_marker) {
            let index = offset + found;
            if index == 0 || content.as_bytes()[index - 1] == b'\n' {
                return Some(index);
            }
            offset = index + step;
        }

        None
    }
}
