//! Bundle registration in the application kernel.
//!
//! Finds the `$bundles = [...]` (or `array(...)`) literal inside
//! `registerBundles()` and inserts one `new Vendor\FooBundle(),` line after
//! its last entry. Everything else in the file is left as is.

use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::fs;

#[derive(Debug, Clone)]
pub struct KernelManipulator {
    file: PathBuf,
}

impl KernelManipulator {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        KernelManipulator { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Whether `class` is instantiated inside the bundle array.
    pub fn is_bundle_registered(&self, class: &str) -> Result<bool> {
        let class = class.trim().trim_start_matches('\\');
        let content = fs::read_file(&self.file)?;
        let body = self.bundle_array(&content)?;
        Ok(contains_instantiation(&content[body], class))
    }

    /// Add `new <class>(),` to the bundle array.
    pub fn register_bundle(&self, class: &str) -> Result<()> {
        let class = class.trim().trim_start_matches('\\');
        let content = fs::read_file(&self.file)?;
        let body = self.bundle_array(&content)?;

        if contains_instantiation(&content[body.clone()], class) {
            return Err(Error::BundleAlreadyRegistered(class.to_string()));
        }

        let entries = &content[body.clone()];
        let entries_end = body.start + entries.trim_end().len();
        let mut updated = String::with_capacity(content.len() + class.len() + 32);

        match code_end(entries) {
            Some(end) => {
                let last = body.start + end;
                let indent = line_indent(&content, last);
                updated.push_str(&content[..last]);
                if !content[..last].ends_with(',') {
                    updated.push(',');
                }
                updated.push_str(&content[last..entries_end]);
                updated.push_str(&format!("\n{indent}new {class}(),"));
            }
            None => {
                // Empty, or comments only.
                let indent = if entries_end > body.start {
                    line_indent(&content, entries_end).to_string()
                } else {
                    format!("{}    ", line_indent(&content, body.end))
                };
                updated.push_str(&content[..entries_end]);
                updated.push_str(&format!("\n{indent}new {class}(),"));
            }
        }
        updated.push_str(&content[entries_end..]);

        fs::write_atomic(&self.file, &updated)?;
        tracing::info!(file = %self.file.display(), class, "bundle registered in kernel");
        Ok(())
    }

    /// Byte range of the bundle array's contents, between its brackets.
    fn bundle_array(&self, content: &str) -> Result<Range<usize>> {
        locate_bundle_array(content).ok_or_else(|| Error::KernelPatternNotFound(self.file.clone()))
    }
}

fn locate_bundle_array(content: &str) -> Option<Range<usize>> {
    let method = content.find("function registerBundles")?;
    let mut from = method;

    while let Some(pos) = content[from..].find("$bundles") {
        let after_var = from + pos + "$bundles".len();
        from = after_var;

        let rest = &content[after_var..];
        let Some(rest) = rest.trim_start().strip_prefix('=') else {
            continue;
        };
        let rest = rest.trim_start();
        let open = if rest.starts_with('[') {
            content.len() - rest.len()
        } else if let Some(after_kw) = rest.strip_prefix("array") {
            let after_kw = after_kw.trim_start();
            if !after_kw.starts_with('(') {
                continue;
            }
            content.len() - after_kw.len()
        } else {
            continue;
        };

        let close = matching_bracket(content, open)?;
        return Some(open + 1..close);
    }
    None
}

/// Index of the bracket closing the one at `open`, skipping strings and comments.
fn matching_bracket(content: &str, open: usize) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        if let Some(len) = comment_len(bytes, i) {
            i += len;
            continue;
        }
        match bytes[i] {
            b'[' | b'(' => depth += 1,
            b']' | b')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            b'\'' | b'"' => {
                i += string_len(bytes, i);
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Offset just past the last code byte of `body`, ignoring comments and whitespace.
fn code_end(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut end = None;
    let mut i = 0;

    while i < bytes.len() {
        if let Some(len) = comment_len(bytes, i) {
            i += len;
            continue;
        }
        if bytes[i] == b'\'' || bytes[i] == b'"' {
            i += string_len(bytes, i);
            end = Some(i);
            continue;
        }
        if !bytes[i].is_ascii_whitespace() {
            end = Some(i + 1);
        }
        i += 1;
    }
    end
}

/// Length of the `//`, `#` or `/* */` comment starting at `i`. Line comments
/// stop before their newline. `#[` opens an attribute, not a comment.
fn comment_len(bytes: &[u8], i: usize) -> Option<usize> {
    let rest = &bytes[i..];
    if rest.starts_with(b"//") || (rest.starts_with(b"#") && !rest.starts_with(b"#[")) {
        Some(rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len()))
    } else if rest.starts_with(b"/*") {
        Some(
            rest[2..]
                .windows(2)
                .position(|w| w == b"*/")
                .map_or(rest.len(), |end| end + 4),
        )
    } else {
        None
    }
}

/// Length of the quoted string starting at `i`, quotes included.
fn string_len(bytes: &[u8], i: usize) -> usize {
    let quote = bytes[i];
    let mut j = i + 1;
    while j < bytes.len() && bytes[j] != quote {
        if bytes[j] == b'\\' {
            j += 1;
        }
        j += 1;
    }
    (j + 1).min(bytes.len()) - i
}

fn contains_instantiation(body: &str, class: &str) -> bool {
    let class = class.trim_start_matches('\\');
    let compact: String = body.split_whitespace().collect::<Vec<_>>().join(" ");
    compact.contains(&format!("new {class}("))
        || compact.contains(&format!("new \\{class}("))
        || compact.contains(&format!("new {class} ("))
}

fn current_line(content: &str, at: usize) -> &str {
    let start = content[..at].rfind('\n').map_or(0, |i| i + 1);
    &content[start..at]
}

fn line_indent(content: &str, at: usize) -> &str {
    let line = current_line(content, at);
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}
