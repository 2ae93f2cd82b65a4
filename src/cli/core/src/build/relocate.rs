/* src/cli/core/src/build/relocate.rs */

// Hoists `//!` documentation lines (license, version banners) above the bundle body.

use super::types::CommentMode;

pub const DOC_MARKER: &str = "//!";

fn is_doc_comment(line: &str) -> bool {
  line.trim().starts_with(DOC_MARKER)
}

/// Move doc comments to the top, trimmed and in original order, followed by a
/// blank line and the remaining lines. In `MainOnly` mode a line equal to
/// `locale_marker` and the doc comment right after it are dropped.
pub fn relocate(text: &str, mode: CommentMode, locale_marker: &str) -> String {
  if mode == CommentMode::Keep {
    return text.to_string();
  }

  let mut comments: Vec<&str> = Vec::new();
  let mut rest: Vec<&str> = Vec::new();
  let mut skip_next = false;

  for line in text.split('\n') {
    let doc = is_doc_comment(line);
    let pending_skip = std::mem::take(&mut skip_next);

    if doc && mode == CommentMode::MainOnly {
      if pending_skip {
        // Consumes the slot even if this line is another marker.
        continue;
      }
      if line.trim() == locale_marker {
        skip_next = true;
        continue;
      }
    }

    if doc {
      comments.push(line.trim());
    } else {
      rest.push(line);
    }
  }

  let mut out = comments;
  out.push("");
  out.extend(rest);
  out.join("\n")
}
