//! Branch and ref naming
//!
//! Branch names follow `{work-item-type}/{work-item-id}/{slug}`. Pull request
//! creation parses the ID back out of this shape.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Maximum slug length after sanitization
pub const MAX_SLUG_LEN: usize = 50;

/// Slug used when a title sanitizes to nothing
pub const FALLBACK_SLUG: &str = "work-item";

static SLUG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("SLUG_PATTERN regex should compile")
});

static WORK_ITEM_REF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z-]+/(\d+)/").expect("WORK_ITEM_REF_PATTERN regex should compile")
});

/// Turn free text (usually a work item title) into a branch-safe slug
///
/// Never fails: input that sanitizes to nothing yields [`FALLBACK_SLUG`].
/// Non-ASCII letters and emoji are dropped, not transliterated.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();

    // Whitespace/underscore runs become one hyphen, everything outside
    // [a-z0-9-] is dropped, hyphen runs collapse.
    let mut slug = String::with_capacity(lowered.len());
    let mut in_separator_run = false;
    for c in lowered.chars() {
        if c.is_ascii_whitespace() || c == '_' {
            if !in_separator_run {
                slug.push('-');
                in_separator_run = true;
            }
            continue;
        }
        in_separator_run = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            if c == '-' && slug.ends_with('-') {
                continue;
            }
            slug.push(c);
        }
    }

    // Deleting a character can bring two hyphens together ("a - b" -> "a---b"
    // -> "a-b"), so collapse once more over the whole string.
    let mut collapsed = String::with_capacity(slug.len());
    for c in slug.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }

    let mut result = collapsed.trim_matches('-').to_string();

    if result.len() > MAX_SLUG_LEN {
        // Only ASCII remains at this point, so byte truncation is char-safe
        result.truncate(MAX_SLUG_LEN);
        result = result.trim_end_matches('-').to_string();
    }

    if result.is_empty() {
        return FALLBACK_SLUG.to_string();
    }
    result
}

/// Check a user-supplied branch description against the slug grammar
pub fn is_valid_slug(description: &str) -> bool {
    SLUG_PATTERN.is_match(description)
}

/// Extract the work item ID from a branch named `{type}/{id}/...`
///
/// Returns 0 when the name does not match. The match is anchored at the
/// start, requires a lowercase type segment and a slash after the digits,
/// so `refs/heads/...` prefixes and `type/123` without a trailing segment
/// both yield 0.
pub fn extract_work_item_id(branch_name: &str) -> u32 {
    WORK_ITEM_REF_PATTERN
        .captures(branch_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Normalize a tracker work item type for use as the first branch segment
///
/// "User Story" becomes "user-story".
pub fn normalize_work_item_type(work_item_type: &str) -> String {
    work_item_type.to_lowercase().replace(' ', "-")
}

/// Render `{type}/{id}/{slug}` without validating the parts
pub fn compose_branch_name(work_item_type: &str, work_item_id: u32, slug: &str) -> String {
    format!("{work_item_type}/{work_item_id}/{slug}")
}

/// Prefix a branch with `refs/heads/` unless it is already a full ref
pub fn format_ref_name(branch: &str) -> String {
    if branch.starts_with("refs/") {
        branch.to_string()
    } else {
        format!("refs/heads/{branch}")
    }
}

/// The parts of a work item branch name, built fresh per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchDescriptor {
    pub work_item_type: String,
    pub work_item_id: u32,
    pub slug: String,
}

impl BranchDescriptor {
    /// Descriptor with a slug derived from the work item title
    pub fn from_title(work_item_type: &str, work_item_id: u32, title: &str) -> Self {
        Self {
            work_item_type: normalize_work_item_type(work_item_type),
            work_item_id,
            slug: generate_slug(title),
        }
    }

    /// Descriptor with a caller-supplied slug, already checked by [`is_valid_slug`]
    pub fn with_slug(work_item_type: &str, work_item_id: u32, slug: &str) -> Self {
        Self {
            work_item_type: normalize_work_item_type(work_item_type),
            work_item_id,
            slug: slug.to_string(),
        }
    }
}

impl fmt::Display for BranchDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&compose_branch_name(
            &self.work_item_type,
            self.work_item_id,
            &self.slug,
        ))
    }
}
