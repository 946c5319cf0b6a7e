//! Path helpers shared by providers and project items.
//!
//! Logical paths always use `/`. Physical paths use whatever the host (or the
//! caller) says the directory separator is.
//!
//! `clean_utf8_path` is vendored and adapted from the `path-clean` crate,
//! <https://github.com/danreeves/path-clean>
//!
//! path-clean LICENSE-MIT:
//! Copyright (c) 2018 Dan Reeves
//!
//! Permission is hereby granted, free of charge, to any person obtaining a copy
//! of this software and associated documentation files (the "Software"), to deal
//! in the Software without restriction, including without limitation the rights
//! to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
//! copies of the Software, and to permit persons to whom the Software is
//! furnished to do so, subject to the following conditions:
//!
//! The above copyright notice and this permission notice shall be included in all
//! copies or substantial portions of the Software.
//!
//! THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
//! IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//! FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
//! AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
//! LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
//! OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
//! SOFTWARE.

use std::io;
use std::path::Component;

use camino::Utf8Path;
use camino::Utf8PathBuf;

/// The separator logical paths are written with.
pub const LOGICAL_SEPARATOR: char = '/';

/// The host's native directory separator.
pub const NATIVE_SEPARATOR: char = std::path::MAIN_SEPARATOR;

/// Rewrite a logical path into a relative path using `separator`.
///
/// Every `/` becomes `separator`, then a single leading separator is removed.
/// An empty input stays empty.
#[must_use]
pub fn normalize_separators(path: &str, separator: char) -> String {
    if path.is_empty() {
        return String::new();
    }

    let normalized: String = path
        .chars()
        .map(|c| if c == LOGICAL_SEPARATOR { separator } else { c })
        .collect();

    match normalized.strip_prefix(separator) {
        Some(rest) => rest.to_string(),
        None => normalized,
    }
}

/// Whether `c` separates directories on any platform we care about.
#[must_use]
pub fn is_separator(c: char) -> bool {
    c == '/' || c == '\\' || c == NATIVE_SEPARATOR
}

/// Strip `root` from the front of `physical`, then one separator.
///
/// The comparison is an exact, case-sensitive string prefix. If `root`
/// already ends in a separator nothing more is removed. Returns `None` when
/// `root` is not a prefix or when the match stops in the middle of a path
/// segment (`/data/app` against `/data/application/x`).
#[must_use]
pub fn strip_root<'a>(physical: &'a str, root: &str) -> Option<&'a str> {
    let rest = physical.strip_prefix(root)?;

    if root.ends_with(is_separator) {
        return Some(rest);
    }

    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if is_separator(c) => Some(chars.as_str()),
        None => Some(rest),
        Some(_) => None,
    }
}

/// Whether `path` is a usable logical path: non-empty and rooted at `/`.
#[must_use]
pub fn is_valid_logical_path(path: &str) -> bool {
    path.starts_with(LOGICAL_SEPARATOR)
}

/// Lexically resolve `.` and `..` components without touching the disk.
#[must_use]
pub fn clean_utf8_path(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Vec::new();

    for comp in path.as_std_path().components() {
        match comp {
            Component::CurDir => (),
            Component::ParentDir => match out.last() {
                Some(Component::RootDir) => (),
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                None | Some(Component::CurDir | Component::ParentDir | Component::Prefix(_)) => {
                    out.push(comp);
                }
            },
            comp => out.push(comp),
        }
    }

    if out.is_empty() {
        return Utf8PathBuf::from(".");
    }

    let cleaned: std::path::PathBuf = out.iter().collect();
    // Every component came from a UTF-8 path, so the rebuilt path is UTF-8 too.
    Utf8PathBuf::from_path_buf(cleaned)
        .unwrap_or_else(|lossy| Utf8PathBuf::from(lossy.to_string_lossy().into_owned()))
}

/// Canonicalize `path` on disk, without the `\\?\` prefix on Windows.
pub fn canonicalize_utf8(path: &Utf8Path) -> io::Result<Utf8PathBuf> {
    let canonical = path.as_std_path().canonicalize()?;
    #[cfg(windows)]
    let canonical = dunce::simplified(&canonical).to_path_buf();
    Utf8PathBuf::from_path_buf(canonical)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "non-UTF-8 path"))
}

/// Join a logical path onto a physical base and refuse anything that escapes it.
pub fn safe_join(base: &Utf8Path, name: &str) -> Result<Utf8PathBuf, SafeJoinError> {
    let relative = name.trim_start_matches(LOGICAL_SEPARATOR);
    let candidate = base.join(relative);
    let cleaned = clean_utf8_path(&candidate);

    if cleaned.starts_with(base) {
        Ok(cleaned)
    } else {
        Err(SafeJoinError::OutsideBase {
            base: base.to_path_buf(),
            attempted: name.to_string(),
            resolved: cleaned,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SafeJoinError {
    #[error("Path '{attempted}' would resolve to '{resolved}' which is outside base '{base}'")]
    OutsideBase {
        base: Utf8PathBuf,
        attempted: String,
        resolved: Utf8PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    mod normalize {
        use super::*;

        #[test]
        fn test_backslash_separator() {
            assert_eq!(
                normalize_separators("/Views/Home/Index.cshtml", '\\'),
                r"Views\Home\Index.cshtml"
            );
        }

        #[test]
        fn test_forward_slash_separator() {
            assert_eq!(
                normalize_separators("/Views/Home/Index.cshtml", '/'),
                "Views/Home/Index.cshtml"
            );
        }

        #[test]
        fn test_already_normalized_is_noop() {
            assert_eq!(
                normalize_separators(r"Views\Home\Index.cshtml", '\\'),
                r"Views\Home\Index.cshtml"
            );
            assert_eq!(
                normalize_separators("Views/Home/Index.cshtml", '/'),
                "Views/Home/Index.cshtml"
            );
        }

        #[test]
        fn test_only_one_leading_separator_removed() {
            assert_eq!(normalize_separators("//a/b", '/'), "/a/b");
        }

        #[test]
        fn test_empty() {
            assert_eq!(normalize_separators("", '\\'), "");
        }

        #[test]
        fn test_root_only() {
            assert_eq!(normalize_separators("/", '\\'), "");
        }
    }

    mod strip {
        use super::*;

        #[test]
        fn test_strips_root_and_separator() {
            assert_eq!(
                strip_root("/data/app/Views/Home/Index.cshtml", "/data/app"),
                Some("Views/Home/Index.cshtml")
            );
        }

        #[test]
        fn test_root_with_trailing_separator() {
            assert_eq!(
                strip_root("/data/app/Views/Index.cshtml", "/data/app/"),
                Some("Views/Index.cshtml")
            );
        }

        #[test]
        fn test_windows_style_root() {
            assert_eq!(
                strip_root(r"C:\site\Views\Index.cshtml", r"C:\site"),
                Some(r"Views\Index.cshtml")
            );
        }

        #[test]
        fn test_not_a_prefix() {
            assert_eq!(strip_root("/data/app/x.cshtml", "/other"), None);
        }

        #[test]
        fn test_partial_segment_is_not_a_match() {
            assert_eq!(strip_root("/data/application/x.cshtml", "/data/app"), None);
        }

        #[test]
        fn test_case_sensitive() {
            assert_eq!(strip_root("/Data/App/x.cshtml", "/data/app"), None);
        }

        #[test]
        fn test_exact_match_is_empty() {
            assert_eq!(strip_root("/data/app", "/data/app"), Some(""));
        }
    }

    #[test]
    fn test_valid_logical_paths() {
        assert!(is_valid_logical_path("/"));
        assert!(is_valid_logical_path("/Views/Index.cshtml"));
        assert!(!is_valid_logical_path(""));
        assert!(!is_valid_logical_path("Views/Index.cshtml"));
    }

    #[test]
    fn test_clean_removes_dots() {
        assert_eq!(
            clean_utf8_path(Utf8Path::new("hello/world/..")),
            Utf8PathBuf::from("hello")
        );
    }

    #[test]
    fn test_safe_join_allows_logical_path() {
        let base = Utf8Path::new("/site");
        assert_eq!(
            safe_join(base, "/Views/Home/Index.cshtml").unwrap(),
            Utf8PathBuf::from("/site/Views/Home/Index.cshtml")
        );
    }

    #[test]
    fn test_safe_join_blocks_parent_escape() {
        let base = Utf8Path::new("/site");
        assert!(safe_join(base, "/../../etc/passwd").is_err());
    }
}
