// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output filename assignment.
//
// Every layer gets `<base>.<format>`, where `<base>` is the final path
// component of the layer filename without a trailing `.svg`. Repeats of a
// base get `_2`, `_3`, ... inserted before the base's last dot (or appended
// when it has none), so names stay unique within one export.

use std::collections::{HashMap, HashSet};

/// Hands out unique output file names for one export run.
#[derive(Debug, Default)]
pub struct FileNamer {
    occurrences: HashMap<String, u32>,
    issued: HashSet<String>,
}

impl FileNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the output name for `filename`, encoded as `format`.
    pub fn assign(&mut self, filename: &str, format: &str) -> String {
        let base = strip_vector_extension(final_component(filename));
        let base = if base.is_empty() || base == "." || base == ".." {
            FALLBACK_BASE
        } else {
            base
        };
        let count = self.occurrences.entry(base.to_owned()).or_insert(0);

        loop {
            *count += 1;
            let stem = if *count == 1 {
                base.to_owned()
            } else {
                with_suffix(base, *count)
            };
            let name = format!("{stem}.{format}");
            // A literal input like `a_2.svg` can collide with a generated name.
            if self.issued.insert(name.clone()) {
                return name;
            }
        }
    }
}

/// Base used when a layer filename has no usable final component.
const FALLBACK_BASE: &str = "layer";

/// Directory parts never reach the output name.
fn final_component(filename: &str) -> &str {
    filename
        .rsplit(['/', '\\', ':'])
        .next()
        .unwrap_or(filename)
}

fn strip_vector_extension(filename: &str) -> &str {
    match filename.len().checked_sub(4) {
        Some(cut)
            if filename.is_char_boundary(cut)
                && filename[cut..].eq_ignore_ascii_case(".svg") =>
        {
            &filename[..cut]
        }
        _ => filename,
    }
}

fn with_suffix(base: &str, n: u32) -> String {
    match base.rfind('.') {
        Some(dot) => format!("{}_{n}{}", &base[..dot], &base[dot..]),
        None => format!("{base}_{n}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assign_all(filenames: &[&str], format: &str) -> Vec<String> {
        let mut namer = FileNamer::new();
        filenames.iter().map(|f| namer.assign(f, format)).collect()
    }

    #[test]
    fn repeated_names_get_numbered() {
        assert_eq!(
            assign_all(&["a.svg", "a.svg", "a.svg"], "pwms"),
            vec!["a.pwms", "a_2.pwms", "a_3.pwms"]
        );
    }

    #[test]
    fn suffix_goes_before_last_dot_of_base() {
        assert_eq!(
            assign_all(&["board-F.Cu.svg", "board-F.Cu.svg"], "pwms"),
            vec!["board-F.Cu.pwms", "board-F_2.Cu.pwms"]
        );
    }

    #[test]
    fn names_without_extension() {
        assert_eq!(
            assign_all(&["mask", "mask", "MASK.SVG"], "ctb"),
            vec!["mask.ctb", "mask_2.ctb", "MASK.ctb"]
        );
    }

    #[test]
    fn distinct_names_are_untouched() {
        assert_eq!(
            assign_all(&["top.svg", "bottom.svg"], "pwms"),
            vec!["top.pwms", "bottom.pwms"]
        );
    }

    #[test]
    fn literal_suffix_does_not_collide() {
        let names = assign_all(&["a_2.svg", "a.svg", "a.svg"], "pwms");
        assert_eq!(names, vec!["a_2.pwms", "a.pwms", "a_3.pwms"]);
    }

    #[test]
    fn directory_parts_are_dropped() {
        assert_eq!(
            assign_all(
                &["../escaped.svg", "/etc/escaped.svg", "..\\a.b\\escaped.svg"],
                "pwms"
            ),
            vec!["escaped.pwms", "escaped_2.pwms", "escaped_3.pwms"]
        );
    }

    #[test]
    fn suffix_ignores_dots_in_directories() {
        assert_eq!(
            assign_all(&["../a", "../a"], "pwms"),
            vec!["a.pwms", "a_2.pwms"]
        );
    }

    #[test]
    fn empty_names_fall_back() {
        assert_eq!(
            assign_all(&["..", "out/", ".svg"], "pwms"),
            vec!["layer.pwms", "layer_2.pwms", "layer_3.pwms"]
        );
    }

    #[test]
    fn stripped_and_bare_names_share_a_base() {
        assert_eq!(
            assign_all(&["a", "a.svg"], "pwms"),
            vec!["a.pwms", "a_2.pwms"]
        );
    }
}
