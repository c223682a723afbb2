//! Compact text form for sets of integers, e.g. residue numbers.

use std::collections::BTreeSet;

/// Render integers as comma-separated runs: `prefix` + start, and for runs
/// longer than one, `-` + end.
///
/// Duplicates collapse and input order does not matter:
/// `compress([9, 1, 2, 3, 10, 7], "A")` is `"A1-3,A7,A9-10"`.
/// Empty input gives an empty string.
pub fn compress<I>(ints: I, prefix: &str) -> String
where
    I: IntoIterator<Item = i32>,
{
    let sorted: BTreeSet<i32> = ints.into_iter().collect();
    let mut runs: Vec<String> = Vec::new();
    let mut values = sorted.into_iter();
    let Some(first) = values.next() else {
        return String::new();
    };

    let (mut start, mut end) = (first, first);
    for v in values {
        if end.checked_add(1) == Some(v) {
            end = v;
        } else {
            runs.push(render_run(prefix, start, end));
            (start, end) = (v, v);
        }
    }
    runs.push(render_run(prefix, start, end));
    runs.join(",")
}

fn render_run(prefix: &str, start: i32, end: i32) -> String {
    if start == end {
        format!("{prefix}{start}")
    } else {
        format!("{prefix}{start}-{end}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_and_singletons() {
        assert_eq!(compress([1, 2, 3, 7, 9, 10], "A"), "A1-3,A7,A9-10");
    }

    #[test]
    fn empty_input() {
        assert_eq!(compress([], "A"), "");
    }

    #[test]
    fn order_and_duplicates_do_not_matter() {
        assert_eq!(
            compress([10, 3, 9, 1, 2, 7, 3, 1], "A"),
            compress([1, 2, 3, 7, 9, 10], "A")
        );
    }

    #[test]
    fn no_prefix_and_negative_numbers() {
        assert_eq!(compress([-2, -1, 0, 5], ""), "-2-0,5");
        assert_eq!(compress([i32::MAX, i32::MAX - 1], "B"), "B2147483646-2147483647");
    }
}
