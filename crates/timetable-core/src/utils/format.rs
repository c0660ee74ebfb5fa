use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Natural, numeric-aware, case-insensitive string ordering.
/// Runs of ASCII digits compare by value, so "G2" < "G10".
pub fn cmp_natural(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let ord = cmp_digit_runs(&l_run, &r_run);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.to_lowercase().cmp(r.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        run.push(c);
    }
    run
}

fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Undo iCalendar TEXT escaping ("\n", "\,", "\;", "\\")
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmp_natural_numeric_runs() {
        assert_eq!(cmp_natural("G2", "G10"), Ordering::Less);
        assert_eq!(cmp_natural("DV1", "DV1.1"), Ordering::Less);
        assert_eq!(cmp_natural("DV1.2", "DV1.10"), Ordering::Less);
        assert_eq!(cmp_natural("A01", "A1"), Ordering::Equal);
    }

    #[test]
    fn test_cmp_natural_case_insensitive() {
        assert_eq!(cmp_natural("a", "B"), Ordering::Less);
        assert_eq!(cmp_natural("TP", "tp"), Ordering::Equal);
    }

    #[test]
    fn test_sort_natural() {
        let mut names = vec!["G10", "A", "G2", "DV", "G1"];
        names.sort_by(|a, b| cmp_natural(a, b));
        assert_eq!(names, vec!["A", "DV", "G1", "G2", "G10"]);
    }

    #[test]
    fn test_unescape_text() {
        assert_eq!(unescape_text(r"Room B\, floor 2"), "Room B, floor 2");
        assert_eq!(unescape_text(r"line1\nline2"), "line1\nline2");
        assert_eq!(unescape_text(r"a\;b\\c"), "a;b\\c");
        assert_eq!(unescape_text("trailing\\"), "trailing\\");
    }
}
