use crate::DiffError;

/// Compare two traces line by line.
///
/// Backslashes are read as forward slashes and trailing whitespace is
/// ignored, so traces from any host compare equal; line order is strict.
/// The result is empty when the traces match. Otherwise every line is
/// listed: common lines indented by two spaces, lines only in `expected`
/// marked `- `, lines only in `actual` marked `+ `.
///
/// # Errors
///
/// Returns [`DiffError::Binary`] if either input contains a NUL byte.
pub fn diff(actual: &str, expected: &str) -> Result<String, DiffError> {
    if actual.contains('\0') {
        return Err(DiffError::Binary { side: "actual" });
    }
    if expected.contains('\0') {
        return Err(DiffError::Binary { side: "expected" });
    }

    let got = normalize(actual);
    let want = normalize(expected);
    if got == want {
        return Ok(String::new());
    }

    let mut out = String::new();
    for op in align(&want, &got) {
        let (mark, line) = match op {
            Op::Same(line) => ("  ", line),
            Op::Missing(line) => ("- ", line),
            Op::Extra(line) => ("+ ", line),
        };
        out.push_str(mark);
        out.push_str(line);
        out.push('\n');
    }
    Ok(out)
}

fn normalize(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text
        .lines()
        .map(|l| l.replace('\\', "/").trim_end().to_string())
        .collect();
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

enum Op<'a> {
    Same(&'a str),
    Missing(&'a str),
    Extra(&'a str),
}

/// Largest LCS table built; past it the changed middle is reported as a
/// block removal followed by a block addition.
const MAX_TABLE_CELLS: usize = 1 << 22;

/// Longest-common-subsequence alignment of `want` against `got`.
///
/// The common head and tail are matched first, so only the changed middle
/// needs a table.
fn align<'a>(want: &'a [String], got: &'a [String]) -> Vec<Op<'a>> {
    let head = want.iter().zip(got).take_while(|(a, b)| a == b).count();
    let tail = want[head..]
        .iter()
        .rev()
        .zip(got[head..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let (want_mid, got_mid) = (
        &want[head..want.len() - tail],
        &got[head..got.len() - tail],
    );

    let mut ops: Vec<Op<'a>> = want[..head].iter().map(|l| Op::Same(l)).collect();
    if want_mid.len().saturating_mul(got_mid.len()) > MAX_TABLE_CELLS {
        ops.extend(want_mid.iter().map(|l| Op::Missing(l)));
        ops.extend(got_mid.iter().map(|l| Op::Extra(l)));
    } else {
        ops.extend(align_table(want_mid, got_mid));
    }
    ops.extend(want[want.len() - tail..].iter().map(|l| Op::Same(l)));
    ops
}

fn align_table<'a>(want: &'a [String], got: &'a [String]) -> Vec<Op<'a>> {
    let (n, m) = (want.len(), got.len());
    // lcs[i][j]: common length of want[i..] and got[j..]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if want[i] == got[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if want[i] == got[j] {
            ops.push(Op::Same(&want[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            ops.push(Op::Missing(&want[i]));
            i += 1;
        } else {
            ops.push(Op::Extra(&got[j]));
            j += 1;
        }
    }
    ops.extend(want[i..].iter().map(|l| Op::Missing(l)));
    ops.extend(got[j..].iter().map(|l| Op::Extra(l)));
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_after_normalization() {
        let actual = "mkdir -p $WORK\\gen  \r\nrm $WORK\\x\n\n";
        let expected = "mkdir -p $WORK/gen\nrm $WORK/x\n";
        assert_eq!(diff(actual, expected).unwrap(), "");
    }

    #[test]
    fn marks_changed_lines() {
        let out = diff("a\nb\nc\n", "a\nx\nc\n").unwrap();
        assert_eq!(out, "  a\n- x\n+ b\n  c\n");
    }

    #[test]
    fn order_matters() {
        assert_ne!(diff("a\nb\n", "b\na\n").unwrap(), "");
    }

    #[test]
    fn trailing_lines() {
        assert_eq!(diff("a\n", "a\nb\n").unwrap(), "  a\n- b\n");
        assert_eq!(diff("a\nb\n", "a\n").unwrap(), "  a\n+ b\n");
    }

    #[test]
    fn nul_is_rejected() {
        assert_eq!(
            diff("a\0", "a"),
            Err(DiffError::Binary { side: "actual" })
        );
        assert_eq!(
            diff("a", "\0"),
            Err(DiffError::Binary { side: "expected" })
        );
    }

    #[test]
    fn long_traces_with_one_change() {
        let want: String = (0..20_000).map(|i| format!("line {i}\n")).collect();
        let got = want.replace("line 10000\n", "line ten thousand\n");
        let out = diff(&got, &want).unwrap();
        let changed: Vec<_> = out.lines().filter(|l| !l.starts_with("  ")).collect();
        assert_eq!(changed, vec!["- line 10000", "+ line ten thousand"]);
        assert_eq!(out.lines().count(), 20_001);
    }

    #[test]
    fn oversized_middle_is_reported_as_blocks() {
        let want: String = (0..3000).map(|i| format!("a{i}\n")).collect();
        let got: String = (0..3000).map(|i| format!("b{i}\n")).collect();
        let out = diff(&got, &want).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 6000);
        assert!(lines[..3000].iter().all(|l| l.starts_with("- a")));
        assert!(lines[3000..].iter().all(|l| l.starts_with("+ b")));
    }
}
