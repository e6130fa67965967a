//! Answer diffing and matching for typed mode.

use serde::{Deserialize, Serialize};

/// Classification of a diff segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// Text is the same in both strings.
    Equal,
    /// Text is in the correct answer but missing from the typed one.
    Insert,
    /// Text is in the typed answer but not in the correct one.
    Delete,
}

impl DiffKind {
    /// CSS class used when rendering the segment.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Insert => "missing",
            Self::Delete => "extra",
        }
    }
}

/// Maximal run of characters sharing one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub kind: DiffKind,
    pub text: String,
}

impl DiffSegment {
    pub fn new(kind: DiffKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Segment text with markup-significant characters escaped.
    pub fn escaped_text(&self) -> String {
        escape_markup(&self.text)
    }
}

/// Compute a character-level alignment of the typed answer against the
/// correct answer.
///
/// Matching uses case folding when `case_sensitive` is false, but emitted
/// text always comes from the original strings: `Equal` and `Insert` text
/// from `correct_answer`, `Delete` text from `user_answer`.
pub fn compute_diff(user_answer: &str, correct_answer: &str, case_sensitive: bool) -> Vec<DiffSegment> {
    let user: Vec<char> = user_answer.chars().collect();
    let correct: Vec<char> = correct_answer.chars().collect();

    if user.len() == correct.len()
        && user
            .iter()
            .zip(&correct)
            .all(|(&a, &b)| chars_match(a, b, case_sensitive))
    {
        return vec![DiffSegment::new(DiffKind::Equal, correct_answer)];
    }

    let m = user.len();
    let n = correct.len();

    // table[i][j] = LCS length of user[..i] and correct[..j]
    let mut table = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            table[i][j] = if chars_match(user[i - 1], correct[j - 1], case_sensitive) {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(m + n);
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && chars_match(user[i - 1], correct[j - 1], case_sensitive) {
            ops.push((DiffKind::Equal, correct[j - 1]));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table[i][j - 1] >= table[i - 1][j]) {
            // Ties go to Insert.
            ops.push((DiffKind::Insert, correct[j - 1]));
            j -= 1;
        } else {
            ops.push((DiffKind::Delete, user[i - 1]));
            i -= 1;
        }
    }
    ops.reverse();

    merge_runs(ops)
}

fn chars_match(a: char, b: char, case_sensitive: bool) -> bool {
    a == b || (!case_sensitive && a.to_lowercase().eq(b.to_lowercase()))
}

fn merge_runs(ops: Vec<(DiffKind, char)>) -> Vec<DiffSegment> {
    let mut segments: Vec<DiffSegment> = Vec::new();
    for (kind, ch) in ops {
        match segments.last_mut() {
            Some(last) if last.kind == kind => last.text.push(ch),
            _ => segments.push(DiffSegment::new(kind, ch.to_string())),
        }
    }
    segments
}

/// Check a typed answer, ignoring surrounding whitespace.
pub fn is_answer_correct(user_answer: &str, correct_answer: &str, case_sensitive: bool) -> bool {
    let user = user_answer.trim();
    let correct = correct_answer.trim();
    if case_sensitive {
        user == correct
    } else {
        user.to_lowercase() == correct.to_lowercase()
    }
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Use two rows instead of full matrix for memory efficiency
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Text of the correct answer as carried by a diff (Delete segments dropped).
pub fn correct_text(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != DiffKind::Delete)
        .map(|s| s.text.as_str())
        .collect()
}

/// Text of the typed answer as carried by a diff (Insert segments dropped).
pub fn user_text(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != DiffKind::Insert)
        .map(|s| s.text.as_str())
        .collect()
}

/// Render segments as HTML spans tagged with their kind.
pub fn render_diff_html(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .map(|s| format!(r#"<span class="{}">{}</span>"#, s.kind.css_class(), s.escaped_text()))
        .collect()
}

fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
