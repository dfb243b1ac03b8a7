/// Drops blank lines and collapses whitespace runs inside each line to a
/// single space. Line breaks between non-blank lines are kept.
pub fn sanitize_text(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}
