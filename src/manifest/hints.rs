/// Substrings of YAML parser messages paired with a remediation hint.
pub(crate) const YAML_HINTS: [(&str, &str); 6] = [
    (
        "did not find expected '-'",
        "Start list items with '-' and ensure proper indentation.",
    ),
    (
        "expected ':'",
        "Ensure each key is followed by ':' separating key and value.",
    ),
    (
        "mapping values are not allowed",
        "Check for a stray ':' or quote shell commands containing ': '.",
    ),
    (
        "found character that cannot start any token",
        "Quote values starting with '@', '`' or '%', and indent with spaces.",
    ),
    (
        "unknown escape character",
        "Use valid YAML escape sequences or quote the string.",
    ),
    (
        "did not find expected node content",
        "Quote symbols such as \":all\" and Make macros such as \"$(CC)\".",
    ),
];
