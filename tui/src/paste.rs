use std::path::PathBuf;

/// Extract file paths from a bracketed-paste payload.
///
/// Depending on the terminal, dropped files arrive one per line or
/// space-separated on one line, shell-quoted or with backslash-escaped
/// spaces.
pub fn extract_paths(text: &str) -> Vec<PathBuf> {
    text.lines()
        .flat_map(tokens)
        .map(PathBuf::from)
        .collect()
}

/// Split one pasted line into path tokens, honoring single/double
/// quotes and backslash escapes.
fn tokens(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in line.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '\\' => escaped = true,
                '\'' | '"' => quote = Some(c),
                c if c.is_whitespace() => {
                    if !current.is_empty() {
                        out.push(std::mem::take(&mut current));
                    }
                }
                c => current.push(c),
            },
        }
    }
    if !current.is_empty() {
        out.push(current);
    }

    out
}
