//! Conversion between working directories and Pi session directory names.

/// "/home/lars/project" -> "--home-lars-project--"
pub fn encode_directory_name(path: &str) -> String {
    let trimmed = path
        .strip_prefix('/')
        .or_else(|| path.strip_prefix('\\'))
        .unwrap_or(path);
    let body: String = trimmed
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '-',
            other => other,
        })
        .collect();
    format!("--{body}--")
}

/// "--home-lars-project--" -> "/home/lars/project"
///
/// Dashes inside folder names cannot be told apart from separators, so the
/// session header's `cwd` takes precedence over this.
pub fn decode_directory_name(dir_name: &str) -> String {
    let body = dir_name.strip_prefix("--").unwrap_or(dir_name);
    let body = body.strip_suffix("--").unwrap_or(body);
    format!("/{}", body.replace('-', "/"))
}
