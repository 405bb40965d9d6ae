//! Conversion between project paths and Claude Code project directory names.

/// Convert a file system path like "/home/lars/my.project/.worktrees/feat" to a
/// directory name like "-home-lars-my.project--worktrees-feat".
///
/// Each `/` becomes `-`; a `/` that starts a hidden folder becomes `--` and
/// the dot is dropped.
pub fn encode_project_path(path: &str) -> String {
    let path = path.strip_prefix('/').unwrap_or(path);

    let mut result = String::from("-");
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '/' => {
                result.push('-');
                if chars.peek() == Some(&'.') {
                    result.push('-');
                    chars.next();
                }
            }
            _ => result.push(c),
        }
    }

    result
}

/// Convert a directory name back to the project path.
///
/// This is the reverse of [`encode_project_path`] for paths whose segments
/// contain no dashes. Dashes inside folder names are indistinguishable from
/// separators, so session records' `cwd` is preferred whenever it exists.
pub fn decode_project_path(dir_name: &str) -> String {
    let name = dir_name.strip_prefix('-').unwrap_or(dir_name);

    let mut path = String::from("/");
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '-' if chars.peek() == Some(&'-') => {
                chars.next();
                path.push_str("/.");
            }
            '-' => path.push('/'),
            _ => path.push(c),
        }
    }

    path
}
