//! Path templating and normalization

use std::collections::BTreeMap;

/// Substitute `:name` segments in `path` with values from `params`.
///
/// `/users/:name` with `{"name": "lee"}` becomes `/users/lee`. A parameter
/// runs from `:` to the next `/` or the end of the path; unknown parameters
/// are left as written.
pub fn map_params(path: &str, params: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(path.len());
    let mut param_start: Option<usize> = None;

    for (i, ch) in path.char_indices() {
        if ch == ':' && param_start.is_none() {
            param_start = Some(i);
        }

        let Some(start) = param_start else {
            out.push(ch);
            continue;
        };

        let is_last = i + ch.len_utf8() == path.len();
        if ch == '/' {
            write_param(&mut out, &path[start + 1..i], params);
            out.push('/');
            param_start = None;
        } else if is_last {
            write_param(&mut out, &path[start + 1..], params);
            param_start = None;
        }
    }

    out
}

fn write_param(out: &mut String, param: &str, params: &BTreeMap<String, String>) {
    match params.get(param) {
        Some(value) => out.push_str(value),
        None => {
            out.push(':');
            out.push_str(param);
        }
    }
}

/// Strip the extension (from the last `.` of the final component) from `file_path`.
pub fn trim_file_extension(file_path: &str) -> &str {
    match file_path.rfind(|c: char| c == '.' || c == '/') {
        Some(i) if file_path[i..].starts_with('.') => &file_path[..i],
        _ => file_path,
    }
}

/// Lexically clean a slash-separated path: collapse `//`, drop `.`, resolve
/// `..` and remove any trailing slash. An empty result is `.`, or `/` when
/// the path was rooted.
pub fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}
