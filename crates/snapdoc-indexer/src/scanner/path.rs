//! Lexical path normalization.
//!
//! Nothing here touches the file system: paths are cleaned component by
//! component so that sorting, exclusion and labels agree across platforms.

use std::path::{Component, Path, PathBuf};

/// Drop `.` components and unify separators.
pub fn normalize(path: &Path) -> PathBuf {
    PathBuf::from(to_slash(path))
}

/// Render a path with `/` separators and no `.` components.
///
/// An empty result (e.g. for `./`) becomes `.`.
pub fn to_slash(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    let mut out = String::with_capacity(raw.len());

    for component in Path::new(&raw).components() {
        match component {
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::RootDir => out.push('/'),
            Component::CurDir => {}
            Component::ParentDir => push_segment(&mut out, ".."),
            Component::Normal(seg) => push_segment(&mut out, &seg.to_string_lossy()),
        }
    }

    if out.is_empty() {
        out.push('.');
    }
    out
}

fn push_segment(out: &mut String, seg: &str) {
    if !out.is_empty() && !out.ends_with('/') {
        out.push('/');
    }
    out.push_str(seg);
}

/// Path of `path` relative to `base`, both normalized first.
///
/// Returns `None` when `path` does not lie under `base`.
pub fn relative_label(path: &Path, base: &Path) -> Option<String> {
    let path = normalize(path);
    let base = normalize(base);

    if base == Path::new(".") {
        return Some(to_slash(&path));
    }

    path.strip_prefix(&base)
        .ok()
        .filter(|rel| !rel.as_os_str().is_empty())
        .map(to_slash)
}
