use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Absolute form of `path` with symlinks resolved for the part that exists.
///
/// Components past the deepest existing ancestor are normalized lexically, so a
/// directory that does not exist yet still resolves to a stable path.
pub fn resolve_dir(path: &Utf8Path) -> Utf8PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir()
            .ok()
            .and_then(|cwd| Utf8PathBuf::from_path_buf(cwd).ok())
        {
            Some(cwd) => cwd.join(path),
            None => path.to_path_buf(),
        }
    };
    let normalized = normalize_lexically(&absolute);

    let mut existing = normalized.as_path();
    let mut rest: Vec<&str> = Vec::new();
    loop {
        if let Ok(real) = existing.canonicalize_utf8() {
            let mut out = real;
            for part in rest.iter().rev() {
                out.push(part);
            }
            return out;
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name);
                existing = parent;
            }
            _ => return normalized,
        }
    }
}

/// Drop `.` and fold `..` without touching the filesystem.
pub fn normalize_lexically(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_str()),
        }
    }
    out
}
