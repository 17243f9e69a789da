//! Installer package extension filter.

/// Extensions FBI can install, lower-cased and including the dot.
pub const ACCEPTED_EXTENSIONS: &[&str] = &[".cia", ".3dsx", ".cetk", ".tik"];

/// Whether `name` ends with one of [`ACCEPTED_EXTENSIONS`], ignoring case.
pub fn is_accepted_package(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
