//! Listing builder: reads one directory below the root with walkdir.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use super::entry::{Listing, ListingEntry};
use super::icons::icon_for_path;
use super::ListingError;
use crate::i18n::Translations;

/// Configuration for building a listing.
#[derive(Debug, Clone)]
pub struct ListingOptions {
    /// Directory being served; listings never leave it
    pub root: PathBuf,
    /// Directory to list, relative to `root`
    pub dir: PathBuf,
    /// Language code used in directory links (`/{lang}?dir=...`)
    pub lang: String,
    /// File and directory names left out of listings
    pub ignore_files: HashSet<String>,
    /// Name shown on the parent-directory row
    pub parent_label: String,
}

impl ListingOptions {
    /// Create options listing the root itself, in English
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            dir: PathBuf::new(),
            lang: "en".to_string(),
            ignore_files: HashSet::new(),
            parent_label: Translations::english().parent_directory,
        }
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn with_ignore_files<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_files = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_parent_label(mut self, label: impl Into<String>) -> Self {
        self.parent_label = label.into();
        self
    }
}

/// Normalise `dir` lexically and make sure it stays inside the root.
///
/// Returns the normalised path relative to the root (empty for the root).
pub fn resolve_dir(dir: &Path) -> Result<PathBuf, ListingError> {
    let mut resolved = PathBuf::new();
    for component in dir.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !resolved.pop() {
                    return Err(ListingError::OutsideRoot {
                        path: dir.to_path_buf(),
                    });
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(ListingError::OutsideRoot {
                    path: dir.to_path_buf(),
                });
            }
        }
    }
    Ok(resolved)
}

/// Join path components with `/` for use in links.
fn url_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn dir_link(lang: &str, rel: &Path) -> String {
    if rel.as_os_str().is_empty() {
        format!("/{}", lang)
    } else {
        format!("/{}?dir={}", lang, url_path(rel))
    }
}

/// Build the listing for `options.dir`.
///
/// Hidden entries (leading `.`) and ignored names are skipped; the rest are
/// ordered by file name. Entries that cannot be read are logged and skipped.
pub fn build_listing(options: &ListingOptions) -> Result<Listing, ListingError> {
    let rel = resolve_dir(&options.dir)?;
    let abs = options.root.join(&rel);

    let metadata = std::fs::metadata(&abs).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ListingError::NotFound { path: abs.clone() }
        } else {
            ListingError::Io {
                path: abs.clone(),
                source: e,
            }
        }
    })?;

    if !metadata.is_dir() {
        return Err(ListingError::NotADirectory { path: abs });
    }

    let mut entries = Vec::new();

    if let Some(parent) = rel.parent() {
        entries.push(ListingEntry::parent(
            options.parent_label.clone(),
            dir_link(&options.lang, parent),
        ));
    }

    let walker = WalkDir::new(&abs)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') || options.ignore_files.contains(&name) {
            continue;
        }

        let rel_path = rel.join(&name);
        if entry.file_type().is_dir() {
            entries.push(ListingEntry::directory(
                name,
                dir_link(&options.lang, &rel_path),
            ));
            continue;
        }

        let icon = icon_for_path(entry.path());
        let mut file = ListingEntry::file(name, format!("/{}", url_path(&rel_path)), icon);
        match entry.metadata() {
            Ok(meta) => {
                file = file.with_size(meta.len());
                if let Ok(modified) = meta.modified() {
                    file = file.with_modified(modified);
                }
            }
            Err(err) => warn!(path = %entry.path().display(), error = %err, "no metadata"),
        }
        entries.push(file);
    }

    info!(dir = %rel.display(), entries = entries.len(), "built listing");

    Ok(Listing {
        dir: rel,
        lang: options.lang.clone(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{EntryKind, FOLDER_ICON, PARENT_ICON};
    use std::fs;
    use tempfile::TempDir;

    fn create_test_root() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(root.join("b.txt"), "hello").unwrap();
        fs::write(root.join("a.pdf"), vec![0u8; 2048]).unwrap();
        fs::write(root.join(".hidden"), "secret").unwrap();
        fs::write(root.join("secret.key"), "key").unwrap();
        fs::create_dir(root.join("docs")).unwrap();
        fs::write(root.join("docs").join("guide.md"), "# guide").unwrap();
        fs::create_dir_all(root.join("docs").join("nested").join("deep")).unwrap();

        temp
    }

    #[test]
    fn test_resolve_dir() {
        assert_eq!(resolve_dir(Path::new("")).unwrap(), PathBuf::new());
        assert_eq!(resolve_dir(Path::new("./a/./b")).unwrap(), PathBuf::from("a/b"));
        assert_eq!(resolve_dir(Path::new("a/b/..")).unwrap(), PathBuf::from("a"));
        assert!(matches!(
            resolve_dir(Path::new("a/../..")),
            Err(ListingError::OutsideRoot { .. })
        ));
        assert!(matches!(
            resolve_dir(Path::new("/etc")),
            Err(ListingError::OutsideRoot { .. })
        ));
    }

    #[test]
    fn test_root_listing() {
        let temp = create_test_root();
        let options = ListingOptions::new(temp.path().to_path_buf())
            .with_ignore_files(["secret.key"]);

        let listing = build_listing(&options).unwrap();
        assert!(listing.is_root());

        let names: Vec<&str> = listing.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.txt", "docs"]);

        let pdf = &listing.entries[0];
        assert_eq!(pdf.kind, EntryKind::File);
        assert_eq!(pdf.icon, "fas fa-file-pdf");
        assert_eq!(pdf.link, "/a.pdf");
        assert_eq!(pdf.size.as_deref(), Some("2.00KB"));
        assert!(pdf.date.as_deref().unwrap().ends_with("+00:00"));

        let docs = &listing.entries[2];
        assert_eq!(docs.kind, EntryKind::Directory);
        assert_eq!(docs.icon, FOLDER_ICON);
        assert_eq!(docs.link, "/en?dir=docs");
        assert!(docs.size.is_none());
    }

    #[test]
    fn test_subdirectory_has_parent_row() {
        let temp = create_test_root();
        let options = ListingOptions::new(temp.path().to_path_buf())
            .with_dir("docs")
            .with_lang("fa");

        let listing = build_listing(&options).unwrap();
        let parent = &listing.entries[0];
        assert_eq!(parent.kind, EntryKind::ParentDirectory);
        assert_eq!(parent.name, "Parent Directory");
        assert_eq!(parent.icon, PARENT_ICON);
        assert_eq!(parent.link, "/fa");

        let guide = listing.entries.iter().find(|e| e.name == "guide.md").unwrap();
        assert_eq!(guide.link, "/docs/guide.md");

        let nested = listing.entries.iter().find(|e| e.name == "nested").unwrap();
        assert_eq!(nested.link, "/fa?dir=docs/nested");
    }

    #[test]
    fn test_nested_parent_link() {
        let temp = create_test_root();
        let options = ListingOptions::new(temp.path().to_path_buf())
            .with_dir("docs/nested/deep")
            .with_parent_label("Übergeordnet");

        let listing = build_listing(&options).unwrap();
        assert_eq!(listing.entries.len(), 1);
        assert_eq!(listing.entries[0].name, "Übergeordnet");
        assert_eq!(listing.entries[0].link, "/en?dir=docs/nested");
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_is_skipped() {
        let temp = create_test_root();
        std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("dangling")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("docs"), temp.path().join("docs-link")).unwrap();

        let listing = build_listing(&ListingOptions::new(temp.path().to_path_buf())).unwrap();
        let names: Vec<&str> = listing.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.txt", "docs", "docs-link", "secret.key"]);
        assert_eq!(listing.entries[3].kind, EntryKind::Directory);
    }

    #[test]
    fn test_errors() {
        let temp = create_test_root();
        let base = ListingOptions::new(temp.path().to_path_buf());

        let err = build_listing(&base.clone().with_dir("missing")).unwrap_err();
        assert!(matches!(err, ListingError::NotFound { .. }));

        let err = build_listing(&base.clone().with_dir("b.txt")).unwrap_err();
        assert!(matches!(err, ListingError::NotADirectory { .. }));

        let err = build_listing(&base.with_dir("../outside")).unwrap_err();
        assert!(matches!(err, ListingError::OutsideRoot { .. }));
    }
}
