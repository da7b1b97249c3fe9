use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for a `vertible` crate as seen from the
/// caller's Cargo.toml.
///
/// The derive macros emit absolute paths to `vt_reflect` items, and those
/// paths must be valid from the crate that invokes the macro, which may
/// depend on `vt_reflect` directly or only on the `vertible` facade.
///
/// # Example
///
/// ```rust
/// # use vt_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("vt_reflect"));
/// ```
///
/// Reading the manifest is not cheap, callers should resolve a path once per
/// macro invocation and pass it around.
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the requested crate name begins with `vt_` and the target crate
///    depends on the facade `vertible`, return `::vertible::short_name`
///    (e.g. `vt_reflect` -> `::vertible::reflect`).
/// 3. Repeat step 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to the absolute path `::crate_name`.
///
/// ## Note
///
/// A crate referencing itself from doctests or its own unit tests needs an
/// alias such as `extern crate self as vt_reflect;` in the crate root.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "vertible";
const CRATE_PREFIX: &str = "vt_";
const DEPENDENCY_TABLES: [&str; 2] = ["dependencies", "dev-dependencies"];

/// Path of the Cargo.toml of the crate being compiled.
fn caller_manifest() -> PathBuf {
    let Some(dir) = env::var_os("CARGO_MANIFEST_DIR") else {
        panic!("`CARGO_MANIFEST_DIR` is not set, macros must be expanded by cargo");
    };
    let path = Path::new(&dir).join("Cargo.toml");
    assert!(path.is_file(), "no Cargo.toml at {}", path.display());
    path
}

fn modified_time(path: &Path) -> SystemTime {
    match std::fs::metadata(path).and_then(|meta| meta.modified()) {
        Ok(time) => time,
        Err(err) => panic!("cannot stat {}: {err}", path.display()),
    }
}

fn parse_path(text: &str) -> syn::Path {
    match syn::parse_str(text) {
        Ok(path) => path,
        Err(err) => panic!("`{text}` is not a valid path: {err}"),
    }
}

impl Manifest {
    #[inline(never)]
    fn load(path: &Path, modified_time: SystemTime) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => panic!("cannot read {}: {err}", path.display()),
        };
        match Document::parse(text.into_boxed_str()) {
            Ok(manifest) => Manifest {
                manifest,
                modified_time,
            },
            Err(err) => panic!("cannot parse {}: {err}", path.display()),
        }
    }

    /// Build a `Manifest` from the text of a Cargo.toml.
    ///
    /// Returns `None` if the text is not valid TOML.
    pub fn from_toml(text: &str) -> Option<Self> {
        let manifest = Document::parse(Box::<str>::from(text)).ok()?;
        Some(Manifest {
            manifest,
            modified_time: SystemTime::UNIX_EPOCH,
        })
    }

    /// Path of `name` through one dependency table, if the table lists the
    /// crate itself or the facade.
    fn resolve_in(table: &Table, name: &str) -> Option<syn::Path> {
        if table.contains_key(name) {
            return Some(parse_path(&format!("::{name}")));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        table
            .contains_key(FACADE_NAME)
            .then(|| parse_path(&format!("::{FACADE_NAME}::{module}")))
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from this
    /// crate's Cargo.toml. See the top-level documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        DEPENDENCY_TABLES
            .iter()
            .filter_map(|key| match self.manifest.get(key) {
                Some(Item::Table(table)) => Self::resolve_in(table, name),
                _ => None,
            })
            .next()
            .unwrap_or_else(|| parse_path(&format!("::{name}")))
    }

    /// Obtain the [`Manifest`] of the caller's Cargo.toml.
    ///
    /// The parsed manifest is cached per path and invalidated when the file's
    /// modification time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static CACHE: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = caller_manifest();
        let mtime = modified_time(&path);

        {
            let cache = CACHE.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = cache.get(&path).filter(|m| m.modified_time == mtime) {
                return func(cached);
            }
        }

        let manifest = Self::load(&path, mtime);
        let result = func(&manifest);
        CACHE
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);
        result
    }
}

// -----------------------------------------------------------------------------
// Tests
