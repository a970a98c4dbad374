//! Build script: fingerprints the stylesheet so templates can emit an
//! immutably cacheable URL.
//!
//! The short content hash lands in `CSS_HASH` (read through `env!` by
//! the template filters) and a copy of the file is written to
//! `static/css/derived/main.<hash>.css`, which the server mounts with a
//! one year cache lifetime.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let source = Path::new(&manifest_dir).join("static/css/main.css");
    println!("cargo:rerun-if-changed={}", source.display());

    match fingerprint(&source) {
        Some(hash) => println!("cargo:rustc-env=CSS_HASH={hash}"),
        None => {
            // A fresh checkout may build before assets exist.
            println!("cargo:warning=static/css/main.css missing, serving unhashed CSS");
            println!("cargo:rustc-env=CSS_HASH=");
        }
    }
}

/// Copies `source` to `static/css/derived/main.<hash>.css` and returns
/// the short content hash.
fn fingerprint(source: &Path) -> Option<String> {
    let bytes = fs::read(source).ok()?;
    let digest = format!("{:x}", Sha256::digest(&bytes));
    let short = digest.get(..8)?.to_owned();

    let derived = source.parent()?.join("derived");
    fs::create_dir_all(&derived).expect("failed to create derived CSS directory");
    fs::copy(source, derived.join(format!("main.{short}.css")))
        .expect("failed to copy fingerprinted CSS");

    Some(short)
}
