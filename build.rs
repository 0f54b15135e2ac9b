// Copies static assets to `dist/` so the site can be served as-is.
use std::path::Path;

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    let static_dir = Path::new("static");
    if !static_dir.exists() {
        println!("cargo:warning=static/ missing, nothing to stage");
        return;
    }
    if !static_dir.join("pkg").exists() {
        println!("cargo:warning=static/pkg missing: run wasm-pack build --target web --out-dir static/pkg");
    }

    let out_dir = Path::new("dist");
    if out_dir.exists() {
        std::fs::remove_dir_all(out_dir).ok();
    }
    if let Err(e) = std::fs::create_dir_all(out_dir) {
        println!("cargo:warning=cannot create dist/: {e}");
        return;
    }

    let mut options = CopyOptions::new();
    options.content_only = true;
    options.overwrite = true;
    if let Err(e) = copy(static_dir, out_dir, &options) {
        println!("cargo:warning=copying static/ to dist/ failed: {e}");
    }
}
