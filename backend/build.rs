use std::fs;
use std::path::Path;

const FALLBACK_INDEX: &str = "<!DOCTYPE html>\n<html><body><p>Frontend not built. Run <code>trunk build</code> in <code>frontend/</code> and rebuild the backend.</p></body></html>\n";

fn main() {
    let out_dir = Path::new("static");
    let dist_dir = Path::new("../frontend/dist");

    if dist_dir.exists() {
        let _ = fs::remove_dir_all(out_dir);
        fs::create_dir_all(out_dir).expect("create static dir");
        fs_extra::dir::copy(
            dist_dir,
            out_dir,
            &fs_extra::dir::CopyOptions::new().overwrite(true),
        )
            .expect("copy frontend dist");
    } else if !out_dir.join("dist").exists() {
        // include_dir! needs the directory to exist.
        fs::create_dir_all(out_dir.join("dist")).expect("create static/dist");
        fs::write(out_dir.join("dist/index.html"), FALLBACK_INDEX).expect("write fallback index");
    }
    println!("cargo:rerun-if-changed=../frontend/dist");
}
