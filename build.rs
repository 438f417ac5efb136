//! This build script copies the `memory.x` file from the crate root into a directory where
//! the linker can always find it at build time, and records the build time as the initial
//! wall-clock reference for the firmware.

use std::{env, fs::File, io::Write, path::PathBuf};

fn main() {
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());

    // Put memory layout in the output directory and ensure it's on the linker search path.
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    // The watch has no RTC backup, so it boots with the time it was built at.
    let epoch = chrono::Utc::now().timestamp().max(0);
    File::create(out.join("build_epoch.rs"))
        .unwrap()
        .write_fmt(format_args!("const BUILD_EPOCH: u64 = {epoch};"))
        .unwrap();

    // No `rerun-if-changed` here: the epoch should be refreshed whenever the crate changes.
}
