use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
  println!("cargo:rerun-if-changed=memory.x");
  println!("cargo:rerun-if-changed=config/FreeRTOSConfig.h");

  let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
  fs::copy("memory.x", out_dir.join("memory.x")).expect("memory.x is readable");
  println!("cargo:rustc-link-search={}", out_dir.display());
}
