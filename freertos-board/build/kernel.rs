use std::env;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Get the heap implementation from `cargo` features.
pub fn heap() -> Result<PathBuf, String> {
  let mut heap = None;
  for i in 1..=5 {
    if env::var(format!("CARGO_FEATURE_HEAP_{i}")).is_ok() {
      if let Some(h) = heap {
        return Err(format!("Features `heap_{h}` and `heap_{i}` are mutually exclusive."));
      }

      heap = Some(i);
    }
  }

  Ok(format!("heap_{}.c", heap.unwrap_or(4)).into())
}

/// Get the port directory for the target.
pub fn port() -> Result<PathBuf, String> {
  let target = env::var("TARGET").unwrap_or_default();
  let target_family = env::var("CARGO_CFG_TARGET_FAMILY").unwrap_or_default();

  Ok(match (target.as_str(), target_family.as_str()) {
    ("thumbv7m-none-eabi" | "thumbv7em-none-eabi", _) => Path::new("GCC").join("ARM_CM3"),
    ("thumbv7em-none-eabihf", _) => Path::new("GCC").join("ARM_CM4F"),
    (_, "unix") => Path::new("ThirdParty").join("GCC").join("Posix"),
    _ => return Err(format!("Target '{}' is not supported.", target)),
  })
}

/// Find `.c` files until the given depth.
pub fn find_c_files(dir: impl AsRef<Path>, depth: Option<usize>) -> io::Result<Vec<PathBuf>> {
  let mut w = WalkDir::new(dir).follow_links(false);

  if let Some(depth) = depth {
    w = w.max_depth(depth);
  }

  w.into_iter()
    .map(|entry| {
      let entry = entry?;
      let f_name = entry.path();

      Ok(f_name.extension().and_then(|ext| if ext == "c" {
        Some(f_name.into())
      } else {
        None
      }))
    })
    .filter_map(|res| res.transpose())
    .collect()
}

/// Prepare a `cc` build for the kernel sources in `source`, using the
/// `FreeRTOSConfig.h` found in `config`.
pub fn builder(source: &Path, config: &Path) -> Result<cc::Build, String> {
  let include = source.join("include");
  let portable = source.join("portable");
  let port = portable.join(port()?);
  let heap = portable.join("MemMang").join(heap()?);

  let mut c_files = find_c_files(source, Some(1)).map_err(|err| err.to_string())?;
  c_files.extend(find_c_files(&port, None).map_err(|err| err.to_string())?);
  c_files.push(heap);

  let mut cc = cc::Build::new();
  cc.define("RUST", None);

  // Run-time statistics are only collected with debug assertions enabled.
  if debug_assertions() {
    cc.define("FREERTOS_BOARD_DEBUG", None);
  }

  for c_file in &c_files {
    log::debug!("compiling {}", c_file.display());
    cc.file(c_file);
  }

  for include in [include.as_path(), port.as_path(), config] {
    cc.include(include);
  }

  Ok(cc)
}

/// Whether the crate is built with `debug_assertions`, which gates the
/// run-time statistics entry points on the Rust side.
pub fn debug_assertions() -> bool {
  env::var_os("CARGO_CFG_DEBUG_ASSERTIONS").is_some()
}
