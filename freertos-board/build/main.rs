use std::env;
use std::path::PathBuf;
use std::process::exit;

mod kernel;

// See: https://doc.rust-lang.org/cargo/reference/build-scripts.html
fn main() {
  println!("cargo:rerun-if-changed=build");
  println!("cargo:rerun-if-env-changed=FREERTOS_SRC");
  println!("cargo:rerun-if-env-changed=FREERTOS_CONFIG");
  println!("cargo:rerun-if-env-changed=FREERTOS_BUILD_VERBOSE");

  stderrlog::new()
    .module(module_path!())
    .verbosity(if env::var("FREERTOS_BUILD_VERBOSE").is_ok() { 3 } else { 1 })
    .init()
    .ok();

  if env::var("CARGO_FEATURE_FREERTOS").is_err() {
    return
  }

  let Some(source) = env::var_os("FREERTOS_SRC").map(PathBuf::from) else {
    log::warn!("FREERTOS_SRC is not set, expecting the kernel to be linked by the application");
    return
  };

  let Some(config) = env::var_os("FREERTOS_CONFIG").map(PathBuf::from) else {
    log::error!("FREERTOS_CONFIG must point to the directory containing FreeRTOSConfig.h");
    exit(1);
  };

  println!("cargo:SOURCE={}", source.display());
  println!("cargo:CONFIG={}", config.display());

  match kernel::builder(&source, &config) {
    Ok(cc) => {
      log::info!("building FreeRTOS kernel from {}", source.display());
      cc.compile("freertos");
    },
    Err(err) => {
      log::error!("{}", err);
      exit(1);
    },
  }
}
