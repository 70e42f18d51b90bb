/// pye build script.
///
/// Two compile-time switches are resolved here:
///
/// * `PYE_LIBRARY_PATH` names the location of the real engine library. It is
///   baked in as `PYE_DEFAULT_LIBRARY` (empty when unset, which selects the
///   stub engine).
/// * `cfg(symbol_visibility)` is set for targets whose object format supports
///   default/hidden symbol visibility (ELF and Mach-O, i.e. the unix family).
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PYE_LIBRARY_PATH");
    println!("cargo:rustc-check-cfg=cfg(symbol_visibility)");

    let library = std::env::var("PYE_LIBRARY_PATH").unwrap_or_default();
    println!("cargo:rustc-env=PYE_DEFAULT_LIBRARY={}", library.trim());

    let target_family = std::env::var("CARGO_CFG_TARGET_FAMILY").unwrap_or_default();
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();

    // CARGO_CFG_TARGET_FAMILY may hold several comma separated values (e.g. "unix,wasm").
    let unix = target_family.split(',').any(|family| family == "unix");
    if unix && target_os != "emscripten" {
        println!("cargo:rustc-cfg=symbol_visibility");
    }
}
