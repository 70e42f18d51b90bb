// C ABI of the stub engine.
//
// These are the symbols `adapters::native` resolves, so a build of this crate
// as a cdylib is a valid (if inert) engine library.

#![allow(unsafe_code)]

use crate::adapters::NullEngine;
use crate::domain::ports::Engine;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int};

static ENGINE: NullEngine = NullEngine;

/// # Safety
///
/// `dir` must be null or point to a NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pye_init_factory(dir: *const c_char) -> c_int {
    if dir.is_null() {
        return ENGINE.init_factory("");
    }
    // SAFETY: non-null and NUL-terminated per the contract above.
    let dir = unsafe { CStr::from_ptr(dir) };
    ENGINE.init_factory(&dir.to_string_lossy())
}

#[unsafe(no_mangle)]
pub extern "C" fn pye_new_document(id: c_int) {
    ENGINE.new_document(id)
}

#[unsafe(no_mangle)]
pub extern "C" fn pye_set_option(option: c_int, value: c_int) {
    ENGINE.set_option(option, value)
}

#[unsafe(no_mangle)]
pub extern "C" fn pye_get_option() -> c_int {
    ENGINE.get_option()
}
