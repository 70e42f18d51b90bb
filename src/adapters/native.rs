// Engine backed by an external shared library.
//
// The library must export the same C ABI this crate exports from `ffi`:
//
//   int  pye_init_factory(const char *dir);
//   void pye_new_document(int id);
//   void pye_set_option(int option, int value);
//   int  pye_get_option(void);
//
// Every `unsafe` block carries a `// SAFETY:` comment.

#![allow(unsafe_code)]

use crate::domain::model::{EngineKind, STATUS_INVALID_ARGUMENT};
use crate::domain::ports::Engine;
use crate::utils::error::{PyeError, Result};
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_void};
use std::path::Path;
use std::ptr::NonNull;

type InitFactoryFn = unsafe extern "C" fn(*const c_char) -> c_int;
type NewDocumentFn = unsafe extern "C" fn(c_int);
type SetOptionFn = unsafe extern "C" fn(c_int, c_int);
type GetOptionFn = unsafe extern "C" fn() -> c_int;

pub const INIT_FACTORY_SYMBOL: &CStr = c"pye_init_factory";
pub const NEW_DOCUMENT_SYMBOL: &CStr = c"pye_new_document";
pub const SET_OPTION_SYMBOL: &CStr = c"pye_set_option";
pub const GET_OPTION_SYMBOL: &CStr = c"pye_get_option";

#[cfg(target_family = "unix")]
mod platform {
    use std::ffi::CStr;
    use std::os::raw::{c_char, c_int, c_void};

    #[cfg_attr(target_os = "linux", link(name = "dl"))]
    unsafe extern "C" {
        fn dlopen(filename: *const c_char, flag: c_int) -> *mut c_void;
        fn dlsym(handle: *mut c_void, symbol: *const c_char) -> *mut c_void;
        fn dlclose(handle: *mut c_void) -> c_int;
        fn dlerror() -> *mut c_char;
    }

    const RTLD_NOW: c_int = 2;
    #[cfg(not(target_vendor = "apple"))]
    const RTLD_LOCAL: c_int = 0;
    #[cfg(target_vendor = "apple")]
    const RTLD_LOCAL: c_int = 4;

    pub(super) unsafe fn load_library(path: &CStr) -> *mut c_void {
        unsafe { dlopen(path.as_ptr(), RTLD_NOW | RTLD_LOCAL) }
    }

    pub(super) unsafe fn resolve_symbol(handle: *mut c_void, symbol: &CStr) -> *mut c_void {
        unsafe { dlsym(handle, symbol.as_ptr()) }
    }

    pub(super) unsafe fn close_library(handle: *mut c_void) {
        unsafe {
            let _ = dlclose(handle);
        }
    }

    pub(super) fn last_error() -> String {
        // SAFETY: dlerror returns either null or a NUL-terminated string owned
        // by the loader, valid until the next dl* call on this thread.
        unsafe {
            let message = dlerror();
            if message.is_null() {
                "unknown dynamic loader error".to_string()
            } else {
                CStr::from_ptr(message).to_string_lossy().into_owned()
            }
        }
    }
}

#[cfg(target_family = "windows")]
mod platform {
    use std::ffi::CStr;
    use std::iter;
    use std::os::raw::{c_char, c_void};
    use std::os::windows::ffi::OsStrExt;

    type HMODULE = *mut c_void;

    #[link(name = "kernel32")]
    unsafe extern "system" {
        fn LoadLibraryW(lpFileName: *const u16) -> HMODULE;
        fn GetProcAddress(hModule: HMODULE, lpProcName: *const c_char) -> *mut c_void;
        fn FreeLibrary(hLibModule: HMODULE) -> i32;
        fn GetLastError() -> u32;
    }

    pub(super) unsafe fn load_library(path: &CStr) -> *mut c_void {
        let wide: Vec<u16> = std::path::Path::new(&*path.to_string_lossy())
            .as_os_str()
            .encode_wide()
            .chain(iter::once(0))
            .collect();
        unsafe { LoadLibraryW(wide.as_ptr()) }
    }

    pub(super) unsafe fn resolve_symbol(handle: *mut c_void, symbol: &CStr) -> *mut c_void {
        unsafe { GetProcAddress(handle, symbol.as_ptr()) }
    }

    pub(super) unsafe fn close_library(handle: *mut c_void) {
        unsafe {
            let _ = FreeLibrary(handle);
        }
    }

    pub(super) fn last_error() -> String {
        // SAFETY: GetLastError only reads thread-local state.
        let code = unsafe { GetLastError() };
        format!("error {code:#010x}")
    }
}

#[cfg(not(any(target_family = "unix", target_family = "windows")))]
mod platform {
    use std::ffi::CStr;
    use std::os::raw::c_void;

    pub(super) unsafe fn load_library(_path: &CStr) -> *mut c_void {
        std::ptr::null_mut()
    }

    pub(super) unsafe fn resolve_symbol(_handle: *mut c_void, _symbol: &CStr) -> *mut c_void {
        std::ptr::null_mut()
    }

    pub(super) unsafe fn close_library(_handle: *mut c_void) {}

    pub(super) fn last_error() -> String {
        "dynamic loading is not supported on this target".to_string()
    }
}

/// Owned handle to a loaded library; unloaded on drop.
struct Library {
    handle: NonNull<c_void>,
    path: String,
}

// SAFETY: the handle is an opaque token returned by the loader. dlsym/dlclose
// and GetProcAddress/FreeLibrary are thread-safe, and the handle is never
// dereferenced by this crate.
unsafe impl Send for Library {}
unsafe impl Sync for Library {}

impl Library {
    fn open(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let c_path = CString::new(display.as_bytes()).map_err(|_| PyeError::LibraryLoadError {
            path: display.clone(),
            reason: "path contains a NUL byte".to_string(),
        })?;

        // SAFETY: c_path is a valid NUL-terminated string that outlives the call.
        // Loading runs the library's initialisers; the caller chose to trust it.
        let handle = unsafe { platform::load_library(&c_path) };
        match NonNull::new(handle) {
            Some(handle) => Ok(Self {
                handle,
                path: display,
            }),
            None => Err(PyeError::LibraryLoadError {
                path: display,
                reason: platform::last_error(),
            }),
        }
    }

    fn symbol(&self, name: &CStr) -> Result<NonNull<c_void>> {
        // SAFETY: self.handle came from a successful load and has not been
        // closed (closing only happens in Drop).
        let ptr = unsafe { platform::resolve_symbol(self.handle.as_ptr(), name) };
        NonNull::new(ptr).ok_or_else(|| PyeError::MissingSymbolError {
            path: self.path.clone(),
            symbol: name.to_string_lossy().into_owned(),
        })
    }
}

impl Drop for Library {
    fn drop(&mut self) {
        tracing::debug!("Unloading engine library {}", self.path);
        // SAFETY: the handle is valid and is closed exactly once, here. The
        // function pointers resolved from it live in the same NativeEngine and
        // are dropped together with it.
        unsafe { platform::close_library(self.handle.as_ptr()) }
    }
}

/// Engine whose four operations are forwarded to an external library.
pub struct NativeEngine {
    init_factory: InitFactoryFn,
    new_document: NewDocumentFn,
    set_option: SetOptionFn,
    get_option: GetOptionFn,
    library: Library,
}

impl NativeEngine {
    /// Loads the library at `path` and resolves all four entry points.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let library = Library::open(path.as_ref())?;

        // SAFETY: each symbol is declared by the engine ABI with exactly the
        // signature of the matching fn pointer type; a non-null data pointer
        // returned by the loader for a function symbol is its entry address.
        let engine = unsafe {
            Self {
                init_factory: std::mem::transmute::<*mut c_void, InitFactoryFn>(
                    library.symbol(INIT_FACTORY_SYMBOL)?.as_ptr(),
                ),
                new_document: std::mem::transmute::<*mut c_void, NewDocumentFn>(
                    library.symbol(NEW_DOCUMENT_SYMBOL)?.as_ptr(),
                ),
                set_option: std::mem::transmute::<*mut c_void, SetOptionFn>(
                    library.symbol(SET_OPTION_SYMBOL)?.as_ptr(),
                ),
                get_option: std::mem::transmute::<*mut c_void, GetOptionFn>(
                    library.symbol(GET_OPTION_SYMBOL)?.as_ptr(),
                ),
                library,
            }
        };

        tracing::info!("🔌 Loaded engine library {}", engine.library.path);
        Ok(engine)
    }
}

impl std::fmt::Debug for NativeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeEngine")
            .field("path", &self.library.path)
            .finish()
    }
}

impl Engine for NativeEngine {
    fn init_factory(&self, dir: &str) -> i32 {
        let Ok(c_dir) = CString::new(dir) else {
            tracing::warn!("Directory {:?} contains a NUL byte; not passed to the engine", dir);
            return STATUS_INVALID_ARGUMENT;
        };
        // SAFETY: fn pointer resolved from the live library; c_dir is a valid
        // NUL-terminated string for the duration of the call.
        unsafe { (self.init_factory)(c_dir.as_ptr()) }
    }

    fn new_document(&self, id: i32) {
        // SAFETY: fn pointer resolved from the live library; plain int argument.
        unsafe { (self.new_document)(id) }
    }

    fn set_option(&self, option: i32, value: i32) {
        // SAFETY: fn pointer resolved from the live library; plain int arguments.
        unsafe { (self.set_option)(option, value) }
    }

    fn get_option(&self) -> i32 {
        // SAFETY: fn pointer resolved from the live library; no arguments.
        unsafe { (self.get_option)() }
    }

    fn kind(&self) -> EngineKind {
        EngineKind::Native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_library_is_a_load_error() {
        let err = NativeEngine::load("/definitely/not/here/libpye.so").unwrap_err();
        match err {
            PyeError::LibraryLoadError { path, reason } => {
                assert_eq!(path, "/definitely/not/here/libpye.so");
                assert!(!reason.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_symbol_names_match_exports() {
        assert_eq!(INIT_FACTORY_SYMBOL.to_str().unwrap(), "pye_init_factory");
        assert_eq!(NEW_DOCUMENT_SYMBOL.to_str().unwrap(), "pye_new_document");
        assert_eq!(SET_OPTION_SYMBOL.to_str().unwrap(), "pye_set_option");
        assert_eq!(GET_OPTION_SYMBOL.to_str().unwrap(), "pye_get_option");
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_library_without_engine_symbols() {
        let err = NativeEngine::load("libm.so.6").unwrap_err();
        match err {
            PyeError::MissingSymbolError { path, symbol } => {
                assert_eq!(path, "libm.so.6");
                assert_eq!(symbol, "pye_init_factory");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
