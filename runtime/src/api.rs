//! Embedding API of the hosted runtime
//!
//! [`EmbeddingApi`] is the narrow slice of the runtime's C API the host needs.
//! [`DynamicApi`] resolves it from a loaded [`RuntimeLibrary`].

use crate::error::Result;
use crate::library::RuntimeLibrary;
use libc::{c_char, c_int, c_void, size_t, wchar_t};
use libloading::Symbol;
use std::ffi::CStr;
use std::fmt;
use std::ptr::{self, NonNull};
use tracing::debug;

/// Module initializer as the runtime expects it: returns a new module object
/// or null on failure.
pub type ModuleInit = unsafe extern "C" fn() -> *mut c_void;

/// Creates an empty module object from a NUL-terminated name.
pub type ModuleNewFn = unsafe extern "C" fn(*const c_char) -> *mut c_void;

type InitializeExFn = unsafe extern "C" fn(c_int);
type FinalizeExFn = unsafe extern "C" fn() -> c_int;
type IsInitializedFn = unsafe extern "C" fn() -> c_int;
type AppendInittabFn = unsafe extern "C" fn(*const c_char, Option<ModuleInit>) -> c_int;
type DecodeLocaleFn = unsafe extern "C" fn(*const c_char, *mut size_t) -> *mut wchar_t;
type RawFreeFn = unsafe extern "C" fn(*mut c_void);
type SetProgramNameFn = unsafe extern "C" fn(*const wchar_t);

pub trait EmbeddingApi {
    /// Decode a locale-encoded argument into a runtime-allocated wide string.
    fn decode_locale(&self, arg: &CStr) -> Option<NonNull<wchar_t>>;

    /// Release memory obtained from [`EmbeddingApi::decode_locale`].
    ///
    /// # Safety
    /// `ptr` must come from `decode_locale` on this API and not be freed twice.
    unsafe fn raw_free(&self, ptr: NonNull<wchar_t>);

    /// The name must stay alive until the interpreter is finalized.
    fn set_program_name(&self, name: &ProgramName<'_>);

    /// Add a built-in module. Returns false if the runtime refused it.
    fn append_inittab(&self, name: &'static CStr, init: ModuleInit) -> bool;

    fn initialize(&self, install_signal_handlers: bool);

    fn is_initialized(&self) -> bool;

    /// Returns the runtime's shutdown status; 0 on success.
    fn finalize(&self) -> i32;
}

/// Decoded program name, freed with the runtime allocator on drop
pub struct ProgramName<'a> {
    api: &'a dyn EmbeddingApi,
    ptr: NonNull<wchar_t>,
}

impl<'a> ProgramName<'a> {
    /// # Safety
    /// `ptr` must have been returned by `api.decode_locale` and be owned by
    /// the caller.
    pub unsafe fn from_raw(api: &'a dyn EmbeddingApi, ptr: NonNull<wchar_t>) -> Self {
        Self { api, ptr }
    }

    pub fn as_ptr(&self) -> *const wchar_t {
        self.ptr.as_ptr()
    }
}

impl fmt::Debug for ProgramName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgramName").field("ptr", &self.ptr).finish()
    }
}

impl Drop for ProgramName<'_> {
    fn drop(&mut self) {
        // SAFETY: the pointer came from this api's decoder and is owned here.
        unsafe { self.api.raw_free(self.ptr) };
        debug!("Released program name");
    }
}

/// Embedding API resolved from a loaded runtime library
pub struct DynamicApi<'lib> {
    initialize_ex: Symbol<'lib, InitializeExFn>,
    finalize_ex: Symbol<'lib, FinalizeExFn>,
    is_initialized: Symbol<'lib, IsInitializedFn>,
    append_inittab: Symbol<'lib, AppendInittabFn>,
    decode_locale: Symbol<'lib, DecodeLocaleFn>,
    raw_free: Symbol<'lib, RawFreeFn>,
    set_program_name: Option<Symbol<'lib, SetProgramNameFn>>,
    module_new: Option<Symbol<'lib, ModuleNewFn>>,
}

impl<'lib> DynamicApi<'lib> {
    /// Resolve every required symbol, failing on the first missing one.
    pub fn load(library: &'lib RuntimeLibrary) -> Result<Self> {
        // SAFETY: the signatures match the runtime's public C headers.
        unsafe {
            Ok(Self {
                initialize_ex: library.symbol("Py_InitializeEx")?,
                finalize_ex: library.symbol("Py_FinalizeEx")?,
                is_initialized: library.symbol("Py_IsInitialized")?,
                append_inittab: library.symbol("PyImport_AppendInittab")?,
                decode_locale: library.symbol("Py_DecodeLocale")?,
                raw_free: library.symbol("PyMem_RawFree")?,
                set_program_name: library.optional_symbol("Py_SetProgramName"),
                module_new: library.optional_symbol("PyModule_New"),
            })
        }
    }

    /// Constructor used by the built-in module initializers.
    pub fn module_factory(&self) -> Option<ModuleNewFn> {
        self.module_new.as_ref().map(|symbol| **symbol)
    }
}

impl EmbeddingApi for DynamicApi<'_> {
    fn decode_locale(&self, arg: &CStr) -> Option<NonNull<wchar_t>> {
        // SAFETY: `arg` is NUL-terminated; a null size pointer is accepted.
        NonNull::new(unsafe { (*self.decode_locale)(arg.as_ptr(), ptr::null_mut()) })
    }

    unsafe fn raw_free(&self, ptr: NonNull<wchar_t>) {
        (*self.raw_free)(ptr.as_ptr().cast())
    }

    fn set_program_name(&self, name: &ProgramName<'_>) {
        match &self.set_program_name {
            // SAFETY: the caller keeps `name` alive past finalize.
            Some(set) => unsafe { (**set)(name.as_ptr()) },
            None => debug!("Runtime has no Py_SetProgramName; keeping default program name"),
        }
    }

    fn append_inittab(&self, name: &'static CStr, init: ModuleInit) -> bool {
        // SAFETY: `name` is static, as the runtime keeps the pointer.
        unsafe { (*self.append_inittab)(name.as_ptr(), Some(init)) == 0 }
    }

    fn initialize(&self, install_signal_handlers: bool) {
        unsafe { (*self.initialize_ex)(c_int::from(install_signal_handlers)) }
    }

    fn is_initialized(&self) -> bool {
        unsafe { (*self.is_initialized)() != 0 }
    }

    fn finalize(&self) -> i32 {
        unsafe { (*self.finalize_ex)() }
    }
}
