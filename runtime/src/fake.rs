//! Recording stand-in for the runtime's embedding API

use crate::api::{EmbeddingApi, ModuleInit, ProgramName};
use libc::wchar_t;
use std::cell::{Cell, RefCell};
use std::ffi::CStr;
use std::ptr::NonNull;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    DecodeLocale(String),
    RawFree,
    SetProgramName,
    AppendInittab(String),
    Initialize(bool),
    Finalize,
}

#[derive(Default)]
pub struct FakeApi {
    pub already_initialized: bool,
    pub fail_decode: bool,
    pub fail_initialize: bool,
    pub reject_module: Option<String>,
    pub finalize_status: i32,
    pub(crate) calls: RefCell<Vec<Call>>,
    pub(crate) buffers: RefCell<Vec<Vec<wchar_t>>>,
    pub(crate) running: Cell<Option<bool>>,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| predicate(call)).count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl EmbeddingApi for FakeApi {
    fn decode_locale(&self, arg: &CStr) -> Option<NonNull<wchar_t>> {
        self.record(Call::DecodeLocale(arg.to_string_lossy().into_owned()));
        if self.fail_decode {
            return None;
        }

        let mut wide: Vec<wchar_t> = arg
            .to_string_lossy()
            .chars()
            .map(|c| c as wchar_t)
            .chain(std::iter::once(0))
            .collect();
        let ptr = NonNull::new(wide.as_mut_ptr());
        self.buffers.borrow_mut().push(wide);
        ptr
    }

    unsafe fn raw_free(&self, _ptr: NonNull<wchar_t>) {
        self.record(Call::RawFree);
    }

    fn set_program_name(&self, _name: &ProgramName<'_>) {
        self.record(Call::SetProgramName);
    }

    fn append_inittab(&self, name: &'static CStr, _init: ModuleInit) -> bool {
        let name = name.to_string_lossy().into_owned();
        let accepted = self.reject_module.as_deref() != Some(name.as_str());
        self.record(Call::AppendInittab(name));
        accepted
    }

    fn initialize(&self, install_signal_handlers: bool) {
        self.record(Call::Initialize(install_signal_handlers));
        self.running.set(Some(!self.fail_initialize));
    }

    fn is_initialized(&self) -> bool {
        self.running.get().unwrap_or(self.already_initialized)
    }

    fn finalize(&self) -> i32 {
        self.record(Call::Finalize);
        self.running.set(Some(false));
        self.finalize_status
    }
}
