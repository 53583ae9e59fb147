//! Real page backend: a mmap'd window of an XDMA device node.
//!
//! Opens the device read/write and maps one page of its address space as a
//! shared mapping, so the view is coherent with any other process-level view
//! of the same BAR. Bitstream loading and driver semantics are out of scope —
//! this module only deals in the raw region the kernel hands back.
//!
//! Teardown order matters: the mapping is released before the file
//! descriptor, and a handle whose mapping never succeeded closes only the fd.

use std::ffi::CString;
use std::ptr;

use axl_core::error::AxlError;
use tracing::debug;

use crate::page::RegisterPage;
use crate::regs::{PAGE_SIZE, Reg};

/// A device page mapped from a real device node.
///
/// Exactly one `XdmaPage` may exist per opened device; it exclusively owns
/// both the mapping and the descriptor and releases them together on drop.
#[derive(Debug)]
pub struct XdmaPage {
    base: *mut u32,
    fd: libc::c_int,
}

// SAFETY: the mapping is exclusively owned; the fd is not shared.
unsafe impl Send for XdmaPage {}

impl XdmaPage {
    /// Open `device_path` and map one page of its register space.
    ///
    /// Fails with [`AxlError::DeviceUnavailable`] if the node cannot be
    /// opened and [`AxlError::MappingFailed`] if the window cannot be mapped;
    /// in the latter case the descriptor is closed before returning, so no
    /// partial resource outlives the error.
    pub fn open(device_path: &str) -> Result<Self, AxlError> {
        let c_path = CString::new(device_path)
            .map_err(|_| AxlError::DeviceUnavailable(format!("bad path: {device_path}")))?;

        // SAFETY: open + mmap on a checked fd — standard device mapping.
        unsafe {
            let fd = libc::open(c_path.as_ptr(), libc::O_RDWR);
            if fd < 0 {
                return Err(AxlError::DeviceUnavailable(format!(
                    "{device_path}: {}",
                    std::io::Error::last_os_error()
                )));
            }

            let base = libc::mmap(
                ptr::null_mut(),
                PAGE_SIZE,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                fd,
                0,
            );
            if base == libc::MAP_FAILED {
                let err = std::io::Error::last_os_error();
                libc::close(fd);
                return Err(AxlError::MappingFailed(format!("{device_path}: {err}")));
            }

            debug!("mapped {PAGE_SIZE} bytes of {device_path} (fd={fd})");
            Ok(Self { base: base as *mut u32, fd })
        }
    }
}

impl RegisterPage for XdmaPage {
    #[inline]
    fn read_slot(&self, reg: Reg) -> u32 {
        // SAFETY: reg.offset() < PAGE_SLOTS, within the mapped window.
        unsafe { ptr::read_volatile(self.base.add(reg.offset())) }
    }

    #[inline]
    fn write_slot(&self, reg: Reg, value: u32) {
        // SAFETY: as above; the mapping is PROT_WRITE.
        unsafe { ptr::write_volatile(self.base.add(reg.offset()), value) }
    }
}

impl Drop for XdmaPage {
    fn drop(&mut self) {
        // Mapping first, then the descriptor.
        unsafe {
            if !self.base.is_null() {
                libc::munmap(self.base as *mut libc::c_void, PAGE_SIZE);
                self.base = ptr::null_mut();
            }
            if self.fd >= 0 {
                libc::close(self.fd);
                self.fd = -1;
            }
        }
    }
}
