//! Windows process operations

use crate::error::{Error, Result};
use crate::platform::traits::ProcessOps;

pub struct WindowsProcess;

impl WindowsProcess {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessOps for WindowsProcess {
    fn logical_processor_count(&self) -> usize {
        crate::platform::available_processors()
    }

    fn set_affinity(&self, pid: u32, mask: u64) -> Result<()> {
        use windows_sys::Win32::Foundation::{CloseHandle, GetLastError};
        use windows_sys::Win32::System::Threading::{
            OpenProcess, SetProcessAffinityMask, PROCESS_QUERY_INFORMATION,
            PROCESS_SET_INFORMATION,
        };

        unsafe {
            let handle = OpenProcess(PROCESS_SET_INFORMATION | PROCESS_QUERY_INFORMATION, 0, pid);
            if handle.is_null() {
                return Err(Error::AffinityFailed {
                    pid,
                    mask,
                    reason: format!("OpenProcess failed: {}", GetLastError()),
                });
            }

            let ok = SetProcessAffinityMask(handle, mask as usize);
            let last_error = GetLastError();
            CloseHandle(handle);

            if ok == 0 {
                return Err(Error::AffinityFailed {
                    pid,
                    mask,
                    reason: format!("SetProcessAffinityMask failed: {}", last_error),
                });
            }
        }

        Ok(())
    }
}
