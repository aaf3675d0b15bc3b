//! Unix process operations

use crate::error::{Error, Result};
use crate::platform::traits::ProcessOps;

pub struct UnixProcess;

impl UnixProcess {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessOps for UnixProcess {
    fn logical_processor_count(&self) -> usize {
        crate::platform::available_processors()
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    fn set_affinity(&self, pid: u32, mask: u64) -> Result<()> {
        use nix::sched::{sched_setaffinity, CpuSet};
        use nix::unistd::Pid;

        let mut cpu_set = CpuSet::new();
        for cpu in 0..64usize {
            if mask & (1u64 << cpu) != 0 {
                cpu_set.set(cpu).map_err(|e| Error::AffinityFailed {
                    pid,
                    mask,
                    reason: e.to_string(),
                })?;
            }
        }

        sched_setaffinity(Pid::from_raw(pid as i32), &cpu_set).map_err(|e| {
            Error::AffinityFailed {
                pid,
                mask,
                reason: e.to_string(),
            }
        })
    }

    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    fn set_affinity(&self, _pid: u32, _mask: u64) -> Result<()> {
        Err(Error::AffinityNotSupported {
            platform: std::env::consts::OS.to_string(),
        })
    }
}
