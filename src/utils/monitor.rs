#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// 某個階段結束時的記憶體與耗時
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy)]
pub struct PhaseSnapshot {
    pub memory_mb: u64,
    pub peak_memory_mb: u64,
    pub elapsed: Duration,
}

/// Memory of this process after each ETL phase. Only the own PID is refreshed.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    started: Instant,
    peak_memory_mb: Mutex<u64>,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let pid = if enabled {
            let pid = sysinfo::get_current_pid().ok();
            if pid.is_none() {
                tracing::warn!("Could not resolve current PID, system stats disabled");
            }
            pid
        } else {
            None
        };

        Self {
            system: Mutex::new(System::new()),
            pid,
            started: Instant::now(),
            peak_memory_mb: Mutex::new(0),
        }
    }

    /// `None` when monitoring is off or the process vanished from the table.
    pub fn snapshot(&self) -> Option<PhaseSnapshot> {
        let pid = self.pid?;
        let mut system = self.system.lock().ok()?;
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        let memory_mb = system.process(pid)?.memory() / 1024 / 1024;

        let mut peak = self.peak_memory_mb.lock().ok()?;
        *peak = (*peak).max(memory_mb);

        Some(PhaseSnapshot {
            memory_mb,
            peak_memory_mb: *peak,
            elapsed: self.started.elapsed(),
        })
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(snapshot) = self.snapshot() {
            tracing::info!(
                "📊 {} - Memory: {}MB, Time: {:?}",
                phase,
                snapshot.memory_mb,
                snapshot.elapsed
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(snapshot) = self.snapshot() {
            tracing::info!(
                "📊 Run finished in {:?}, peak memory {}MB",
                snapshot.elapsed,
                snapshot.peak_memory_mb
            );
        }
    }
}

// 非 CLI 建置時沒有 sysinfo
#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_final_stats(&self) {}
}
