//! Running statistics for a simulation session

use log::info;

/// Counters accumulated by [`super::SimWorld`] across ticks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimStats {
    pub ticks: u64,
    pub vehicles_spawned: u32,
    pub emergency_spawned: u32,
    /// Vehicles that left the visible area and were removed
    pub vehicles_exited: u32,
    /// Times an emergency vehicle took over the signal
    pub preemptions: u32,
    /// Regular Green/Yellow transitions
    pub phase_changes: u32,
    pub peak_vehicles: usize,
}

impl SimStats {
    /// Share of spawned vehicles that made it out, in percent
    pub fn throughput_rate(&self) -> f32 {
        if self.vehicles_spawned > 0 {
            (self.vehicles_exited as f32 / self.vehicles_spawned as f32) * 100.0
        } else {
            0.0
        }
    }

    /// Log the final report of a run
    pub fn log_summary(&self, active_vehicles: usize) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Ticks: {}", self.ticks);
        info!("Total vehicles spawned: {}", self.vehicles_spawned);
        info!("Emergency vehicles spawned: {}", self.emergency_spawned);
        info!("Total vehicles exited: {}", self.vehicles_exited);
        info!("Active vehicles: {}", active_vehicles);
        info!("Peak vehicles: {}", self.peak_vehicles);
        info!("Preemptions: {}", self.preemptions);
        info!("Phase changes: {}", self.phase_changes);
        info!("Throughput: {:.1}%", self.throughput_rate());
    }
}
