//! Job table lookups
//!
//! The tables are small and read once at boot, so lookups are linear searches.

use super::types::{CoreId, JobDescriptor, JobId, JobLaunchSpec};

/// Find the descriptor for `id`
///
/// Returns `None` if the table has no entry for that id.
pub fn find_descriptor(table: &[JobDescriptor], id: JobId) -> Option<&JobDescriptor> {
    table.iter().find(|d| d.id == id)
}

/// Enabled launch specs bound to `core`, with their table index
///
/// The index is also the index of the job's runtime record.
pub fn launch_specs_for(
    specs: &[JobLaunchSpec],
    core: CoreId,
) -> impl Iterator<Item = (usize, &JobLaunchSpec)> {
    specs
        .iter()
        .enumerate()
        .filter(move |(_, s)| s.core == core && s.enabled)
}
