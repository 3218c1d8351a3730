pub mod memory;
pub mod swap;

use crate::error::ProbeError;
use crate::metrics::Registry;

pub use memory::{MemorySource, SystemMemory};
pub use swap::{CommandSwapSource, SwapSource};

/// Collect swap, then physical memory, into the registry.
///
/// Physical memory is only read once the swap query has resolved.
pub async fn collect_all(
    registry: &mut Registry,
    swap_source: &impl SwapSource,
    memory_source: &impl MemorySource,
) -> Result<(), ProbeError> {
    let swap = swap::collect(swap_source).await?;
    swap.apply(registry);

    let memory = memory::collect(memory_source);
    memory.apply(registry);

    Ok(())
}
