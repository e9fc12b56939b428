//! Global allocator bring-up.
//!
//! On bare-metal targets the toolkit allocates from a linked-list heap over
//! a region handed in by the boot code. Hosted builds keep the system
//! allocator and `init` only logs.

use linked_list_allocator::Heap;

pub const HEAP_SIZE: usize = 1024 * 1024; // 1 MiB

#[cfg(target_os = "none")]
#[global_allocator]
static ALLOCATOR: linked_list_allocator::LockedHeap = linked_list_allocator::LockedHeap::empty();

/// Hand `size` bytes at `start` to the global allocator.
///
/// # Safety
///
/// The region must be valid, writable, unused by anything else, and live
/// for the rest of the program. Call at most once.
#[cfg(target_os = "none")]
pub unsafe fn init(start: usize, size: usize) {
    configure(&mut ALLOCATOR.lock(), start, size);
}

/// Hosted builds allocate from the system; nothing to install.
///
/// # Safety
///
/// Always safe on hosted targets; kept `unsafe` to match the bare-metal
/// signature.
#[cfg(not(target_os = "none"))]
pub unsafe fn init(start: usize, size: usize) {
    log::debug!(
        "Hosted target; ignoring heap region {:#x}+{:#x}",
        start,
        size
    );
}

#[cfg_attr(not(any(test, target_os = "none")), allow(dead_code))]
unsafe fn configure(heap: &mut Heap, start: usize, size: usize) {
    heap.init(start as *mut u8, size);
    log::info!("Heap: {} KiB at {:#x}", size / 1024, start);
}
