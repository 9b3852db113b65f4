//! Counting global allocator
//!
//! The agent binary installs [`CountingAllocator`] as its `#[global_allocator]`
//! so the sampler can report heap statistics without any runtime hooks.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};

static ALLOCATED: AtomicU64 = AtomicU64::new(0);
static TOTAL_ALLOCATED: AtomicU64 = AtomicU64::new(0);
static MALLOCS: AtomicU64 = AtomicU64::new(0);
static FREES: AtomicU64 = AtomicU64::new(0);

/// Wraps the system allocator and counts bytes and calls
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingAllocator;

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: forwarded verbatim to the system allocator
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        // SAFETY: forwarded verbatim to the system allocator
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: `ptr` was handed out by `alloc` with this layout
        unsafe { System.dealloc(ptr, layout) };
        record_free(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: forwarded verbatim to the system allocator
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            record_free(layout.size());
            record_alloc(new_size);
        }
        new_ptr
    }
}

fn record_alloc(size: usize) {
    ALLOCATED.fetch_add(size as u64, Ordering::Relaxed);
    TOTAL_ALLOCATED.fetch_add(size as u64, Ordering::Relaxed);
    MALLOCS.fetch_add(1, Ordering::Relaxed);
}

fn record_free(size: usize) {
    ALLOCATED.fetch_sub(size as u64, Ordering::Relaxed);
    FREES.fetch_add(1, Ordering::Relaxed);
}

/// Point-in-time allocator counters
///
/// All zero unless [`CountingAllocator`] is the global allocator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocStats {
    /// Bytes currently allocated
    pub allocated: u64,
    /// Bytes ever allocated
    pub total_allocated: u64,
    /// Allocation calls
    pub mallocs: u64,
    /// Deallocation calls
    pub frees: u64,
}

impl AllocStats {
    pub fn current() -> Self {
        Self {
            allocated: ALLOCATED.load(Ordering::Relaxed),
            total_allocated: TOTAL_ALLOCATED.load(Ordering::Relaxed),
            mallocs: MALLOCS.load(Ordering::Relaxed),
            frees: FREES.load(Ordering::Relaxed),
        }
    }

    /// Live allocations
    pub fn live_objects(&self) -> u64 {
        self.mallocs.saturating_sub(self.frees)
    }
}
