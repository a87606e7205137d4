/*!
 * Tracked Heap - Demo Entry Point
 *
 * Runs the copy and resize walkthroughs on the process-wide registry:
 * - `copy`: duplicate an int and read it back
 * - `resize`: grow an 8-int array to 16 ints
 * - `all` (default): both
 *
 * Nothing is released explicitly; the exit hook drains what is left.
 */

use miette::{IntoDiagnostic, Result};
use tracing::info;
use tracked_heap::memory::global;
use tracked_heap::{init_tracing, startup, track_allocate, track_duplicate, track_resize, HeapConfig};

const INT: usize = std::mem::size_of::<i32>();

fn read_ints(bytes: &[u8]) -> Vec<i32> {
    bytes
        .chunks_exact(INT)
        .map(|chunk| i32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

fn write_ints(bytes: &mut [u8], start: usize, values: impl IntoIterator<Item = i32>) {
    for (slot, value) in bytes.chunks_exact_mut(INT).skip(start).zip(values) {
        slot.copy_from_slice(&value.to_ne_bytes());
    }
}

fn join(values: &[i32]) -> String {
    values.iter().map(i32::to_string).collect::<Vec<_>>().join(" ")
}

fn run_copy() -> Result<()> {
    let x = track_allocate(INT)?;
    global::with_block_mut(x, |bytes| write_ints(bytes, 0, [42]))?;

    let y = track_duplicate(x, INT)?;
    let value = global::with_block(y, read_ints)?[0];
    println!("y: {}", value);

    if value != 42 {
        miette::bail!("copied value {} does not match the source", value);
    }
    Ok(())
}

fn run_resize() -> Result<()> {
    let arr = track_allocate(INT * 8)?;
    global::with_block_mut(arr, |bytes| write_ints(bytes, 0, 0..8))?;
    println!("Original array: {}", join(&global::with_block(arr, read_ints)?));

    let arr = track_resize(arr, INT * 16)?;
    global::with_block_mut(arr, |bytes| write_ints(bytes, 8, 8..16))?;
    println!("Resized array: {}", join(&global::with_block(arr, read_ints)?));
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();

    startup(HeapConfig::from_env())?;

    let mode = std::env::args().nth(1).unwrap_or_else(|| "all".to_string());
    match mode.as_str() {
        "copy" => run_copy()?,
        "resize" => run_resize()?,
        "all" => {
            run_copy()?;
            run_resize()?;
        }
        other => miette::bail!("unknown demo '{}', expected copy, resize or all", other),
    }

    let stats = global::stats()?;
    info!(
        stats = %serde_json::to_string(&stats).into_diagnostic()?,
        "Leaving main; exit hook drains the remaining blocks"
    );
    Ok(())
}
