/*!
 * Limits and Constants
 *
 * Block layout and index bounds shared by the registry and its tests.
 */

// =============================================================================
// BLOCK LAYOUT
// =============================================================================

/// Alignment of every tracked block (matches malloc's max_align_t on 64-bit)
pub const BLOCK_ALIGN: usize = 16;

/// Bytes reserved in front of each block for its recorded size
/// Kept equal to BLOCK_ALIGN so the caller-visible address stays aligned
pub const BLOCK_HEADER: usize = BLOCK_ALIGN;

// =============================================================================
// INDEX BOUNDS
// =============================================================================

/// Worst-case AVL height factor: height <= 1.44 * log2(n + 2)
pub const AVL_HEIGHT_FACTOR: f64 = 1.44;

/// Upper bound on the height of a balanced index holding `len` keys
pub fn max_index_height(len: usize) -> u32 {
    (AVL_HEIGHT_FACTOR * ((len as f64) + 2.0).log2()).ceil() as u32
}
