/// Source index sampled by nearest neighbor for destination index `dst_idx`.
///
/// Computes `floor(dst_idx * src_len / dst_len)` in integer arithmetic, so the
/// fractional coordinate is truncated toward the lower neighbor without any
/// floating point error. The result is always below `src_len`.
#[inline]
pub(crate) fn nearest_source_index(dst_idx: usize, src_len: usize, dst_len: usize) -> usize {
    dst_idx * src_len / dst_len
}
