//! Chunked parallel access to column-major fields.
//!
//! `chunk_size` is the number of columns handed to one rayon task.
//! Each task owns a disjoint run of columns of the field being written,
//! so no two threads ever write the same cell.

use crate::state::Field;
use rayon::prelude::*;

/// Sets each element to the same value.
pub fn set_value(a_slice: &mut [f64], value: f64, chunk_size: usize) {
    a_slice
        .par_chunks_mut(chunk_size.max(1))
        .for_each(|a_chunk: &mut [f64]| {
            for a in a_chunk {
                *a = value;
            }
        });
}

/// Call `f(i, j, value_mut)` for every entry of `field`.
pub fn par_for_each_mut<F>(field: &mut Field, chunk_size: usize, f: F)
where
    F: Fn(usize, usize, &mut f64) + Send + Sync,
{
    let nrows = field.nrows();
    if nrows == 0 {
        return;
    }
    let chunk_len = nrows.saturating_mul(chunk_size.max(1));
    field
        .as_mut_slice()
        .par_chunks_mut(chunk_len)
        .enumerate()
        .for_each(|(c, chunk): (usize, &mut [f64])| {
            let offset = c * chunk_len;
            for (k, value_mut) in chunk.iter_mut().enumerate() {
                let linear = offset + k;
                f(linear % nrows, linear / nrows, value_mut);
            }
        });
}

/// Like `par_for_each_mut` over two equally shaped fields at once.
/// Each task returns a value, combined with `reduce`.
pub fn par_zip_map_reduce<F, R, T>(
    a: &mut Field,
    b: &mut Field,
    chunk_size: usize,
    f: F,
    identity: T,
    reduce: R,
) -> T
where
    F: Fn(usize, usize, &mut f64, &mut f64) -> T + Send + Sync,
    R: Fn(T, T) -> T + Send + Sync,
    T: Copy + Send + Sync,
{
    debug_assert_eq!(a.shape(), b.shape());
    let nrows = a.nrows();
    if nrows == 0 {
        return identity;
    }
    let chunk_len = nrows.saturating_mul(chunk_size.max(1));
    a.as_mut_slice()
        .par_chunks_mut(chunk_len)
        .zip(b.as_mut_slice().par_chunks_mut(chunk_len))
        .enumerate()
        .map(|(c, (a_chunk, b_chunk))| {
            let offset = c * chunk_len;
            let mut acc = identity;
            for (k, (a_mut, b_mut)) in
                a_chunk.iter_mut().zip(b_chunk.iter_mut()).enumerate()
            {
                let linear = offset + k;
                let r = f(linear % nrows, linear / nrows, a_mut, b_mut);
                acc = reduce(acc, r);
            }
            acc
        })
        .reduce(|| identity, &reduce)
}
