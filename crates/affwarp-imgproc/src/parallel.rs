use rayon::prelude::*;

/// Apply a function to every batch element of a destination buffer in parallel.
///
/// `dst` is split into chunks of `batch_stride` values; `f` receives the batch index
/// and the chunk of that element.
pub fn par_iter_batch<T: Send>(
    dst: &mut [T],
    batch_stride: usize,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) {
    if batch_stride == 0 {
        return;
    }
    dst.par_chunks_exact_mut(batch_stride)
        .enumerate()
        .for_each(|(b, chunk)| f(b, chunk));
}

/// Apply a function to every row of a (C, rows, cols) buffer in parallel.
///
/// `f` receives the channel index, the row index and the row values.
pub fn par_iter_rows<T: Send>(
    dst: &mut [T],
    rows: usize,
    cols: usize,
    f: impl Fn(usize, usize, &mut [T]) + Send + Sync,
) {
    if rows == 0 || cols == 0 {
        return;
    }
    dst.par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(k, dst_row)| f(k / rows, k % rows, dst_row));
}

#[cfg(test)]
mod tests {
    use super::{par_iter_batch, par_iter_rows};

    #[test]
    fn batch_chunks() {
        let mut dst = vec![0usize; 6];
        par_iter_batch(&mut dst, 2, |b, chunk| chunk.iter_mut().for_each(|v| *v = b));
        assert_eq!(dst, vec![0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn batch_zero_stride() {
        let mut dst: Vec<u8> = vec![];
        par_iter_batch(&mut dst, 0, |_, _| {});
        assert!(dst.is_empty());
    }

    #[test]
    fn rows_per_channel() {
        let mut dst = vec![(0usize, 0usize); 2 * 3 * 2];
        par_iter_rows(&mut dst, 3, 2, |c, r, row| row.iter_mut().for_each(|v| *v = (c, r)));
        assert_eq!(dst[0], (0, 0));
        assert_eq!(dst[5], (0, 2));
        assert_eq!(dst[6], (1, 0));
        assert_eq!(dst[11], (1, 2));
    }

    #[test]
    fn rows_empty_plane() {
        let mut dst: Vec<f32> = vec![];
        par_iter_rows(&mut dst, 0, 4, |_, _, _| unreachable!());
        assert!(dst.is_empty());
    }
}
