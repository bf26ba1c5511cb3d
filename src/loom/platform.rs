//! Chunk dispatch, on the calling thread or on the `rayon` pool.

/// Maps every chunk base pointer through `f`, returning the results in chunk order.
///
/// With `parallel`, chunks run on the global `rayon` pool. Chunks share no state besides
/// what `f` borrows, so `f` must only read.
#[cfg(feature = "rayon")]
pub fn map_chunks<R, F>(offsets: &[usize], parallel: bool, f: F) -> Vec<R>
where
    R: Send,
    F: Fn(usize) -> R + Send + Sync,
{
    use rayon::prelude::*;

    match parallel && offsets.len() > 1 {
        true => {
            log::trace!("dispatch {} chunks to rayon", offsets.len());
            offsets.par_iter().map(|&offset| f(offset)).collect()
        }
        false => offsets.iter().map(|&offset| f(offset)).collect(),
    }
}

/// Maps every chunk base pointer through `f`, returning the results in chunk order.
#[cfg(not(feature = "rayon"))]
pub fn map_chunks<R, F>(offsets: &[usize], _parallel: bool, f: F) -> Vec<R>
where
    R: Send,
    F: Fn(usize) -> R + Send + Sync,
{
    offsets.iter().map(|&offset| f(offset)).collect()
}
