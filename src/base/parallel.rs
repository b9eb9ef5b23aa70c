use rayon::prelude::*;

/// Maps independent jobs in parallel, preserving the order of the inputs
///
/// The jobs must be pure functions of their own input; no state is shared
/// between them, hence no locking is needed.
pub fn par_map<T, U, F>(inputs: &[T], job: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    inputs.par_iter().map(|x| job(x)).collect()
}

/// Maps independent jobs indexed by 0..n in parallel, preserving the order
pub fn par_map_index<U, F>(n: usize, job: F) -> Vec<U>
where
    U: Send,
    F: Fn(usize) -> U + Sync + Send,
{
    (0..n).into_par_iter().map(|k| job(k)).collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
