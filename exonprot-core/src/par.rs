/// Map `$f` over each element of `$slice`, in parallel when the `parallel`
/// feature is enabled, collecting into whatever the call site expects.
macro_rules! par_map {
    ($slice:expr, $f:expr) => {{
        #[cfg(feature = "parallel")]
        {
            use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
            $slice.par_iter().map($f).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            $slice.iter().map($f).collect()
        }
    }};
}
