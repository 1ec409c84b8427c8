use ndarray::{Array, Array1, Array2, Ix1};
use rand::{
    distr::{uniform::SampleUniform, Uniform},
    rngs::StdRng,
    Rng, SeedableRng,
};

#[allow(dead_code)]
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub trait RandArray<T> {
    fn from_rand(size: usize, range: (T, T), seed: u64) -> Self;
    #[allow(dead_code)]
    fn from_rand_ordered(size: usize, range: (T, T), seed: u64) -> Self;
}

impl<T: SampleUniform + PartialOrd> RandArray<T> for Array<T, Ix1> {
    fn from_rand(size: usize, range: (T, T), seed: u64) -> Self {
        Array::from_iter(
            rng(seed)
                .sample_iter(Uniform::new_inclusive(range.0, range.1).unwrap())
                .take(size),
        )
    }

    fn from_rand_ordered(size: usize, range: (T, T), seed: u64) -> Self {
        let mut arr = Vec::from_iter(
            rng(seed)
                .sample_iter(Uniform::new_inclusive(range.0, range.1).unwrap())
                .take(size),
        );
        arr.sort_by(|a, b| a.partial_cmp(b).unwrap());
        arr.dedup();
        Array::from(arr)
    }
}

/// A `size × size` grid on `[0, size - 1]²` sampled with random values
#[allow(dead_code)]
pub fn rand_grid(size: usize, seed: u64) -> (Array1<f64>, Array1<f64>, Array2<f64>) {
    let x = Array::linspace(0.0, (size - 1) as f64, size);
    let y = Array::linspace(0.0, (size - 1) as f64, size);
    let z = Array::from_rand(size * size, (0.0, 1.0), seed)
        .into_shape_with_order((size, size))
        .unwrap();
    (x, y, z)
}
