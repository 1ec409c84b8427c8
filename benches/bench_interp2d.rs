use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::{Array, Zip};
use ndarray_interp2d::{
    interp2d::{Bicubic, Bilinear, Interp2D, Interp2DType, Spline2D},
    InterpAccel,
};

use rand_extensions::{rand_grid, RandArray};

mod rand_extensions;

fn bench_method(c: &mut Criterion, kind: &'static dyn Interp2DType<f64>) {
    let (x, y, z) = rand_grid(100, 42);
    let mut interp = Interp2D::new(kind, 100, 100).unwrap();
    interp.init(&x, &y, &z).unwrap();
    let query_x = Array::from_rand(10_000, (0.0, 99.0), 123);
    let query_y = Array::from_rand(10_000, (0.0, 99.0), 96);
    let name = kind.name();

    c.bench_function(&format!("{name} `init`"), |b| {
        b.iter(|| interp.init(&x, &y, &z).unwrap())
    });

    c.bench_function(&format!("{name} `eval` random"), |b| {
        b.iter(|| {
            query_x.iter().zip(query_y.iter()).for_each(|(&qx, &qy)| {
                interp.eval(&x, &y, &z, qx, qy, None, None).unwrap();
            });
        })
    });

    let (mut xa, mut ya) = (InterpAccel::new(), InterpAccel::new());
    c.bench_function(&format!("{name} `eval` random with accel"), |b| {
        b.iter(|| {
            query_x.iter().zip(query_y.iter()).for_each(|(&qx, &qy)| {
                interp
                    .eval(&x, &y, &z, qx, qy, Some(&mut xa), Some(&mut ya))
                    .unwrap();
            });
        })
    });

    // a scan along y visits neighbouring cells
    let scan_x = Array::linspace(0.0, 99.0, 100);
    let scan_y = Array::linspace(0.0, 99.0, 100);
    c.bench_function(&format!("{name} `eval` scan"), |b| {
        b.iter(|| {
            for &qx in &scan_x {
                for &qy in &scan_y {
                    interp.eval(&x, &y, &z, qx, qy, None, None).unwrap();
                }
            }
        })
    });

    let (mut xa, mut ya) = (InterpAccel::new(), InterpAccel::new());
    c.bench_function(&format!("{name} `eval` scan with accel"), |b| {
        b.iter(|| {
            for &qx in &scan_x {
                for &qy in &scan_y {
                    interp
                        .eval(&x, &y, &z, qx, qy, Some(&mut xa), Some(&mut ya))
                        .unwrap();
                }
            }
        })
    });
}

fn bench_bilinear(c: &mut Criterion) {
    bench_method(c, &Bilinear);
}

fn bench_bicubic(c: &mut Criterion) {
    bench_method(c, &Bicubic);
}

fn bench_spline_multithread(c: &mut Criterion) {
    let (x, y, z) = rand_grid(100, 42);
    let spline = Spline2D::new(&Bicubic, x, y, z).unwrap();
    let query_x = Array::from_rand(10_000, (0.0, 99.0), 123);
    let query_y = Array::from_rand(10_000, (0.0, 99.0), 96);

    c.bench_function("bicubic MT `eval`", |b| {
        b.iter(|| {
            Zip::from(&query_x).and(&query_y).par_for_each(|&qx, &qy| {
                spline.eval(qx, qy, None, None).unwrap();
            });
        })
    });
}

criterion_group!(
    benches,
    bench_bilinear,
    bench_bicubic,
    bench_spline_multithread
);
criterion_main!(benches);
