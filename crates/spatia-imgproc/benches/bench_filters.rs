use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use spatia_image::Image;
use spatia_imgproc::filter::{
    convolve2d, gaussian_blur, kernels, sharpen, sobel_edges, GaussianBlurConfig,
};

fn bench_gaussian_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gaussian Blur");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for kernel_size in [3, 5, 7, 9].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * *kernel_size) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, kernel_size);

            let image_size = [*width, *height].into();
            let image = Image::<u8, 3>::from_size_val(image_size, 0).unwrap();
            let config = GaussianBlurConfig {
                kernel_size: *kernel_size,
                sigma: 1.5,
            };

            group.bench_with_input(
                BenchmarkId::new("gaussian_blur_u8", &parameter_string),
                &(&image, &config),
                |b, i| b.iter(|| black_box(gaussian_blur(i.0, i.1))),
            );

            let plane = Image::<f32, 1>::from_size_val(image_size, 0.0).unwrap();
            let kernel = kernels::gaussian_kernel_2d(*kernel_size, 1.5).unwrap();

            group.bench_with_input(
                BenchmarkId::new("convolve2d_f32", &parameter_string),
                &(&plane, &kernel),
                |b, i| b.iter(|| black_box(convolve2d(i.0, i.1))),
            );
        }
    }

    group.finish();
}

fn bench_laplacian_sobel(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sharpen and Edges");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_data = (0..width * height * 3).map(|i| (i % 256) as u8).collect();
        let image = Image::<u8, 3>::new([*width, *height].into(), image_data).unwrap();

        group.bench_with_input(
            BenchmarkId::new("sharpen", &parameter_string),
            &image,
            |b, i| b.iter(|| black_box(sharpen(i))),
        );

        group.bench_with_input(
            BenchmarkId::new("sobel_edges", &parameter_string),
            &image,
            |b, i| b.iter(|| black_box(sobel_edges(i))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_gaussian_blur, bench_laplacian_sobel);
criterion_main!(benches);
