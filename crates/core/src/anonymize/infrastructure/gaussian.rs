/// Precompute a 1D Gaussian kernel of the given size.
///
/// `kernel_size` must be odd and >= 1. Sigma is derived as `kernel_size / 6.0`
/// (matching OpenCV's sigma=0 convention).
pub fn gaussian_kernel_1d(kernel_size: usize) -> Vec<f32> {
    debug_assert!(kernel_size >= 1 && kernel_size % 2 == 1);
    let sigma = kernel_size as f64 / 6.0;
    let half = (kernel_size / 2) as f64;
    let mut kernel_f64: Vec<f64> = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = kernel_f64.iter().sum();
    for v in &mut kernel_f64 {
        *v /= sum;
    }
    kernel_f64.iter().map(|&v| v as f32).collect()
}

/// Apply a separable Gaussian blur using a pre-computed kernel, reusing `temp`.
///
/// Use this in hot paths where the kernel is computed once and reused across frames.
pub fn separable_gaussian_blur_with_kernel(
    data: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &[f32],
    temp: &mut Vec<f32>,
) {
    let kernel_size = kernel.len();
    if kernel_size <= 1 || width == 0 || height == 0 {
        return;
    }
    let half = kernel_size / 2;

    let needed = width * height * channels;
    temp.resize(needed, 0.0);

    // Horizontal pass: data → temp
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for (k, &w) in kernel.iter().enumerate() {
                    let sx = (x as isize + k as isize - half as isize)
                        .max(0)
                        .min((width - 1) as isize) as usize;
                    sum += data[(y * width + sx) * channels + c] as f32 * w;
                }
                temp[(y * width + x) * channels + c] = sum;
            }
        }
    }

    // Vertical pass: temp → data
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for (k, &w) in kernel.iter().enumerate() {
                    let sy = (y as isize + k as isize - half as isize)
                        .max(0)
                        .min((height - 1) as isize) as usize;
                    sum += temp[(sy * width + x) * channels + c] * w;
                }
                data[(y * width + x) * channels + c] = sum.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// Convenience wrapper that allocates its own temp buffer.
#[cfg(test)]
pub fn separable_gaussian_blur(
    data: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel_size: usize,
) {
    if kernel_size <= 1 || width == 0 || height == 0 {
        return;
    }
    let kernel = gaussian_kernel_1d(kernel_size);
    let mut temp = Vec::new();
    separable_gaussian_blur_with_kernel(data, width, height, channels, &kernel, &mut temp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kernel_sums_to_one() {
        let k = gaussian_kernel_1d(7);
        let sum: f32 = k.iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_kernel_is_symmetric() {
        let k = gaussian_kernel_1d(7);
        for i in 0..k.len() / 2 {
            assert_relative_eq!(k[i], k[k.len() - 1 - i], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_kernel_center_is_largest() {
        let k = gaussian_kernel_1d(7);
        let center = k[3];
        for (i, &v) in k.iter().enumerate() {
            if i != 3 {
                assert!(center >= v);
            }
        }
    }

    #[test]
    fn test_blur_uniform_image_unchanged() {
        let mut data = vec![128u8; 10 * 10 * 3];
        separable_gaussian_blur(&mut data, 10, 10, 3, 5);
        assert!(data.iter().all(|&v| (v as i32 - 128).abs() <= 1));
    }

    #[test]
    fn test_blur_spreads_bright_pixel() {
        let mut data = vec![0u8; 10 * 10 * 3];
        let cx = 5 * 10 + 5;
        data[cx * 3] = 255;
        data[cx * 3 + 1] = 255;
        data[cx * 3 + 2] = 255;

        let original = data.clone();
        separable_gaussian_blur(&mut data, 10, 10, 3, 5);

        assert!(data[cx * 3] < 255);
        let neighbor = (5 * 10 + 6) * 3;
        assert!(data[neighbor] > 0);
        assert_ne!(data, original);
    }

    #[test]
    fn test_kernel_size_1_is_identity() {
        let mut data = vec![42u8; 5 * 5 * 3];
        let original = data.clone();
        separable_gaussian_blur(&mut data, 5, 5, 3, 1);
        assert_eq!(data, original);
    }
}
