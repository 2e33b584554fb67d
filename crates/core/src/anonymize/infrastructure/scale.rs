//! Integer-factor and arbitrary-size resampling helpers shared by the
//! blur and pixelate anonymizers.

/// Downscale an image by integer factor using area averaging.
pub fn downscale(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    scale: usize,
) -> (Vec<u8>, usize, usize) {
    let new_w = width / scale;
    let new_h = height / scale;
    let mut out = vec![0u8; new_w * new_h * channels];

    for y in 0..new_h {
        for x in 0..new_w {
            for c in 0..channels {
                let mut sum = 0u32;
                let mut count = 0u32;
                for dy in 0..scale {
                    for dx in 0..scale {
                        let sy = y * scale + dy;
                        let sx = x * scale + dx;
                        if sy < height && sx < width {
                            sum += data[(sy * width + sx) * channels + c] as u32;
                            count += 1;
                        }
                    }
                }
                out[(y * new_w + x) * channels + c] = (sum / count) as u8;
            }
        }
    }

    (out, new_w, new_h)
}

/// Resample to an arbitrary size using area averaging over each
/// destination cell. Used by pixelate, where the shrink factor comes from
/// user input and need not divide the region evenly.
pub fn resize_area(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    target_w: usize,
    target_h: usize,
) -> Vec<u8> {
    let mut out = vec![0u8; target_w * target_h * channels];

    for y in 0..target_h {
        let sy0 = y * height / target_h;
        let sy1 = (((y + 1) * height).div_ceil(target_h)).min(height).max(sy0 + 1);
        for x in 0..target_w {
            let sx0 = x * width / target_w;
            let sx1 = (((x + 1) * width).div_ceil(target_w)).min(width).max(sx0 + 1);
            for c in 0..channels {
                let mut sum = 0u32;
                for sy in sy0..sy1 {
                    for sx in sx0..sx1 {
                        sum += data[(sy * width + sx) * channels + c] as u32;
                    }
                }
                let count = ((sy1 - sy0) * (sx1 - sx0)) as u32;
                out[(y * target_w + x) * channels + c] = (sum / count) as u8;
            }
        }
    }

    out
}

/// Upscale to the target size using bilinear interpolation.
pub fn upscale_bilinear(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    target_w: usize,
    target_h: usize,
) -> Vec<u8> {
    let mut out = vec![0u8; target_w * target_h * channels];

    for y in 0..target_h {
        for x in 0..target_w {
            let src_x = x as f32 * (width as f32 - 1.0) / (target_w as f32 - 1.0).max(1.0);
            let src_y = y as f32 * (height as f32 - 1.0) / (target_h as f32 - 1.0).max(1.0);

            let x0 = (src_x.floor() as usize).min(width - 1);
            let x1 = (x0 + 1).min(width - 1);
            let y0 = (src_y.floor() as usize).min(height - 1);
            let y1 = (y0 + 1).min(height - 1);

            let fx = src_x - x0 as f32;
            let fy = src_y - y0 as f32;

            for c in 0..channels {
                let v00 = data[(y0 * width + x0) * channels + c] as f32;
                let v10 = data[(y0 * width + x1) * channels + c] as f32;
                let v01 = data[(y1 * width + x0) * channels + c] as f32;
                let v11 = data[(y1 * width + x1) * channels + c] as f32;

                let val = v00 * (1.0 - fx) * (1.0 - fy)
                    + v10 * fx * (1.0 - fy)
                    + v01 * (1.0 - fx) * fy
                    + v11 * fx * fy;
                out[(y * target_w + x) * channels + c] = val.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    out
}

/// Upscale to the target size using nearest-neighbor sampling. Keeps the
/// hard block edges the mosaic effect depends on.
pub fn upscale_nearest(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    target_w: usize,
    target_h: usize,
) -> Vec<u8> {
    let mut out = vec![0u8; target_w * target_h * channels];

    for y in 0..target_h {
        let sy = (y * height / target_h).min(height - 1);
        for x in 0..target_w {
            let sx = (x * width / target_w).min(width - 1);
            let src = (sy * width + sx) * channels;
            let dst = (y * target_w + x) * channels;
            out[dst..dst + channels].copy_from_slice(&data[src..src + channels]);
        }
    }

    out
}
