use rayon::{
    iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed source column/row for every destination pixel
pub struct ScaleLut {
    src_x: Vec<usize>,
    src_y: Vec<usize>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            src_x: Vec::new(),
            src_y: Vec::new(),
        }
    }
}

/// Samples pixel centres so every source pixel maps to a whole block of
/// destination pixels.
fn nearest_axis(dst: usize, src: usize) -> Vec<usize> {
    if src == 0 {
        return vec![0; dst];
    }
    let step = src as f32 / dst as f32;
    (0..dst)
        .map(|d| (((d as f32 + 0.5) * step) as usize).min(src - 1))
        .collect()
}

pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    ScaleLut {
        src_x: nearest_axis(dst_w, src_w),
        src_y: nearest_axis(dst_h, src_h),
    }
}

/// Parallel nearest-neighbour stretch, one destination row per task
pub fn blit_nearest_stretch(dst: &mut [u32], dw: usize, src: &[u32], sw: usize, lut: &ScaleLut) {
    if dw == 0 {
        return;
    }
    dst.par_chunks_mut(dw)
        .zip(lut.src_y.par_iter())
        .for_each(|(dst_row, &sy)| {
            let row = &src[sy * sw..(sy + 1) * sw];
            for (out, &sx) in dst_row.iter_mut().zip(&lut.src_x) {
                *out = row[sx];
            }
        });
}

/// Internal buffer size for a window: fixed height, width from the aspect
/// ratio, rounded up to even.
pub fn internal_size(dst_w: usize, dst_h: usize, target_h: usize) -> (usize, usize) {
    let aspect = if dst_h > 0 {
        dst_w as f32 / dst_h as f32
    } else {
        1.0
    };

    let mut target_w = (target_h as f32 * aspect).round() as usize;
    if target_w < 160 {
        target_w = 160;
    }
    if target_w % 2 != 0 {
        target_w += 1;
    }
    (target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_lut() {
        let lut = build_scale_lut(4, 3, 4, 3);
        assert_eq!(lut.src_x, vec![0, 1, 2, 3]);
        assert_eq!(lut.src_y, vec![0, 1, 2]);
    }

    #[test]
    fn test_double_size_lut() {
        let lut = build_scale_lut(4, 2, 2, 1);
        assert_eq!(lut.src_x, vec![0, 0, 1, 1]);
        assert_eq!(lut.src_y, vec![0, 0]);
    }

    #[test]
    fn test_blit_upscale() {
        let src: [u32; 4] = [1, 2, 3, 4]; // 2x2
        let lut = build_scale_lut(4, 4, 2, 2);
        let mut dst = vec![0u32; 16];
        blit_nearest_stretch(&mut dst, 4, &src, 2, &lut);
        assert_eq!(dst, vec![1, 1, 2, 2, 1, 1, 2, 2, 3, 3, 4, 4, 3, 3, 4, 4]);
    }

    #[test]
    fn test_blit_downscale_stays_in_bounds() {
        let src: Vec<u32> = (0..100).collect(); // 10x10
        let lut = build_scale_lut(3, 3, 10, 10);
        let mut dst = vec![0u32; 9];
        blit_nearest_stretch(&mut dst, 3, &src, 10, &lut);
        assert!(dst.iter().all(|&p| p < 100));
    }

    #[test]
    fn test_internal_size_follows_aspect() {
        assert_eq!(internal_size(1280, 720, 720), (1280, 720));
        assert_eq!(internal_size(1920, 1080, 480), (854, 480));
        assert_eq!(internal_size(10, 1000, 480), (160, 480));
        assert_eq!(internal_size(0, 0, 240), (240, 240));
    }
}
