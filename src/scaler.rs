use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed nearest-neighbour mapping from window pixels to logical
/// framebuffer pixels. Aspect ratio is preserved; `None` marks letterbox bars.
pub struct ScaleMap {
    cols: Vec<Option<usize>>,
    rows: Vec<Option<usize>>,
    scale: f32,
    pad_x: f32,
    pad_y: f32,
    src_w: usize,
    src_h: usize,
}

impl ScaleMap {
    pub fn empty() -> Self {
        Self {
            cols: Vec::new(),
            rows: Vec::new(),
            scale: 1.0,
            pad_x: 0.0,
            pad_y: 0.0,
            src_w: 0,
            src_h: 0,
        }
    }

    /// Maps a window position back into logical framebuffer coordinates.
    /// Positions on the letterbox bars yield `None`.
    pub fn window_to_logical(&self, x: f32, y: f32) -> Option<[f32; 2]> {
        if self.src_w == 0 || self.src_h == 0 {
            return None;
        }
        let lx = (x - self.pad_x) / self.scale;
        let ly = (y - self.pad_y) / self.scale;
        if lx < 0.0 || ly < 0.0 || lx >= self.src_w as f32 || ly >= self.src_h as f32 {
            return None;
        }
        Some([lx, ly])
    }
}

fn axis_map(dst: usize, src: usize, scale: f32, pad: usize, span: usize) -> Vec<Option<usize>> {
    (0..dst)
        .map(|d| {
            if d < pad || d >= pad + span {
                return None;
            }
            let s = ((d - pad) as f32 / scale) as usize;
            Some(s.min(src - 1))
        })
        .collect()
}

pub fn build_scale_map(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleMap {
    if dst_w == 0 || dst_h == 0 || src_w == 0 || src_h == 0 {
        return ScaleMap::empty();
    }

    let scale = (dst_w as f32 / src_w as f32).min(dst_h as f32 / src_h as f32);
    let span_w = ((src_w as f32 * scale).round() as usize).min(dst_w);
    let span_h = ((src_h as f32 * scale).round() as usize).min(dst_h);
    let pad_x = (dst_w - span_w) / 2;
    let pad_y = (dst_h - span_h) / 2;

    ScaleMap {
        cols: axis_map(dst_w, src_w, scale, pad_x, span_w),
        rows: axis_map(dst_h, src_h, scale, pad_y, span_h),
        scale,
        pad_x: pad_x as f32,
        pad_y: pad_y as f32,
        src_w,
        src_h,
    }
}

/// Parallel nearest-neighbour stretch, one window row per task.
pub fn blit_nearest(dst: &mut [u32], dw: usize, src: &[u32], sw: usize, map: &ScaleMap) {
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let Some(sy) = map.rows.get(y).copied().flatten() else {
            dst_row.fill(0);
            return;
        };
        let src_row = &src[sy * sw..(sy + 1) * sw];
        for (x, px) in dst_row.iter_mut().enumerate() {
            *px = match map.cols.get(x).copied().flatten() {
                Some(sx) => src_row[sx],
                None => 0,
            };
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_without_bars() {
        let map = build_scale_map(4, 4, 2, 2);
        let src = [1, 2, 3, 4];
        let mut dst = vec![9; 16];
        blit_nearest(&mut dst, 4, &src, 2, &map);
        assert_eq!(
            dst,
            vec![1, 1, 2, 2, 1, 1, 2, 2, 3, 3, 4, 4, 3, 3, 4, 4]
        );
    }

    #[test]
    fn wide_window_gets_side_bars() {
        let map = build_scale_map(8, 4, 4, 4);
        let src: Vec<u32> = (1..=16).collect();
        let mut dst = vec![9; 32];
        blit_nearest(&mut dst, 8, &src, 4, &map);
        assert_eq!(&dst[0..8], &[0, 0, 1, 2, 3, 4, 0, 0]);
        assert_eq!(&dst[24..32], &[0, 0, 13, 14, 15, 16, 0, 0]);
    }

    #[test]
    fn window_clicks_map_back() {
        // 1200x900 logical shown in a 1600x900 window: 200 px bars each side
        let map = build_scale_map(1600, 900, 1200, 900);
        assert_eq!(map.window_to_logical(200.0, 0.0), Some([0.0, 0.0]));
        assert_eq!(map.window_to_logical(800.0, 450.0), Some([600.0, 450.0]));
        assert_eq!(map.window_to_logical(100.0, 450.0), None);
        assert_eq!(map.window_to_logical(1400.0, 450.0), None);

        let half = build_scale_map(600, 450, 1200, 900);
        assert_eq!(half.window_to_logical(300.0, 225.0), Some([600.0, 450.0]));
    }

    #[test]
    fn empty_map_rejects_clicks() {
        assert_eq!(ScaleMap::empty().window_to_logical(1.0, 1.0), None);
        assert_eq!(build_scale_map(0, 10, 10, 10).window_to_logical(0.0, 0.0), None);
    }
}
