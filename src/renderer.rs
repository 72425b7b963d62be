use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::{
    actor::Actor,
    camera::Camera,
    geometry::{Point, Rect, SurfaceType},
    world::{Background, World},
};

const OUTLINE: i32 = 3;

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // BGRA8 in little-endian memory
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
    // Alpha at 0
}

pub fn surface_color(kind: SurfaceType) -> u32 {
    match kind {
        SurfaceType::Floor => pack_rgb(0, 0, 255),
        SurfaceType::Ceiling => pack_rgb(255, 0, 0),
        SurfaceType::LeftWall => pack_rgb(0, 255, 0),
        SurfaceType::RightWall => pack_rgb(255, 255, 0),
    }
}

/// Framebuffer plus its dimensions, for the drawing helpers below.
struct Canvas<'a> {
    buf: &'a mut [u32],
    width: usize,
    height: usize,
}

impl Canvas<'_> {
    /// Fills the half-open span [x0, x1) x [y0, y1), clipped to the buffer.
    fn fill(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let (x0, x1) = (x0.max(0), x1.min(self.width as i32));
        let (y0, y1) = (y0.max(0), y1.min(self.height as i32));
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for y in y0 as usize..y1 as usize {
            let row = y * self.width;
            self.buf[row + x0 as usize..row + x1 as usize].fill(color);
        }
    }

    fn outline(&mut self, r: Rect, thickness: i32, color: u32) {
        let x0 = r.left().round() as i32;
        let y0 = r.top().round() as i32;
        let x1 = r.right().round() as i32;
        let y1 = r.bottom().round() as i32;
        let t = thickness.min((x1 - x0) / 2).min((y1 - y0) / 2).max(1);

        self.fill(x0, y0, x1, y0 + t, color);
        self.fill(x0, y1 - t, x1, y1, color);
        self.fill(x0, y0, x0 + t, y1, color);
        self.fill(x1 - t, y0, x1, y1, color);
    }

    // Bresenham, stamping a square brush at each step
    fn line(&mut self, a: Point, b: Point, thickness: i32, color: u32) {
        let (mut x, mut y) = (a.x.round() as i32, a.y.round() as i32);
        let (xe, ye) = (b.x.round() as i32, b.y.round() as i32);
        let dx = (xe - x).abs();
        let dy = -(ye - y).abs();
        let sx = if x < xe { 1 } else { -1 };
        let sy = if y < ye { 1 } else { -1 };
        let mut err = dx + dy;
        let lo = thickness / 2;
        let hi = thickness - lo;

        loop {
            self.fill(x - lo, y - lo, x + hi, y + hi, color);
            if x == xe && y == ye {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

fn shift(r: Rect, camera: &Camera) -> Rect {
    let [x, y] = camera.world_to_screen([r.x, r.y]);
    Rect::new(x, y, r.w, r.h)
}

fn shift_point(p: Point, camera: &Camera) -> Point {
    let [x, y] = camera.world_to_screen([p.x, p.y]);
    Point::new(x, y)
}

/// Copies the visible slice of the background, rows in parallel.
fn draw_background(buf: &mut [u32], width: usize, bg: &Background, camera: &Camera, clear: u32) {
    let scroll = camera.offset.abs().round() as usize;
    let copy_w = width.min(bg.width);

    buf.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let src_y = y + scroll;
        if src_y >= bg.height {
            row.fill(clear);
            return;
        }
        let src = &bg.pixels[src_y * bg.width..src_y * bg.width + copy_w];
        row[..copy_w].copy_from_slice(src);
        row[copy_w..].fill(clear);
    });
}

pub fn render_frame(
    buf: &mut [u32],
    width: usize,
    height: usize,
    world: &World,
    camera: &Camera,
    actor: &Actor,
) {
    let clear = pack_rgb(0, 0, 0);
    match &world.background {
        Some(bg) => draw_background(buf, width, bg, camera, clear),
        None => buf.par_chunks_mut(width).for_each(|row| row.fill(clear)),
    }

    let mut canvas = Canvas { buf, width, height };

    for surface in &world.surfaces {
        canvas.outline(shift(surface.rect, camera), OUTLINE, surface_color(surface.kind));
    }

    let slope_color = pack_rgb(0, 0, 255);
    for slope in &world.slopes {
        canvas.line(
            shift_point(slope.start, camera),
            shift_point(slope.end, camera),
            OUTLINE,
            slope_color,
        );
    }

    let body = shift(actor.rect(), camera);
    canvas.fill(
        body.left().round() as i32,
        body.top().round() as i32,
        body.right().round() as i32,
        body.bottom().round() as i32,
        pack_rgb(0, 0, 255),
    );
}
