//! Animated trefoil-knot effect
//!
//! Parametric (3,2) torus knot: x = r(sin t + 2 sin 2t), y = r(cos t - 2 cos 2t).
//! Several phase-offset strands trace the curve at once while the stroke color
//! drifts and previous frames fade toward black, leaving trails.
//!
//! Controls:
//! - 1-9: Speed
//! - Space: Pause
//! - Q/Esc: Quit

use crate::canvas::{DotCanvas, Rgba};
use crate::config::{KnotConfig, StyleSpec};
use crate::curve::{CurveCache, RESOLUTION, STEP_SIZE};
use crate::terminal::Terminal;
use crossterm::event::{KeyCode, KeyModifiers};
use std::io;

// Fraction of the shorter grid edge used as the curve radius.
const RADIUS_DIVISOR: f64 = 7.0;
// Alpha of the black overlay blended over the canvas after each frame.
const FADE_ALPHA: f64 = 0.08;

/// Outcome of a single animation tick.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Tick {
    /// Mid-cycle; the caller sleeps the frame delay and ticks again.
    Continue,
    /// A full revolution finished; the controller has already reset itself.
    CycleComplete,
}

/// Animation controller for one canvas geometry.
///
/// Owns its curve cache, so the whole controller is rebuilt when the surface
/// changes size; dropping the old instance discards its pending tick.
pub struct KnotAnim {
    grid_w: usize,
    grid_h: usize,
    strands: usize,
    phase_offset: usize,
    style: StyleSpec,
    step: usize,
    color_var: f64,
    center: (f64, f64),
    cur: Vec<(f64, f64)>,
    prev: Vec<(f64, f64)>,
    cache: CurveCache,
}

impl KnotAnim {
    pub fn new(grid_w: usize, grid_h: usize, strands: usize, style: StyleSpec) -> Self {
        let strands = strands.max(1);
        let radius = (grid_w.min(grid_h) as f64 / RADIUS_DIVISOR).round();

        let mut anim = Self {
            grid_w,
            grid_h,
            strands,
            phase_offset: RESOLUTION / strands,
            style,
            step: 0,
            color_var: 0.0,
            center: (0.0, 0.0),
            cur: vec![(0.0, 0.0); strands],
            prev: vec![(0.0, 0.0); strands],
            cache: CurveCache::new(radius, RESOLUTION),
        };
        anim.reset();
        anim
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn phase_offset(&self) -> usize {
        self.phase_offset
    }

    pub fn strand_points(&self) -> &[(f64, f64)] {
        &self.cur
    }

    pub fn cache(&self) -> &CurveCache {
        &self.cache
    }

    /// Restart the cycle: zero the step and color accumulator, recompute the
    /// center, seed each strand from its phase offset. The canvas is left
    /// untouched so trails persist across cycles.
    pub fn reset(&mut self) {
        self.step = 0;
        self.color_var = 0.0;
        self.center = (
            (self.grid_w as f64 / 2.0).round(),
            (self.grid_h as f64 / 2.0).round(),
        );
        for i in 0..self.strands {
            self.cur[i] = self.cache.get(i * self.phase_offset);
        }
    }

    /// Draw one frame and advance the cycle.
    pub fn tick(&mut self, canvas: &mut DotCanvas) -> Tick {
        let current = self.step as f64 * STEP_SIZE;

        for i in 0..self.strands {
            self.prev[i] = self.cur[i];
            self.cur[i] = self.cache.get(self.step + i * self.phase_offset);
        }

        // Drifting color offsets layered onto the base style.
        let c3 = 16.0 * (self.color_var * 8.0).cos();
        let c1 = (56.0 * (self.color_var * 4.0).cos() + c3).floor();
        let c2 = (56.0 * (self.color_var * 4.0).sin() - c3).floor();

        let red = self.style.red + c1;
        let green = self.style.green + c2;
        let blue = self.style.blue - c1;
        let radius = self.cache.radius();

        let passes = [
            (
                radius * 0.1 + radius * 0.001 * c3,
                self.style.alpha[0] + c3 / 100.0,
            ),
            (
                radius * 0.2 + radius * 0.005 * c3,
                self.style.alpha[1] + c3 / 75.0,
            ),
            (
                radius * 0.1 - radius * 0.01 * c3,
                self.style.alpha[2] + c3 / 50.0,
            ),
        ];

        for (width, alpha) in passes {
            let color = Rgba {
                red,
                green,
                blue,
                alpha,
            };
            for i in 0..self.strands {
                canvas.stroke(
                    self.center.0 + self.prev[i].0,
                    self.center.1 + self.prev[i].1,
                    self.center.0 + self.cur[i].0,
                    self.center.1 + self.cur[i].1,
                    width,
                    color,
                );
            }
        }

        self.step += 1;
        self.color_var += STEP_SIZE * current.cos();
        canvas.fade(FADE_ALPHA);

        if self.step < self.cache.resolution() {
            Tick::Continue
        } else {
            self.cache.mark_ready();
            self.reset();
            Tick::CycleComplete
        }
    }
}

/// Runtime state for interactive controls
struct RunState {
    speed: f32,
    paused: bool,
}

impl RunState {
    fn new(initial_speed: f32) -> Self {
        Self {
            speed: initial_speed,
            paused: false,
        }
    }

    /// Handle keypress, returns true if should quit
    fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char(' ') => self.paused = !self.paused,
            // Number keys: change speed (1=fastest, 9=slowest, 0=very slow)
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let n = c.to_digit(10).unwrap() as u8;
                self.speed = match n {
                    1 => 0.005,
                    2 => 0.008,
                    3 => 0.012,
                    4 => 0.02,
                    5 => 0.03,
                    6 => 0.05,
                    7 => 0.07,
                    8 => 0.1,
                    9 => 0.15,
                    _ => 0.2,
                };
            }
            _ => {}
        }
        false
    }
}

/// Run the effect until quit. A terminal resize rebuilds the controller from
/// scratch (fresh cache, fresh geometry), superseding the running cycle.
pub fn run(term: &mut Terminal, config: &KnotConfig) -> io::Result<()> {
    let mut state = RunState::new(config.time_step);

    let (init_w, init_h) = term.size();
    let mut prev_w = init_w;
    let mut prev_h = init_h;

    let mut canvas = DotCanvas::for_terminal(init_w, init_h);
    let (grid_w, grid_h) = canvas.size();
    let mut anim = KnotAnim::new(grid_w, grid_h, config.strands, config.style);

    term.clear_screen()?;

    loop {
        let (width, height) = crossterm::terminal::size().unwrap_or(term.size());

        if width != prev_w || height != prev_h {
            term.resize(width, height);
            term.clear_screen()?;
            prev_w = width;
            prev_h = height;
            canvas = DotCanvas::for_terminal(width, height);
            let (grid_w, grid_h) = canvas.size();
            anim = KnotAnim::new(grid_w, grid_h, config.strands, config.style);
        }

        if let Some((code, mods)) = term.check_key()? {
            if state.handle_key(code, mods) {
                break;
            }
        }

        if state.paused {
            term.sleep(0.1);
            continue;
        }

        // Guard against zero-size terminal
        if width == 0 || height == 0 {
            term.sleep(0.1);
            continue;
        }

        anim.tick(&mut canvas);

        term.clear();
        canvas.flush(term);
        term.present()?;
        term.sleep(state.speed);
    }

    Ok(())
}

/// Render one full revolution off-screen and print the final frame.
pub fn print_frame(config: &KnotConfig) -> io::Result<()> {
    let mut term = Terminal::new(false)?;

    let (width, height) = term.size();
    let mut canvas = DotCanvas::for_terminal(width, height);
    let (grid_w, grid_h) = canvas.size();
    let mut anim = KnotAnim::new(grid_w, grid_h, config.strands, config.style);

    while anim.tick(&mut canvas) == Tick::Continue {}

    canvas.flush(&mut term);
    term.print_to_stdout();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{KnotAnim, Tick};
    use crate::canvas::DotCanvas;
    use crate::config::StyleSpec;
    use crate::curve::{CurveCache, RESOLUTION};

    fn test_anim(strands: usize) -> (KnotAnim, DotCanvas) {
        (
            KnotAnim::new(400, 400, strands, StyleSpec::default()),
            DotCanvas::new(400, 400),
        )
    }

    #[test]
    fn six_strands_are_evenly_phase_offset() {
        let (anim, _) = test_anim(6);
        assert_eq!(anim.phase_offset(), 70);

        // radius = round(min(400, 400) / 7)
        let mut expected = CurveCache::new(57.0, RESOLUTION);
        for (i, &point) in anim.strand_points().iter().enumerate() {
            assert_eq!(point, expected.get(i * 70), "strand {}", i);
        }
    }

    #[test]
    fn cycle_completes_after_exactly_resolution_ticks() {
        let (mut anim, mut canvas) = test_anim(6);

        for tick in 0..RESOLUTION - 1 {
            assert_eq!(anim.tick(&mut canvas), Tick::Continue, "tick {}", tick);
            assert!(!anim.cache().is_ready());
        }
        assert_eq!(anim.tick(&mut canvas), Tick::CycleComplete);
        assert!(anim.cache().is_ready());
        // CycleComplete already re-entered reset: the counter restarts at 0.
        assert_eq!(anim.step(), 0);
    }

    #[test]
    fn reset_discards_running_cycle() {
        let (mut anim, mut canvas) = test_anim(6);

        for _ in 0..100 {
            anim.tick(&mut canvas);
        }
        assert_eq!(anim.step(), 100);

        anim.reset();
        assert_eq!(anim.step(), 0);

        // A fresh cycle still takes exactly one full revolution.
        let mut ticks = 0;
        while anim.tick(&mut canvas) == Tick::Continue {
            ticks += 1;
        }
        assert_eq!(ticks + 1, RESOLUTION);
    }

    #[test]
    fn full_cycle_populates_cache_and_reset_preserves_it() {
        let (mut anim, mut canvas) = test_anim(6);

        for _ in 0..RESOLUTION {
            anim.tick(&mut canvas);
        }
        assert!(anim.cache().is_ready());

        // Every slot was visited and holds a real curve point; the curve
        // never passes through the origin.
        let snapshot: Vec<_> = (0..RESOLUTION).map(|s| anim.cache().sample(s)).collect();
        for (step, &pair) in snapshot.iter().enumerate() {
            assert_ne!(pair, (0.0, 0.0), "slot {} never written", step);
        }

        anim.reset();
        for _ in 0..10 {
            anim.tick(&mut canvas);
        }
        for (step, &pair) in snapshot.iter().enumerate() {
            assert_eq!(anim.cache().sample(step), pair, "slot {} changed", step);
        }
    }

    #[test]
    fn single_strand_covers_whole_revolution() {
        let (anim, _) = test_anim(1);
        assert_eq!(anim.phase_offset(), RESOLUTION);
        // Offset wraps: the lone strand starts at step 0.
        let mut expected = CurveCache::new(57.0, RESOLUTION);
        assert_eq!(anim.strand_points()[0], expected.get(0));
    }
}
