//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::grid::{Frame, Grid, compute_frame};
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A cooperative-cancellation token backed by an [`AtomicBool`].
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Signal the application loop to stop.
    End,
}

// ---------------------------------------------------------------------------
// Model trait
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `grid`.
    fn draw(&self, grid: &mut Grid);
}

// ---------------------------------------------------------------------------
// Driver trait
// ---------------------------------------------------------------------------

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Wait up to one frame interval for input and send the resulting
    /// messages through `tx`, followed by a [`Msg::Tick`] once the interval
    /// has elapsed. Should return early when `ctx.is_done()`.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Clean up / restore the screen.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
}

impl<M: Model, D: Driver> App<M, D> {
    /// Create a new application from a configuration.
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
        }
    }

    /// Borrow the model, e.g. to inspect it after [`run`](Self::run).
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the main Model-View-Update loop.
    ///
    /// 1. Initialises the driver.
    /// 2. Sends `Msg::Init` through the model.
    /// 3. Enters the event loop: poll → update → draw → diff → flush.
    /// 4. Stops when the model returns `Effect::End`.
    ///
    /// The driver is closed on every exit path.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;
        let result = self.event_loop();
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        let mut prev_grid = Grid::new(self.width, self.height);
        let mut curr_grid = Grid::new(self.width, self.height);

        // The first frame is always flushed in full.
        self.process_pending(&rx, &ctx, &mut prev_grid, &mut curr_grid, true)?;

        while !ctx.is_done() {
            self.driver.poll_msgs(&ctx, tx.clone())?;
            if ctx.is_done() {
                break;
            }
            self.process_pending(&rx, &ctx, &mut prev_grid, &mut curr_grid, false)?;
        }
        Ok(())
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
        prev_grid: &mut Grid,
        curr_grid: &mut Grid,
        full: bool,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if let Some(Effect::End) = self.model.update(msg) {
                ctx.cancel();
                return Ok(());
            }
            needs_draw = true;
        }

        if needs_draw {
            self.model.draw(curr_grid);
            let frame = if full {
                compute_frame(&Grid::new(0, 0), curr_grid)
            } else {
                compute_frame(prev_grid, curr_grid)
            };
            if !frame.cells.is_empty() {
                self.driver.flush(frame)?;
            }
            prev_grid.clone_from(curr_grid);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use crate::glyph::Glyph;
    use std::collections::VecDeque;

    /// Counts ticks and draws the count as a digit.
    struct Counter {
        ticks: u32,
        stop_after: u32,
    }

    impl Model for Counter {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            match msg {
                Msg::Tick { .. } => {
                    self.ticks += 1;
                    None
                }
                Msg::Quit => Some(Effect::End),
                _ if self.ticks >= self.stop_after => Some(Effect::End),
                _ => None,
            }
        }

        fn draw(&self, grid: &mut Grid) {
            let ch = char::from_digit(self.ticks % 10, 10).unwrap_or('?');
            grid.set(Point::new(0, 0), Glyph::new(ch));
        }
    }

    /// Replays a script of messages, one per poll, then quits.
    #[derive(Default)]
    struct ScriptDriver {
        script: VecDeque<Msg>,
        frames: Vec<Frame>,
        inited: bool,
        closed: bool,
    }

    impl Driver for ScriptDriver {
        fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            self.inited = true;
            Ok(())
        }

        fn poll_msgs(
            &mut self,
            _ctx: &Context,
            tx: Sender<Msg>,
        ) -> Result<(), Box<dyn std::error::Error>> {
            let msg = self.script.pop_front().unwrap_or(Msg::Quit);
            tx.send(msg).ok();
            Ok(())
        }

        fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.frames.push(frame);
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    fn run(script: Vec<Msg>) -> (Counter, ScriptDriver) {
        let driver = ScriptDriver {
            script: script.into(),
            ..Default::default()
        };
        let mut app = App::new(AppConfig {
            model: Counter {
                ticks: 0,
                stop_after: u32::MAX,
            },
            driver,
            width: 2,
            height: 1,
        });
        app.run().unwrap();
        (app.model, app.driver)
    }

    #[test]
    fn ticks_reach_the_model_and_frames_are_diffed() {
        let (model, driver) = run(vec![Msg::tick(), Msg::tick(), Msg::tick()]);
        assert!(driver.inited);
        assert!(driver.closed);
        assert_eq!(model.ticks, 3);
        // Initial full frame plus one single-glyph diff per tick.
        assert_eq!(driver.frames.len(), 4);
        assert_eq!(driver.frames[0].cells.len(), 2);
        assert_eq!(driver.frames[3].cells.len(), 1);
        assert_eq!(driver.frames[3].cells[0].glyph.ch, '3');
    }

    #[test]
    fn end_stops_before_later_messages() {
        let (model, driver) = run(vec![Msg::tick(), Msg::Quit, Msg::tick()]);
        assert_eq!(model.ticks, 1);
        assert!(driver.closed);
        // The second tick stays unread in the script.
        assert_eq!(driver.script.len(), 1);
    }
}
