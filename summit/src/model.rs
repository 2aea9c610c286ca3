//! Elm-architecture model: advances the search once per tick and draws it.

use std::collections::HashSet;

use summit_core::{AttrMask, Effect, Glyph, Grid, Key, Model, Msg, Point, Style};
use summit_paths::{HeightMap, SearchState, Stepper, Terrain};

use crate::colors;
use crate::config::{HikeConfig, MAX_BUDGET, SearchMode};

const HELP_TEXT: &str = "q quit  space pause  n step  r restart  +/- budget  t mode";

/// Status and help lines below the map.
const FOOTER_HEIGHT: i32 = 3;

/// The search viewer.
pub struct HikeModel {
    map: HeightMap,
    mode: SearchMode,
    stepper: Stepper,
    budget: usize,
    paused: bool,
    /// Visited count before the latest step; later cells are drawn bold.
    last_mark: usize,
    ticks: u64,
}

impl HikeModel {
    pub fn new(map: HeightMap, config: &HikeConfig) -> Self {
        let stepper = config.mode.stepper(&map);
        Self {
            map,
            mode: config.mode,
            stepper,
            budget: config.budget(),
            paused: config.paused,
            last_mark: 0,
            ticks: 0,
        }
    }

    /// Screen size needed to show the whole map and the footer.
    pub fn screen_size(&self) -> (i32, i32) {
        let width = self.map.columns().max(HELP_TEXT.len() as i32);
        (width, self.map.rows() + FOOTER_HEIGHT)
    }

    #[inline]
    pub fn stepper(&self) -> &Stepper {
        &self.stepper
    }

    #[inline]
    pub fn map(&self) -> &HeightMap {
        &self.map
    }

    #[inline]
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    #[inline]
    pub fn budget(&self) -> usize {
        self.budget
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Steps taken since the search was last (re)started.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // -------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------

    fn advance(&mut self, budget: usize) {
        if self.stepper.state().is_terminal() {
            return;
        }
        self.last_mark = self.stepper.visited().mark();
        self.stepper.step(&self.map, budget);
        self.ticks += 1;
    }

    fn restart(&mut self) {
        self.stepper = self.mode.stepper(&self.map);
        self.last_mark = 0;
        self.ticks = 0;
        log::debug!("search restarted {}", self.mode);
    }

    fn handle_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Escape | Key::Char('q') => return Some(Effect::End),
            Key::Space => self.paused = !self.paused,
            Key::Char('n') if self.paused => self.advance(1),
            Key::Char('r') => self.restart(),
            Key::Char('+') | Key::Char('=') => {
                self.budget = self.budget.saturating_mul(2).min(MAX_BUDGET);
                log::debug!("budget {}", self.budget);
            }
            Key::Char('-') => {
                self.budget = (self.budget / 2).max(1);
                log::debug!("budget {}", self.budget);
            }
            Key::Char('t') => {
                self.mode = self.mode.toggled();
                self.restart();
            }
            _ => {}
        }
        None
    }

    // -------------------------------------------------------------------
    // Draw
    // -------------------------------------------------------------------

    /// Distinct cells waiting in the frontier.
    fn queued_cells(&self) -> HashSet<Point> {
        self.stepper.frontier().iter().map(|e| e.pos).collect()
    }

    fn cell_glyph(&self, p: Point, queued: &HashSet<Point>) -> Glyph {
        let ch = self.map.marker(p);
        let shade = colors::elevation(self.map.relative_height(p));
        let style = if p == self.map.start() {
            Style::DEFAULT.with_fg(colors::MARKER_INK).with_bg(colors::START)
        } else if p == self.map.end() {
            Style::DEFAULT.with_fg(colors::MARKER_INK).with_bg(colors::END)
        } else if self.stepper.visited().contains(p) {
            Style::DEFAULT.with_fg(colors::INK).with_bg(shade)
        } else if queued.contains(&p) {
            Style::DEFAULT.with_fg(shade).with_bg(colors::QUEUED)
        } else {
            Style::DEFAULT.with_fg(shade)
        };
        Glyph::new(ch).with_style(style)
    }

    fn draw_map(&self, grid: &mut Grid) {
        let queued = self.queued_cells();
        for p in self.map.bounds() {
            grid.set(p, self.cell_glyph(p, &queued));
        }
        // Cells added by the latest step.
        for entry in self.stepper.visited().since(self.last_mark) {
            let g = self.cell_glyph(entry.pos, &queued);
            let style = g.style.with_attrs(g.style.attrs | AttrMask::BOLD);
            grid.set(entry.pos, g.with_style(style));
        }
    }

    fn status(&self) -> (String, Style) {
        let s = &self.stepper;
        let mut text = format!(
            "{} | {} | visited {} | queued {} | budget {} | tick {}",
            self.mode,
            s.state().label(),
            s.visited().len(),
            s.frontier().len(),
            self.budget,
            self.ticks,
        );
        let style = match (s.state(), s.goal_distance()) {
            (SearchState::GoalReached, Some(d)) => {
                text = format!("{text} | summit in {d} steps");
                Style::DEFAULT.with_fg(colors::FOUND)
            }
            (SearchState::Exhausted, _) => {
                text = format!("{text} | no route found");
                Style::DEFAULT.with_fg(colors::LOST)
            }
            _ => Style::DEFAULT.with_fg(colors::STATUS_FG),
        };
        if self.paused {
            text.push_str(" [paused]");
        }
        (text, style)
    }

    fn draw_footer(&self, grid: &mut Grid) {
        let y = self.map.rows() + 1;
        let (text, style) = self.status();
        grid.print(Point::new(0, y), &text, style);
        grid.print(
            Point::new(0, y + 1),
            HELP_TEXT,
            Style::DEFAULT.with_fg(colors::HELP_FG),
        );
    }
}

impl Model for HikeModel {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => {
                log::info!(
                    "{}x{} map, searching {} with budget {}",
                    self.map.columns(),
                    self.map.rows(),
                    self.mode,
                    self.budget
                );
                None
            }
            Msg::Tick { .. } => {
                if !self.paused {
                    self.advance(self.budget);
                }
                None
            }
            Msg::KeyDown { key, .. } => self.handle_key(key),
            Msg::Quit => Some(Effect::End),
            Msg::Screen { .. } => None,
        }
    }

    fn draw(&self, grid: &mut Grid) {
        grid.fill(Glyph::default());
        self.draw_map(grid);
        self.draw_footer(grid);
    }
}
