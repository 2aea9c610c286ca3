//! Crossterm terminal driver.
//!
//! Provides a [`CrosstermDriver`] that implements [`summit_core::Driver`]:
//! it turns terminal input into [`Msg`]s, emits one [`Msg::Tick`] per frame
//! interval, and paints diff frames with crossterm.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{self, Attribute, Color as CtColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use summit_core::{AttrMask, Color, Context, Driver, Frame, Key, ModMask, Msg};

/// Default interval between two ticks (about 60 per second).
pub const DEFAULT_TICK: Duration = Duration::from_millis(16);

/// Maps a [`summit_core::Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    if c == Color::DEFAULT {
        CtColor::Reset
    } else {
        CtColor::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        }
    }
}

/// Maps crossterm key modifiers to a [`ModMask`].
fn to_mod_mask(mods: KeyModifiers) -> ModMask {
    let mut m = ModMask::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        m = m | ModMask::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        m = m | ModMask::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        m = m | ModMask::ALT;
    }
    m
}

/// Maps a crossterm [`KeyCode`] to a [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

/// Translate one terminal event. Key releases and repeats are dropped.
fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => to_key(code).map(|key| Msg::KeyDown {
            key,
            modifiers: to_mod_mask(modifiers),
            time: Instant::now(),
        }),
        Event::Resize(w, h) => Some(Msg::Screen {
            width: w as i32,
            height: h as i32,
            time: Instant::now(),
        }),
        _ => None,
    }
}

/// The terminal attributes to switch on for `attrs`.
fn to_attributes(attrs: AttrMask) -> Vec<Attribute> {
    let mut out = Vec::new();
    if attrs.contains(AttrMask::BOLD) {
        out.push(Attribute::Bold);
    }
    if attrs.contains(AttrMask::REVERSE) {
        out.push(Attribute::Reverse);
    }
    if attrs.contains(AttrMask::DIM) {
        out.push(Attribute::Dim);
    }
    out
}

/// A terminal back-end using crossterm.
#[derive(Debug)]
pub struct CrosstermDriver {
    tick: Duration,
    next_tick: Option<Instant>,
}

impl CrosstermDriver {
    /// Create a new driver ticking every [`DEFAULT_TICK`].
    pub fn new() -> Self {
        Self {
            tick: DEFAULT_TICK,
            next_tick: None,
        }
    }

    /// Configure the interval between ticks. Zero is raised to one
    /// millisecond.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick.max(Duration::from_millis(1));
        self
    }

    #[inline]
    pub fn tick(&self) -> Duration {
        self.tick
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        self.next_tick = Some(Instant::now() + self.tick);
        log::debug!("terminal initialised, tick every {:?}", self.tick);
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let deadline = *self.next_tick.get_or_insert_with(|| Instant::now() + self.tick);

        // Forward input until the tick is due, then send the tick.
        loop {
            if ctx.is_done() {
                return Ok(());
            }
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            if !event::poll(deadline - now)? {
                break;
            }
            if let Some(msg) = to_msg(event::read()?) {
                tx.send(msg).ok();
                // Let the app react to input without waiting for the tick.
                return Ok(());
            }
        }

        let now = Instant::now();
        // Skip missed intervals rather than bursting to catch up.
        self.next_tick = Some(if now >= deadline + self.tick {
            now + self.tick
        } else {
            deadline + self.tick
        });
        tx.send(Msg::tick()).ok();
        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout().lock();

        for fc in &frame.cells {
            let p = fc.pos;
            let glyph = &fc.glyph;
            queue!(
                stdout,
                cursor::MoveTo(p.x as u16, p.y as u16),
                SetForegroundColor(to_ct_color(glyph.style.fg)),
                SetBackgroundColor(to_ct_color(glyph.style.bg))
            )?;
            let attrs = to_attributes(glyph.style.attrs);
            for &a in &attrs {
                queue!(stdout, style::SetAttribute(a))?;
            }
            write!(stdout, "{}", glyph.ch)?;
            if !attrs.is_empty() {
                queue!(stdout, style::SetAttribute(Attribute::Reset))?;
            }
        }

        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        log::debug!("terminal restored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn colors_map_to_rgb_or_reset() {
        assert_eq!(to_ct_color(Color::DEFAULT), CtColor::Reset);
        assert_eq!(
            to_ct_color(Color::from_rgb(10, 20, 30)),
            CtColor::Rgb {
                r: 10,
                g: 20,
                b: 30
            }
        );
    }

    #[test]
    fn space_gets_its_own_key() {
        assert_eq!(to_key(KeyCode::Char(' ')), Some(Key::Space));
        assert_eq!(to_key(KeyCode::Char('q')), Some(Key::Char('q')));
        assert_eq!(to_key(KeyCode::Esc), Some(Key::Escape));
        assert_eq!(to_key(KeyCode::F(1)), None);
    }

    #[test]
    fn modifiers() {
        let m = to_mod_mask(KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert!(m.contains(ModMask::CTRL));
        assert!(m.contains(ModMask::SHIFT));
        assert!(!m.contains(ModMask::ALT));
        assert!(to_mod_mask(KeyModifiers::NONE).is_empty());
    }

    #[test]
    fn key_press_becomes_key_down() {
        match to_msg(press(KeyCode::Char('+'), KeyModifiers::SHIFT)) {
            Some(Msg::KeyDown { key, modifiers, .. }) => {
                assert_eq!(key, Key::Char('+'));
                assert_eq!(modifiers, ModMask::SHIFT);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn key_release_is_dropped() {
        let ev = Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert!(to_msg(ev).is_none());
    }

    #[test]
    fn resize_becomes_screen() {
        assert!(matches!(
            to_msg(Event::Resize(80, 24)),
            Some(Msg::Screen {
                width: 80,
                height: 24,
                ..
            })
        ));
        assert!(to_msg(Event::FocusGained).is_none());
    }

    #[test]
    fn attributes() {
        assert!(to_attributes(AttrMask::NONE).is_empty());
        assert_eq!(
            to_attributes(AttrMask::BOLD | AttrMask::DIM),
            vec![Attribute::Bold, Attribute::Dim]
        );
    }

    #[test]
    fn tick_is_never_zero() {
        let d = CrosstermDriver::new().with_tick(Duration::ZERO);
        assert_eq!(d.tick(), Duration::from_millis(1));
        assert_eq!(CrosstermDriver::default().tick(), DEFAULT_TICK);
    }
}
