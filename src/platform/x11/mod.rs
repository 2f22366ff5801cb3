//! X11 platform implementation
//!
//! Core protocol only: one undecorated top-level window, a GC, a core font
//! and the default colormap. No toolkit, no Xft.

use super::{Color, DisplaySession, NativeBackend, Rect};
use crate::config::{Config, WindowConfig};
use crate::constants::{MAX_TEXT_CHARS, MWM_HINTS_DECORATIONS, MWM_HINTS_ELEMENTS};
use crate::dialog::{self, ButtonSpec, DialogEvent, DialogRequest, Key, LayoutMetrics, ResultCode};
use crate::error::{DialogError, Result};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use x11rb::connection::Connection;
use x11rb::errors::ReplyError;
use x11rb::protocol::xproto::{
    AtomEnum, ChangeGCAux, Char2b, Colormap, ConfigureWindowAux, ConnectionExt as _, CreateGCAux,
    CreateWindowAux, EventMask, Font, Gcontext, InputFocus, KeyButMask, Keycode, Keysym, PropMode,
    Rectangle, StackMode, Window, WindowClass,
};
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;
use x11rb::{COPY_DEPTH_FROM_PARENT, CURRENT_TIME};

// Keysyms from <X11/keysymdef.h>
const XK_SPACE: Keysym = 0x0020;
const XK_ISO_LEFT_TAB: Keysym = 0xfe20;
const XK_TAB: Keysym = 0xff09;
const XK_RETURN: Keysym = 0xff0d;
const XK_ESCAPE: Keysym = 0xff1b;
const XK_KP_ENTER: Keysym = 0xff8d;

/// Keycode to unshifted keysym, fetched once per connection
#[derive(Debug, Default)]
struct KeyMap {
    min_keycode: Keycode,
    per_keycode: usize,
    keysyms: Vec<Keysym>,
}

impl KeyMap {
    fn keysym(&self, keycode: Keycode) -> Keysym {
        let Some(offset) = keycode.checked_sub(self.min_keycode) else {
            return 0;
        };
        self.keysyms
            .get(usize::from(offset) * self.per_keycode)
            .copied()
            .unwrap_or(0)
    }

    fn decode(&self, keycode: Keycode, state: KeyButMask) -> DialogEvent {
        let shift = u16::from(state) & u16::from(KeyButMask::SHIFT) != 0;
        let (key, shift) = match self.keysym(keycode) {
            XK_RETURN | XK_KP_ENTER => (Key::Enter, shift),
            XK_SPACE => (Key::Space, shift),
            XK_ESCAPE => (Key::Escape, shift),
            XK_TAB => (Key::Tab, shift),
            XK_ISO_LEFT_TAB => (Key::Tab, true),
            _ => (Key::Other, shift),
        };
        DialogEvent::KeyPress { key, shift }
    }
}

/// Everything one dialog holds on the X server.
///
/// Fields are optional so a half-built session can still be torn down.
pub struct X11Session {
    conn: Option<RustConnection>,
    window: Option<Window>,
    gc: Option<Gcontext>,
    font: Option<Font>,
    colormap: Colormap,
    pixels: HashMap<Color, u32>,
    keymap: KeyMap,
}

impl X11Session {
    /// Connect, create and map the dialog window
    pub fn open(request: &DialogRequest, layout: &LayoutMetrics, config: &WindowConfig) -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(config.display.as_deref())?;
        let screen = conn
            .setup()
            .roots
            .get(screen_num)
            .cloned()
            .ok_or_else(|| DialogError::Connection(format!("screen {screen_num} not found")))?;

        info!(display = ?config.display, screen = screen_num, "Connected to X server");

        let mut session = Self {
            conn: Some(conn),
            window: None,
            gc: None,
            font: None,
            colormap: screen.default_colormap,
            pixels: HashMap::new(),
            keymap: KeyMap::default(),
        };

        // On error the half-built session is dropped, which closes it
        session.create_window(request, layout, config, &screen)?;
        Ok(session)
    }

    fn connection(&self) -> Result<&RustConnection> {
        self.conn
            .as_ref()
            .ok_or_else(|| DialogError::protocol("x11 session", "connection already closed"))
    }

    fn drawing(&self) -> Result<(&RustConnection, Window, Gcontext)> {
        match (self.window, self.gc) {
            (Some(window), Some(gc)) => Ok((self.connection()?, window, gc)),
            _ => Err(DialogError::protocol("x11 session", "window not created")),
        }
    }

    fn create_window(
        &mut self,
        request: &DialogRequest,
        layout: &LayoutMetrics,
        config: &WindowConfig,
        screen: &x11rb::protocol::xproto::Screen,
    ) -> Result<()> {
        let conn = self
            .conn
            .as_ref()
            .ok_or_else(|| DialogError::protocol("x11 session", "connection already closed"))?;

        let width = clamp_u16(layout.width);
        let height = clamp_u16(layout.height);
        let x = config
            .x
            .unwrap_or_else(|| centre(screen.width_in_pixels, width));
        let y = config
            .y
            .unwrap_or_else(|| centre(screen.height_in_pixels, height));

        let window = conn.generate_id()?;
        let aux = CreateWindowAux::new()
            .background_pixel(screen.white_pixel)
            .border_pixel(screen.black_pixel)
            .override_redirect(u32::from(config.override_redirect))
            .event_mask(
                EventMask::EXPOSURE
                    | EventMask::KEY_PRESS
                    | EventMask::BUTTON_PRESS
                    | EventMask::POINTER_MOTION,
            );
        conn.create_window(
            COPY_DEPTH_FROM_PARENT,
            window,
            screen.root,
            x,
            y,
            width,
            height,
            0,
            WindowClass::INPUT_OUTPUT,
            screen.root_visual,
            &aux,
        )?;
        self.window = Some(window);

        // Title: legacy Latin-1 property plus the EWMH UTF-8 one
        conn.change_property8(
            PropMode::REPLACE,
            window,
            AtomEnum::WM_NAME,
            AtomEnum::STRING,
            request.caption.as_bytes(),
        )?;
        let net_wm_name = intern(conn, b"_NET_WM_NAME")?;
        let utf8_string = intern(conn, b"UTF8_STRING")?;
        conn.change_property8(
            PropMode::REPLACE,
            window,
            net_wm_name,
            utf8_string,
            request.caption.as_bytes(),
        )?;

        let window_type = intern(conn, b"_NET_WM_WINDOW_TYPE")?;
        let dialog_type = intern(conn, b"_NET_WM_WINDOW_TYPE_DIALOG")?;
        conn.change_property32(PropMode::REPLACE, window, window_type, AtomEnum::ATOM, &[dialog_type])?;

        if config.undecorated {
            let motif = intern(conn, b"_MOTIF_WM_HINTS")?;
            let mut hints = [0u32; MWM_HINTS_ELEMENTS];
            hints[0] = MWM_HINTS_DECORATIONS;
            conn.change_property32(PropMode::REPLACE, window, motif, motif, &hints)?;
        }

        let gc = conn.generate_id()?;
        conn.create_gc(
            gc,
            window,
            &CreateGCAux::new()
                .foreground(screen.black_pixel)
                .background(screen.white_pixel)
                .graphics_exposures(0u32),
        )?;
        self.gc = Some(gc);

        let setup = conn.setup();
        let count = setup.max_keycode - setup.min_keycode + 1;
        let mapping = conn.get_keyboard_mapping(setup.min_keycode, count)?.reply()?;
        self.keymap = KeyMap {
            min_keycode: setup.min_keycode,
            per_keycode: usize::from(mapping.keysyms_per_keycode),
            keysyms: mapping.keysyms,
        };

        conn.map_window(window)?;
        conn.configure_window(window, &ConfigureWindowAux::new().stack_mode(StackMode::ABOVE))?;
        if config.override_redirect {
            // No window manager will hand us focus
            conn.set_input_focus(InputFocus::PARENT, window, CURRENT_TIME)?;
        }
        conn.flush()?;

        debug!(window, width, height, x, y, "Created dialog window");
        Ok(())
    }

    fn pixel(&mut self, color: Color) -> Result<u32> {
        if let Some(pixel) = self.pixels.get(&color) {
            return Ok(*pixel);
        }
        let conn = self.connection()?;
        let reply = conn
            .alloc_color(
                self.colormap,
                u16::from(color.r) * 257,
                u16::from(color.g) * 257,
                u16::from(color.b) * 257,
            )?
            .reply()?;
        self.pixels.insert(color, reply.pixel);
        Ok(reply.pixel)
    }
}

impl DisplaySession for X11Session {
    fn next_event(&mut self) -> Result<DialogEvent> {
        let event = self.connection()?.wait_for_event()?;
        Ok(match event {
            // Only the last of a series of exposures repaints
            Event::Expose(e) if e.count == 0 => DialogEvent::Expose,
            Event::KeyPress(e) => self.keymap.decode(e.detail, e.state),
            // Wheel "buttons" (4 and up) are not clicks
            Event::ButtonPress(e) if e.detail <= 3 => DialogEvent::ButtonPress {
                x: i32::from(e.event_x),
                y: i32::from(e.event_y),
            },
            Event::MotionNotify(e) => DialogEvent::Motion {
                x: i32::from(e.event_x),
                y: i32::from(e.event_y),
            },
            Event::Error(e) => return Err(DialogError::protocol("x11 request", format!("{e:?}"))),
            _ => DialogEvent::Ignored,
        })
    }

    fn load_font(&mut self, name: &str) -> Result<bool> {
        let (conn, _, gc) = self.drawing()?;
        let font = conn.generate_id()?;
        match conn.open_font(font, name.as_bytes())?.check() {
            Ok(()) => {}
            Err(ReplyError::X11Error(e)) => {
                debug!(font = name, error = ?e.error_kind, "Font did not resolve");
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        }
        conn.change_gc(gc, &ChangeGCAux::new().font(font))?;
        if let Some(previous) = self.font.replace(font) {
            self.connection()?.close_font(previous)?;
        }
        Ok(true)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()> {
        let pixel = self.pixel(color)?;
        let (conn, window, gc) = self.drawing()?;
        conn.change_gc(gc, &ChangeGCAux::new().foreground(pixel))?;
        conn.poly_fill_rectangle(window, gc, &[to_rectangle(rect, 0)])?;
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) -> Result<()> {
        let pixel = self.pixel(color)?;
        let (conn, window, gc) = self.drawing()?;
        conn.change_gc(gc, &ChangeGCAux::new().foreground(pixel))?;
        // Outlines cover width + 1 pixels
        conn.poly_rectangle(window, gc, &[to_rectangle(rect, 1)])?;
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, fg: Color, bg: Color) -> Result<()> {
        let fg = self.pixel(fg)?;
        let bg = self.pixel(bg)?;
        let (conn, window, gc) = self.drawing()?;
        conn.change_gc(gc, &ChangeGCAux::new().foreground(fg).background(bg))?;
        conn.image_text16(window, gc, clamp_i16(x), clamp_i16(y), &encode_ucs2(text))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.connection()?.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        // Taking the connection first means it is dropped (closed) on every path
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };

        let mut teardown = Teardown::default();
        if let Some(window) = self.window.take() {
            teardown.step("clear window", conn.clear_area(false, window, 0, 0, 0, 0));
            teardown.step("destroy window", conn.destroy_window(window));
        }
        if let Some(gc) = self.gc.take() {
            teardown.step("free gc", conn.free_gc(gc));
        }
        if let Some(font) = self.font.take() {
            teardown.step("close font", conn.close_font(font));
        }
        teardown.step("flush", conn.flush());
        teardown.step("sync", conn.sync());
        drop(conn);

        info!(failed_steps = teardown.failed, "Closed X11 dialog");
        teardown.finish()
    }
}

/// Runs every teardown step regardless of earlier failures and keeps the first error.
#[derive(Debug, Default)]
struct Teardown {
    first: Option<DialogError>,
    failed: usize,
}

impl Teardown {
    fn step<T, E>(&mut self, op: &'static str, outcome: std::result::Result<T, E>)
    where
        E: Into<DialogError>,
    {
        if let Err(e) = outcome {
            let err = e.into();
            warn!(op, error = %err, "X11 teardown step failed");
            self.failed += 1;
            self.first.get_or_insert(err);
        }
    }

    fn finish(self) -> Result<()> {
        self.first.map_or(Ok(()), Err)
    }
}

impl Drop for X11Session {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(error = %e, "X11 teardown failed");
        }
    }
}

/// Opens one [`X11Session`] per dialog.
pub struct X11Backend {
    config: Config,
}

impl X11Backend {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl NativeBackend for X11Backend {
    fn name(&self) -> &'static str {
        "x11"
    }

    fn show(&self, request: &DialogRequest, buttons: &ButtonSpec) -> Result<ResultCode> {
        let layout = LayoutMetrics::compute(request, buttons, &self.config.layout);
        let mut session = X11Session::open(request, &layout, &self.config.window)?;
        dialog::run(&mut session, request, buttons, &layout, &self.config.fonts)
    }
}

fn intern(conn: &RustConnection, name: &[u8]) -> Result<u32> {
    Ok(conn.intern_atom(false, name)?.reply()?.atom)
}

fn centre(screen: u16, size: u16) -> i16 {
    clamp_i16((i32::from(screen) - i32::from(size)) / 2)
}

fn clamp_i16(v: i32) -> i16 {
    v.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

fn clamp_u16(v: u32) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

fn to_rectangle(rect: Rect, shrink: u32) -> Rectangle {
    Rectangle {
        x: clamp_i16(rect.x),
        y: clamp_i16(rect.y),
        width: clamp_u16(rect.width.saturating_sub(shrink)),
        height: clamp_u16(rect.height.saturating_sub(shrink)),
    }
}

/// Text for ImageText16: one UCS-2 unit per char, truncated to the request limit
fn encode_ucs2(text: &str) -> Vec<Char2b> {
    text.chars()
        .take(MAX_TEXT_CHARS)
        .map(|c| {
            let code = u32::from(c);
            let code = if code > 0xffff { u32::from('?') } else { code };
            Char2b {
                byte1: (code >> 8) as u8,
                byte2: (code & 0xff) as u8,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelSource;

    fn keymap() -> KeyMap {
        // Two keysyms per keycode starting at 8; keycodes 8..=13
        KeyMap {
            min_keycode: 8,
            per_keycode: 2,
            keysyms: vec![
                XK_RETURN, 0, XK_SPACE, 0, XK_ESCAPE, 0, XK_TAB, XK_ISO_LEFT_TAB, XK_ISO_LEFT_TAB, 0,
                0x61, 0x41,
            ],
        }
    }

    #[test]
    fn test_keysym_decoding() {
        let map = keymap();
        let none = KeyButMask::from(0u16);
        assert_eq!(map.decode(8, none), DialogEvent::KeyPress { key: Key::Enter, shift: false });
        assert_eq!(map.decode(9, none), DialogEvent::KeyPress { key: Key::Space, shift: false });
        assert_eq!(map.decode(10, none), DialogEvent::KeyPress { key: Key::Escape, shift: false });
        assert_eq!(map.decode(13, none), DialogEvent::KeyPress { key: Key::Other, shift: false });
    }

    #[test]
    fn test_shift_tab_variants() {
        let map = keymap();
        assert_eq!(
            map.decode(11, KeyButMask::SHIFT),
            DialogEvent::KeyPress { key: Key::Tab, shift: true }
        );
        assert_eq!(
            map.decode(12, KeyButMask::from(0u16)),
            DialogEvent::KeyPress { key: Key::Tab, shift: true }
        );
    }

    #[test]
    fn test_keycode_out_of_range() {
        let map = keymap();
        assert_eq!(map.keysym(3), 0);
        assert_eq!(map.keysym(200), 0);
    }

    #[test]
    fn test_ucs2_encoding() {
        let encoded = encode_ucs2("Aé日🛑");
        assert_eq!(encoded.len(), 4);
        assert_eq!((encoded[0].byte1, encoded[0].byte2), (0x00, 0x41));
        assert_eq!((encoded[1].byte1, encoded[1].byte2), (0x00, 0xe9));
        assert_eq!((encoded[2].byte1, encoded[2].byte2), (0x65, 0xe5));
        assert_eq!((encoded[3].byte1, encoded[3].byte2), (0x00, b'?'));
        assert_eq!(encode_ucs2(&"x".repeat(400)).len(), MAX_TEXT_CHARS);
    }

    fn open_on(display: &str) -> Result<X11Session> {
        let request = DialogRequest::new("c", "body", crate::dialog::ButtonSet::Ok, crate::dialog::Icon::None);
        let buttons = ButtonSpec::new(request.buttons, &crate::labels::BuiltinLabels.resolve("en"));
        let layout = LayoutMetrics::compute(&request, &buttons, &crate::config::LayoutConfig::default());
        let config = WindowConfig {
            display: Some(display.to_string()),
            ..WindowConfig::default()
        };
        X11Session::open(&request, &layout, &config)
    }

    #[test]
    fn test_unreachable_display_is_a_connection_error() {
        let err = open_on(":987").err().expect("no server on display 987");
        assert!(matches!(err, DialogError::Connection(_)), "{err:?}");
    }

    #[test]
    fn test_malformed_display_is_a_connection_error() {
        let err = open_on("not a display").err().expect("display name does not parse");
        assert!(matches!(err, DialogError::Connection(_)), "{err:?}");
    }

    #[test]
    fn test_teardown_runs_every_step_and_keeps_first_error() {
        let mut teardown = Teardown::default();
        for (op, outcome) in [
            ("clear window", Err(DialogError::protocol("clear window", "bad window"))),
            ("destroy window", Ok(())),
            ("free gc", Err(DialogError::protocol("free gc", "bad gc"))),
            ("sync", Ok(())),
        ] {
            teardown.step(op, outcome);
        }
        // The gc failure is only seen if steps after the first failure still run
        assert_eq!(teardown.failed, 2);
        match teardown.finish() {
            Err(DialogError::Protocol { op, detail }) => {
                assert_eq!(op, "clear window");
                assert_eq!(detail, "bad window");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_clean_teardown_is_ok() {
        let mut teardown = Teardown::default();
        teardown.step("flush", Ok::<(), DialogError>(()));
        assert!(teardown.finish().is_ok());
    }

    #[test]
    fn test_geometry_clamps() {
        assert_eq!(centre(1920, 300), 810);
        assert_eq!(centre(200, 300), -50);
        assert_eq!(clamp_u16(70_000), u16::MAX);
        let r = to_rectangle(Rect::new(5, 6, 100, 30), 1);
        assert_eq!((r.x, r.y, r.width, r.height), (5, 6, 99, 29));
    }
}
