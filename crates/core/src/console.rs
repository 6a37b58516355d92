//! Command dispatcher: one input line in, one rendered reply out.
//!
//! The console owns the backend, the configuration, and the session
//! slot. Every per-command failure is converted to a printed line here;
//! nothing propagates out of `handle_line`, so the read-dispatch-print
//! loop in the binary never has to recover from anything.

use crate::command::Command;
use crate::config::Config;
use crate::device::{self, DeviceDescriptor};
use crate::error::Error;
use crate::session::Session;
use crate::transport::HidBackend;

/// Banner printed once before the first prompt.
pub const INTRO: &str = "\nwelcome to gorb driver tool. \ntype help to get how to use.";

/// Prompt shown before each input line.
pub const PROMPT: &str = "\ngorb> ";

/// Farewell line printed when the loop ends.
pub const FAREWELL: &str = "bye!";

const HELP: &str = "\
commands:
  list                         list all hid device from gorb
  connect <device_id>          connect specified device to do command
  disconnect                   disconnect current device
  setdpi <dpi value>           set dpi, value clamped to [50, 26000]
  macro <dx> <dy> [buttons]    move <dx> <dy> px and press button bits
  help                         show this message";

const USAGE_CONNECT: &str = "usage: connect <device_id>";
const USAGE_SETDPI: &str = "usage: setdpi <dpi value>";
const USAGE_MACRO: &str = "usage: macro <delta axis_x> <delta axis_y> <button bits>";

/// The interactive console over one backend and one session slot.
pub struct Console<B: HidBackend> {
    backend: B,
    config: Config,
    session: Session,
}

impl<B: HidBackend> Console<B> {
    pub fn new(backend: B, config: Config) -> Self {
        Self {
            backend,
            config,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Dispatch one input line and render the reply.
    ///
    /// An empty reply means silent success (nothing to print).
    pub fn handle_line(&mut self, line: &str) -> String {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(_) => return invalid_params(line),
        };

        match command {
            Command::Empty => String::new(),
            Command::Help => HELP.to_string(),
            Command::List => self.list(),
            Command::Connect(index) => self.connect(index),
            Command::Disconnect => self.disconnect(),
            Command::SetDpi(value) => self.set_dpi(value),
            Command::Macro { dx, dy, buttons } => self.send_macro(dx, dy, buttons.as_deref()),
            Command::Unknown(verb) => {
                format!("unrecognized command: {verb}\ntype help to get how to use.")
            }
        }
    }

    fn list(&mut self) -> String {
        match device::list_devices(&mut self.backend, &self.config) {
            Ok(devices) => render_device_table(&devices),
            Err(e) => format!("list failed: {e}"),
        }
    }

    fn connect(&mut self, index: i64) -> String {
        match self.session.connect(&mut self.backend, &self.config, index) {
            Ok(product) => format!("connected to: {product}"),
            Err(Error::SessionAlreadyOpen) => Error::SessionAlreadyOpen.to_string(),
            Err(Error::ManufacturerMismatch { .. }) => "error idx".to_string(),
            Err(e) => format!("connect failed: {e}"),
        }
    }

    fn disconnect(&mut self) -> String {
        match self.session.disconnect() {
            Ok(()) => String::new(),
            Err(e) => e.to_string(),
        }
    }

    fn set_dpi(&mut self, value: i64) -> String {
        match self.session.set_dpi(value) {
            Ok(dpi) => format!("setdpi success : {dpi}"),
            Err(Error::Transport(msg)) => format!("setdpi error : {msg}"),
            Err(Error::NoActiveSession) => Error::NoActiveSession.to_string(),
            Err(e) => format!("setdpi failed: {e}"),
        }
    }

    fn send_macro(&mut self, dx: i64, dy: i64, buttons: Option<&str>) -> String {
        match self.session.send_macro(dx, dy, buttons) {
            Ok(()) => format!("send macro success : {dx} {dy}"),
            Err(Error::Parse(_)) => format!("invalid params\n{USAGE_MACRO}"),
            Err(Error::Transport(msg)) => format!("send macro error : {msg}"),
            Err(Error::NoActiveSession) => Error::NoActiveSession.to_string(),
            Err(e) => format!("send macro failed: {e}"),
        }
    }
}

/// Per-verb usage line for a malformed command.
fn invalid_params(line: &str) -> String {
    let usage = match line.split_whitespace().next() {
        Some("connect") => USAGE_CONNECT,
        Some("setdpi") => USAGE_SETDPI,
        Some("macro") => USAGE_MACRO,
        _ => "type help to get how to use.",
    };
    format!("invalid params\n{usage}")
}

const TABLE_HEADERS: [&str; 6] = ["idx", "product_id", "product_string", "usage", "path", "type"];

fn render_device_table(devices: &[DeviceDescriptor]) -> String {
    let rows: Vec<Vec<String>> = devices
        .iter()
        .map(|d| {
            vec![
                d.index.to_string(),
                or_na(d.product_id.map(|v| v.to_string())),
                or_na(d.product_string.clone()),
                or_na(d.usage.map(|v| v.to_string())),
                d.path.clone(),
                DeviceDescriptor::TRANSPORT.to_string(),
            ]
        })
        .collect();
    render_grid(&TABLE_HEADERS, &rows)
}

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| "N/A".to_string())
}

/// Render a bordered grid table with a `=` rule under the header.
fn render_grid(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let rule = |fill: char| -> String {
        let mut line = String::from("+");
        for &w in &widths {
            line.extend(std::iter::repeat(fill).take(w + 2));
            line.push('+');
        }
        line
    };
    let line = |cells: &[String]| -> String {
        let mut out = String::from("|");
        for (cell, &w) in cells.iter().zip(&widths) {
            out.push_str(&format!(" {cell:<w$} |"));
        }
        out
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = String::new();
    out.push_str(&rule('-'));
    out.push('\n');
    out.push_str(&line(&header_cells));
    out.push('\n');
    out.push_str(&rule('='));
    for row in rows {
        out.push('\n');
        out.push_str(&line(row));
        out.push('\n');
        out.push_str(&rule('-'));
    }
    out
}
