use std::fs::File;
use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::{cursor, execute, queue, terminal};
use griddom::{Document, Element};
use gridnav::{GridNavigation, GridNavigationOptions, cell_index};
use simplelog::{Config, LevelFilter, WriteLogger};

const COLUMNS: usize = 4;

struct Screen {
    stdout: Stdout,
}

impl Screen {
    fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { stdout })
    }

    fn draw(&mut self, doc: &Document) -> io::Result<()> {
        queue!(
            self.stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            Print("arrows/PgUp/PgDn/Home/End move, Enter/Esc/F2 edit, Tab leave, a/d row, q quit"),
        )?;

        let focused = doc.focused();
        let rows = doc.get("sheet").map(Element::child_elements).unwrap_or(&[]);
        for (r, row) in rows.iter().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, r as u16 + 2))?;
            for cell in row.child_elements() {
                let label = format!("{:<10}", cell.content.text().unwrap_or("[edit]"));
                let widget_focused = cell
                    .child_elements()
                    .iter()
                    .any(|w| Some(w.id.as_str()) == focused);
                if Some(cell.id.as_str()) == focused {
                    queue!(
                        self.stdout,
                        SetAttribute(Attribute::Reverse),
                        Print(label),
                        SetAttribute(Attribute::Reset)
                    )?;
                } else if widget_focused {
                    queue!(
                        self.stdout,
                        SetAttribute(Attribute::Underlined),
                        Print(label),
                        SetAttribute(Attribute::Reset)
                    )?;
                } else {
                    queue!(self.stdout, Print(label))?;
                }
            }
        }

        let status = match focused.and_then(|id| cell_index(doc, "sheet", id)) {
            Some(index) => format!("row {} col {}", index.row + 1, index.col + 1),
            None => format!("focus: {}", focused.unwrap_or("none")),
        };
        queue!(
            self.stdout,
            cursor::MoveTo(0, rows.len() as u16 + 3),
            Print(status)
        )?;
        self.stdout.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn row(n: usize) -> Element {
    Element::row().id(format!("row-{n}")).children((0..COLUMNS).map(move |c| {
        let cell = Element::cell(format!("R{n}C{c}")).id(format!("cell-{n}-{c}"));
        // Last column carries an editable widget
        if c == COLUMNS - 1 {
            cell.child(Element::text_input("").id(format!("edit-{n}")))
        } else {
            cell
        }
    }))
}

fn other(err: impl std::error::Error + Send + Sync + 'static) -> io::Error {
    io::Error::other(err)
}

fn main() -> io::Result<()> {
    // Set up file logging
    let log_file = File::create("spreadsheet.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut doc = Document::new(
        Element::box_()
            .id("root")
            .child(Element::button("Before").id("before"))
            .child(Element::grid().id("sheet").children((0..20).map(row)))
            .child(Element::button("After").id("after")),
    );
    let mut next_row = 20;

    let mut nav = GridNavigation::new(GridNavigationOptions::new().page_size(5), || {
        Some("sheet".to_string())
    });
    nav.mounted(&mut doc).map_err(other)?;
    doc.focus("cell-0-0");
    doc.flush(&mut nav).map_err(other)?;

    let mut screen = Screen::new()?;
    loop {
        screen.draw(&doc)?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let raw = event::read()?;
        let CrosstermEvent::Key(key) = &raw else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.code == KeyCode::Char('q') {
            break;
        }

        let ids = doc.process_events(std::slice::from_ref(&raw));
        doc.flush(&mut nav).map_err(other)?;
        if ids.iter().any(|id| doc.default_prevented(*id)) {
            continue;
        }

        match key.code {
            KeyCode::Tab => {
                doc.focus_next();
            }
            KeyCode::BackTab => {
                doc.focus_prev();
            }
            KeyCode::Char('a') => {
                doc.append_child("sheet", row(next_row)).map_err(other)?;
                next_row += 1;
            }
            KeyCode::Char('d') => {
                let focused_row = doc
                    .focused()
                    .and_then(|id| doc.path_to(id))
                    .and_then(|path| path.into_iter().find(|id| id.starts_with("row-")));
                if let Some(row_id) = focused_row {
                    log::info!("deleting {row_id}");
                    doc.remove(&row_id).map_err(other)?;
                }
            }
            _ => {}
        }
        doc.flush(&mut nav).map_err(other)?;
    }

    nav.unmounted(&mut doc);
    Ok(())
}
