/// Identifies one dispatched event across all of its deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub u64);

/// Event types a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    FocusIn,
    FocusOut,
    KeyDown,
}

/// High-level events with element targeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Focus entered `target` (bubbles to every ancestor scope)
    FocusIn(FocusEvent),
    /// Focus left `target`
    FocusOut(FocusEvent),
    /// Key press, targeted at the focused element (or the root)
    KeyDown(KeyEvent),
}

impl Event {
    pub fn id(&self) -> EventId {
        match self {
            Self::FocusIn(e) | Self::FocusOut(e) => e.id,
            Self::KeyDown(e) => e.id,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::FocusIn(_) => EventKind::FocusIn,
            Self::FocusOut(_) => EventKind::FocusOut,
            Self::KeyDown(_) => EventKind::KeyDown,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            Self::FocusIn(e) | Self::FocusOut(e) => &e.target,
            Self::KeyDown(e) => &e.target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusEvent {
    pub id: EventId,
    pub target: String,
    /// Element losing focus (for focusin) or gaining it (for focusout).
    pub related: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub id: EventId,
    pub target: String,
    pub key: Key,
    pub modifiers: Modifiers,
    pub default_prevented: bool,
}

impl KeyEvent {
    /// Suppress the host's default handling of this key press.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Default::default()
        }
    }

    pub fn meta() -> Self {
        Self {
            meta: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }

    /// Control held with no other modifier.
    pub fn ctrl_only(&self) -> bool {
        self.ctrl && !self.shift && !self.alt && !self.meta
    }
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Char('\0'), // Placeholder for unsupported keys
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
            meta: mods.intersects(KeyModifiers::SUPER | KeyModifiers::META),
        }
    }
}
