use griddom::{Document, Element, Key, Modifiers};
use gridnav::{
    CellIndex, FocusedCell, NavError, NavigationConfig, NavigationModel, cell_index,
};

// =============================================================================
// Fixtures
// =============================================================================

/// `rows` x `cols` grid; cell ids are `c{row}{col}`. Cell (1, 1) hosts a
/// button `w11` when `widget` is set.
fn grid(rows: usize, cols: usize, widget: bool) -> Element {
    Element::grid().id("grid").children((0..rows).map(|r| {
        Element::row()
            .id(format!("r{r}"))
            .children((0..cols).map(move |c| {
                let cell = Element::cell(format!("{r},{c}")).id(format!("c{r}{c}"));
                if widget && r == 1 && c == 1 {
                    cell.child(Element::button("edit").id("w11"))
                } else {
                    cell
                }
            }))
    }))
}

fn setup(rows: usize, cols: usize, page_size: usize) -> (Document, NavigationModel) {
    let mut doc = Document::new(
        Element::box_()
            .id("root")
            .child(grid(rows, cols, true))
            .child(Element::button("outside").id("outside")),
    );
    let mut model = NavigationModel::new(NavigationConfig::new().page_size(page_size));
    model.init(&mut doc, "grid").unwrap();
    (doc, model)
}

fn focus(doc: &mut Document, model: &mut NavigationModel, id: &str) {
    doc.focus(id);
    doc.flush(model).unwrap();
    assert_eq!(doc.focused(), Some(id));
}

/// Press a key, deliver everything, and report whether default was prevented.
fn press(doc: &mut Document, model: &mut NavigationModel, key: Key, mods: Modifiers) -> bool {
    let id = doc.key_down(key, mods);
    doc.flush(model).unwrap();
    doc.default_prevented(id)
}

fn press_plain(doc: &mut Document, model: &mut NavigationModel, key: Key) -> bool {
    press(doc, model, key, Modifiers::new())
}

fn at(doc: &Document) -> Option<CellIndex> {
    cell_index(doc, "grid", doc.focused()?)
}

// =============================================================================
// Arrow keys and paging
// =============================================================================

#[test]
fn test_arrow_keys_move_one_cell() {
    let (mut doc, mut model) = setup(3, 3, 10);
    focus(&mut doc, &mut model, "c11");

    assert!(press_plain(&mut doc, &mut model, Key::Down));
    assert_eq!(doc.focused(), Some("c21"));
    assert!(press_plain(&mut doc, &mut model, Key::Right));
    assert_eq!(doc.focused(), Some("c22"));
    assert!(press_plain(&mut doc, &mut model, Key::Up));
    assert_eq!(doc.focused(), Some("c12"));
    assert!(press_plain(&mut doc, &mut model, Key::Left));
    assert_eq!(doc.focused(), Some("c11"));
}

#[test]
fn test_arrow_keys_clamp_at_edges() {
    let (mut doc, mut model) = setup(3, 3, 10);
    focus(&mut doc, &mut model, "c00");

    // Still handled (and prevented) even though focus can't move
    assert!(press_plain(&mut doc, &mut model, Key::Up));
    assert!(press_plain(&mut doc, &mut model, Key::Left));
    assert_eq!(doc.focused(), Some("c00"));
}

#[test]
fn test_random_arrow_sequence_matches_clamped_sum() {
    const ROWS: usize = 4;
    const COLS: usize = 5;
    let (mut doc, mut model) = setup(ROWS, COLS, 10);
    focus(&mut doc, &mut model, "c00");

    // xorshift, so the sequence is deterministic
    let mut state: u32 = 0x9E37_79B9;
    let mut expected = (0usize, 0usize);
    for _ in 0..300 {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let (key, dr, dc) = match state % 4 {
            0 => (Key::Up, -1, 0),
            1 => (Key::Down, 1, 0),
            2 => (Key::Left, 0, -1),
            _ => (Key::Right, 0, 1),
        };
        expected.0 = expected.0.saturating_add_signed(dr).min(ROWS - 1);
        expected.1 = expected.1.saturating_add_signed(dc).min(COLS - 1);

        press_plain(&mut doc, &mut model, key);
        assert_eq!(at(&doc), Some(CellIndex::new(expected.0, expected.1)));
    }
}

#[test]
fn test_page_down_clamps_at_last_row() {
    let (mut doc, mut model) = setup(3, 3, 2);
    focus(&mut doc, &mut model, "c11");

    press_plain(&mut doc, &mut model, Key::Down);
    assert_eq!(at(&doc), Some(CellIndex::new(2, 1)));

    // Already on the last row: no overshoot
    assert!(press_plain(&mut doc, &mut model, Key::PageDown));
    assert_eq!(at(&doc), Some(CellIndex::new(2, 1)));

    assert!(press_plain(&mut doc, &mut model, Key::PageUp));
    assert_eq!(at(&doc), Some(CellIndex::new(0, 1)));

    assert!(press_plain(&mut doc, &mut model, Key::PageDown));
    assert_eq!(at(&doc), Some(CellIndex::new(2, 1)));
}

#[test]
fn test_page_size_moves_exact_rows() {
    let (mut doc, mut model) = setup(10, 2, 3);
    focus(&mut doc, &mut model, "c00");

    press_plain(&mut doc, &mut model, Key::PageDown);
    assert_eq!(at(&doc), Some(CellIndex::new(3, 0)));
    press_plain(&mut doc, &mut model, Key::PageDown);
    assert_eq!(at(&doc), Some(CellIndex::new(6, 0)));
    press_plain(&mut doc, &mut model, Key::PageUp);
    assert_eq!(at(&doc), Some(CellIndex::new(3, 0)));
}

#[test]
fn test_update_changes_page_size_in_place() {
    let (mut doc, mut model) = setup(10, 2, 3);
    focus(&mut doc, &mut model, "c00");

    model.update(NavigationConfig::new().page_size(5));
    assert!(model.is_attached());
    assert_eq!(model.config().page_size, 5);

    press_plain(&mut doc, &mut model, Key::PageDown);
    assert_eq!(at(&doc), Some(CellIndex::new(5, 0)));
}

// =============================================================================
// Home / End
// =============================================================================

#[test]
fn test_home_end_stay_in_row() {
    let (mut doc, mut model) = setup(3, 4, 10);
    focus(&mut doc, &mut model, "c12");

    assert!(press_plain(&mut doc, &mut model, Key::End));
    assert_eq!(at(&doc), Some(CellIndex::new(1, 3)));
    assert!(press_plain(&mut doc, &mut model, Key::Home));
    assert_eq!(at(&doc), Some(CellIndex::new(1, 0)));
}

#[test]
fn test_ctrl_home_end_jump_to_grid_corners() {
    let (mut doc, mut model) = setup(3, 4, 10);

    for start in ["c00", "c12", "c23"] {
        focus(&mut doc, &mut model, start);
        assert!(press(&mut doc, &mut model, Key::End, Modifiers::ctrl()));
        assert_eq!(at(&doc), Some(CellIndex::new(2, 3)));

        focus(&mut doc, &mut model, start);
        assert!(press(&mut doc, &mut model, Key::Home, Modifiers::ctrl()));
        assert_eq!(at(&doc), Some(CellIndex::new(0, 0)));
    }
}

// =============================================================================
// Ignored input
// =============================================================================

#[test]
fn test_other_modifiers_never_move_or_prevent() {
    let (mut doc, mut model) = setup(3, 3, 10);
    focus(&mut doc, &mut model, "c11");

    let ctrl_shift = Modifiers {
        ctrl: true,
        shift: true,
        ..Default::default()
    };
    let alt_meta = Modifiers {
        alt: true,
        meta: true,
        ..Default::default()
    };
    for mods in [Modifiers::shift(), Modifiers::alt(), Modifiers::meta(), ctrl_shift, alt_meta] {
        for key in [Key::Down, Key::Right, Key::Home, Key::End, Key::PageDown, Key::Enter] {
            assert!(!press(&mut doc, &mut model, key, mods), "{key:?} {mods:?}");
            assert_eq!(doc.focused(), Some("c11"));
        }
    }
}

#[test]
fn test_ctrl_with_non_jump_key_is_ignored() {
    let (mut doc, mut model) = setup(3, 3, 10);
    focus(&mut doc, &mut model, "c11");

    assert!(!press(&mut doc, &mut model, Key::Down, Modifiers::ctrl()));
    assert!(!press(&mut doc, &mut model, Key::Escape, Modifiers::ctrl()));
    assert_eq!(doc.focused(), Some("c11"));
}

#[test]
fn test_unbound_keys_pass_through() {
    let (mut doc, mut model) = setup(3, 3, 10);
    focus(&mut doc, &mut model, "c11");

    assert!(!press_plain(&mut doc, &mut model, Key::Char('x')));
    assert!(!press_plain(&mut doc, &mut model, Key::Tab));
    assert!(!press_plain(&mut doc, &mut model, Key::F(3)));
    assert_eq!(doc.focused(), Some("c11"));
}

#[test]
fn test_keys_outside_grid_do_nothing() {
    let (mut doc, mut model) = setup(3, 3, 10);
    focus(&mut doc, &mut model, "c11");
    focus(&mut doc, &mut model, "outside");

    assert_eq!(model.focused_cell(), None);
    assert_eq!(model.prev_focused_cell(), Some(&FocusedCell::on_cell("c11")));

    assert!(!press_plain(&mut doc, &mut model, Key::Down));
    assert_eq!(doc.focused(), Some("outside"));
}

#[test]
fn test_keys_before_any_focus_do_nothing() {
    let (mut doc, mut model) = setup(3, 3, 10);
    assert!(!press_plain(&mut doc, &mut model, Key::Down));
    assert_eq!(doc.focused(), None);
}

// =============================================================================
// Widgets: Enter / Escape / F2
// =============================================================================

#[test]
fn test_enter_then_escape_round_trip() {
    let (mut doc, mut model) = setup(3, 3, 10);
    focus(&mut doc, &mut model, "c11");

    assert!(press_plain(&mut doc, &mut model, Key::Enter));
    assert_eq!(doc.focused(), Some("w11"));
    let inside = model.focused_cell().unwrap();
    assert!(inside.widget);
    assert_eq!(inside.cell_element, "c11");

    assert!(press_plain(&mut doc, &mut model, Key::Escape));
    assert_eq!(doc.focused(), Some("c11"));
    assert_eq!(model.focused_cell(), Some(&FocusedCell::on_cell("c11")));
}

#[test]
fn test_f2_toggles_back_to_origin() {
    let (mut doc, mut model) = setup(3, 3, 10);
    focus(&mut doc, &mut model, "c11");

    assert!(press_plain(&mut doc, &mut model, Key::F(2)));
    assert_eq!(doc.focused(), Some("w11"));
    assert!(press_plain(&mut doc, &mut model, Key::F(2)));
    assert_eq!(doc.focused(), Some("c11"));

    // And from the widget side
    assert!(press_plain(&mut doc, &mut model, Key::F(2)));
    assert!(press_plain(&mut doc, &mut model, Key::F(2)));
    assert_eq!(doc.focused(), Some("c11"));
}

#[test]
fn test_escape_on_cell_is_not_prevented() {
    let (mut doc, mut model) = setup(3, 3, 10);
    focus(&mut doc, &mut model, "c11");

    assert!(!press_plain(&mut doc, &mut model, Key::Escape));
    assert_eq!(doc.focused(), Some("c11"));
}

#[test]
fn test_enter_on_cell_without_widget_is_prevented_noop() {
    let (mut doc, mut model) = setup(3, 3, 10);
    focus(&mut doc, &mut model, "c00");

    assert!(press_plain(&mut doc, &mut model, Key::Enter));
    assert_eq!(doc.focused(), Some("c00"));
}

#[test]
fn test_widget_keeps_navigation_keys() {
    let (mut doc, mut model) = setup(3, 3, 10);
    focus(&mut doc, &mut model, "w11");

    for key in [Key::Down, Key::Left, Key::Home, Key::PageUp, Key::Enter] {
        assert!(!press_plain(&mut doc, &mut model, key), "{key:?}");
        assert_eq!(doc.focused(), Some("w11"));
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_table_before_init_is_an_error() {
    let model = NavigationModel::new(NavigationConfig::default());
    assert_eq!(model.table(), Err(NavError::NotAttached));
    assert!(!model.is_attached());
}

#[test]
fn test_destroy_before_init_is_noop() {
    let mut doc = Document::new(grid(2, 2, false));
    let mut model = NavigationModel::default();
    model.destroy(&mut doc);
    assert_eq!(doc.listener_count(), 0);
}

#[test]
fn test_destroy_twice() {
    let (mut doc, mut model) = setup(3, 3, 10);
    assert_eq!(doc.listener_count(), 1);
    assert_eq!(doc.observer_count(), 1);

    model.destroy(&mut doc);
    model.destroy(&mut doc);

    assert_eq!(doc.listener_count(), 0);
    assert_eq!(doc.observer_count(), 0);
    assert!(!doc.is_claimed("grid"));
    assert_eq!(model.table(), Err(NavError::NotAttached));
}

#[test]
fn test_detached_model_ignores_input() {
    let (mut doc, mut model) = setup(3, 3, 10);
    focus(&mut doc, &mut model, "c11");
    model.destroy(&mut doc);

    assert!(!press_plain(&mut doc, &mut model, Key::Down));
    assert_eq!(doc.focused(), Some("c11"));
}

#[test]
fn test_reinit_does_not_leak_listeners() {
    let (mut doc, mut model) = setup(3, 3, 10);
    model.init(&mut doc, "grid").unwrap();
    model.init(&mut doc, "grid").unwrap();

    assert_eq!(doc.listener_count(), 1);
    assert_eq!(doc.observer_count(), 1);
}

#[test]
fn test_second_model_cannot_attach_same_table() {
    let (mut doc, _model) = setup(3, 3, 10);
    let mut other = NavigationModel::default();

    assert_eq!(
        other.init(&mut doc, "grid"),
        Err(NavError::AlreadyAttached("grid".to_string()))
    );
    assert!(!other.is_attached());
    assert_eq!(doc.listener_count(), 1);
}

#[test]
fn test_init_on_missing_table() {
    let mut doc = Document::new(grid(2, 2, false));
    let mut model = NavigationModel::default();
    assert_eq!(
        model.init(&mut doc, "nope"),
        Err(NavError::TableNotFound("nope".to_string()))
    );
}

#[test]
fn test_remount_keeps_last_position() {
    let (mut doc, mut model) = setup(3, 3, 10);
    focus(&mut doc, &mut model, "c12");
    focus(&mut doc, &mut model, "outside");

    model.destroy(&mut doc);
    model.init(&mut doc, "grid").unwrap();
    assert_eq!(model.prev_focused_cell(), Some(&FocusedCell::on_cell("c12")));

    focus(&mut doc, &mut model, "c12");
    press_plain(&mut doc, &mut model, Key::Down);
    assert_eq!(doc.focused(), Some("c22"));
}

#[test]
fn test_focus_moved_while_detached() {
    let (mut doc, mut model) = setup(3, 3, 10);
    focus(&mut doc, &mut model, "c11");

    model.destroy(&mut doc);
    assert_eq!(model.focused_cell(), None);
    focus(&mut doc, &mut model, "c00");
    model.init(&mut doc, "grid").unwrap();

    assert_eq!(model.focused_cell(), Some(&FocusedCell::on_cell("c00")));
    assert_eq!(model.prev_focused_cell(), Some(&FocusedCell::on_cell("c00")));
    assert!(press_plain(&mut doc, &mut model, Key::Right));
    assert_eq!(doc.focused(), Some("c01"));
}

#[test]
fn test_focus_cleared_while_detached() {
    let (mut doc, mut model) = setup(3, 3, 10);
    focus(&mut doc, &mut model, "c11");

    model.destroy(&mut doc);
    doc.blur();
    doc.flush(&mut model).unwrap();
    model.init(&mut doc, "grid").unwrap();

    assert_eq!(model.focused_cell(), None);
    assert_eq!(model.prev_focused_cell(), Some(&FocusedCell::on_cell("c11")));
    assert!(!press_plain(&mut doc, &mut model, Key::Right));
    assert_eq!(doc.focused(), None);
}

#[test]
fn test_focus_left_grid_while_detached() {
    let (mut doc, mut model) = setup(3, 3, 10);
    focus(&mut doc, &mut model, "c11");

    model.destroy(&mut doc);
    focus(&mut doc, &mut model, "outside");
    model.init(&mut doc, "grid").unwrap();

    assert_eq!(model.focused_cell(), None);
    assert!(!press_plain(&mut doc, &mut model, Key::Down));
    assert_eq!(doc.focused(), Some("outside"));
}

// =============================================================================
// Index metadata
// =============================================================================

#[test]
fn test_init_stamps_index_metadata() {
    let (doc, _model) = setup(3, 3, 10);

    let data = |id: &str, key: &str| doc.get(id).unwrap().get_data(key).cloned();
    assert_eq!(data("r2", "aria-rowindex"), Some("3".to_string()));
    assert_eq!(data("c21", "aria-rowindex"), Some("3".to_string()));
    assert_eq!(data("c21", "aria-colindex"), Some("2".to_string()));
    assert_eq!(data("grid", "aria-rowcount"), Some("3".to_string()));
    assert_eq!(data("grid", "aria-colcount"), Some("3".to_string()));
    assert_eq!(
        CellIndex::read(doc.get("c12").unwrap()),
        Some(CellIndex::new(1, 2))
    );
}
