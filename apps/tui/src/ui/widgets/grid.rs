//! Layout maths for the card grid.

/// Narrowest a card may get before the grid drops a column.
pub const CARD_MIN_WIDTH: u16 = 32;
pub const MAX_COLUMNS: usize = 4;

/// Number of cards per row for the given width, never less than one.
pub fn grid_columns(width: u16) -> usize {
    usize::from(width / CARD_MIN_WIDTH).clamp(1, MAX_COLUMNS)
}

/// First row to draw so that the selected card stays on screen.
pub fn first_visible_row(selected: usize, columns: usize, visible_rows: usize) -> usize {
    let columns = columns.max(1);
    let visible_rows = visible_rows.max(1);
    let selected_row = selected / columns;
    (selected_row + 1).saturating_sub(visible_rows)
}

pub fn row_count(total: usize, columns: usize) -> usize {
    total.div_ceil(columns.max(1))
}
