//! The standard office floor: border walls with windows, four workstations,
//! a break table, a coffee machine, and some plants.

use ot_core::{Cell, Ticker};
use ot_grid::{FloorPlan, GridResult, Tile};

pub const COLS: i32 = 30;
pub const ROWS: i32 = 22;

/// Desk seats, one per ticker.  The seat is the chair cell in front of the
/// workstation's desk row.
pub fn desk_for(ticker: Ticker) -> Cell {
    match ticker {
        Ticker::Btc => Cell::new(6, 6),
        Ticker::Eth => Cell::new(6, 16),
        Ticker::Sol => Cell::new(COLS - 10, 6),
        Ticker::Doge => Cell::new(COLS - 10, 16),
    }
}

pub fn analyst_name(ticker: Ticker) -> &'static str {
    match ticker {
        Ticker::Btc => "Analyst Biton",
        Ticker::Eth => "Analyst Ethan",
        Ticker::Sol => "Analyst Solar",
        Ticker::Doge => "Analyst Dodge",
    }
}

/// Three desk tiles with a computer behind and a chair (the seat) in front.
fn workstation(plan: &mut FloorPlan, seat: Cell) -> GridResult<()> {
    let (x, y) = (seat.x, seat.y - 1);
    plan.fill_rect(x - 1, y, x + 1, y, Tile::Desk)?;
    plan.set(Cell::new(x, y - 1), Tile::Computer)?;
    plan.set(seat, Tile::Chair)?;
    Ok(())
}

pub fn build() -> GridResult<FloorPlan> {
    let mut plan = FloorPlan::new(COLS, ROWS)?;
    plan.border(Tile::Wall);

    // Window strips along the top and right walls.
    for x in (3..COLS - 3).step_by(3) {
        plan.set(Cell::new(x, 0), Tile::Window)?;
        plan.set(Cell::new(x + 1, 0), Tile::Window)?;
    }
    for y in (3..ROWS - 6).step_by(3) {
        plan.set(Cell::new(COLS - 1, y), Tile::Window)?;
        plan.set(Cell::new(COLS - 1, y + 1), Tile::Window)?;
    }

    for ticker in Ticker::ALL {
        workstation(&mut plan, desk_for(ticker))?;
    }

    // Break table in the middle, coffee machine off to its right.
    let (cx, cy) = (COLS / 2, ROWS / 2);
    plan.fill_rect(cx - 2, cy - 1, cx + 1, cy, Tile::Table)?;
    plan.fill_rect(cx + 3, cy - 1, cx + 4, cy, Tile::Coffee)?;

    for cell in [
        Cell::new(3, 3),
        Cell::new(COLS - 4, 3),
        Cell::new(3, ROWS - 4),
        Cell::new(COLS - 4, ROWS - 4),
    ] {
        plan.set(cell, Tile::Plant)?;
    }

    Ok(plan)
}
