use comfy_table::{Cell, CellAlignment, Table, modifiers, presets};

use crate::{metrics::Snapshot, zone::Zone};

#[must_use]
pub fn build_snapshot_table(snapshot: &Snapshot) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec!["Zone", "Interval", "Price", "Price (¢/kWh)", "Sellback", "Sellback (¢/kWh)", "Last updated"]);
    table.add_row(vec![
        Cell::new(snapshot.zone),
        Cell::new(format!("{} {}", snapshot.date, snapshot.time)),
        Cell::new(snapshot.price_per_mwh).set_alignment(CellAlignment::Right),
        Cell::new(snapshot.price_cents_per_kwh).set_alignment(CellAlignment::Right),
        Cell::new(snapshot.sellback_rate_per_kwh).set_alignment(CellAlignment::Right),
        Cell::new(snapshot.sellback_cents_per_kwh).set_alignment(CellAlignment::Right),
        Cell::new(snapshot.last_updated.as_deref().unwrap_or("–")),
    ]);
    table
}

#[must_use]
pub fn build_zones_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec!["Zone", "Column", "Description"]);
    for zone in Zone::ALL {
        table.add_row(vec![
            Cell::new(zone),
            Cell::new(zone.column()).set_alignment(CellAlignment::Right),
            Cell::new(zone.description()),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zones_table_lists_all_zones() {
        // One row per zone; `row_iter` does not count the header.
        assert_eq!(build_zones_table().row_iter().count(), Zone::ALL.len());
    }
}
