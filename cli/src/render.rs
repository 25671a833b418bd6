//! Plain-text rendering of API payloads.

use museo_core::{Museum, Room, RoomCount, RoomRow};

/// Widest bar drawn by `graph`; larger totals are scaled down.
const BAR_WIDTH: u64 = 40;

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the header row.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = vec![line(headers.iter().copied(), &widths)];
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    lines.push(line(rule.iter().map(String::as_str), &widths));
    for row in rows {
        lines.push(line(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// `label: value` lines with the values aligned.
pub fn fields(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0) + 1;
    pairs
        .iter()
        .map(|(k, v)| format!("{:<width$} {v}", format!("{k}:")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn yes_no(flag: bool) -> String {
    let word = if flag { "yes" } else { "no" };
    word.to_string()
}

pub fn museums(museums: &[Museum]) -> String {
    if museums.is_empty() {
        return "No museums found.".to_string();
    }
    let rows: Vec<Vec<String>> = museums
        .iter()
        .map(|m| {
            vec![
                m.museum_id.to_string(),
                m.name.clone(),
                m.city.clone(),
                format!("{:.2}", m.annual_budget),
                yes_no(m.is_public),
                m.opening_date.to_string(),
            ]
        })
        .collect();
    table(&["ID", "NAME", "CITY", "BUDGET", "PUBLIC", "OPENED"], &rows)
}

pub fn museum(m: &Museum) -> String {
    fields(&[
        ("id", m.museum_id.to_string()),
        ("name", m.name.clone()),
        ("city", m.city.clone()),
        ("annual budget", format!("{:.2}", m.annual_budget)),
        ("public", yes_no(m.is_public)),
        ("opened", m.opening_date.to_string()),
    ])
}

pub fn rooms(rows: &[RoomRow]) -> String {
    if rows.is_empty() {
        return "No rooms found.".to_string();
    }
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.room.room_id.to_string(),
                r.room.name.clone(),
                r.room.capacity.to_string(),
                format!("{:.2}", r.room.area),
                yes_no(r.room.is_climatized),
                r.room.opening_date.to_string(),
                r.museum_name.clone(),
            ]
        })
        .collect();
    table(
        &["ID", "NAME", "CAPACITY", "AREA", "CLIMATIZED", "OPENED", "MUSEUM"],
        &rows,
    )
}

pub fn room(r: &Room) -> String {
    fields(&[
        ("id", r.room_id.to_string()),
        ("name", r.name.clone()),
        ("capacity", r.capacity.to_string()),
        ("area", format!("{:.2}", r.area)),
        ("climatized", yes_no(r.is_climatized)),
        ("opened", r.opening_date.to_string()),
        ("museum id", r.museum_id.to_string()),
    ])
}

/// Horizontal bar chart of rooms per museum.
pub fn graph(counts: &[RoomCount]) -> String {
    if counts.is_empty() {
        return "No rooms found.".to_string();
    }
    let peak = counts.iter().map(|c| c.total).max().unwrap_or(0);
    let label_width = counts.iter().map(|c| c.label().chars().count()).max().unwrap_or(0);
    counts
        .iter()
        .map(|c| {
            let bar = "#".repeat(bar_len(c.total, peak));
            format!("{:<label_width$}  {bar} {}", c.label(), c.total)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bar_len(total: u64, peak: u64) -> usize {
    if peak <= BAR_WIDTH {
        return total as usize;
    }
    let scaled = (u128::from(total) * u128::from(BAR_WIDTH) + u128::from(peak / 2))
        / u128::from(peak);
    // Non-empty museums always get a visible bar.
    scaled.max(u128::from(total > 0)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use museo_core::MuseumLabel;

    fn date(s: &str) -> chrono::NaiveDate {
        s.parse().unwrap()
    }

    fn count(name: Option<&str>, total: u64) -> RoomCount {
        RoomCount {
            museum: name.map(|n| MuseumLabel {
                name: n.to_string(),
            }),
            total,
        }
    }

    #[test]
    fn table_pads_columns_to_widest_cell() {
        let out = table(
            &["ID", "NAME"],
            &[
                vec!["1".to_string(), "Prado".to_string()],
                vec!["12".to_string(), "Sorolla".to_string()],
            ],
        );
        assert_eq!(out, "ID  NAME\n--  -------\n1   Prado\n12  Sorolla");
    }

    #[test]
    fn museum_table_formats_budget_and_flag() {
        let out = museums(&[Museum {
            museum_id: 3,
            name: "Museo Picasso".to_string(),
            city: "Málaga".to_string(),
            annual_budget: 1500.5,
            is_public: false,
            opening_date: date("2003-10-27"),
        }]);
        let last = out.lines().last().unwrap();
        assert!(last.starts_with("3   Museo Picasso  Málaga  1500.50"));
        assert!(last.ends_with("no      2003-10-27"));
    }

    #[test]
    fn empty_listings_say_so() {
        assert_eq!(museums(&[]), "No museums found.");
        assert_eq!(rooms(&[]), "No rooms found.");
        assert_eq!(graph(&[]), "No rooms found.");
    }

    #[test]
    fn fields_align_values() {
        let out = fields(&[("id", "1".to_string()), ("opened", "2001-01-01".to_string())]);
        assert_eq!(out, "id:     1\nopened: 2001-01-01");
    }

    #[test]
    fn graph_labels_missing_museum_as_unknown() {
        let out = graph(&[count(Some("Prado"), 3), count(None, 1)]);
        assert_eq!(out, "Prado    ### 3\nUnknown  # 1");
    }

    #[test]
    fn graph_scales_large_totals() {
        assert_eq!(bar_len(200, 200), 40);
        assert_eq!(bar_len(100, 200), 20);
        assert_eq!(bar_len(1, 200), 1);
        assert_eq!(bar_len(0, 200), 0);
        assert_eq!(bar_len(7, 10), 7);
    }

    #[test]
    fn graph_handles_totals_near_the_integer_limit() {
        let out = graph(&[count(Some("Prado"), u64::MAX), count(Some("Thyssen"), u64::MAX / 2)]);
        let bars: Vec<usize> = out
            .lines()
            .map(|l| l.chars().filter(|c| *c == '#').count())
            .collect();
        assert_eq!(bars, vec![40, 20]);
    }
}
