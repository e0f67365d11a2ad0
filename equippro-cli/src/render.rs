//! Plain-text rendering of browser pages and tickets

use std::fmt::Write;

use equippro_lib::model::Ticket;
use equippro_lib::table::Browser;
use equippro_lib::table::Direction;

const SEPARATOR: &str = "  ";

/// Renders the current page: header row, rule, cells and a page footer.
pub fn page(browser: &Browser) -> String {
    let headers: Vec<String> = browser
        .schema()
        .columns()
        .iter()
        .map(|c| match browser.sort().direction(&c.key) {
            Some(Direction::Asc) => format!("{} ^", c.header),
            Some(Direction::Desc) => format!("{} v", c.header),
            None => c.header.clone(),
        })
        .collect();
    let rows = browser.visible_cells();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    if rows.is_empty() {
        out.push_str("(no rows)\n");
    }

    let current = if browser.page_count() == 0 {
        0
    } else {
        browser.page_index() + 1
    };
    let _ = writeln!(
        out,
        "page {}/{} ({} of {} rows)",
        current,
        browser.page_count(),
        browser.filtered_len(),
        browser.records().len()
    );
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(line.join(SEPARATOR).trim_end());
    out.push('\n');
}

/// Renders one ticket as label/value lines.
pub fn ticket(ticket: &Ticket) -> String {
    let equipment = ticket.equipment.as_ref();
    let fields = [
        ("Id", ticket.id.to_string()),
        ("Status", ticket.status.map(|s| s.to_string()).unwrap_or_default()),
        (
            "Equipment",
            equipment.map(|e| e.reference.clone()).unwrap_or_default(),
        ),
        (
            "Owner",
            equipment
                .and_then(|e| e.owner.as_ref())
                .map(|o| o.labelled_cin())
                .unwrap_or_default(),
        ),
        (
            "Technician",
            ticket
                .technician
                .as_ref()
                .map(|t| t.display_name())
                .unwrap_or_default(),
        ),
        (
            "Opened",
            ticket.open_date.map(|d| d.to_string()).unwrap_or_default(),
        ),
        ("Closed", ticket.close_date_label()),
        ("Comment", ticket.comment.clone().unwrap_or_default()),
        ("Task", ticket.task.clone().unwrap_or_default()),
    ];

    let mut out = String::new();
    for (label, value) in fields {
        let _ = writeln!(out, "{:<11}{}", format!("{}:", label), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use equippro_lib::model::Equipment;
    use equippro_lib::model::Record;
    use equippro_lib::model::User;
    use equippro_lib::table::BrowserConfig;
    use equippro_lib::table::Column;
    use equippro_lib::table::Schema;
    use equippro_lib::table::SortState;

    use super::*;

    fn browser() -> Browser {
        let schema = Schema::new(vec![
            Column::text("ticketId", "Id").sortable(),
            Column::exact("status", "Status"),
        ]);
        let records = vec![
            Record::new().set("ticketId", 1i64).set("status", "waiting"),
            Record::new().set("ticketId", 2i64).set("status", "closed"),
            Record::new().set("ticketId", 3i64).set("status", "waiting"),
        ];
        Browser::new(schema, records, BrowserConfig::new(2))
    }

    #[test]
    fn test_page_layout() {
        let text = page(&browser());
        assert_eq!(
            text,
            "Id  Status\n--  -------\n1   waiting\n2   closed\npage 1/2 (3 of 3 rows)\n"
        );
    }

    #[test]
    fn test_sorted_header_is_marked() {
        let browser = browser().with_sort(SortState::desc("ticketId"));
        let text = page(&browser);
        assert!(text.starts_with("Id v"));
        assert!(text.contains("\n3 "));
    }

    #[test]
    fn test_empty_view() {
        let mut browser = browser();
        browser.apply_filter("status", "underway");
        let text = page(&browser);
        assert!(text.contains("(no rows)"));
        assert!(text.ends_with("page 0/0 (0 of 3 rows)\n"));
    }

    #[test]
    fn test_ticket_without_close_date() {
        let ticket = Ticket {
            id: 5,
            open_date: None,
            close_date: None,
            status: None,
            comment: None,
            task: None,
            equipment: None,
            technician: None,
        };

        let text = super::ticket(&ticket);

        assert!(text.starts_with("Id:        5\n"));
        assert!(text.contains("\nClosed:    Not closed yet\n"));
    }

    #[test]
    fn test_ticket_owner_shows_cin_and_last_name() {
        let ticket = Ticket {
            id: 9,
            open_date: None,
            close_date: None,
            status: None,
            comment: None,
            task: None,
            equipment: Some(Equipment {
                reference: "EQ-9".to_string(),
                available: None,
                creation_date: None,
                owner: Some(User {
                    cin: "AB123".to_string(),
                    first_name: Some("Sara".to_string()),
                    last_name: Some("Amrani".to_string()),
                    email: None,
                }),
            }),
            technician: None,
        };

        let text = super::ticket(&ticket);

        assert!(text.contains("\nOwner:     AB123 (Amrani)\n"));
        assert!(text.contains("\nEquipment: EQ-9\n"));
    }
}
