// Category browser list
use crate::ansi::truncate_to_width;
use crate::style::{accent, ACCENT, RESET};
use fcards_core::CategoryGroup;

const TITLE: &str = "fcards — group by type";
/// Rows reserved for the title block and footer
const CHROME_ROWS: usize = 4;
const MIN_LIST_ROWS: usize = 6;

/// Groups whose label contains `query`, ignoring case and surrounding
/// whitespace. An empty query keeps everything, in order.
pub fn filter_groups<'a>(groups: &'a [CategoryGroup], query: &str) -> Vec<&'a CategoryGroup> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return groups.iter().collect();
    }
    groups.iter().filter(|g| g.matches(&needle)).collect()
}

/// First row of the list window that keeps `selected` on screen
pub fn window_start(selected: usize, window: usize) -> usize {
    if selected >= window {
        selected - window + 1
    } else {
        0
    }
}

/// Input to the group list renderer
#[derive(Debug, Clone, Copy)]
pub struct GroupListView<'a> {
    pub groups: &'a [CategoryGroup],
    pub query: &'a str,
    /// Index into the filtered list
    pub selected: usize,
    pub searching: bool,
}

/// Render the category list. `width` of 0 leaves rows untruncated.
pub fn render_group_list(view: &GroupListView<'_>, width: usize, height: usize) -> String {
    let mut out = vec![accent(TITLE), String::new()];

    if view.searching || !view.query.trim().is_empty() {
        out.push(format!("Search: {}", view.query));
        out.push(String::new());
    }

    let filtered = filter_groups(view.groups, view.query);
    if filtered.is_empty() {
        out.push("No types found.".to_string());
        out.push("q to quit".to_string());
        return out.join("\n");
    }

    let window = height.saturating_sub(CHROME_ROWS).max(MIN_LIST_ROWS);
    let start = window_start(view.selected, window);
    let end = (start + window).min(filtered.len());

    for (i, group) in filtered.iter().enumerate().take(end).skip(start) {
        let label = format!("{} - {}", group.display_label(), group.count);
        let label = if width > 2 {
            truncate_to_width(&label, width - 2)
        } else {
            label
        };
        if i == view.selected {
            out.push(format!("{ACCENT}> {label}{RESET}"));
        } else {
            out.push(format!("  {label}"));
        }
    }

    out.push(String::new());
    out.push(if view.searching {
        "Type to search  •  Enter/Esc: done  •  q: quit".to_string()
    } else {
        "J/K: move  •  Enter: open  •  /: search  •  q: quit".to_string()
    });

    out.join("\n")
}
