#![forbid(unsafe_code)]

//! View composition: header chrome, zone row cards, overlays, status bar.
//!
//! Rendering also produces the hit-test map for mouse routing; the map is
//! written back through the model's interior-mutable cache so it always
//! matches the frame on screen.

use zoneboard_core::{format, sync, ZoneRow};
use zoneboard_style::{Style, Theme};
use zoneboard_tui::widgets::{Block, BorderType, TimeSlider, Widget};
use zoneboard_tui::{Buffer, Rect};

use crate::app::{AppModel, Control, HitMap, Overlay, RowHit, PICKER_ROWS};

/// Rendered height of one zone row card.
const ROW_HEIGHT: u16 = 5;

/// Render the whole frame.
pub(crate) fn draw(model: &AppModel, buf: &mut Buffer) {
    let theme = model.theme().clone();
    let dark = model.is_dark;
    let area = buf.area();

    buf.fill(area, Style::new().bg(theme.background.resolve(dark)));

    let mut hits = HitMap::default();

    draw_title(buf, &theme, dark);
    draw_controls(model, buf, &theme, dark, &mut hits);

    let mut rows_top = 4;
    if model.is_sharing {
        draw_share_strip(model, buf, &theme, dark, rows_top - 1);
        rows_top += 1;
    }

    draw_rows(model, buf, &theme, dark, rows_top, &mut hits);
    draw_status_bar(model, buf, &theme, dark);

    match model.overlay() {
        Overlay::None => {}
        Overlay::AddZone => draw_picker(model, buf, &theme, dark),
        Overlay::EditDate => draw_entry(
            buf,
            &theme,
            dark,
            "reference date",
            "YYYY-MM-DD",
            &model.date_entry,
        ),
        Overlay::EditTime => draw_entry(
            buf,
            &theme,
            dark,
            "set time (24-hour)",
            "HH:mm",
            &model.time_entry,
        ),
        Overlay::Help => draw_help(buf, &theme, dark),
    }

    model.hits.replace(hits);
}

fn draw_title(buf: &mut Buffer, theme: &Theme, dark: bool) {
    let title = "Zoneboard Time-Zone Converter";
    let style = Style::new()
        .fg(theme.title.resolve(dark))
        .bg(theme.background.resolve(dark))
        .bold();
    let x = (buf.width().saturating_sub(title.len() as u16)) / 2;
    let max = buf.width();
    buf.draw_text(x, 0, title, style, max);
}

fn draw_controls(
    model: &AppModel,
    buf: &mut Buffer,
    theme: &Theme,
    dark: bool,
    hits: &mut HitMap,
) {
    let y = 2;
    let bg = theme.background.resolve(dark);
    let key_style = Style::new().fg(theme.accent.resolve(dark)).bg(bg).bold();
    let text_style = Style::new().fg(theme.text_muted.resolve(dark)).bg(bg);

    let date = model.board.reference_date().to_string();
    let mode = if model.is_dark { "light" } else { "dark" };
    let segments: [(Control, &str, String); 6] = [
        (Control::AddZone, "[a]", " add zone".into()),
        (Control::EditDate, "[d]", format!(" {date}")),
        (Control::Book, "[b]", " book".into()),
        (Control::Reverse, "[r]", " reverse".into()),
        (Control::Share, "[s]", " share".into()),
        (Control::DarkMode, "[t]", format!(" {mode}")),
    ];

    let mut x = 2;
    let max = buf.width();
    for (control, key, label) in segments {
        let start = x;
        x = buf.draw_text(x, y, key, key_style, max);
        x = buf.draw_text(x, y, &label, text_style, max);
        hits.controls
            .push((control, Rect::new(start, y, x.saturating_sub(start), 1)));
        x = x.saturating_add(3);
        if x >= max {
            break;
        }
    }
}

fn draw_share_strip(model: &AppModel, buf: &mut Buffer, theme: &Theme, dark: bool, y: u16) {
    let style = Style::new()
        .fg(theme.accent.resolve(dark))
        .bg(theme.background.resolve(dark));
    let reference = model.board.reference_date();
    let summary: Vec<String> = model
        .board
        .display_rows(model.reverse_order)
        .map(|row| {
            let minutes = model.display_minutes(row.key());
            let abbr = sync::zoned_at(reference, row.time_zone(), minutes)
                .map(|z| format::zone_abbreviation(&z))
                .unwrap_or_else(|_| row.key().as_str().to_string());
            format!("{abbr} {}", format::format_hm(minutes))
        })
        .collect();
    let line = format!("share  {} — {reference}", summary.join(" · "));
    let max = buf.width();
    buf.draw_text(2, y, &line, style, max);
}

fn draw_rows(
    model: &AppModel,
    buf: &mut Buffer,
    theme: &Theme,
    dark: bool,
    top: u16,
    hits: &mut HitMap,
) {
    let bottom = buf.height().saturating_sub(1);
    if bottom <= top {
        return;
    }
    let visible = ((bottom - top) / ROW_HEIGHT) as usize;
    if visible == 0 {
        return;
    }

    let rows: Vec<&ZoneRow> = model.board.display_rows(model.reverse_order).collect();
    let mut scroll = model.row_scroll.get().min(rows.len().saturating_sub(1));
    let selected = model.selected();
    if selected < scroll {
        scroll = selected;
    } else if selected >= scroll + visible {
        scroll = selected + 1 - visible;
    }
    model.row_scroll.set(scroll);

    for (offset, row) in rows.into_iter().skip(scroll).take(visible).enumerate() {
        let display_index = scroll + offset;
        let area = Rect::new(
            1,
            top + (offset as u16) * ROW_HEIGHT,
            buf.width().saturating_sub(2),
            ROW_HEIGHT,
        );
        let hit = draw_row(model, buf, theme, dark, row, display_index, area);
        hits.rows.push(hit);
    }
}

fn draw_row(
    model: &AppModel,
    buf: &mut Buffer,
    theme: &Theme,
    dark: bool,
    row: &ZoneRow,
    display_index: usize,
    area: Rect,
) -> RowHit {
    let selected = display_index == model.selected();
    let surface = Style::new().bg(theme.surface.resolve(dark));
    let border = if selected && model.grabbed {
        Style::new().fg(theme.accent.resolve(dark)).bold()
    } else if selected {
        Style::new().fg(theme.border_focused.resolve(dark))
    } else {
        Style::new().fg(theme.border.resolve(dark))
    };

    let block = Block::new()
        .border_type(BorderType::Rounded)
        .border_style(border.patch(surface))
        .style(surface);
    block.render(area, buf);
    let inner = block.inner(area);

    let minutes = model.display_minutes(row.key());
    let reference = model.board.reference_date();
    let zoned = sync::zoned_at(reference, row.time_zone(), minutes).ok();

    // Info line.
    let y = inner.top();
    let grip_style = if selected {
        Style::new().fg(theme.accent.resolve(dark)).bg(theme.surface.resolve(dark))
    } else {
        Style::new().fg(theme.text_subtle.resolve(dark)).bg(theme.surface.resolve(dark))
    };
    let text = Style::new().fg(theme.text.resolve(dark)).bg(theme.surface.resolve(dark));
    let muted = Style::new().fg(theme.text_muted.resolve(dark)).bg(theme.surface.resolve(dark));
    let bold = text.bold();

    let mut x = inner.left() + 1;
    let grip = Rect::new(x, y, 2, 1);
    x = buf.draw_text(x, y, "⣿⣿", grip_style, inner.right());
    x = x.saturating_add(2);

    let abbr = zoned
        .as_ref()
        .map(format::zone_abbreviation)
        .unwrap_or_else(|| "--".to_string());
    x = buf.draw_text(x, y, &abbr, bold, inner.right());
    x = x.saturating_add(2);
    let left_end = buf.draw_text(x, y, row.iana(), muted, inner.right());

    // Right-aligned cluster: time, 12h, offset, day label, remove.
    let remove_x = inner.right().saturating_sub(2);
    let remove = Rect::new(remove_x, y, 1, 1);
    let danger = Style::new().fg(theme.danger.resolve(dark)).bg(theme.surface.resolve(dark));
    buf.set_char(remove_x, y, '✕', danger);

    let day = format::day_label(reference, minutes);
    let offset_label = zoned
        .as_ref()
        .map(format::gmt_offset_label)
        .unwrap_or_else(|| "GMT --:--".to_string());
    let t24 = format::format_hm(minutes);
    let t12 = format::format_12h(minutes);

    let mut rx = remove_x;
    for (content, style) in [
        (day.as_str(), muted),
        (offset_label.as_str(), muted),
        (t12.as_str(), text),
        (t24.as_str(), bold),
    ] {
        let width = content.len() as u16;
        if rx < width + 2 {
            break;
        }
        let at = rx - 2 - width;
        if at <= left_end + 1 {
            break;
        }
        buf.draw_text(at, y, content, style, rx);
        rx = at;
    }

    // Slider track + labels.
    let slider_area = Rect::new(
        inner.left() + 1,
        inner.top() + 1,
        inner.width.saturating_sub(2),
        2,
    );
    let slider = TimeSlider::new(minutes)
        .track_style(Style::new().fg(theme.track.resolve(dark)).bg(theme.surface.resolve(dark)))
        .mark_style(Style::new().fg(theme.text_subtle.resolve(dark)).bg(theme.surface.resolve(dark)))
        .thumb_style(Style::new().fg(theme.thumb.resolve(dark)).bg(theme.surface.resolve(dark)).bold())
        .label_style(Style::new().fg(theme.text_subtle.resolve(dark)).bg(theme.surface.resolve(dark)));
    slider.render(slider_area, buf);

    RowHit {
        key: row.key().clone(),
        display_index,
        area,
        grip,
        remove,
        slider: Rect::new(slider_area.x, slider_area.y, slider_area.width, 1),
    }
}

fn draw_status_bar(model: &AppModel, buf: &mut Buffer, theme: &Theme, dark: bool) {
    if buf.height() == 0 {
        return;
    }
    let y = buf.height() - 1;
    let bar = Style::new()
        .fg(theme.text_muted.resolve(dark))
        .bg(theme.surface.resolve(dark));
    buf.fill(Rect::new(0, y, buf.width(), 1), bar);

    let hints = "↑↓ select  space grab  ←→ ±15m  enter time  a add  x remove  d date  r reverse  t theme  b book  ? help  q quit";
    let max = buf.width();
    buf.draw_text(1, y, hints, bar, max);

    let mut flags = Vec::new();
    if model.grabbed {
        flags.push("grab");
    }
    if model.reverse_order {
        flags.push("reversed");
    }
    flags.push(if model.is_dark { "dark" } else { "light" });
    let right = flags.join("  ");
    let x = buf.width().saturating_sub(right.len() as u16 + 1);
    buf.draw_text(x, y, &right, bar.patch(Style::new().fg(theme.accent.resolve(dark))), max);
}

fn overlay_rect(buf: &Buffer, width: u16, height: u16) -> Rect {
    let width = width.min(buf.width().saturating_sub(2));
    let height = height.min(buf.height().saturating_sub(2));
    Rect::new(
        (buf.width() - width) / 2,
        (buf.height() - height) / 2,
        width,
        height,
    )
}

fn draw_picker(model: &AppModel, buf: &mut Buffer, theme: &Theme, dark: bool) {
    let area = overlay_rect(buf, 48, PICKER_ROWS as u16 + 4);
    let surface = Style::new().bg(theme.surface.resolve(dark));
    let title = format!(" add time zone ({}) ", model.picker.matches.len());
    let block = Block::new()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(theme.border_focused.resolve(dark)).patch(surface))
        .title(&title)
        .title_style(Style::new().fg(theme.accent.resolve(dark)).patch(surface).bold())
        .style(surface);
    block.render(area, buf);
    let inner = block.inner(area);
    if inner.is_empty() {
        return;
    }

    let text = Style::new().fg(theme.text.resolve(dark)).bg(theme.surface.resolve(dark));
    let cursor = Style::new()
        .fg(theme.selection_fg.resolve(dark))
        .bg(theme.selection_bg.resolve(dark));
    model
        .picker
        .input
        .render(Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), 1), buf, text, cursor);

    let list_top = inner.y + 2;
    let selected_style = Style::new()
        .fg(theme.selection_fg.resolve(dark))
        .bg(theme.selection_bg.resolve(dark));
    for (i, name) in model
        .picker
        .matches
        .iter()
        .skip(model.picker.scroll)
        .take(PICKER_ROWS)
        .enumerate()
    {
        let index = model.picker.scroll + i;
        let style = if index == model.picker.selected {
            selected_style
        } else {
            text
        };
        let y = list_top + i as u16;
        if y >= inner.bottom() {
            break;
        }
        if index == model.picker.selected {
            buf.fill(Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), 1), style);
        }
        buf.draw_text(inner.x + 2, y, name, style, inner.right().saturating_sub(1));
    }
}

fn draw_entry(
    buf: &mut Buffer,
    theme: &Theme,
    dark: bool,
    title: &str,
    hint: &str,
    entry: &crate::app::EntryState,
) {
    let area = overlay_rect(buf, 36, 5);
    let surface = Style::new().bg(theme.surface.resolve(dark));
    let border_color = if entry.invalid {
        theme.danger.resolve(dark)
    } else {
        theme.border_focused.resolve(dark)
    };
    let padded = format!(" {title} ");
    let block = Block::new()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(border_color).patch(surface))
        .title(&padded)
        .title_style(Style::new().fg(theme.accent.resolve(dark)).patch(surface).bold())
        .style(surface);
    block.render(area, buf);
    let inner = block.inner(area);
    if inner.is_empty() {
        return;
    }

    let text = Style::new().fg(theme.text.resolve(dark)).bg(theme.surface.resolve(dark));
    let cursor = Style::new()
        .fg(theme.selection_fg.resolve(dark))
        .bg(theme.selection_bg.resolve(dark));
    entry
        .input
        .render(Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), 1), buf, text, cursor);

    let hint_style = Style::new()
        .fg(if entry.invalid {
            theme.danger.resolve(dark)
        } else {
            theme.text_subtle.resolve(dark)
        })
        .bg(theme.surface.resolve(dark));
    let hint_line = if entry.invalid {
        format!("expected {hint}")
    } else {
        format!("{hint} · enter to apply · esc to cancel")
    };
    buf.draw_text(inner.x + 1, inner.y + 2, &hint_line, hint_style, inner.right());
}

fn draw_help(buf: &mut Buffer, theme: &Theme, dark: bool) {
    const LINES: [&str; 13] = [
        "↑ / ↓        select row",
        "space        grab row, ↑/↓ to move, esc to drop",
        "← / →        nudge time 15m (shift: 1h)",
        "enter / e    type exact time for the row",
        "a            add time zone",
        "x / del      remove row",
        "d            set reference date ([ / ] step a day)",
        "r            reverse order",
        "s            share strip",
        "t            dark mode",
        "b            book a meeting",
        "mouse        drag grip to reorder, drag slider to set",
        "q / ctrl-c   quit",
    ];
    let area = overlay_rect(buf, 56, LINES.len() as u16 + 2);
    let surface = Style::new().bg(theme.surface.resolve(dark));
    let block = Block::new()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(theme.border_focused.resolve(dark)).patch(surface))
        .title(" help ")
        .title_style(Style::new().fg(theme.accent.resolve(dark)).patch(surface).bold())
        .style(surface);
    block.render(area, buf);
    let inner = block.inner(area);

    let text = Style::new().fg(theme.text.resolve(dark)).bg(theme.surface.resolve(dark));
    for (i, line) in LINES.iter().enumerate() {
        let y = inner.y + i as u16;
        if y >= inner.bottom() {
            break;
        }
        buf.draw_text(inner.x + 1, y, line, text, inner.right());
    }
}
