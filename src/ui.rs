//! GTK user interface: add-participant row, participant list with
//! per-row toggle/remove controls, statistics panel, and the periodic
//! refresh tick.
//!
//! All tracking state lives in one `Meeting` value shared between the
//! signal handlers via `Rc<RefCell<_>>`; every handler mutates it and
//! re-renders. The list is always rebuilt in full, and rows are
//! addressed by participant name, so a captured name can never go stale.

use gtk4::prelude::*;
use gtk4::{
    glib, Align, Application, ApplicationWindow, Box as GtkBox, Button, Entry, Label, ListBox,
    ListBoxRow, Orientation, ScrolledWindow, SelectionMode,
};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::config::Config;
use crate::export::export_statistics;
use crate::meeting::Meeting;
use crate::stats;

type SharedMeeting = Rc<RefCell<Meeting>>;

/// Widgets every handler needs to re-render after a mutation.
#[derive(Clone)]
struct MeetingUI {
    participant_list: ListBox,
    stats_label: Label,
    status_label: Label,
}

pub fn build_ui(app: &Application, config: &Config) {
    let meeting: SharedMeeting = Rc::new(RefCell::new(Meeting::new()));

    let window = ApplicationWindow::builder()
        .application(app)
        .title("Час виступів")
        .default_width(config.window_width)
        .default_height(config.window_height)
        .build();

    let main_box = GtkBox::new(Orientation::Vertical, 12);
    main_box.set_margin_top(20);
    main_box.set_margin_bottom(20);
    main_box.set_margin_start(20);
    main_box.set_margin_end(20);

    // Add-participant row: text entry + button, Enter submits too
    let name_entry = Entry::builder()
        .placeholder_text("Ім'я учасника")
        .hexpand(true)
        .build();

    let add_button = Button::with_label("Додати");
    add_button.add_css_class("suggested-action");

    let input_row = GtkBox::new(Orientation::Horizontal, 8);
    input_row.append(&name_entry);
    input_row.append(&add_button);

    // Participant list
    let participant_list = ListBox::new();
    participant_list.set_selection_mode(SelectionMode::None);
    participant_list.add_css_class("boxed-list");

    let placeholder = Label::new(Some("Поки немає учасників"));
    placeholder.add_css_class("dim-label");
    placeholder.set_margin_top(12);
    placeholder.set_margin_bottom(12);
    participant_list.set_placeholder(Some(&placeholder));

    let scrolled = ScrolledWindow::builder()
        .vexpand(true)
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .child(&participant_list)
        .build();

    // Statistics panel
    let stats_header = Label::new(Some("Статистика"));
    stats_header.add_css_class("heading");
    stats_header.set_halign(Align::Start);

    let stats_label = Label::new(None);
    stats_label.add_css_class("monospace");
    stats_label.set_halign(Align::Start);

    // Bottom controls
    let reset_button = Button::with_label("Скинути статистику");
    reset_button.add_css_class("destructive-action");

    let copy_button = Button::with_label("Копіювати");
    let export_button = Button::with_label("Експорт");

    let button_box = GtkBox::new(Orientation::Horizontal, 12);
    button_box.set_halign(Align::Center);
    button_box.append(&reset_button);
    button_box.append(&copy_button);
    button_box.append(&export_button);

    let status_label = Label::new(None);
    status_label.add_css_class("dim-label");
    status_label.set_halign(Align::Start);

    let ui = MeetingUI {
        participant_list: participant_list.clone(),
        stats_label: stats_label.clone(),
        status_label: status_label.clone(),
    };

    let meeting_for_add = meeting.clone();
    let ui_for_add = ui.clone();
    let entry_for_add = name_entry.clone();
    add_button.connect_clicked(move |_| {
        handle_add(&entry_for_add, &meeting_for_add, &ui_for_add);
    });

    let meeting_for_enter = meeting.clone();
    let ui_for_enter = ui.clone();
    name_entry.connect_activate(move |entry| {
        handle_add(entry, &meeting_for_enter, &ui_for_enter);
    });

    let meeting_for_reset = meeting.clone();
    let ui_for_reset = ui.clone();
    reset_button.connect_clicked(move |_| {
        meeting_for_reset.borrow_mut().reset_statistics();
        ui_for_reset.status_label.set_text("");
        rebuild_participant_list(&meeting_for_reset, &ui_for_reset);
        refresh_statistics(&meeting_for_reset, &ui_for_reset);
    });

    let meeting_for_copy = meeting.clone();
    let ui_for_copy = ui.clone();
    copy_button.connect_clicked(move |_| {
        let lines = stats::collect(&meeting_for_copy.borrow(), Instant::now());
        copy_to_clipboard(&stats::render(&lines));
        ui_for_copy.status_label.set_text("Статистику скопійовано");
    });

    let meeting_for_export = meeting.clone();
    let ui_for_export = ui.clone();
    let export_dir: PathBuf = config.export_dir();
    export_button.connect_clicked(move |_| {
        let lines = stats::collect(&meeting_for_export.borrow(), Instant::now());
        match export_statistics(&lines, &export_dir) {
            Ok(path) => {
                ui_for_export
                    .status_label
                    .set_text(&format!("Експортовано: {}", path.display()));
            }
            Err(e) => {
                warn!("Помилка експорту статистики: {e:#}");
                ui_for_export.status_label.set_text("Помилка експорту");
            }
        }
    });

    main_box.append(&input_row);
    main_box.append(&scrolled);
    main_box.append(&stats_header);
    main_box.append(&stats_label);
    main_box.append(&button_box);
    main_box.append(&status_label);

    window.set_child(Some(&main_box));

    rebuild_participant_list(&meeting, &ui);
    refresh_statistics(&meeting, &ui);

    // Periodic statistics tick so the active speaker's time visibly
    // advances between user actions. The source is removed on close.
    let meeting_for_tick = meeting.clone();
    let ui_for_tick = ui.clone();
    let tick = glib::timeout_add_local(
        Duration::from_millis(config.tick_interval_ms),
        move || {
            refresh_statistics(&meeting_for_tick, &ui_for_tick);
            glib::ControlFlow::Continue
        },
    );

    let tick_source = Rc::new(RefCell::new(Some(tick)));
    window.connect_close_request(move |_| {
        if let Some(source) = tick_source.borrow_mut().take() {
            source.remove();
        }
        glib::Propagation::Proceed
    });

    window.present();
}

/// Add the entered name to the registry. The entry is cleared only on
/// success; an empty or duplicate name leaves it untouched.
fn handle_add(entry: &Entry, meeting: &SharedMeeting, ui: &MeetingUI) {
    let name = entry.text();
    let added = meeting.borrow_mut().add_participant(name.as_str());
    if added {
        entry.set_text("");
        rebuild_participant_list(meeting, ui);
        refresh_statistics(meeting, ui);
    }
}

/// Full list rebuild: remove every row, then one row per participant in
/// registry order.
fn rebuild_participant_list(meeting: &SharedMeeting, ui: &MeetingUI) {
    while let Some(child) = ui.participant_list.first_child() {
        ui.participant_list.remove(&child);
    }

    let rows: Vec<(String, bool)> = {
        let m = meeting.borrow();
        m.participants()
            .iter()
            .map(|p| (p.name.clone(), m.is_speaking(&p.name)))
            .collect()
    };

    for (name, speaking) in rows {
        let row = create_participant_row(&name, speaking, meeting, ui);
        ui.participant_list.append(&row);
    }
}

fn create_participant_row(
    name: &str,
    speaking: bool,
    meeting: &SharedMeeting,
    ui: &MeetingUI,
) -> ListBoxRow {
    let row = ListBoxRow::new();
    row.set_activatable(false);

    let content_box = GtkBox::new(Orientation::Horizontal, 8);
    content_box.set_margin_top(6);
    content_box.set_margin_bottom(6);
    content_box.set_margin_start(12);
    content_box.set_margin_end(12);

    let toggle_button = if speaking {
        let button = Button::from_icon_name("media-playback-pause-symbolic");
        button.add_css_class("suggested-action");
        button.set_tooltip_text(Some("Зупинити виступ"));
        button
    } else {
        let button = Button::from_icon_name("media-playback-start-symbolic");
        button.set_tooltip_text(Some("Почати виступ"));
        button
    };

    let name_label = Label::new(Some(name));
    name_label.set_hexpand(true);
    name_label.set_halign(Align::Start);

    let remove_button = Button::from_icon_name("user-trash-symbolic");
    remove_button.add_css_class("destructive-action");
    remove_button.set_tooltip_text(Some("Видалити"));

    let name_for_toggle = name.to_string();
    let meeting_for_toggle = meeting.clone();
    let ui_for_toggle = ui.clone();
    toggle_button.connect_clicked(move |_| {
        meeting_for_toggle
            .borrow_mut()
            .toggle_speaker(&name_for_toggle, Instant::now());
        refresh_statistics(&meeting_for_toggle, &ui_for_toggle);
        schedule_list_rebuild(&meeting_for_toggle, &ui_for_toggle);
    });

    let name_for_remove = name.to_string();
    let meeting_for_remove = meeting.clone();
    let ui_for_remove = ui.clone();
    remove_button.connect_clicked(move |_| {
        meeting_for_remove
            .borrow_mut()
            .remove_participant(&name_for_remove);
        refresh_statistics(&meeting_for_remove, &ui_for_remove);
        schedule_list_rebuild(&meeting_for_remove, &ui_for_remove);
    });

    content_box.append(&toggle_button);
    content_box.append(&name_label);
    content_box.append(&remove_button);

    row.set_child(Some(&content_box));
    row
}

/// Rebuild the list on the next main-loop iteration. Row handlers must
/// not tear down their own ancestors mid-signal.
fn schedule_list_rebuild(meeting: &SharedMeeting, ui: &MeetingUI) {
    glib::idle_add_local_once({
        let meeting = meeting.clone();
        let ui = ui.clone();
        move || {
            rebuild_participant_list(&meeting, &ui);
        }
    });
}

fn refresh_statistics(meeting: &SharedMeeting, ui: &MeetingUI) {
    let m = meeting.borrow();
    let lines = stats::collect(&m, Instant::now());
    if lines.is_empty() {
        ui.stats_label.set_text("Поки немає учасників");
    } else {
        ui.stats_label.set_text(&stats::render(&lines));
    }
}

fn copy_to_clipboard(text: &str) {
    if let Some(display) = gtk4::gdk::Display::default() {
        let clipboard = display.clipboard();
        if !text.is_empty() {
            clipboard.set_text(text);
        }
    }
}
