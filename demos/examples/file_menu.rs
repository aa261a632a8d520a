// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A file menu driven entirely by scripted events.
//!
//! Shows:
//! - keyboard navigation into a nested submenu,
//! - deep search reaching items inside submenus and behind a loader,
//! - an asynchronous loader settling across ticks,
//! - pointer hover guarded by the aim predictor,
//! - placement of a submenu next to its trigger row.
//!
//! Run:
//! - `cargo run -p action_menu_demos --example file_menu`
//! - `RUST_LOG=action_menu=debug cargo run -p action_menu_demos --example file_menu`

use std::rc::Rc;

use action_menu::{
    ActionMenu, ActionMenuConfig, GroupDef, ItemDef, Key, KeyEvent, LoaderError, LoaderSpec, NodeDef,
    RadioGroup, RowId, RowView, SearchConfig, StaticPlacer, SubmenuDef, SurfaceId, SurfaceLayout,
};
use kurbo::{Point, Rect, Size};
use tracing_subscriber::EnvFilter;

const ROW_HEIGHT: f64 = 32.0;

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("action_menu=info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

fn definitions() -> Vec<NodeDef<&'static str>> {
    let recent = LoaderSpec::from_async(|query| {
        let query = query.query.clone();
        async move {
            if query == "offline" {
                return Err(LoaderError::Failed("network unavailable".to_owned()));
            }
            let files = ["quarterly-report.pdf", "notes.md", "roadmap.key"];
            Ok(files
                .into_iter()
                .map(|name| NodeDef::item(ItemDef::new(name).icon("file").data("open")))
                .collect())
        }
    });

    vec![
        NodeDef::group(GroupDef::new("file").heading("File").children([
            NodeDef::item(ItemDef::new("new").label("New file").keywords(["create"]).data("new")),
            NodeDef::item(ItemDef::new("open").label("Open…").data("open")),
            NodeDef::submenu(SubmenuDef::with_loader("recent", recent).title("Open recent")),
        ])),
        NodeDef::submenu(
            SubmenuDef::new(
                "export",
                [
                    NodeDef::item(ItemDef::new("pdf").label("PDF").data("export")),
                    NodeDef::item(ItemDef::new("png").label("PNG image").data("export")),
                ],
            )
            .title("Export as"),
        ),
        NodeDef::group(
            GroupDef::new("view")
                .heading("View")
                .radio(RadioGroup {
                    value: Some("list".to_owned()),
                    on_value_change: Some(Rc::new(|value: &str| tracing::info!(value, "view changed"))),
                })
                .children([
                    NodeDef::item(ItemDef::new("list").label("As list").radio()),
                    NodeDef::item(ItemDef::new("grid").label("As grid").radio()),
                ]),
        ),
        NodeDef::item(ItemDef::new("autosave").label("Autosave").checkbox(true)),
        NodeDef::item(
            ItemDef::new("quit")
                .label("Quit")
                .data("quit")
                .on_select(|event| println!("  handler: {} on {}", event.item.id, event.surface)),
        ),
    ]
}

fn print_surface(menu: &mut ActionMenu<&'static str>, surface: &SurfaceId) {
    let Some(view) = menu.surface_view(surface) else {
        println!("  {surface}: closed");
        return;
    };
    let title = view.title.as_deref().unwrap_or("(root)");
    println!("  {surface} {title} query={:?}", view.query);
    if let Some(status) = &view.status {
        if status.is_loading {
            println!("    loading…");
        }
        if let Some(error) = &status.error {
            println!("    error: {error}");
        }
    }
    if view.deep.is_fetching {
        println!("    searching {} loader(s)…", view.deep.progress.len());
    }
    for row in &view.rows {
        match row {
            RowView::Heading { text, .. } => println!("    ── {text}"),
            RowView::Separator { .. } => println!("    ──────"),
            RowView::Node {
                label,
                breadcrumbs,
                attributes,
                ..
            } => {
                let marker = if attributes.focused { '›' } else { ' ' };
                let check = match attributes.checked {
                    Some(true) => "[x] ",
                    Some(false) => "[ ] ",
                    None => "",
                };
                let path = if breadcrumbs.is_empty() {
                    String::new()
                } else {
                    format!("  ({})", breadcrumbs.join(" › "))
                };
                let more = if attributes.expanded.is_some() { " ▸" } else { "" };
                println!("    {marker} {check}{label}{more}{path}");
            }
        }
    }
}

fn press(menu: &mut ActionMenu<&'static str>, key: Key, now: u64) {
    let Some(surface) = menu.focus_owner().cloned() else {
        return;
    };
    let response = menu.handle_key(&KeyEvent::new(key, surface), now);
    println!("key {key:?} -> {:?}", response.action);
}

fn main() {
    setup_tracing();

    let config = ActionMenuConfig {
        search: SearchConfig {
            debounce_ms: 120,
            ..SearchConfig::default()
        },
        ..ActionMenuConfig::default()
    };
    let mut menu = match ActionMenu::new(definitions(), config) {
        Ok(menu) => menu,
        Err(error) => {
            eprintln!("invalid menu: {error}");
            return;
        }
    };
    let root = SurfaceId::root();
    let mut now = 0;

    println!("== open");
    menu.open(now);
    menu.mount(&root);
    menu.set_viewport(&root, 8.0 * ROW_HEIGHT);
    if let Some(grant) = menu.frame() {
        println!("focus {:?} of {}", grant.target, grant.surface);
    }
    print_surface(&mut menu, &root);

    println!("== keyboard into `Export as`");
    for key in [Key::ArrowDown, Key::ArrowDown, Key::ArrowDown] {
        now += 16;
        press(&mut menu, key, now);
    }
    now += 16;
    press(&mut menu, Key::ArrowRight, now);
    let export = root.child(&RowId::new("export"));
    menu.mount(&export);
    menu.set_viewport(&export, 4.0 * ROW_HEIGHT);
    menu.measure_layout(
        &export,
        &SurfaceLayout {
            surface_top: 0.0,
            input_bottom: Some(36.0),
            list_content_top: 40.0,
        },
    );
    let trigger = Rect::new(0.0, 3.0 * ROW_HEIGHT, 220.0, 4.0 * ROW_HEIGHT);
    if let Some(placement) = menu.place(&export, trigger, Size::new(180.0, 120.0), &StaticPlacer) {
        println!("export placed at {:?} on {:?}", placement.rect, placement.side);
    }
    print_surface(&mut menu, &export);
    press(&mut menu, Key::Escape, now);

    println!("== deep search `rep` (debounced, async loader)");
    for (offset, value) in [(0, "r"), (40, "re"), (80, "rep")] {
        menu.set_query(&root, value, now + offset);
    }
    now += 80;
    for _ in 0..4 {
        let Some(deadline) = menu.next_deadline() else {
            break;
        };
        now = now.max(deadline);
        menu.tick(now);
    }
    print_surface(&mut menu, &root);
    now += 16;
    menu.tick(now);
    print_surface(&mut menu, &root);

    println!("== pointer");
    menu.set_query(&root, "", now);
    menu.tick(now + 120);
    now += 120;
    for (index, id) in menu
        .store(&root)
        .map(|store| store.order().to_vec())
        .unwrap_or_default()
        .iter()
        .enumerate()
    {
        let y = index as f64 * ROW_HEIGHT;
        menu.set_row_bounds(&root, id.as_str(), Rect::new(0.0, y, 220.0, y + ROW_HEIGHT));
    }
    menu.set_surface_bounds(&root, Rect::new(0.0, 0.0, 220.0, 8.0 * ROW_HEIGHT));
    menu.pointer_move(&root, Some("export"), Point::new(100.0, 3.5 * ROW_HEIGHT), now);
    menu.set_surface_bounds(&export, Rect::new(220.0, 3.0 * ROW_HEIGHT, 400.0, 6.0 * ROW_HEIGHT));
    for step in 1..=3 {
        let x = 100.0 + f64::from(step) * 30.0;
        let y = 3.5 * ROW_HEIGHT + f64::from(step) * 12.0;
        now += 16;
        let changed = menu.pointer_move(&root, Some("autosave"), Point::new(x, y), now);
        println!("pointer at ({x}, {y}) changed={changed} open={:?}", menu.open_surfaces());
    }

    println!("== select");
    if let Some(selection) = menu.select(&root, "grid", now) {
        println!("selected {selection:?}");
    }
    if let Some(selection) = menu.select(&root, "quit", now) {
        println!("selected {selection:?}");
    }
    println!("open after quit: {}", menu.is_open());
}
