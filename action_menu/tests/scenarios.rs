// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of the engine facade.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use action_menu::{
    ActionMenu, ActionMenuConfig, FocusGrant, FocusTarget, GroupDef, ItemDef, Key, KeyAction, KeyEvent,
    LoaderResult, LoaderSpec, NodeDef, RadioGroup, RowId, RowView, SearchConfig, SubmenuDef, SurfaceId,
};
use kurbo::{Point, Rect};

fn root() -> SurfaceId {
    SurfaceId::root()
}

fn press(menu: &mut ActionMenu<()>, key: Key, surface: &SurfaceId, now: u64) -> Option<KeyAction> {
    menu.handle_key(&KeyEvent::new(key, surface.clone()), now).action
}

fn visible_ids(menu: &mut ActionMenu<()>, surface: &SurfaceId) -> Vec<String> {
    let view = menu.surface_view(surface).expect("surface is open");
    view.row_attributes().map(|row| row.item_id.to_string()).collect()
}

fn edit_menu() -> Vec<NodeDef<()>> {
    vec![
        NodeDef::item(ItemDef::new("cut")),
        NodeDef::submenu(
            SubmenuDef::new(
                "share",
                [NodeDef::item(ItemDef::new("mail")), NodeDef::item(ItemDef::new("link"))],
            )
            .title("Share"),
        ),
        NodeDef::item(ItemDef::new("paste")),
    ]
}

#[test]
fn three_items_render_as_options_under_an_expanded_trigger() {
    let defs = ["apple", "banana", "cherry"]
        .into_iter()
        .map(|id| NodeDef::item(ItemDef::new(id)))
        .collect();
    let mut menu = ActionMenu::<()>::new(defs, ActionMenuConfig::default()).unwrap();
    assert!(!menu.trigger_attributes().expanded);

    menu.open(0);
    menu.set_viewport(&root(), 320.0);
    let trigger = menu.trigger_attributes().pairs();
    assert!(trigger.contains(&("aria-expanded", "true".to_owned())));
    assert!(trigger.contains(&("data-state", "open".to_owned())));

    let view = menu.surface_view(&root()).unwrap();
    let options: Vec<_> = view
        .row_attributes()
        .filter(|row| row.pairs().contains(&("role", "option".to_owned())))
        .collect();
    assert_eq!(options.len(), 3);
    assert!(options[0].focused);
    let input = view.input.unwrap();
    assert_eq!(input.active_descendant.as_deref(), Some("root::list::apple"));
}

#[test]
fn enter_on_a_submenu_trigger_moves_input_into_the_submenu() {
    let mut menu = ActionMenu::new(edit_menu(), ActionMenuConfig::default()).unwrap();
    menu.open(0);
    menu.mount(&root());
    assert_eq!(
        menu.frame(),
        Some(FocusGrant {
            surface: root(),
            target: FocusTarget::Input,
        })
    );

    press(&mut menu, Key::ArrowDown, &root(), 10);
    let action = press(&mut menu, Key::Enter, &root(), 20);
    let share = root().child(&RowId::new("share"));
    assert_eq!(
        action,
        Some(KeyAction::OpenedSubmenu {
            surface: share.clone(),
            trigger: RowId::new("share"),
        })
    );
    assert_eq!(menu.focus_owner(), Some(&share));
    assert_eq!(menu.active_row(&share).map(RowId::as_str), Some("mail"));

    // Focus waits for the content to mount.
    assert_eq!(menu.frame(), None);
    menu.mount(&share);
    assert_eq!(menu.frame().map(|grant| grant.surface), Some(share.clone()));

    // The parent ignores keys while the submenu owns input.
    assert_eq!(press(&mut menu, Key::ArrowDown, &root(), 30), None);
    assert_eq!(menu.active_row(&root()).map(RowId::as_str), Some("share"));

    let view = menu.surface_view(&root()).unwrap();
    let trigger = view
        .row_attributes()
        .find(|row| row.item_id.as_str() == "share")
        .unwrap();
    assert_eq!(trigger.expanded, Some(true));
    assert_eq!(menu.surface_view(&share).unwrap().title.as_deref(), Some("Share"));

    press(&mut menu, Key::ArrowLeft, &share, 40);
    assert_eq!(menu.focus_owner(), Some(&root()));
    assert_eq!(menu.open_surfaces(), [root()]);
    assert_eq!(menu.active_row(&root()).map(RowId::as_str), Some("share"));
}

#[test]
fn loader_runs_once_per_effective_query_at_or_above_min_length() {
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let loader = LoaderSpec::from_async(move |query| {
        seen.set(seen.get() + 1);
        let id = format!("{}-result", query.query);
        async move { Ok(vec![NodeDef::item(ItemDef::new(id))]) }
    });
    let config = ActionMenuConfig {
        search: SearchConfig {
            debounce_ms: 100,
            min_length: 3,
            ..SearchConfig::default()
        },
        ..ActionMenuConfig::default()
    };
    let mut menu = ActionMenu::<()>::with_root_loader(loader, config).unwrap();
    menu.open(0);
    menu.set_viewport(&root(), 320.0);
    assert_eq!(calls.get(), 0);

    // Too short: the debounce passes but nothing loads.
    assert!(!menu.set_query(&root(), "ab", 10));
    assert_eq!(menu.next_deadline(), Some(110));
    menu.tick(110);
    assert_eq!(menu.effective_query(&root()), Some("ab"));
    assert_eq!(calls.get(), 0);

    // Long enough: loads once the window passes.
    menu.set_query(&root(), "abc", 120);
    menu.tick(200);
    assert_eq!(calls.get(), 0);
    menu.tick(220);
    assert_eq!(calls.get(), 1);
    assert_eq!(visible_ids(&mut menu, &root()), ["abc-result"]);

    // Settled and unchanged: no further invocations.
    menu.tick(300);
    assert_eq!(calls.get(), 1);

    // Typing and deleting within one window leaves the effective query alone.
    menu.set_query(&root(), "abcd", 310);
    menu.set_query(&root(), "abc", 350);
    menu.tick(450);
    assert_eq!(calls.get(), 1);

    menu.set_query(&root(), "abcd", 460);
    menu.tick(560);
    assert_eq!(calls.get(), 2);
    assert_eq!(visible_ids(&mut menu, &root()), ["abcd-result"]);
}

#[test]
fn deep_search_reaches_nested_and_loaded_items() {
    let loads = Rc::new(Cell::new(0));
    let counter = Rc::clone(&loads);
    let recent = SubmenuDef::with_loader(
        "recent",
        LoaderSpec::from_fn(move |_| {
            counter.set(counter.get() + 1);
            LoaderResult::ready(vec![NodeDef::item(ItemDef::new("report.txt"))])
        }),
    )
    .title("Recent");
    let mut defs = edit_menu();
    defs.push(NodeDef::submenu(recent));
    let mut menu = ActionMenu::new(defs, ActionMenuConfig::default()).unwrap();
    menu.open(0);
    menu.set_viewport(&root(), 320.0);
    assert_eq!(loads.get(), 0);

    // Every reachable loader runs with the live query.
    menu.set_query(&root(), "mail", 10);
    assert_eq!(loads.get(), 1);
    assert_eq!(visible_ids(&mut menu, &root()), ["mail"]);
    let view = menu.surface_view(&root()).unwrap();
    let RowView::Node { breadcrumbs, .. } = &view.rows[0] else {
        panic!("expected a node row");
    };
    assert_eq!(breadcrumbs, &["Share"]);

    menu.set_query(&root(), "rep", 20);
    assert_eq!(loads.get(), 2);
    assert_eq!(visible_ids(&mut menu, &root()), ["report.txt"]);
    let view = menu.surface_view(&root()).unwrap();
    assert_eq!(view.deep.progress.len(), 1);
    assert!(!view.deep.is_loading);

    // Clearing the query restores the authored rows and the first active row.
    menu.set_query(&root(), "", 30);
    assert_eq!(visible_ids(&mut menu, &root()), ["cut", "share", "paste", "recent"]);
    assert_eq!(menu.active_row(&root()).map(RowId::as_str), Some("cut"));
}

#[test]
fn filtering_resets_the_active_row_to_the_first_match() {
    let mut menu = ActionMenu::new(edit_menu(), ActionMenuConfig::default()).unwrap();
    menu.open(0);
    press(&mut menu, Key::End, &root(), 1);
    assert_eq!(menu.active_row(&root()).map(RowId::as_str), Some("paste"));

    menu.set_query(&root(), "t", 2);
    let order: Vec<_> = menu
        .store(&root())
        .unwrap()
        .order()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(order.first().map(String::as_str), menu.active_row(&root()).map(RowId::as_str));
}

#[test]
fn hovering_across_a_sibling_toward_an_open_submenu_keeps_it_open() {
    let mut menu = ActionMenu::new(edit_menu(), ActionMenuConfig::default()).unwrap();
    let share = root().child(&RowId::new("share"));
    menu.open(0);
    menu.set_surface_bounds(&root(), Rect::new(0.0, 0.0, 200.0, 96.0));
    menu.set_row_bounds(&root(), "cut", Rect::new(0.0, 0.0, 200.0, 32.0));
    menu.set_row_bounds(&root(), "share", Rect::new(0.0, 32.0, 200.0, 64.0));
    menu.set_row_bounds(&root(), "paste", Rect::new(0.0, 64.0, 200.0, 96.0));

    assert!(menu.pointer_move(&root(), Some("share"), Point::new(100.0, 48.0), 0));
    assert!(menu.open_surfaces().contains(&share));
    assert_eq!(menu.focus_owner(), Some(&root()));
    menu.set_surface_bounds(&share, Rect::new(200.0, 32.0, 400.0, 200.0));

    // Moving right arms the guard; crossing `paste` on the way is ignored.
    menu.pointer_move(&root(), Some("share"), Point::new(150.0, 48.0), 10);
    assert!(!menu.pointer_move(&root(), Some("paste"), Point::new(180.0, 70.0), 20));
    assert!(menu.open_surfaces().contains(&share));
    assert_eq!(menu.active_row(&root()).map(RowId::as_str), Some("share"));
    assert!(menu.next_deadline().is_some());

    // Once the guard lapses, hovering a sibling closes the submenu.
    menu.tick(1000);
    assert!(menu.pointer_move(&root(), Some("paste"), Point::new(100.0, 80.0), 1000));
    assert!(!menu.open_surfaces().contains(&share));
    assert_eq!(menu.active_row(&root()).map(RowId::as_str), Some("paste"));
}

#[test]
fn leaving_a_trigger_away_from_its_submenu_closes_it() {
    let mut menu = ActionMenu::new(edit_menu(), ActionMenuConfig::default()).unwrap();
    let share = root().child(&RowId::new("share"));
    menu.open(0);
    menu.set_row_bounds(&root(), "share", Rect::new(0.0, 32.0, 200.0, 64.0));
    menu.pointer_move(&root(), Some("share"), Point::new(100.0, 48.0), 0);
    menu.set_surface_bounds(&share, Rect::new(200.0, 32.0, 400.0, 200.0));

    // Entering the submenu itself keeps it.
    assert!(!menu.pointer_leave_row(&root(), "share", Point::new(210.0, 48.0), 5));
    assert!(menu.open_surfaces().contains(&share));

    menu.pointer_move(&root(), Some("share"), Point::new(60.0, 48.0), 600);
    assert!(menu.pointer_leave_row(&root(), "share", Point::new(20.0, 30.0), 610));
    assert!(!menu.open_surfaces().contains(&share));
}

#[test]
fn checkbox_and_radio_selection_is_reported_and_keeps_the_menu_open() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let radio_values = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&events);
    let values = Rc::clone(&radio_values);
    let defs = |bold: bool| {
        let log = Rc::clone(&log);
        let values = Rc::clone(&values);
        vec![
            NodeDef::item(
                ItemDef::new("bold")
                    .checkbox(bold)
                    .on_select(move |event| log.borrow_mut().push((event.item.id.to_string(), event.checked))),
            ),
            NodeDef::group(
                GroupDef::new("align")
                    .radio(RadioGroup {
                        value: Some("left".to_owned()),
                        on_value_change: Some(Rc::new(move |value: &str| values.borrow_mut().push(value.to_owned()))),
                    })
                    .children([
                        NodeDef::item(ItemDef::new("left").radio()),
                        NodeDef::item(ItemDef::new("right").radio()),
                    ]),
            ),
            NodeDef::item(ItemDef::new("done")),
        ]
    };
    let mut menu = ActionMenu::<()>::new(defs(false), ActionMenuConfig::default()).unwrap();
    menu.open(0);

    let selection = menu.select(&root(), "bold", 1).unwrap();
    assert_eq!(selection.checked, Some(true));
    assert!(!selection.closed);
    assert!(menu.is_open());
    assert_eq!(*events.borrow(), [("bold".to_owned(), Some(true))]);

    // Controlled state: the host feeds the new value back in.
    menu.set_definitions(defs(true)).unwrap();
    let view = menu.surface_view(&root()).unwrap();
    let bold = view.row_attributes().find(|row| row.item_id.as_str() == "bold").unwrap();
    assert_eq!(bold.checked, Some(true));

    menu.select(&root(), "right", 2).unwrap();
    assert_eq!(*radio_values.borrow(), ["right"]);
    // Selecting the current value reports nothing new.
    menu.select(&root(), "left", 3).unwrap();
    assert_eq!(radio_values.borrow().len(), 1);

    let done = menu.select(&root(), "done", 4).unwrap();
    assert!(done.closed);
    assert!(!menu.is_open());
}

#[test]
fn enter_selects_an_item_and_closes_the_tree() {
    let picked = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&picked);
    let defs = vec![
        NodeDef::item(ItemDef::new("copy")),
        NodeDef::item(
            ItemDef::new("delete").on_select(move |event| *sink.borrow_mut() = Some(event.surface.to_string())),
        ),
    ];
    let mut menu = ActionMenu::<()>::new(defs, ActionMenuConfig::default()).unwrap();
    menu.open(0);
    press(&mut menu, Key::ArrowDown, &root(), 1);
    let action = press(&mut menu, Key::Enter, &root(), 2);
    assert_eq!(
        action,
        Some(KeyAction::Select {
            surface: root(),
            row: RowId::new("delete"),
        })
    );
    assert_eq!(picked.borrow().as_deref(), Some("root"));
    assert!(!menu.is_open());
    assert_eq!(menu.focus_owner(), None);
}

#[test]
fn keyboard_wrap_scrolls_the_virtual_window() {
    let defs = (0..1000)
        .map(|i| NodeDef::item(ItemDef::new(format!("item-{i}"))))
        .collect();
    let mut menu = ActionMenu::<()>::new(defs, ActionMenuConfig::default()).unwrap();
    menu.open(0);
    menu.set_viewport(&root(), 320.0);

    let view = menu.surface_view(&root()).unwrap();
    assert_eq!(view.row_count, 1000);
    assert_eq!(view.strip.start..view.strip.end, 0..22);
    assert_eq!(view.rows.len(), 22);

    press(&mut menu, Key::ArrowUp, &root(), 1);
    assert_eq!(menu.active_row(&root()).map(RowId::as_str), Some("item-999"));
    assert_eq!(menu.scroll_offset(&root()), Some(1000.0 * 32.0 - 320.0));
    let view = menu.surface_view(&root()).unwrap();
    assert_eq!(view.strip.end, 1000);
    assert!(view.row_attributes().any(|row| row.item_id.as_str() == "item-999" && row.focused));
}

#[test]
fn pointer_activation_does_not_scroll() {
    let defs = (0..100)
        .map(|i| NodeDef::item(ItemDef::new(format!("item-{i}"))))
        .collect();
    let mut menu = ActionMenu::<()>::new(defs, ActionMenuConfig::default()).unwrap();
    menu.open(0);
    menu.set_viewport(&root(), 320.0);
    menu.pointer_move(&root(), Some("item-9"), Point::new(10.0, 300.0), 1);
    assert_eq!(menu.active_row(&root()).map(RowId::as_str), Some("item-9"));
    assert_eq!(menu.scroll_offset(&root()), Some(0.0));
}

#[test]
fn async_root_results_stay_current_next_to_deep_search_loaders() {
    let teams = LoaderSpec::from_async(|query| {
        let id = format!("team-{}", query.query);
        async move { Ok(vec![NodeDef::item(ItemDef::new(id))]) }
    });
    let loader = LoaderSpec::from_async(move |query| {
        let nodes = vec![
            NodeDef::item(ItemDef::new(format!("root-{}", query.query))),
            NodeDef::submenu(SubmenuDef::with_loader("teams", teams.clone()).title("Teams")),
        ];
        async move { Ok(nodes) }
    });
    let mut menu = ActionMenu::<()>::with_root_loader(loader, ActionMenuConfig::default()).unwrap();
    menu.open(0);
    menu.set_viewport(&root(), 320.0);
    menu.tick(1);
    assert_eq!(visible_ids(&mut menu, &root()), ["root-", "teams"]);

    menu.set_query(&root(), "zz", 2);
    for now in 3..10 {
        menu.tick(now);
    }
    let mut ids = visible_ids(&mut menu, &root());
    ids.sort();
    assert_eq!(ids, ["root-zz", "team-zz"]);
    let view = menu.surface_view(&root()).unwrap();
    assert!(view.status.is_some_and(|status| !status.is_fetching && !status.is_loading));
}

#[test]
fn deep_results_sharing_an_id_stay_distinct() {
    let defs = vec![
        NodeDef::item(ItemDef::new("copy")),
        NodeDef::submenu(SubmenuDef::new("share", [NodeDef::item(ItemDef::new("copy"))]).title("Share")),
    ];
    let mut menu = ActionMenu::<()>::new(defs, ActionMenuConfig::default()).unwrap();
    menu.open(0);
    menu.set_viewport(&root(), 320.0);
    menu.set_query(&root(), "copy", 1);

    let mut order: Vec<_> = menu
        .store(&root())
        .unwrap()
        .order()
        .iter()
        .map(ToString::to_string)
        .collect();
    order.sort();
    assert_eq!(order, ["copy", "share::copy"]);

    let view = menu.surface_view(&root()).unwrap();
    let mut element_ids: Vec<_> = view.row_attributes().map(|row| row.element_id.clone()).collect();
    element_ids.sort();
    assert_eq!(element_ids, ["root::list::copy", "root::list::share::copy"]);

    let selection = menu.select(&root(), "share::copy", 2).unwrap();
    assert_eq!(selection.surface, root().child(&RowId::new("share")));
    assert_eq!(selection.item.as_str(), "copy");
}

#[test]
fn sticky_groups_follow_the_first_settled_root_load() {
    let loader = LoaderSpec::from_async(|_| async {
        Ok(vec![
            NodeDef::item(ItemDef::new("italic").checkbox(false)),
            NodeDef::item(ItemDef::new("bold").checkbox(true)),
        ])
    });
    let config = ActionMenuConfig {
        sticky_groups: true,
        ..ActionMenuConfig::default()
    };
    let mut menu = ActionMenu::<()>::with_root_loader(loader, config).unwrap();
    menu.open(0);
    menu.set_viewport(&root(), 320.0);
    menu.tick(1);

    menu.set_query(&root(), "l", 2);
    for now in 3..6 {
        menu.tick(now);
    }
    let view = menu.surface_view(&root()).unwrap();
    let rows: Vec<String> = view
        .rows
        .iter()
        .map(|row| match row {
            RowView::Node { attributes, .. } => attributes.item_id.to_string(),
            RowView::Separator { id, .. } => format!("separator:{id}"),
            RowView::Heading { group, .. } => format!("heading:{group}"),
        })
        .collect();
    assert_eq!(rows, ["bold", "separator:sticky-separator", "italic"]);
}
