// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coverage properties of `Menu::flatten` over arbitrary trees.

use action_menu_model::{FlattenMode, GroupDef, ItemDef, Menu, NodeDef, SubmenuDef};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Shape {
    Item,
    Group(Vec<Shape>),
    Submenu(Vec<Shape>),
}

fn shape() -> impl Strategy<Value = Shape> {
    Just(Shape::Item).prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            Just(Shape::Item),
            prop::collection::vec(inner.clone(), 0..5).prop_map(Shape::Group),
            prop::collection::vec(inner, 0..5).prop_map(Shape::Submenu),
        ]
    })
}

fn build(shapes: &[Shape], next: &mut usize) -> Vec<NodeDef<()>> {
    shapes
        .iter()
        .map(|shape| {
            *next += 1;
            let id = format!("n{next}");
            match shape {
                Shape::Item => ItemDef::new(id).into(),
                Shape::Group(children) => GroupDef::new(id).children(build(children, next)).into(),
                Shape::Submenu(children) => SubmenuDef::new(id, build(children, next)).into(),
            }
        })
        .collect()
}

/// Returns (nodes at the first surface level, nodes at every level).
fn count(shapes: &[Shape]) -> (usize, usize) {
    shapes.iter().fold((0, 0), |(shallow, deep), shape| match shape {
        Shape::Item => (shallow + 1, deep + 1),
        Shape::Group(children) => {
            let (s, d) = count(children);
            (shallow + 1 + s, deep + 1 + d)
        }
        Shape::Submenu(children) => {
            let (_, d) = count(children);
            (shallow + 1, deep + 1 + d)
        }
    })
}

proptest! {
    #[test]
    fn shallow_flatten_stops_at_submenus(shapes in prop::collection::vec(shape(), 0..6)) {
        let defs = build(&shapes, &mut 0);
        let menu = Menu::instantiate(&defs);
        let (shallow, _) = count(&shapes);
        let flat = menu.flatten(FlattenMode { deep: false });
        prop_assert_eq!(flat.len(), shallow);
        prop_assert!(flat.iter().all(|node| node.parent() == &menu.surface));
    }

    #[test]
    fn deep_flatten_reaches_every_node(shapes in prop::collection::vec(shape(), 0..6)) {
        let defs = build(&shapes, &mut 0);
        let menu = Menu::instantiate(&defs);
        let (_, deep) = count(&shapes);
        prop_assert_eq!(menu.flatten(FlattenMode { deep: true }).len(), deep);
    }
}
