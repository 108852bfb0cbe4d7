//! Property-based invariant tests for identity and layout.
//!
//! Verifies:
//! 1. Hashing is deterministic and indexed ids differ per index
//! 2. Grow siblings split the free space in proportion to their weight
//! 3. Grow siblings exactly fill the space left by padding, gaps and other siblings
//! 4. Laying out the same declarations twice yields identical commands
//! 5. Commands come out sorted by z-index regardless of layer nesting
//! 6. Nested clip regions always form a balanced stream
//! 7. Non-overflowing fixed children stay inside their parent

use boxlay::id;
use boxlay::prelude::*;
use boxlay::renderer::validate_clip_nesting;
use proptest::prelude::*;

fn measure(text: &str, config: &TextConfig) -> Dimensions {
    Dimensions::new(text.chars().count() as f32 * 7.0, config.font_size as f32)
}

fn context(width: f32, height: f32) -> LayoutContext {
    LayoutContext::initialize(DEFAULT_ARENA_CAPACITY, Dimensions::new(width, height), measure)
}

fn close_enough(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-3 * a.abs().max(b.abs()).max(1.0)
}

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_sizing() -> impl Strategy<Value = Sizing> {
    prop_oneof![
        (0.0f32..50.0).prop_map(|min| Sizing::Fit(min, f32::MAX)),
        (0.0f32..5.0).prop_map(Sizing::Grow),
        (0.0f32..200.0).prop_map(Sizing::Fixed),
        (0.0f32..=1.0).prop_map(Sizing::Percent),
    ]
}

#[derive(Debug, Clone)]
struct Child {
    width: Sizing,
    height: Sizing,
    label: Option<String>,
}

fn arb_child() -> impl Strategy<Value = Child> {
    (arb_sizing(), arb_sizing(), proptest::option::of("[a-z]{1,8}")).prop_map(
        |(width, height, label)| Child {
            width,
            height,
            label,
        },
    )
}

fn declare(ui: &mut Ui<'_>, children: &[Child], gap: u16, padding: u16) {
    ui.element(
        &Declaration::new()
            .id("container")
            .width(grow!())
            .height(grow!())
            .layout(|l| l.gap(gap).padding(Padding::all(padding)))
            .background_color(Color::rgb(0.1, 0.1, 0.1)),
        |ui| {
            for (index, child) in children.iter().enumerate() {
                ui.element(
                    &Declaration::new()
                        .id(("child", index as u32))
                        .width(child.width)
                        .height(child.height)
                        .background_color(Color::rgb(0.5, 0.5, 0.5)),
                    |ui| {
                        if let Some(label) = &child.label {
                            ui.text(label, |t| t.font_size(12));
                        }
                    },
                );
            }
        },
    );
}

proptest! {
    #[test]
    fn hash_is_deterministic(name in ".{0,32}") {
        prop_assert_eq!(id::hash(&name), id::hash(&name));
        prop_assert_eq!(Id::new(&name), Id::new(&name));
    }

    #[test]
    fn indexed_ids_differ_per_index(name in "[a-z_]{1,16}", i in 0u32..256, j in 0u32..256) {
        prop_assume!(i != j);
        prop_assert_ne!(id::hash_indexed(&name, i), id::hash_indexed(&name, j));
        prop_assert_eq!(Id::new_index(&name, i).base_id, id::hash(&name));
    }
}

proptest! {
    #[test]
    fn grow_is_proportional_and_fills(
        width in 500.0f32..2000.0,
        weights in proptest::collection::vec(0.1f32..10.0, 1..6),
        fixed_widths in proptest::collection::vec(0.0f32..50.0, 0..4),
        fit_width in proptest::option::of(1.0f32..40.0),
        percent in proptest::option::of(0.0f32..0.3),
        padding_left in 0u16..20,
        padding_right in 0u16..20,
        gap in 0u16..10,
    ) {
        let mut ctx = context(width, 100.0);
        let mut ui = ctx.begin();
        ui.element(
            &Declaration::new()
                .id("row")
                .width(fixed!(width))
                .height(fixed!(100.0))
                .layout(|l| l.gap(gap).padding(Padding::new(padding_left, padding_right, 0, 0))),
            |ui| {
                for (index, fixed_width) in fixed_widths.iter().enumerate() {
                    ui.element(
                        &Declaration::new()
                            .id(("fixed", index as u32))
                            .width(fixed!(*fixed_width))
                            .height(fixed!(10.0)),
                        |_| {},
                    );
                }
                if let Some(fit_width) = fit_width {
                    ui.element(&Declaration::new().id("fit"), |ui| {
                        ui.element(
                            &Declaration::new().width(fixed!(fit_width)).height(fixed!(10.0)),
                            |_| {},
                        );
                    });
                }
                if let Some(percent) = percent {
                    ui.element(
                        &Declaration::new()
                            .id("percent")
                            .width(Sizing::Percent(percent))
                            .height(fixed!(10.0)),
                        |_| {},
                    );
                }
                for (index, weight) in weights.iter().enumerate() {
                    ui.element(
                        &Declaration::new()
                            .id(("grow", index as u32))
                            .width(grow!(*weight))
                            .height(fixed!(10.0)),
                        |_| {},
                    );
                }
            },
        );
        ui.end().unwrap();

        let child_count = fixed_widths.len()
            + weights.len()
            + usize::from(fit_width.is_some())
            + usize::from(percent.is_some());
        let gaps = (child_count - 1) as f32 * gap as f32;
        let inner = width - (padding_left + padding_right) as f32 - gaps;

        let mut non_grow = 0.0;
        for index in 0..fixed_widths.len() {
            non_grow += ctx.bounding_box(&Id::new_index("fixed", index as u32)).unwrap().width;
        }
        if fit_width.is_some() {
            non_grow += ctx.bounding_box(&Id::new("fit")).unwrap().width;
        }
        if percent.is_some() {
            non_grow += ctx.bounding_box(&Id::new("percent")).unwrap().width;
        }

        let free = inner - non_grow;
        let total_weight: f32 = weights.iter().sum();
        let mut grown = 0.0;
        for (index, weight) in weights.iter().enumerate() {
            let bbox = ctx.bounding_box(&Id::new_index("grow", index as u32)).unwrap();
            prop_assert!(close_enough(bbox.width / weight, free / total_weight));
            grown += bbox.width;
        }
        prop_assert!(close_enough(grown, free), "grew {} of {}", grown, free);
        prop_assert!(close_enough(non_grow + grown, inner), "filled {} of {}", non_grow + grown, inner);

        let last = ctx.bounding_box(&Id::new_index("grow", weights.len() as u32 - 1)).unwrap();
        prop_assert!(close_enough(last.right(), width - padding_right as f32));
    }
}

proptest! {
    #[test]
    fn layout_is_idempotent(
        children in proptest::collection::vec(arb_child(), 0..8),
        gap in 0u16..20,
        padding in 0u16..20,
    ) {
        let mut ctx = context(640.0, 480.0);

        let mut ui = ctx.begin();
        declare(&mut ui, &children, gap, padding);
        let first = ui.end().unwrap().to_vec();

        let mut ui = ctx.begin();
        declare(&mut ui, &children, gap, padding);
        let second = ui.end().unwrap().to_vec();

        prop_assert_eq!(first, second);
    }
}

proptest! {
    #[test]
    fn commands_are_sorted_by_z(layering in proptest::collection::vec(any::<bool>(), 1..12)) {
        let mut ctx = context(640.0, 480.0);
        ctx.begin_layout();
        for (index, raise) in layering.iter().enumerate() {
            if *raise {
                ctx.push_layer();
            }
            let mut declaration = Declaration::<()>::new();
            declaration
                .width(fixed!(10.0))
                .height(fixed!(10.0))
                .background_color(Color::rgb(1.0, 1.0, 1.0));
            ctx.open_element_with_id(&Id::new_index("item", index as u32));
            ctx.configure_open_element(declaration.declaration());
            ctx.close_element();
            if *raise && index % 2 == 0 {
                ctx.pop_layer();
            }
        }
        let commands = ctx.end_layout().unwrap();

        prop_assert_eq!(commands.len(), layering.len());
        prop_assert!(commands.windows(2).all(|pair| pair[0].z_index <= pair[1].z_index));
    }
}

proptest! {
    #[test]
    fn nested_clips_are_balanced(depth in 0usize..16) {
        let mut ctx = context(200.0, 200.0);
        ctx.begin_layout();
        let mut clipped = Declaration::<()>::new();
        clipped
            .width(grow!())
            .height(grow!())
            .clip(|c| c.both());
        for level in 0..depth {
            ctx.open_element_with_id(&Id::new_index("clip", level as u32));
            ctx.configure_open_element(clipped.declaration());
        }
        // Left open on purpose: end_layout closes them.
        let commands = ctx.end_layout().unwrap();

        prop_assert_eq!(commands.len(), depth * 2);
        prop_assert_eq!(validate_clip_nesting(commands), Ok(depth));
    }
}

proptest! {
    #[test]
    fn fitting_fixed_children_stay_inside(
        sizes in proptest::collection::vec((1.0f32..60.0, 1.0f32..200.0), 1..6),
        gap in 0u16..10,
    ) {
        let mut ctx = context(1000.0, 1000.0);
        let mut ui = ctx.begin();
        ui.element(
            &Declaration::new()
                .id("parent")
                .width(fixed!(500.0))
                .height(fixed!(250.0))
                .layout(|l| l.gap(gap).padding(Padding::all(5))),
            |ui| {
                for (index, (width, height)) in sizes.iter().enumerate() {
                    ui.element(
                        &Declaration::new()
                            .id(("child", index as u32))
                            .width(fixed!(*width))
                            .height(fixed!(*height)),
                        |_| {},
                    );
                }
            },
        );
        ui.end().unwrap();

        let parent = ctx.bounding_box(&Id::new("parent")).unwrap();
        for index in 0..sizes.len() {
            let child = ctx.bounding_box(&Id::new_index("child", index as u32)).unwrap();
            prop_assert!(parent.contains(&child), "{:?} escapes {:?}", child, parent);
        }
    }
}
