use std::collections::HashSet;
use template_induction::{
    DomTree, ElementGroup, ElementNode, HtmlDocument, InductionOptions, NodeId, OverlapPolicy,
    TemplateInducer, induce,
};

fn documents() -> Vec<DomTree> {
    let card = |title: &str, extra: Option<&str>| {
        let mut children = vec![
            ElementNode::new("h3").with_class("name").with_text(title),
            ElementNode::new("span").with_class("cost").with_text("9"),
        ];
        if let Some(extra) = extra {
            children.push(ElementNode::new("em").with_class("badge").with_text(extra));
        }
        ElementNode::new("article").with_class("card").with_children(children)
    };

    let nested_list = ElementNode::new("body").with_children(vec![
        ElementNode::new("ul").with_class("menu").with_children(vec![
            ElementNode::new("li").with_children(vec![
                ElementNode::new("a").with_text("Home"),
                ElementNode::new("small").with_text("1"),
            ]),
            ElementNode::new("li").with_children(vec![
                ElementNode::new("a").with_text("Shop"),
                ElementNode::new("small").with_text("2"),
            ]),
        ]),
        ElementNode::new("section").with_children(vec![
            card("a", None),
            card("b", Some("new")),
            card("c", None),
            card("d", Some("sale")),
        ]),
    ]);

    vec![
        DomTree::new(nested_list),
        HtmlDocument::parse(
            r#"<table>
                <tr><td>1</td><td>Alice</td><td>alice@example.com</td></tr>
                <tr><td>2</td><td>Bob</td><td>bob@example.com</td></tr>
                <tr><td>3</td><td>Carol</td><td></td></tr>
            </table>
            <div class="x"><div class="x"><b>1</b><i>2</i></div><div class="x"><b>3</b><i>4</i></div></div>
            <div class="x"><div class="x"><b>5</b><i>6</i></div><div class="x"><b>7</b><i>8</i></div></div>"#,
        )
        .into_tree(),
        DomTree::from_html("<p>nothing repeats here</p>"),
    ]
}

fn assert_group_invariants(tree: &DomTree, group: &ElementGroup, options: &InductionOptions) {
    assert!(group.wrapper_elements.len() >= options.min_instances);
    assert!(group.element_groups.len() >= options.min_fields);
    assert!(group.wrapper_elements.windows(2).all(|w| w[0] < w[1]));

    let wrappers: HashSet<NodeId> = group.wrapper_elements.iter().copied().collect();
    let mut seen: HashSet<NodeId> = HashSet::new();

    for field in &group.element_groups {
        assert!(field.len() <= group.wrapper_elements.len());
        assert!(options.covers(field.len(), group.wrapper_elements.len()));
        assert!(field.windows(2).all(|w| w[0] < w[1]));

        for &id in field {
            assert!(seen.insert(id), "element appears in two field groups");
            assert!(!wrappers.contains(&id), "wrapper reported as a field");
            assert!(tree.is_text_bearing(id));
            assert!(
                group.wrapper_elements.iter().any(|&w| tree.is_ancestor(w, id)),
                "field outside of every wrapper"
            );
        }
    }
}

#[test]
fn test_determinism() {
    for tree in documents() {
        assert_eq!(induce(&tree), induce(&tree));
    }
}

#[test]
fn test_group_invariants_hold() {
    let options = InductionOptions::default();
    for tree in documents() {
        for group in induce(&tree) {
            assert_group_invariants(&tree, &group, &options);
        }
    }
}

#[test]
fn test_group_invariants_hold_for_every_policy() {
    let policies = [
        OverlapPolicy::MostInstances,
        OverlapPolicy::Deepest,
        OverlapPolicy::Shallowest,
    ];
    for policy in policies {
        let options = InductionOptions::new().overlap_policy(policy).field_coverage(0.3);
        let inducer = TemplateInducer::with_options(options.clone()).unwrap();

        for tree in documents() {
            let groups = inducer.induce(&tree);
            for group in &groups {
                assert_group_invariants(&tree, group, &options);
            }

            // kept groups never nest inside each other
            for (i, a) in groups.iter().enumerate() {
                for b in &groups[i + 1..] {
                    for &x in &a.wrapper_elements {
                        for &y in &b.wrapper_elements {
                            assert!(x != y && !tree.is_ancestor(x, y) && !tree.is_ancestor(y, x));
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_independent_sections_in_document_order() {
    let trees = documents();
    let tree = &trees[0];
    let groups = induce(tree);

    let wrapper_tags: Vec<&str> = groups
        .iter()
        .map(|g| tree[g.wrapper_elements[0]].tag_name.as_str())
        .collect();
    assert_eq!(wrapper_tags, vec!["li", "article"]);

    // the optional badge is on half the cards, which is not a majority
    let cards = &groups[1];
    assert_eq!(cards.wrapper_elements.len(), 4);
    assert_eq!(cards.element_groups.len(), 2);
}

#[test]
fn test_majority_tolerance() {
    // present in 4 of 5 wrappers, substituted in the fifth
    let item = |label: &str| {
        ElementNode::new("div").with_class("item").with_children(vec![
            ElementNode::new("b").with_class("name").with_text("n"),
            ElementNode::new("i").with_class(label).with_text("v"),
        ])
    };
    let tree = DomTree::new(ElementNode::new("body").with_children(vec![
        item("value"),
        item("value"),
        item("other"),
        item("value"),
        item("value"),
    ]));

    let groups = induce(&tree);
    assert_eq!(groups.len(), 1);

    let values = &groups[0].element_groups[1];
    assert_eq!(values.len(), 4);
    assert!(values.iter().all(|&id| tree[id].has_class("value")));
    assert!(
        groups[0]
            .element_groups
            .iter()
            .flatten()
            .all(|&id| !tree[id].has_class("other"))
    );
}

#[test]
fn test_table_rows_and_nested_signature() {
    let trees = documents();
    let tree = &trees[1];
    let groups = induce(tree);

    let tags: Vec<(&str, usize, usize)> = groups
        .iter()
        .map(|g| {
            let tag = tree[g.wrapper_elements[0]].tag_name.as_str();
            (tag, g.instance_count(), g.field_count())
        })
        .collect();
    // the empty cell of the last row lowers coverage of the third column to 2 of 3
    assert_eq!(tags, vec![("tr", 3, 3), ("div", 4, 2)]);
}

#[test]
fn test_deeply_nested_documents() {
    const DEPTH: usize = 20_000;

    let item = |title: &str, price: &str| {
        format!(r#"<div class="group"><span class="title">{title}</span><span class="price">{price}</span></div>"#)
    };
    let html = format!(
        "<html><body>{}{}{}{}{}</body></html>",
        "<div>".repeat(DEPTH),
        item("AAA", "1"),
        item("BBB", "2"),
        item("CCC", "3"),
        "</div>".repeat(DEPTH),
    );

    let doc = HtmlDocument::parse(&html);
    assert!(doc.tree().max_depth() > DEPTH);

    let groups = induce(doc.tree());
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].instance_count(), 3);
    assert_eq!(groups[0].field_count(), 2);

    let product = |title: &str| {
        ElementNode::new("li").with_class("product").with_children(vec![
            ElementNode::new("b").with_text(title),
            ElementNode::new("i").with_text("9"),
        ])
    };
    let mut node = ElementNode::new("ul").with_children(vec![product("a"), product("b")]);
    for _ in 0..DEPTH {
        node = ElementNode::new("div").with_children(vec![node]);
    }

    let tree = DomTree::new(node);
    assert_eq!(tree.len(), DEPTH + 7);

    let groups = induce(&tree);
    assert_eq!(groups.len(), 1);
    assert!(groups[0].wrapper_elements.iter().all(|&id| tree[id].has_class("product")));
}
