use comic_core::{update, Effect, Lifecycle, Msg, PreviewState, SelectedFile};
use pretty_assertions::assert_eq;

fn init_logging() {
    comic_logging::initialize_for_tests();
}

fn files(names: &[&str]) -> Vec<SelectedFile> {
    names
        .iter()
        .map(|name| SelectedFile::new(*name, name.as_bytes().to_vec()))
        .collect()
}

fn select(state: PreviewState, names: &[&str]) -> (PreviewState, Vec<Effect>) {
    update(state, Msg::SelectionChanged(files(names)))
}

fn container_of(effects: &[Effect]) -> &str {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ContainerReplaced { html } => Some(html.as_str()),
            _ => None,
        })
        .expect("container replaced")
}

#[test]
fn one_line_per_file_in_selection_order() {
    init_logging();
    let (state, effects) = select(PreviewState::new(), &["p1.png", "p2.png", "p3.png"]);
    let view = state.view();

    let labels: Vec<_> = view.lines.iter().map(|line| line.label.as_str()).collect();
    assert_eq!(labels, vec!["Page 1", "Page 2", "Page 3"]);
    let names: Vec<_> = view.lines.iter().map(|line| line.file_name.as_str()).collect();
    assert_eq!(names, vec!["p1.png", "p2.png", "p3.png"]);
    assert!(view.lines.iter().all(|line| line.target == "_blank"));

    let html = container_of(&effects);
    assert_eq!(html.matches("<p>").count(), 3);
    let first = html.find("Page 1:").unwrap();
    let second = html.find("Page 2:").unwrap();
    let third = html.find("Page 3:").unwrap();
    assert!(first < second && second < third);
    assert_eq!(html, view.container_html());
}

#[test]
fn new_selection_fully_replaces_previous_lines() {
    init_logging();
    let (state, _) = select(PreviewState::new(), &["old-1.png", "old-2.png", "old-3.png"]);
    let (state, effects) = select(state, &["new-1.png"]);

    let html = container_of(&effects);
    assert_eq!(html.matches("<p>").count(), 1);
    assert!(!html.contains("old-"));
    assert!(!html.contains("Page 2"));
    assert_eq!(state.entries().len(), 1);
    assert_eq!(state.entries()[0].page, 1);
}

#[test]
fn repeated_identical_selection_does_not_accumulate() {
    init_logging();
    let (state, _) = select(PreviewState::new(), &["a.png", "b.png"]);
    let (state, _) = select(state, &["a.png", "b.png"]);
    let (state, effects) = select(state, &["a.png", "b.png"]);

    assert_eq!(container_of(&effects).matches("<p>").count(), 2);
    assert_eq!(state.registry().live_count(), 2);
}

#[test]
fn new_selection_revokes_previous_addresses() {
    init_logging();
    let (state, _) = select(PreviewState::new(), &["a.png", "b.png"]);
    let mut old_urls: Vec<String> = state
        .entries()
        .iter()
        .map(|entry| entry.object_url.clone())
        .collect();
    old_urls.sort();

    let (state, effects) = select(state, &["c.png"]);

    assert_eq!(
        effects[0],
        Effect::ObjectUrlsRevoked {
            urls: old_urls.clone()
        }
    );
    for url in &old_urls {
        assert!(state.resolve(url).is_none());
    }
    let live = &state.entries()[0].object_url;
    assert_eq!(state.resolve(live).map(|b| b.to_vec()), Some(b"c.png".to_vec()));
}

#[test]
fn first_selection_only_replaces_container() {
    init_logging();
    let (_, effects) = select(PreviewState::new(), &["a.png"]);
    assert_eq!(effects.len(), 1);
    assert!(matches!(effects[0], Effect::ContainerReplaced { .. }));
}

#[test]
fn empty_selection_leaves_heading_only() {
    init_logging();
    let (state, _) = select(PreviewState::new(), &["a.png"]);
    let (state, effects) = select(state, &[]);

    assert_eq!(
        container_of(&effects),
        "<div class=\"comic-preview\"><strong>Selected images:</strong><br></div>"
    );
    assert_eq!(state.registry().live_count(), 0);
}

#[test]
fn any_content_gets_an_address() {
    init_logging();
    let selection = vec![
        SelectedFile::new("notes.txt", b"plain text".to_vec()).with_media_type("text/plain"),
        SelectedFile::new("empty.bin", Vec::new()),
    ];
    let (state, _) = update(PreviewState::new(), Msg::SelectionChanged(selection));

    assert_eq!(state.entries().len(), 2);
    assert_eq!(state.entries()[1].byte_len, 0);
    assert_eq!(state.registry().live_count(), 2);
}

#[test]
fn addresses_use_page_origin() {
    init_logging();
    let state = PreviewState::with_origin("https://comics.example.org/admin/comic/add/");
    let (state, _) = select(state, &["a.png"]);
    assert!(state.entries()[0]
        .object_url
        .starts_with("blob:https://comics.example.org/"));
}

#[test]
fn teardown_revokes_everything_and_ignores_later_selections() {
    init_logging();
    let (state, _) = select(PreviewState::new(), &["a.png", "b.png"]);
    let (state, effects) = update(state, Msg::Teardown);

    assert!(matches!(
        &effects[0],
        Effect::ObjectUrlsRevoked { urls } if urls.len() == 2
    ));
    assert_eq!(state.lifecycle(), Lifecycle::TornDown);
    assert_eq!(state.registry().live_count(), 0);
    assert!(!state.view().active);

    let (state, effects) = select(state, &["c.png"]);
    assert!(effects.is_empty());
    assert!(state.entries().is_empty());

    let (_, effects) = update(state, Msg::Teardown);
    assert!(effects.is_empty());
}
