//! Integration tests for playback coordination
//!
//! These tests wire pages, the slot, and a surface together the way the
//! client UI loop does: commands run, then `sync` + `pump` reconcile the
//! surface against the slot each frame.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use stem_core::{CatalogQuery, ItemId, ItemKind, PlayableItem};
use stem_playback::{
    CatalogSource, EngineEvent, EngineFactory, HandlerSet, MediaEngine, PageController,
    PlayCountSink, PlaybackConfig, PlaybackError, PlaybackEvent, PlaybackSlot, PlaybackSurface,
    SurfaceState,
};

// ===== Test Helpers =====

/// Test-side handle to one created engine
struct EngineHandle {
    url: String,
    calls: Rc<RefCell<Vec<&'static str>>>,
    events: Rc<RefCell<VecDeque<EngineEvent>>>,
}

impl EngineHandle {
    fn emit(&self, event: EngineEvent) {
        self.events.borrow_mut().push_back(event);
    }

    fn ready(&self, duration_secs: u64) {
        self.emit(EngineEvent::Ready {
            duration: Duration::from_secs(duration_secs),
        });
    }

    fn progress(&self, elapsed_secs: u64) {
        self.emit(EngineEvent::Progress {
            elapsed: Duration::from_secs(elapsed_secs),
        });
    }
}

struct TestEngine {
    calls: Rc<RefCell<Vec<&'static str>>>,
    events: Rc<RefCell<VecDeque<EngineEvent>>>,
}

impl MediaEngine for TestEngine {
    fn play(&mut self) {
        self.calls.borrow_mut().push("play");
    }

    fn pause(&mut self) {
        self.calls.borrow_mut().push("pause");
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    fn position(&self) -> Duration {
        Duration::ZERO
    }
}

#[derive(Default)]
struct TestFactory {
    handles: Rc<RefCell<Vec<EngineHandle>>>,
}

impl EngineFactory for TestFactory {
    fn create(&mut self, media_url: &str) -> stem_playback::Result<Box<dyn MediaEngine>> {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let events = Rc::new(RefCell::new(VecDeque::new()));
        self.handles.borrow_mut().push(EngineHandle {
            url: media_url.to_string(),
            calls: Rc::clone(&calls),
            events: Rc::clone(&events),
        });
        Ok(Box::new(TestEngine { calls, events }))
    }
}

/// Play-count sink recording every attribution
#[derive(Default)]
struct RecordingSink {
    plays: RefCell<Vec<ItemId>>,
}

impl PlayCountSink for RecordingSink {
    fn record_play(&self, item_id: &ItemId) {
        self.plays.borrow_mut().push(item_id.clone());
    }
}

/// Catalog returning a fixed item list
struct StaticCatalog {
    items: Vec<PlayableItem>,
    fail: bool,
}

impl CatalogSource for StaticCatalog {
    fn fetch(&mut self, _query: &CatalogQuery) -> stem_playback::Result<Vec<PlayableItem>> {
        if self.fail {
            return Err(PlaybackError::Catalog("backend unavailable".to_string()));
        }
        Ok(self.items.clone())
    }
}

fn track(id: &str, duration_secs: u64) -> PlayableItem {
    let mut item = PlayableItem::track(
        format!("Track {id}"),
        "Test Artist",
        format!("https://cdn.stem.example/{id}.mp3"),
    )
    .with_id(id);
    item.set_duration(Duration::from_secs(duration_secs));
    item
}

fn track_surface() -> (PlaybackSurface, Rc<RefCell<Vec<EngineHandle>>>) {
    let factory = TestFactory::default();
    let handles = Rc::clone(&factory.handles);
    let surface = PlaybackSurface::new(
        ItemKind::Track,
        Box::new(factory),
        &PlaybackConfig::default(),
    );
    (surface, handles)
}

/// One UI frame: reconcile, drain engine events, reconcile again so
/// rebinds triggered by engine events take effect within the frame.
fn frame(surface: &mut PlaybackSurface, slot: &mut PlaybackSlot) {
    surface.sync(slot);
    surface.pump(slot);
    surface.sync(slot);
}

fn last_handle(handles: &Rc<RefCell<Vec<EngineHandle>>>) -> usize {
    handles.borrow().len() - 1
}

// ===== Integration Tests =====

#[test]
fn row_click_plays_through_and_advances() {
    let mut slot = PlaybackSlot::new();
    let (mut surface, handles) = track_surface();

    let sink = Rc::new(RecordingSink::default());
    let mut page = PageController::new().with_play_counts(Rc::clone(&sink) as Rc<dyn PlayCountSink>);
    page.install(&mut slot);
    page.set_items(vec![track("1", 100), track("2", 90)], &mut slot);

    // User clicks the first row.
    page.play_item_by_id(&ItemId::new("1"), &mut slot);
    assert!(slot.is_playing());
    frame(&mut surface, &mut slot);
    assert_eq!(surface.state(), SurfaceState::Loading);

    handles.borrow()[0].ready(100);
    frame(&mut surface, &mut slot);
    assert_eq!(surface.state(), SurfaceState::Playing);
    assert_eq!(handles.borrow()[0].calls.borrow().as_slice(), &["play"]);

    // Play through: past 60% the play is counted, at the end the page's
    // on_next moves to track 2 and the surface rebinds.
    handles.borrow()[0].progress(61);
    handles.borrow()[0].emit(EngineEvent::Finished);
    frame(&mut surface, &mut slot);

    assert_eq!(slot.current_item_id(), Some(ItemId::new("2")));
    assert!(slot.is_playing());
    assert_eq!(surface.bound_item().unwrap().id, ItemId::new("2"));
    assert_eq!(surface.state(), SurfaceState::Loading);
    assert_eq!(sink.plays.borrow().as_slice(), &[ItemId::new("1")]);

    // Second engine resolves and starts too.
    let second = last_handle(&handles);
    handles.borrow()[second].ready(90);
    frame(&mut surface, &mut slot);
    assert_eq!(surface.state(), SurfaceState::Playing);
    assert!(handles.borrow()[second].url.ends_with("2.mp3"));
}

#[test]
fn finishing_the_last_item_unloads_and_stops() {
    let mut slot = PlaybackSlot::new();
    let (mut surface, handles) = track_surface();

    let mut page = PageController::new();
    page.install(&mut slot);
    page.set_items(vec![track("1", 100), track("2", 90)], &mut slot);

    page.play_item_by_id(&ItemId::new("2"), &mut slot);
    frame(&mut surface, &mut slot);
    handles.borrow()[0].ready(90);
    frame(&mut surface, &mut slot);
    assert_eq!(surface.state(), SurfaceState::Playing);

    // Natural completion at the end of the list: selection walks off the
    // end, the slot unloads, the surface releases its engine.
    handles.borrow()[0].emit(EngineEvent::Finished);
    frame(&mut surface, &mut slot);

    assert_eq!(slot.current_item_id(), None);
    assert!(!slot.is_playing());
    assert_eq!(surface.state(), SurfaceState::Idle);
    assert!(!surface.has_engine());
    assert_eq!(page.list().selected_index(), None);
}

#[test]
fn freshly_mounted_page_takes_over_navigation() {
    let mut slot = PlaybackSlot::new();
    let (mut surface, handles) = track_surface();

    // Page A: explore view.
    let mut explore = PageController::new();
    explore.install(&mut slot);
    explore.set_items(vec![track("a1", 100), track("a2", 100)], &mut slot);
    explore.play_item_by_id(&ItemId::new("a1"), &mut slot);
    frame(&mut surface, &mut slot);
    handles.borrow()[0].ready(100);
    frame(&mut surface, &mut slot);

    // Page B mounts (user navigated); A unmounts afterwards with its now
    // stale token, which must not strip B's handlers.
    let mut library = PageController::new();
    library.install(&mut slot);
    library.set_items(vec![track("b1", 80), track("b2", 80)], &mut slot);
    library.play_item_by_id(&ItemId::new("b1"), &mut slot);
    explore.unmount(&mut slot);

    assert!(!explore.owns_slot(&slot));
    assert!(library.owns_slot(&slot));

    // Completion is routed to B's list, never back to A's.
    frame(&mut surface, &mut slot);
    let current = last_handle(&handles);
    handles.borrow()[current].ready(80);
    handles.borrow()[current].emit(EngineEvent::Finished);
    frame(&mut surface, &mut slot);

    assert_eq!(slot.current_item_id(), Some(ItemId::new("b2")));
}

#[test]
fn read_only_page_withholds_navigation() {
    let mut slot = PlaybackSlot::new();

    let mut page = PageController::read_only();
    page.install(&mut slot);
    page.set_items(vec![track("1", 100), track("2", 100)], &mut slot);
    page.play_item_by_id(&ItemId::new("1"), &mut slot);

    // Skip controls are hidden and delegation is a silent no-op.
    assert!(!slot.can_advance_next());
    assert!(!slot.can_advance_previous());
    slot.advance_to_next();
    assert_eq!(slot.current_item_id(), Some(ItemId::new("1")));
}

#[test]
fn finished_with_custom_next_handler_matches_slot_contract() {
    // An engine-finished report reaches whichever on_next is installed,
    // which may load any item it likes and request play again.
    let mut slot = PlaybackSlot::new();
    let (mut surface, handles) = track_surface();

    slot.register_handlers(HandlerSet::new().on_next(|slot: &mut PlaybackSlot| {
        slot.set_current_item(Some(track("6", 120)));
        slot.request_play();
    }));

    slot.set_current_item(Some(track("5", 100)));
    slot.request_play();
    frame(&mut surface, &mut slot);
    handles.borrow()[0].ready(100);
    frame(&mut surface, &mut slot);

    handles.borrow()[0].emit(EngineEvent::Finished);
    frame(&mut surface, &mut slot);

    assert_eq!(slot.current_item_id(), Some(ItemId::new("6")));
    assert!(slot.is_playing());
    assert_eq!(surface.bound_item().unwrap().id, ItemId::new("6"));
}

#[test]
fn pause_resume_issues_transport_calls() {
    let mut slot = PlaybackSlot::new();
    let (mut surface, handles) = track_surface();

    let mut page = PageController::new();
    page.install(&mut slot);
    page.set_items(vec![track("1", 100)], &mut slot);
    page.play_item_by_id(&ItemId::new("1"), &mut slot);
    frame(&mut surface, &mut slot);
    handles.borrow()[0].ready(100);
    frame(&mut surface, &mut slot);

    slot.request_pause();
    frame(&mut surface, &mut slot);
    assert_eq!(surface.state(), SurfaceState::Paused);

    slot.request_play();
    frame(&mut surface, &mut slot);
    assert_eq!(surface.state(), SurfaceState::Playing);

    assert_eq!(
        handles.borrow()[0].calls.borrow().as_slice(),
        &["play", "pause", "play"]
    );
}

#[test]
fn seeking_across_the_threshold_counts_once() {
    let mut slot = PlaybackSlot::new();
    let (mut surface, handles) = track_surface();

    let sink = Rc::new(RecordingSink::default());
    let mut page = PageController::new().with_play_counts(Rc::clone(&sink) as Rc<dyn PlayCountSink>);
    page.install(&mut slot);
    page.set_items(vec![track("1", 100)], &mut slot);
    page.play_item_by_id(&ItemId::new("1"), &mut slot);
    frame(&mut surface, &mut slot);
    handles.borrow()[0].ready(100);
    frame(&mut surface, &mut slot);

    // User scrubs around; the counted flag is per loaded session, so
    // repeated crossings attribute exactly one play.
    for elapsed in [30, 70, 20, 80, 95] {
        handles.borrow()[0].progress(elapsed);
    }
    frame(&mut surface, &mut slot);

    assert_eq!(sink.plays.borrow().len(), 1);
}

#[test]
fn replaying_an_item_counts_again() {
    let mut slot = PlaybackSlot::new();
    let (mut surface, handles) = track_surface();

    let sink = Rc::new(RecordingSink::default());
    let mut page = PageController::new().with_play_counts(Rc::clone(&sink) as Rc<dyn PlayCountSink>);
    page.install(&mut slot);
    page.set_items(vec![track("1", 100), track("2", 100)], &mut slot);

    page.play_item_by_id(&ItemId::new("1"), &mut slot);
    frame(&mut surface, &mut slot);
    handles.borrow()[0].ready(100);
    handles.borrow()[0].progress(70);
    frame(&mut surface, &mut slot);

    // Navigate away and back: a fresh session, a fresh count.
    page.play_item_by_id(&ItemId::new("2"), &mut slot);
    frame(&mut surface, &mut slot);
    page.play_item_by_id(&ItemId::new("1"), &mut slot);
    frame(&mut surface, &mut slot);

    let current = last_handle(&handles);
    handles.borrow()[current].ready(100);
    handles.borrow()[current].progress(70);
    frame(&mut surface, &mut slot);

    assert_eq!(
        sink.plays.borrow().as_slice(),
        &[ItemId::new("1"), ItemId::new("1")]
    );
}

#[test]
fn unknown_row_click_clears_and_stops() {
    let mut slot = PlaybackSlot::new();

    let mut page = PageController::new();
    page.install(&mut slot);
    page.set_items(vec![track("1", 100)], &mut slot);
    page.play_item_by_id(&ItemId::new("1"), &mut slot);
    assert!(slot.is_playing());

    page.play_item_by_id(&ItemId::new("missing"), &mut slot);
    assert_eq!(slot.current_item_id(), None);
    assert!(!slot.is_playing());
}

#[test]
fn refresh_pulls_from_the_catalog() {
    let mut slot = PlaybackSlot::new();
    let mut page = PageController::new();
    page.install(&mut slot);

    let mut catalog = StaticCatalog {
        items: vec![track("1", 100), track("2", 90)],
        fail: false,
    };
    let query = CatalogQuery::new().search("lofi").page(0, 20);
    page.refresh(&mut catalog, &query, &mut slot).unwrap();
    assert_eq!(page.list().len(), 2);

    // A failing backend leaves the previous items in place.
    let mut broken = StaticCatalog {
        items: vec![],
        fail: true,
    };
    let error = page.refresh(&mut broken, &query, &mut slot).unwrap_err();
    assert!(matches!(error, PlaybackError::Catalog(_)));
    assert_eq!(page.list().len(), 2);
}

#[test]
fn ui_events_tell_the_whole_story() {
    let mut slot = PlaybackSlot::new();
    let (mut surface, handles) = track_surface();

    let mut page = PageController::new();
    page.install(&mut slot);
    page.set_items(vec![track("1", 100)], &mut slot);

    page.play_item_by_id(&ItemId::new("1"), &mut slot);
    frame(&mut surface, &mut slot);
    handles.borrow()[0].ready(100);
    handles.borrow()[0].progress(10);
    frame(&mut surface, &mut slot);

    let events = slot.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        PlaybackEvent::ItemChanged { item_id: Some(id), .. } if id.as_str() == "1"
    )));
    assert!(events
        .iter()
        .any(|event| matches!(event, PlaybackEvent::StateChanged { playing: true })));
    assert!(events.iter().any(|event| matches!(
        event,
        PlaybackEvent::ProgressUpdate { elapsed_ms: 10_000, duration_ms: 100_000 }
    )));
    assert!(!slot.has_pending_events());
}
