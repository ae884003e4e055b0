use crate::client::{FetchError, PAGE_SIZE, SpeciesSource};
use crate::record::{DraftField, DraftFish, FishRecord};
use crate::router::Route;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Outcome of one species request, delivered back to the event loop.
#[derive(Debug)]
pub struct PageLoad {
    pub offset: u64,
    pub result: Result<Vec<FishRecord>, FetchError>,
}

/// Session state for the catalog.
///
/// `App` is the only owner of mutable state and the only caller of the
/// species API. Views get `&App`; every change goes through a method here.
pub struct App {
    source: Arc<dyn SpeciesSource>,
    loads: UnboundedSender<PageLoad>,

    /// Display name. Cosmetic, never validated.
    pub name: String,
    pub show_modal: bool,
    /// The modal's own input text. Starts empty every time the modal opens.
    pub modal_input: String,

    pub fishes: Vec<FishRecord>,
    /// Offset of the next page to request.
    pub offset: u64,
    pub new_fish: DraftFish,

    pub route: Route,
    /// Highlighted card on the listing.
    pub selected: usize,
    /// Focused input on the form.
    pub focus: DraftField,
    pub should_quit: bool,
}

impl App {
    /// Build the app. Page loads issued by [`App::fetch_fish`] arrive on the
    /// returned receiver and must be handed back through [`App::receive_page`].
    pub fn new(source: Arc<dyn SpeciesSource>) -> (Self, UnboundedReceiver<PageLoad>) {
        let (loads, rx) = mpsc::unbounded_channel();
        let app = Self {
            source,
            loads,
            name: String::new(),
            show_modal: false,
            modal_input: String::new(),
            fishes: Vec::new(),
            offset: 0,
            new_fish: DraftFish::default(),
            route: Route::default(),
            selected: 0,
            focus: DraftField::Species,
            should_quit: false,
        };
        (app, rx)
    }

    /// Load the first page. Called once when the UI comes up.
    pub fn start(&mut self) {
        info!("Loading first page of species");
        self.fetch_fish();
    }

    /// Request the page at the current offset without waiting for it.
    ///
    /// Nothing stops a second request before the first resolves; both use
    /// the same offset and both pages get appended.
    pub fn fetch_fish(&mut self) {
        let offset = self.offset;
        let source = Arc::clone(&self.source);
        let loads = self.loads.clone();
        debug!("Requesting species at offset {}", offset);

        tokio::spawn(async move {
            let result = source.fetch_page(offset).await;
            if loads.send(PageLoad { offset, result }).is_err() {
                debug!("Dropping species page at offset {}: app is gone", offset);
            }
        });
    }

    /// Apply a finished request. Failures leave the list as it was.
    pub fn receive_page(&mut self, load: PageLoad) {
        match load.result {
            Ok(page) => {
                info!("Appending {} fish from offset {}", page.len(), load.offset);
                self.fishes.extend(page);
                self.offset += PAGE_SIZE;
            }
            Err(e) => {
                warn!("Species request at offset {} failed: {}", load.offset, e);
            }
        }
    }

    /// Remove every fish whose `SpecCode` is `code`.
    ///
    /// Fish without a code never match, so locally added fish stay.
    pub fn delete_fish(&mut self, code: u64) {
        let before = self.fishes.len();
        self.fishes.retain(|fish| fish.spec_code != Some(code));
        debug!("Deleted {} fish with SpecCode {}", before - self.fishes.len(), code);
        self.clamp_selection();
    }

    /// Delete by the code of the highlighted card, if it has one.
    pub fn delete_selected(&mut self) {
        match self.fishes.get(self.selected).map(|fish| fish.spec_code) {
            Some(Some(code)) => self.delete_fish(code),
            Some(None) => debug!("Selected fish has no SpecCode; nothing deleted"),
            None => {}
        }
    }

    pub fn handle_change_name(&mut self, value: String) {
        self.name = value;
    }

    pub fn handle_fish_change(&mut self, field: DraftField, value: String) {
        self.new_fish.set(field, value);
    }

    /// Append the draft, clear the form, and go back to the listing.
    pub fn handle_fish_submit(&mut self) {
        let fish = self.new_fish.to_record();
        info!("Adding local fish '{}'", fish.species);
        self.fishes.push(fish);
        self.new_fish = DraftFish::default();
        self.focus = DraftField::Species;
        self.navigate(Route::Listing);
    }

    pub fn open_modal(&mut self) {
        if !self.show_modal {
            self.modal_input.clear();
            self.show_modal = true;
        }
    }

    pub fn close_modal(&mut self) {
        self.show_modal = false;
    }

    pub fn navigate(&mut self, route: Route) {
        if self.route != route {
            debug!("Navigating {} -> {}", self.route.path(), route.path());
        }
        self.route = route;
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.fishes.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.fishes.len().saturating_sub(1));
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('c') {
                self.should_quit = true;
            }
            return;
        }

        if self.show_modal {
            self.on_modal_key(key);
            return;
        }
        match self.route {
            Route::Listing => self.on_listing_key(key),
            Route::Create => self.on_create_key(key),
        }
    }

    fn on_listing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('m') => self.fetch_fish(),
            KeyCode::Char('1') => self.navigate(Route::Listing),
            KeyCode::Char('2') => self.navigate(Route::Create),
            // The "Log in" control only exists while no name is set.
            KeyCode::Char('l') if self.name.is_empty() => self.open_modal(),
            _ => {}
        }
    }

    fn on_create_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.navigate(Route::Listing),
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter => self.handle_fish_submit(),
            KeyCode::Backspace => {
                let mut value = self.new_fish.get(self.focus).to_string();
                value.pop();
                self.handle_fish_change(self.focus, value);
            }
            KeyCode::Char(c) => {
                let mut value = self.new_fish.get(self.focus).to_string();
                value.push(c);
                self.handle_fish_change(self.focus, value);
            }
            _ => {}
        }
    }

    fn on_modal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.close_modal(),
            KeyCode::Backspace => {
                self.modal_input.pop();
                self.handle_change_name(self.modal_input.clone());
            }
            KeyCode::Char(c) => {
                self.modal_input.push(c);
                self.handle_change_name(self.modal_input.clone());
            }
            _ => {}
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use std::sync::Mutex;

    /// Serves `page_len` synthetic fish per request and records the offsets asked for.
    pub(crate) struct FakeSource {
        pub(crate) requested: Mutex<Vec<u64>>,
        pub(crate) page_len: u64,
        pub(crate) fail: bool,
    }

    impl FakeSource {
        pub(crate) fn new(page_len: u64) -> Arc<Self> {
            Arc::new(Self {
                requested: Mutex::new(Vec::new()),
                page_len,
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                requested: Mutex::new(Vec::new()),
                page_len: 0,
                fail: true,
            })
        }
    }

    impl SpeciesSource for FakeSource {
        fn fetch_page(
            &self,
            offset: u64,
        ) -> BoxFuture<'static, Result<Vec<FishRecord>, FetchError>> {
            self.requested.lock().unwrap().push(offset);
            let fail = self.fail;
            let page: Vec<FishRecord> = (0..self.page_len)
                .map(|i| fish(offset + i + 1, &format!("species-{}", offset + i)))
                .collect();
            Box::pin(async move {
                if fail {
                    Err(FetchError::Decode(
                        serde_json::from_str::<u64>("not json").unwrap_err(),
                    ))
                } else {
                    Ok(page)
                }
            })
        }
    }

    pub(crate) fn fish(code: u64, species: &str) -> FishRecord {
        FishRecord {
            spec_code: Some(code),
            species: species.to_string(),
            ..FishRecord::default()
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.on_key(press(KeyCode::Char(c)));
        }
    }

    async fn settle(app: &mut App, rx: &mut UnboundedReceiver<PageLoad>) {
        let load = rx.recv().await.unwrap();
        app.receive_page(load);
    }

    #[tokio::test]
    async fn test_initial_fetch_loads_first_page() {
        let source = FakeSource::new(PAGE_SIZE);
        let (mut app, mut rx) = App::new(source.clone());

        app.fetch_fish();
        settle(&mut app, &mut rx).await;

        assert_eq!(*source.requested.lock().unwrap(), vec![0]);
        assert_eq!(app.fishes.len(), 10);
        assert_eq!(app.offset, 10);
    }

    #[tokio::test]
    async fn test_start_fetches_exactly_once() {
        let source = FakeSource::new(PAGE_SIZE);
        let (mut app, mut rx) = App::new(source.clone());

        app.start();
        settle(&mut app, &mut rx).await;
        tokio::task::yield_now().await;

        assert_eq!(*source.requested.lock().unwrap(), vec![0]);
        assert!(rx.try_recv().is_err());
        assert_eq!(app.fishes.len(), 10);
        assert_eq!(app.offset, 10);
    }

    #[tokio::test]
    async fn test_get_more_fish_appends_pages() {
        let source = FakeSource::new(PAGE_SIZE);
        let (mut app, mut rx) = App::new(source.clone());

        app.start();
        settle(&mut app, &mut rx).await;
        for _ in 0..2 {
            app.on_key(press(KeyCode::Char('m')));
            settle(&mut app, &mut rx).await;
        }

        assert_eq!(*source.requested.lock().unwrap(), vec![0, 10, 20]);
        assert_eq!(app.fishes.len(), 30);
        assert_eq!(app.fishes[0].spec_code, Some(1));
        assert_eq!(app.fishes[29].spec_code, Some(30));
    }

    #[tokio::test]
    async fn test_short_page_still_advances_offset() {
        let source = FakeSource::new(4);
        let (mut app, mut rx) = App::new(source.clone());

        app.fetch_fish();
        settle(&mut app, &mut rx).await;
        app.fetch_fish();
        settle(&mut app, &mut rx).await;

        assert_eq!(*source.requested.lock().unwrap(), vec![0, 10]);
        assert_eq!(app.fishes.len(), 8);
        assert_eq!(app.offset, 20);
    }

    #[tokio::test]
    async fn test_overlapping_fetches_duplicate_pages() {
        let source = FakeSource::new(PAGE_SIZE);
        let (mut app, mut rx) = App::new(source.clone());

        app.fetch_fish();
        app.fetch_fish();
        settle(&mut app, &mut rx).await;
        settle(&mut app, &mut rx).await;

        assert_eq!(*source.requested.lock().unwrap(), vec![0, 0]);
        assert_eq!(app.fishes.len(), 20);
        assert_eq!(app.fishes[0], app.fishes[10]);
        assert_eq!(app.offset, 20);
    }

    #[tokio::test]
    async fn test_failed_fetch_changes_nothing() {
        let (mut app, mut rx) = App::new(FakeSource::failing());
        app.fishes.push(fish(7, "kept"));

        app.fetch_fish();
        settle(&mut app, &mut rx).await;

        assert_eq!(app.fishes, vec![fish(7, "kept")]);
        assert_eq!(app.offset, 0);
    }

    #[test]
    fn test_delete_removes_all_matching() {
        let (mut app, _rx) = App::new(FakeSource::new(0));
        app.fishes = vec![fish(1, "a"), fish(2, "b"), fish(1, "a again"), fish(3, "c")];

        app.delete_fish(1);

        let codes: Vec<_> = app.fishes.iter().map(|f| f.spec_code).collect();
        assert_eq!(codes, vec![Some(2), Some(3)]);
    }

    #[test]
    fn test_delete_unknown_code_is_noop() {
        let (mut app, _rx) = App::new(FakeSource::new(0));
        app.fishes = vec![fish(1, "a"), fish(2, "b")];

        app.delete_fish(99);

        assert_eq!(app.fishes.len(), 2);
    }

    #[test]
    fn test_local_fish_cannot_be_deleted() {
        let (mut app, _rx) = App::new(FakeSource::new(0));
        app.fishes = vec![fish(1, "a")];
        app.handle_fish_change(DraftField::Species, "Clownfish".to_string());
        app.handle_fish_submit();

        // Delete from the local card: it carries no code to match on.
        app.selected = 1;
        app.on_key(press(KeyCode::Char('d')));
        assert_eq!(app.fishes.len(), 2);

        // No code deletes it either.
        for code in [0, 1, 2] {
            app.delete_fish(code);
        }
        assert_eq!(app.fishes.len(), 1);
        assert_eq!(app.fishes[0].species, "Clownfish");
        assert_eq!(app.fishes[0].spec_code, None);
    }

    #[test]
    fn test_delete_selected_clamps_cursor() {
        let (mut app, _rx) = App::new(FakeSource::new(0));
        app.fishes = vec![fish(1, "a"), fish(2, "b")];
        app.on_key(press(KeyCode::Down));
        assert_eq!(app.selected, 1);

        app.on_key(press(KeyCode::Char('d')));

        assert_eq!(app.fishes, vec![fish(1, "a")]);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_submit_appends_and_resets() {
        let (mut app, _rx) = App::new(FakeSource::new(0));
        app.navigate(Route::Create);
        app.handle_fish_change(DraftField::Species, "Clownfish".to_string());
        app.handle_fish_change(DraftField::Comments, "Orange".to_string());
        app.handle_fish_change(DraftField::Image, String::new());

        app.handle_fish_submit();

        assert_eq!(app.fishes.len(), 1);
        assert_eq!(app.fishes[0].species, "Clownfish");
        assert_eq!(app.fishes[0].comments.as_deref(), Some("Orange"));
        assert_eq!(app.fishes[0].image.as_deref(), Some(""));
        assert_eq!(app.new_fish, DraftFish::default());
        assert_eq!(app.route, Route::Listing);
    }

    #[test]
    fn test_form_keys_edit_focused_field() {
        let (mut app, _rx) = App::new(FakeSource::new(0));
        app.on_key(press(KeyCode::Char('2')));
        assert_eq!(app.route, Route::Create);

        type_text(&mut app, "Clownfishh");
        app.on_key(press(KeyCode::Backspace));
        app.on_key(press(KeyCode::Tab));
        type_text(&mut app, "Orange");
        assert_eq!(app.new_fish.species, "Clownfish");
        assert_eq!(app.new_fish.comments, "Orange");
        assert_eq!(app.focus, DraftField::Comments);

        app.on_key(press(KeyCode::Enter));

        assert_eq!(app.route, Route::Listing);
        assert_eq!(app.fishes.len(), 1);
        assert_eq!(app.fishes[0].image.as_deref(), Some(""));
        assert_eq!(app.new_fish, DraftFish::default());
    }

    #[test]
    fn test_name_updates_live() {
        let (mut app, _rx) = App::new(FakeSource::new(0));
        app.on_key(press(KeyCode::Char('l')));
        assert!(app.show_modal);

        for (c, expected) in "Ann".chars().zip(["A", "An", "Ann"]) {
            app.on_key(press(KeyCode::Char(c)));
            assert_eq!(app.name, expected);
            assert!(app.show_modal);
        }

        app.on_key(press(KeyCode::Esc));
        assert!(!app.show_modal);
        assert_eq!(app.name, "Ann");
    }

    #[test]
    fn test_modal_toggle_keeps_name_empty() {
        let (mut app, _rx) = App::new(FakeSource::new(0));

        app.open_modal();
        app.on_key(press(KeyCode::Enter));
        assert!(app.show_modal);
        app.close_modal();

        assert!(!app.show_modal);
        assert_eq!(app.name, "");
    }

    #[test]
    fn test_login_hidden_once_named() {
        let (mut app, _rx) = App::new(FakeSource::new(0));
        app.handle_change_name("Ann".to_string());

        app.on_key(press(KeyCode::Char('l')));

        assert!(!app.show_modal);
    }

    #[test]
    fn test_modal_input_starts_empty_on_reopen() {
        let (mut app, _rx) = App::new(FakeSource::new(0));
        app.open_modal();
        type_text(&mut app, "Ax");
        app.on_key(press(KeyCode::Backspace));
        assert_eq!(app.name, "A");
        app.close_modal();
        app.handle_change_name(String::new());

        app.open_modal();
        type_text(&mut app, "B");

        assert_eq!(app.modal_input, "B");
        assert_eq!(app.name, "B");
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _rx) = App::new(FakeSource::new(0));
        app.navigate(Route::Create);
        type_text(&mut app, "q");
        assert!(!app.should_quit);

        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
