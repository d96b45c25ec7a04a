//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The view models
//! in tracker-core own the data; these fields mirror what they publish.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Product, RefreshStatus, RowId, Screen, Subject, SubjectSummary, Topic};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Store)]
pub struct AppState {
    pub screen: Screen,
    /// Subjects, newest first
    pub subjects: Vec<Subject>,
    pub subjects_loading: bool,
    /// Subject whose topics are listed
    pub selected_subject: Option<RowId>,
    /// Topics of the selected subject
    pub topics: Vec<Topic>,
    /// Add-topic modal
    pub topic_form_open: bool,
    pub products: Vec<Product>,
    pub summaries: Vec<SubjectSummary>,
    pub dashboard_loading: bool,
    pub dashboard_error: Option<String>,
    pub dashboard_status: RefreshStatus,
    pub pause_secs: u32,
}

impl AppState {
    pub fn new(pause_secs: u32) -> Self {
        Self {
            screen: Screen::default(),
            subjects: Vec::new(),
            subjects_loading: false,
            selected_subject: None,
            topics: Vec::new(),
            topic_form_open: false,
            products: Vec::new(),
            summaries: Vec::new(),
            dashboard_loading: false,
            dashboard_error: None,
            dashboard_status: RefreshStatus::Stopped,
            pause_secs,
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_subjects(store: &AppStore, subjects: &[Subject]) {
    store.subjects().set(subjects.to_vec());
}

pub fn store_set_subjects_loading(store: &AppStore, loading: bool) {
    store.subjects_loading().set(loading);
}

pub fn store_select_subject(store: &AppStore, subject_id: Option<RowId>) {
    store.selected_subject().set(subject_id);
}

pub fn store_set_topics(store: &AppStore, topics: &[Topic]) {
    store.topics().set(topics.to_vec());
}

pub fn store_set_topic_form_open(store: &AppStore, open: bool) {
    store.topic_form_open().set(open);
}

pub fn store_set_products(store: &AppStore, products: &[Product]) {
    store.products().set(products.to_vec());
}

pub fn store_set_summaries(store: &AppStore, summaries: &[SubjectSummary]) {
    store.summaries().set(summaries.to_vec());
}

pub fn store_set_dashboard_loading(store: &AppStore, loading: bool) {
    store.dashboard_loading().set(loading);
}

pub fn store_set_dashboard_error(store: &AppStore, error: Option<String>) {
    store.dashboard_error().set(error);
}

pub fn store_set_dashboard_status(store: &AppStore, status: RefreshStatus) {
    store.dashboard_status().set(status);
}

pub fn store_set_screen(store: &AppStore, screen: Screen) {
    store.screen().set(screen);
}

// ========================
// Store Readers
// ========================

pub fn store_screen(store: &AppStore) -> Screen {
    store.screen().get()
}

pub fn store_subjects(store: &AppStore) -> Vec<Subject> {
    store.subjects().get()
}

pub fn store_subjects_loading(store: &AppStore) -> bool {
    store.subjects_loading().get()
}

pub fn store_selected_subject(store: &AppStore) -> Option<RowId> {
    store.selected_subject().get()
}

pub fn store_topics(store: &AppStore) -> Vec<Topic> {
    store.topics().get()
}

pub fn store_topic_form_open(store: &AppStore) -> bool {
    store.topic_form_open().get()
}

pub fn store_products(store: &AppStore) -> Vec<Product> {
    store.products().get()
}

pub fn store_summaries(store: &AppStore) -> Vec<SubjectSummary> {
    store.summaries().get()
}

pub fn store_dashboard_loading(store: &AppStore) -> bool {
    store.dashboard_loading().get()
}

pub fn store_dashboard_error(store: &AppStore) -> Option<String> {
    store.dashboard_error().get()
}

pub fn store_dashboard_status(store: &AppStore) -> RefreshStatus {
    store.dashboard_status().get()
}

pub fn store_pause_secs(store: &AppStore) -> u32 {
    store.pause_secs().get()
}
