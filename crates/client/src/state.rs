//! Headless state of the locations page.
//!
//! Holds what a UI renders (current list, pagination, filters, dialog, error)
//! and performs the API calls behind each user action. Rendering is left to
//! whatever front end drives this type.

use locatr_shared::{LocationData, LocationQuery, PageLinks, PageMeta, DEFAULT_PER_PAGE};

use crate::client::LocationClient;
use crate::error::ClientError;
use crate::form::{FormErrors, LocationForm};

pub struct LocationsPage {
    client: LocationClient,

    name_filter: String,
    code_filter: String,
    page: u32,
    per_page: u32,

    locations: Vec<LocationData>,
    meta: Option<PageMeta>,
    links: Option<PageLinks>,

    dialog_open: bool,
    editing: Option<LocationData>,
    form_errors: FormErrors,

    error: Option<String>,
    loading: bool,
}

impl LocationsPage {
    pub fn new(client: LocationClient) -> Self {
        Self {
            client,
            name_filter: String::new(),
            code_filter: String::new(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            locations: Vec::new(),
            meta: None,
            links: None,
            dialog_open: false,
            editing: None,
            form_errors: FormErrors::new(),
            error: None,
            loading: false,
        }
    }

    // Read accessors

    pub fn locations(&self) -> &[LocationData] {
        &self.locations
    }

    pub fn meta(&self) -> Option<&PageMeta> {
        self.meta.as_ref()
    }

    pub fn links(&self) -> Option<&PageLinks> {
        self.links.as_ref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn name_filter(&self) -> &str {
        &self.name_filter
    }

    pub fn code_filter(&self) -> &str {
        &self.code_filter
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    /// The location being edited; `None` while creating.
    pub fn editing(&self) -> Option<&LocationData> {
        self.editing.as_ref()
    }

    pub fn form_errors(&self) -> &FormErrors {
        &self.form_errors
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the page should show its empty-state hint.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty() && !self.loading
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // Listing

    fn query(&self) -> LocationQuery {
        let mut query = LocationQuery::default()
            .with_page(self.page)
            .with_per_page(self.per_page);
        if !self.name_filter.trim().is_empty() {
            query = query.with_name(self.name_filter.trim());
        }
        if !self.code_filter.trim().is_empty() {
            query = query.with_code(self.code_filter.trim());
        }
        query
    }

    /// Reload the current page. Returns false (and records the error) on failure.
    pub async fn refresh(&mut self) -> bool {
        self.begin();
        match self.client.list(&self.query()).await {
            Ok(list) => {
                self.locations = list.data;
                self.meta = Some(list.meta);
                self.links = Some(list.links);
                self.loading = false;
                true
            }
            Err(e) => self.fail(e),
        }
    }

    /// Changing a filter always returns to the first page.
    pub async fn set_name_filter(&mut self, name: impl Into<String>) -> bool {
        self.name_filter = name.into();
        self.page = 1;
        self.refresh().await
    }

    pub async fn set_code_filter(&mut self, code: impl Into<String>) -> bool {
        self.code_filter = code.into();
        self.page = 1;
        self.refresh().await
    }

    pub async fn clear_filters(&mut self) -> bool {
        self.name_filter.clear();
        self.code_filter.clear();
        self.page = 1;
        self.refresh().await
    }

    pub async fn set_per_page(&mut self, per_page: u32) -> bool {
        self.per_page = per_page;
        self.page = 1;
        self.refresh().await
    }

    pub async fn go_to_page(&mut self, page: u32) -> bool {
        self.page = page.max(1);
        self.refresh().await
    }

    /// No-op (returns false) on the last page.
    pub async fn next_page(&mut self) -> bool {
        match self.meta {
            Some(meta) if meta.current_page < meta.total_pages => {
                self.go_to_page(meta.current_page + 1).await
            }
            _ => false,
        }
    }

    /// No-op (returns false) on the first page.
    pub async fn prev_page(&mut self) -> bool {
        match self.meta {
            Some(meta) if meta.current_page > 1 => self.go_to_page(meta.current_page - 1).await,
            _ => false,
        }
    }

    // Dialog

    /// Open the dialog with an empty form.
    pub fn open_create(&mut self) -> LocationForm {
        self.editing = None;
        self.form_errors.clear();
        self.dialog_open = true;
        LocationForm::default()
    }

    /// Open the dialog prefilled with `location`.
    pub fn open_edit(&mut self, location: LocationData) -> LocationForm {
        let form = LocationForm::from_location(&location);
        self.editing = Some(location);
        self.form_errors.clear();
        self.dialog_open = true;
        form
    }

    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
        self.editing = None;
        self.form_errors.clear();
    }

    /// Validate `form` and create or update depending on the dialog mode.
    ///
    /// On success the dialog closes and the list is reloaded. Invalid input
    /// or a rejected request keeps the dialog open.
    pub async fn save(&mut self, form: &LocationForm) -> bool {
        let payload = match form.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                self.form_errors = errors;
                return false;
            }
        };
        self.form_errors.clear();

        self.begin();
        let result = match &self.editing {
            Some(location) => self.client.update(location.id, &payload).await,
            None => self.client.create(&payload).await,
        };

        match result {
            Ok(_) => {
                self.loading = false;
                self.close_dialog();
                self.refresh().await
            }
            Err(e) => self.fail(e),
        }
    }

    /// Delete and reload. The caller is responsible for confirming first.
    pub async fn delete(&mut self, id: i64) -> bool {
        self.begin();
        match self.client.delete(id).await {
            Ok(()) => {
                self.loading = false;
                self.refresh().await
            }
            Err(e) => self.fail(e),
        }
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fail(&mut self, err: ClientError) -> bool {
        tracing::warn!(error = %err, "Location request failed");
        self.error = Some(err.display_message());
        self.loading = false;
        false
    }
}
