//! The product list client: loaded state, pagination, CRUD reflection, and
//! debounced search.
//!
//! # Design
//! `ProductListClient` owns a [`ClientState`], a [`Transport`] and a
//! [`RenderPort`]. Each user action is one method (or one [`Command`] through
//! [`ProductListClient::dispatch`]). Every method catches its own failure:
//! the view gets a short [`Notice`], the log gets the full error, and the
//! caller gets a `ClientError` it is free to ignore. Nothing is retried.
//!
//! Creating a product only prepends it to the view. The loaded `items` are
//! left alone, so paging forward can show a freshly created product twice
//! if the server also returns it in a later page.
//!
//! Searches carry a generation stamp. Any later search input, search, or
//! load moves the generation on, and a response stamped with an older
//! generation is dropped instead of rendered.

use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::client::PostsClient;
use crate::debounce::Debouncer;
use crate::error::{ClientError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::pagination::{page_slice, PAGE_SIZE};
use crate::transport::Transport;
use crate::types::{NewProduct, Product, ProductUpdate};
use crate::view::{Notice, Prompter, RenderPort};

const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this product?";

/// What an operation ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation ran and the view reflects it.
    Applied,
    /// The user cancelled a prompt or confirmation; nothing was sent.
    Aborted,
    /// A search response arrived after a newer search or load and was dropped.
    Superseded,
    /// Search input was queued behind the debounce delay.
    Scheduled,
}

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load,
    LoadMore,
    Create { title: String, body: String },
    Edit(Product),
    Delete(u64),
    SearchInput(String),
}

/// Loaded products and the pagination cursor.
#[derive(Debug, Clone)]
pub struct ClientState {
    items: Vec<Product>,
    current_page: usize,
    page_size: usize,
}

impl ClientState {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            page_size,
        }
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Items on 1-based `page`.
    pub fn page(&self, page: usize) -> &[Product] {
        page_slice(&self.items, page, self.page_size)
    }

    pub fn current_items(&self) -> &[Product] {
        self.page(self.current_page)
    }

    fn replace(&mut self, items: Vec<Product>) {
        self.items = items;
        self.current_page = 1;
    }
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

/// A search that has been started but whose response has not been applied.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    generation: u64,
    query: String,
    request: HttpRequest,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }
}

pub struct ProductListClient<T, R> {
    posts: PostsClient,
    transport: T,
    view: R,
    state: ClientState,
    search_input: Debouncer<String>,
    search_generation: u64,
}

impl<T: Transport, R: RenderPort> ProductListClient<T, R> {
    pub fn new(posts: PostsClient, transport: T, view: R) -> Self {
        Self {
            posts,
            transport,
            view,
            state: ClientState::default(),
            search_input: Debouncer::default(),
            search_generation: 0,
        }
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.search_input = Debouncer::new(delay);
        self
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn view(&self) -> &R {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut R {
        &mut self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the whole collection, replace the loaded items, and show page 1.
    pub fn load_all(&mut self) -> Result<Outcome, ClientError> {
        let request = self.posts.build_list_products();
        let items = match self
            .round_trip(request)
            .and_then(|response| Ok(self.posts.parse_list_products(response)?))
        {
            Ok(items) => items,
            Err(err) => return Err(self.fail("load", Notice::LoadFailed, err)),
        };

        info!(count = items.len(), "loaded products");
        self.state.replace(items);
        self.search_generation += 1;
        self.view.render(self.state.current_items());
        Ok(Outcome::Applied)
    }

    /// Move to the next page and append its items below what is shown.
    ///
    /// Past the last page this appends nothing but still advances the cursor.
    pub fn advance_page(&mut self) -> Outcome {
        self.state.current_page += 1;
        let page = self.state.current_items();
        debug!(page = self.state.current_page, count = page.len(), "appending page");
        self.view.append(page);
        Outcome::Applied
    }

    /// Create a product and show it at the top of the list.
    pub fn create(&mut self, title: &str, body: &str) -> Result<Outcome, ClientError> {
        let missing = if title.is_empty() {
            Some("title")
        } else if body.is_empty() {
            Some("body")
        } else {
            None
        };
        if let Some(field) = missing {
            warn!(field, "refusing to create product with empty field");
            self.view.notify(Notice::MissingFields);
            return Err(ClientError::Validation { field });
        }

        let created = match self.send_create(&NewProduct::new(title, body)) {
            Ok(product) => product,
            Err(err) => return Err(self.fail("create", Notice::AddFailed, err)),
        };

        info!(id = created.id, "created product");
        self.view.notify(Notice::Added);
        self.view.prepend(&created);
        self.view.clear_form();
        Ok(Outcome::Applied)
    }

    /// Ask for a new title and body, then replace `product` on the server and
    /// in the view.
    pub fn edit(&mut self, product: &Product, prompter: &mut dyn Prompter) -> Result<Outcome, ClientError> {
        let title = prompter.prompt("Enter new title:", &product.title);
        let body = prompter.prompt("Enter new body:", &product.body);
        let (Some(title), Some(body)) = (title, body) else {
            debug!(id = product.id, "edit cancelled");
            return Ok(Outcome::Aborted);
        };
        if title.is_empty() || body.is_empty() {
            debug!(id = product.id, "edit left a field empty");
            return Ok(Outcome::Aborted);
        }

        let update = ProductUpdate::replacing(product, title, body);
        let updated = match self.send_update(&update) {
            Ok(product) => product,
            Err(err) => return Err(self.fail("update", Notice::UpdateFailed, err)),
        };

        info!(id = product.id, "updated product");
        if let Some(slot) = self.state.items.iter_mut().find(|p| p.id == product.id) {
            *slot = updated.clone();
        }
        self.view.notify(Notice::Updated);
        self.view.patch(product.id, &updated);
        Ok(Outcome::Applied)
    }

    /// Delete a product after the user confirms.
    ///
    /// The loaded items are left alone so page boundaries do not shift under
    /// additive pagination.
    pub fn remove(&mut self, id: u64, prompter: &mut dyn Prompter) -> Result<Outcome, ClientError> {
        if !prompter.confirm(DELETE_CONFIRMATION) {
            debug!(id, "delete not confirmed");
            return Ok(Outcome::Aborted);
        }

        let request = self.posts.build_delete_product(id);
        if let Err(err) = self
            .round_trip(request)
            .and_then(|response| Ok(self.posts.parse_delete_product(response)?))
        {
            return Err(self.fail("delete", Notice::DeleteFailed, err));
        }

        info!(id, "deleted product");
        self.view.remove(id);
        self.view.notify(Notice::Deleted);
        Ok(Outcome::Applied)
    }

    /// Run a search immediately and apply its result.
    pub fn search(&mut self, query: &str) -> Result<Outcome, ClientError> {
        let Some(ticket) = self.begin_search(query) else {
            return Ok(Outcome::Applied);
        };
        let result = self.transport.execute(ticket.request.clone());
        self.finish_search(ticket, result)
    }

    /// Start a search whose round-trip the caller performs.
    ///
    /// A blank query restores page 1 of the loaded items on the spot and
    /// returns `None`.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        self.search_generation += 1;
        let query = query.trim();
        if query.is_empty() {
            debug!("blank search, restoring first page");
            self.state.current_page = 1;
            self.view.render(self.state.current_items());
            return None;
        }

        let request = self.posts.build_search_products(query);
        debug!(query, generation = self.search_generation, "starting search");
        Some(SearchTicket {
            generation: self.search_generation,
            query: query.to_string(),
            request,
        })
    }

    /// Apply the response to `ticket`, unless a newer search or load has
    /// happened since it was issued.
    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<Outcome, ClientError> {
        if ticket.generation != self.search_generation {
            debug!(
                query = %ticket.query,
                generation = ticket.generation,
                current = self.search_generation,
                "dropping stale search response"
            );
            return Ok(Outcome::Superseded);
        }

        let found = match result
            .map_err(ClientError::from)
            .and_then(|response| Ok(self.posts.parse_search_products(response)?))
        {
            Ok(found) => found,
            Err(err) => return Err(self.fail("search", Notice::SearchFailed, err)),
        };

        let shown = found.len().min(self.state.page_size);
        debug!(query = %ticket.query, found = found.len(), shown, "search results");
        self.view.render(&found[..shown]);
        Ok(Outcome::Applied)
    }

    /// Record a change to the search box. The search itself runs from
    /// [`poll`](Self::poll) once the input has been quiet long enough.
    pub fn on_search_input(&mut self, text: impl Into<String>, now: Instant) {
        self.search_generation += 1;
        self.search_input.schedule(text.into(), now);
    }

    /// Run the debounced search if it is due.
    pub fn poll(&mut self, now: Instant) -> Option<Result<Outcome, ClientError>> {
        let query = self.search_input.fire(now)?;
        Some(self.search(&query))
    }

    /// When the host should next call [`poll`](Self::poll).
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.search_input.deadline()
    }

    pub fn dispatch(
        &mut self,
        command: Command,
        prompter: &mut dyn Prompter,
        now: Instant,
    ) -> Result<Outcome, ClientError> {
        match command {
            Command::Load => self.load_all(),
            Command::LoadMore => Ok(self.advance_page()),
            Command::Create { title, body } => self.create(&title, &body),
            Command::Edit(product) => self.edit(&product, prompter),
            Command::Delete(id) => self.remove(id, prompter),
            Command::SearchInput(text) => {
                self.on_search_input(text, now);
                Ok(Outcome::Scheduled)
            }
        }
    }

    fn send_create(&mut self, input: &NewProduct) -> Result<Product, ClientError> {
        let request = self.posts.build_create_product(input)?;
        let response = self.round_trip(request)?;
        Ok(self.posts.parse_create_product(response)?)
    }

    fn send_update(&mut self, input: &ProductUpdate) -> Result<Product, ClientError> {
        let request = self.posts.build_update_product(input)?;
        let response = self.round_trip(request)?;
        Ok(self.posts.parse_update_product(response)?)
    }

    fn round_trip(&mut self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }

    fn fail(&mut self, operation: &'static str, notice: Notice, err: ClientError) -> ClientError {
        error!(operation, error = %err, detail = ?err, "operation failed");
        self.view.notify(notice);
        err
    }
}
